mod category;
mod headline;
mod preference;
mod summary;
mod user;

pub use category::Category;
pub use headline::Headline;
pub use preference::{PreferenceRecord, SummaryEvent};
pub use summary::{Summary, SummaryModel};
pub use user::{Region, UserIdentity};
