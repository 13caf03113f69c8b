mod category_resolver;
mod preference_api;

pub use category_resolver::CategoryResolver;
pub use preference_api::{PreferenceApiClient, RemotePreferenceStore};

#[cfg(test)]
pub(crate) use category_resolver::testing;
