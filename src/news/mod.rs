mod client;
mod fetcher;

pub use fetcher::HeadlineFetcher;

#[cfg(test)]
pub(crate) use fetcher::testing;
