mod client;
#[cfg(test)]
pub(crate) mod test_server;

pub use client::{is_missing, Downloader};
