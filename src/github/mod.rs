pub mod client;
pub mod handle;
pub mod source;

pub use client::GitHubClient;
pub use handle::extract_handle;
pub use source::PortfolioSource;
