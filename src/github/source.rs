use async_trait::async_trait;

use crate::models::{RepositoryRecord, UserProfile};

/// Where profile data comes from. Implementations never fail: every error
/// degrades to an absent profile, an empty list or a missing readme.
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    async fn fetch_profile(&self, handle: &str) -> Option<UserProfile>;
    async fn list_repositories(&self, handle: &str) -> Vec<RepositoryRecord>;
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Option<String>;
}
