pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;
pub mod render;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubClient, PortfolioSource};
pub use analysis::{AnalysisPipeline, FeedbackEngine, ScoringEngine};
