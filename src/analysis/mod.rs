pub mod pipeline;
pub mod scoring;
pub mod feedback;

pub use pipeline::AnalysisPipeline;
pub use scoring::{PrefetchedReadmes, ReadmeLookup, ScoringEngine};
pub use feedback::FeedbackEngine;
