use std::sync::Arc;
use chrono::Utc;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analysis::feedback::FeedbackEngine;
use crate::analysis::scoring::{PrefetchedReadmes, ScoringEngine};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::github::{extract_handle, PortfolioSource};
use crate::models::{PortfolioAnalysis, RepositoryRecord};

pub struct AnalysisPipeline {
    source: Arc<dyn PortfolioSource>,
    scoring_engine: ScoringEngine,
    feedback_engine: FeedbackEngine,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(source: impl PortfolioSource + 'static, config: PipelineConfig) -> Self {
        Self {
            source: Arc::new(source),
            scoring_engine: ScoringEngine::new(),
            feedback_engine: FeedbackEngine::new(),
            config,
        }
    }

    /// Runs one analysis for a profile URL or bare handle.
    pub async fn analyze(&self, input: &str) -> Result<PortfolioAnalysis> {
        let handle = extract_handle(input)?;

        // Step 1: Profile; nothing is reported without it
        tracing::info!("Fetching GitHub profile for: {}", handle);
        let profile = self
            .source
            .fetch_profile(&handle)
            .await
            .ok_or_else(|| Error::UserNotFound(handle.clone()))?;

        // Step 2: First page of repositories
        tracing::info!("Fetching repositories...");
        let repos = self.source.list_repositories(&handle).await;
        tracing::info!("Found {} repositories to score", repos.len());

        // Step 3: Readme probes
        let readmes = self.fetch_readmes(&repos).await;
        tracing::info!("{} repositories have a readme", readmes.len());

        // Step 4: Score and derive feedback
        let analysis_date = Utc::now();
        let report = self
            .scoring_engine
            .score_at(&profile, &repos, &readmes, analysis_date);
        let feedback = self.feedback_engine.evaluate(&report, repos.len());

        tracing::info!(
            "Scored {}: {}/100 ({})",
            profile.login,
            report.total,
            report.verdict()
        );

        Ok(PortfolioAnalysis::new(
            profile,
            repos.len(),
            report,
            feedback,
            analysis_date,
        ))
    }

    /// Probes run concurrently up to the configured limit; `join_all` keeps
    /// results in repository order.
    async fn fetch_readmes(&self, repos: &[RepositoryRecord]) -> PrefetchedReadmes {
        let semaphore = Semaphore::new(self.config.concurrency_limit.max(1));
        let pb = self.progress_bar(repos.len() as u64);

        let probes = repos.iter().map(|repo| {
            let semaphore = &semaphore;
            let pb = &pb;
            async move {
                let _permit = semaphore.acquire().await.ok()?;
                let text = self
                    .source
                    .fetch_readme(&repo.owner.login, &repo.name)
                    .await;
                pb.inc(1);
                text
            }
        });

        let results = join_all(probes).await;
        pb.finish_and_clear();

        let mut readmes = PrefetchedReadmes::new();
        for (repo, text) in repos.iter().zip(results) {
            if let Some(text) = text {
                readmes.insert(&repo.owner.login, &repo.name, text);
            }
        }
        readmes
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} readmes")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!("Progress template rejected: {}", e),
        }
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scoring::tests::{profile, repo};
    use crate::models::{RedFlag, UserProfile, Verdict};
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeSource {
        profile: Option<UserProfile>,
        repos: Vec<RepositoryRecord>,
        readmes: HashMap<String, String>,
        probes: AtomicUsize,
        listed: AtomicUsize,
    }

    #[async_trait]
    impl PortfolioSource for FakeSource {
        async fn fetch_profile(&self, handle: &str) -> Option<UserProfile> {
            self.profile.clone().filter(|p| p.login == handle)
        }

        async fn list_repositories(&self, _handle: &str) -> Vec<RepositoryRecord> {
            self.listed.fetch_add(1, Ordering::SeqCst);
            self.repos.clone()
        }

        async fn fetch_readme(&self, _owner: &str, repo: &str) -> Option<String> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.readmes.get(repo).cloned()
        }
    }

    fn quiet(concurrency_limit: usize) -> PipelineConfig {
        PipelineConfig {
            concurrency_limit,
            show_progress: false,
        }
    }

    #[tokio::test]
    async fn absent_profile_is_terminal() {
        let source = Arc::new(FakeSource::default());
        let pipeline = AnalysisPipeline {
            source: source.clone(),
            scoring_engine: ScoringEngine::new(),
            feedback_engine: FeedbackEngine::new(),
            config: quiet(2),
        };

        let result = pipeline.analyze("https://github.com/ghost").await;
        assert!(matches!(result, Err(Error::UserNotFound(ref h)) if h == "ghost"));
        assert_eq!(source.listed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let pipeline = AnalysisPipeline::new(FakeSource::default(), quiet(2));
        assert!(matches!(
            pipeline.analyze("  ").await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn missing_repositories_still_produce_a_report() {
        let source = FakeSource {
            profile: Some(profile()),
            ..Default::default()
        };
        let analysis = AnalysisPipeline::new(source, quiet(2))
            .analyze("octocat")
            .await
            .unwrap();

        assert_eq!(analysis.repository_count, 0);
        assert_eq!(analysis.report.total, 0);
        assert_eq!(analysis.verdict, Verdict::NeedsImprovement);
        assert_eq!(analysis.feedback.suggestions.len(), 6);
        assert!(!analysis
            .feedback
            .red_flags
            .contains(&RedFlag::LimitedTechnologyDiversity));
    }

    #[tokio::test]
    async fn readmes_are_probed_once_per_repository_and_merged() {
        let recent = Utc::now() - Duration::days(3);
        let repos: Vec<_> = ["alpha", "beta", "gamma", "delta"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| RepositoryRecord {
                language: Some(if i % 2 == 0 { "Rust" } else { "Go" }.to_string()),
                stargazers_count: i as u32,
                updated_at: recent,
                ..repo(name)
            })
            .collect();
        let readmes = HashMap::from([
            ("alpha".to_string(), "Usage and features".to_string()),
            ("gamma".to_string(), "installation".to_string()),
        ]);
        let source = Arc::new(FakeSource {
            profile: Some(profile()),
            repos,
            readmes,
            ..Default::default()
        });
        let pipeline = AnalysisPipeline {
            source: source.clone(),
            scoring_engine: ScoringEngine::new(),
            feedback_engine: FeedbackEngine::new(),
            config: quiet(3),
        };

        let analysis = pipeline.analyze("octocat").await.unwrap();
        assert_eq!(source.probes.load(Ordering::SeqCst), 4);
        assert_eq!(analysis.report.readme_count, 2);
        assert_eq!(analysis.report.scores.documentation, 3);
        assert_eq!(analysis.report.recent_activity, 4);
        assert_eq!(analysis.report.scores.activity, 10);
        assert_eq!(analysis.report.scores.technical_depth, 10);
        let top: Vec<_> = analysis
            .report
            .top_repositories
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(top, vec!["delta", "gamma", "beta"]);
        assert!(analysis.summary.contains("experience in Go, Rust."));
    }
}
