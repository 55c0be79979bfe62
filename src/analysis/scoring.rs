use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeSet, HashMap};

use crate::models::report::{CategoryScores, RankedRepository, ScoreReport, CATEGORY_MAX};
use crate::models::user::{RepositoryRecord, UserProfile};

/// Six months, counted as 6 x 30 days.
pub const ACTIVITY_WINDOW_DAYS: i64 = 180;

/// Readmes longer than this many characters earn the length bonus.
pub const README_LENGTH_THRESHOLD: usize = 300;

pub const README_KEYWORDS: [&str; 3] = ["installation", "usage", "features"];

pub const TOP_REPOSITORY_COUNT: usize = 3;

/// Supplies readme text for a repository, or `None` when it has none.
pub trait ReadmeLookup {
    fn readme(&self, owner: &str, name: &str) -> Option<String>;
}

impl<F> ReadmeLookup for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn readme(&self, owner: &str, name: &str) -> Option<String> {
        self(owner, name)
    }
}

/// Readmes fetched ahead of scoring, keyed by `(owner, name)`.
#[derive(Debug, Clone, Default)]
pub struct PrefetchedReadmes {
    texts: HashMap<(String, String), String>,
}

impl PrefetchedReadmes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, owner: &str, name: &str, text: String) {
        self.texts.insert((owner.to_string(), name.to_string()), text);
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl ReadmeLookup for PrefetchedReadmes {
    fn readme(&self, owner: &str, name: &str) -> Option<String> {
        self.texts
            .get(&(owner.to_string(), name.to_string()))
            .cloned()
    }
}

/// Running totals of one pass over the repositories.
#[derive(Debug, Default)]
struct Tally {
    documentation: u32,
    readme_count: u32,
    recent_activity: u32,
    repository_quality: u32,
    languages: BTreeSet<String>,
    stars: u64,
    forks: u64,
    ranked: Vec<RankedRepository>,
}

impl Tally {
    fn add(
        mut self,
        repo: &RepositoryRecord,
        readmes: &dyn ReadmeLookup,
        cutoff: DateTime<Utc>,
    ) -> Self {
        let readme = readmes
            .readme(&repo.owner.login, &repo.name)
            .filter(|text| !text.is_empty());
        if let Some(text) = readme {
            self.readme_count += 1;
            self.documentation += readme_points(&text);
        }

        if repo.updated_at > cutoff {
            self.recent_activity += 1;
        }

        self.repository_quality += u32::from(repo.has_description())
            + u32::from(repo.license.is_some())
            + u32::from(!repo.topics.is_empty());

        if let Some(language) = repo.primary_language() {
            self.languages.insert(language.to_string());
        }

        self.stars += repo.stargazers_count as u64;
        self.forks += repo.forks_count as u64;
        self.ranked.push(RankedRepository {
            name: repo.name.clone(),
            impact: repo.impact(),
        });

        self
    }
}

/// Points a single readme contributes to Documentation.
pub fn readme_points(text: &str) -> u32 {
    let mut points = 0;
    if text.chars().count() > README_LENGTH_THRESHOLD {
        points += 2;
    }
    let lowered = text.to_lowercase();
    points += README_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count() as u32;
    points
}

pub fn activity_tier(recent_active: u32) -> u8 {
    match recent_active {
        n if n > 10 => 20,
        n if n > 5 => 15,
        n if n > 2 => 10,
        n if n > 0 => 5,
        _ => 0,
    }
}

pub fn technical_depth_tier(language_count: usize) -> u8 {
    match language_count {
        n if n >= 5 => 20,
        n if n >= 3 => 15,
        2 => 10,
        1 => 5,
        _ => 0,
    }
}

pub fn impact_tier(total_impact: u64) -> u8 {
    match total_impact {
        n if n > 100 => 20,
        n if n > 50 => 15,
        n if n > 10 => 10,
        n if n > 0 => 5,
        _ => 0,
    }
}

fn clamp_category(raw: u32) -> u8 {
    raw.min(CATEGORY_MAX as u32) as u8
}

/// Highest impact first; ties keep their original order.
pub fn rank_repositories(mut ranked: Vec<RankedRepository>) -> Vec<RankedRepository> {
    ranked.sort_by(|a, b| b.impact.cmp(&a.impact));
    ranked.truncate(TOP_REPOSITORY_COUNT);
    ranked
}

/// Pure rubric: no network access, no shared state.
pub struct ScoringEngine {
    activity_window: Duration,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            activity_window: Duration::days(ACTIVITY_WINDOW_DAYS),
        }
    }

    pub fn score(
        &self,
        profile: &UserProfile,
        repositories: &[RepositoryRecord],
        readmes: &dyn ReadmeLookup,
    ) -> ScoreReport {
        self.score_at(profile, repositories, readmes, Utc::now())
    }

    /// Scores against an explicit reference instant.
    pub fn score_at(
        &self,
        profile: &UserProfile,
        repositories: &[RepositoryRecord],
        readmes: &dyn ReadmeLookup,
        now: DateTime<Utc>,
    ) -> ScoreReport {
        let cutoff = now - self.activity_window;
        tracing::debug!(
            "Scoring {} repositories for {} (active after {})",
            repositories.len(),
            profile.login,
            cutoff
        );

        let tally = repositories
            .iter()
            .fold(Tally::default(), |tally, repo| tally.add(repo, readmes, cutoff));

        let scores = CategoryScores {
            documentation: clamp_category(tally.documentation),
            activity: activity_tier(tally.recent_activity),
            repository_quality: clamp_category(tally.repository_quality),
            technical_depth: technical_depth_tier(tally.languages.len()),
            impact: impact_tier(tally.stars + tally.forks),
        };

        ScoreReport {
            total: scores.total(),
            scores,
            languages: tally.languages,
            readme_count: tally.readme_count,
            recent_activity: tally.recent_activity,
            top_repositories: rank_repositories(tally.ranked),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
