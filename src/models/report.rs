use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::user::UserProfile;

/// Upper bound of every category score.
pub const CATEGORY_MAX: u8 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Documentation,
    Activity,
    RepositoryQuality,
    TechnicalDepth,
    Impact,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Documentation,
        Category::Activity,
        Category::RepositoryQuality,
        Category::TechnicalDepth,
        Category::Impact,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Documentation => write!(f, "Documentation"),
            Category::Activity => write!(f, "Activity"),
            Category::RepositoryQuality => write!(f, "Repository Quality"),
            Category::TechnicalDepth => write!(f, "Technical Depth"),
            Category::Impact => write!(f, "Impact"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryScores {
    pub documentation: u8,
    pub activity: u8,
    pub repository_quality: u8,
    pub technical_depth: u8,
    pub impact: u8,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Documentation => self.documentation,
            Category::Activity => self.activity,
            Category::RepositoryQuality => self.repository_quality,
            Category::TechnicalDepth => self.technical_depth,
            Category::Impact => self.impact,
        }
    }

    pub fn total(&self) -> u8 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedRepository {
    pub name: String,
    pub impact: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scores: CategoryScores,
    pub total: u8,
    pub languages: BTreeSet<String>,
    pub readme_count: u32,
    pub recent_activity: u32,
    pub top_repositories: Vec<RankedRepository>,
}

impl ScoreReport {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_total(self.total)
    }

    pub fn language_list(&self) -> String {
        self.languages.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    HireReady,
    AlmostThere,
    NeedsImprovement,
}

impl Verdict {
    pub fn from_total(total: u8) -> Self {
        match total {
            t if t >= 80 => Verdict::HireReady,
            t if t >= 60 => Verdict::AlmostThere,
            _ => Verdict::NeedsImprovement,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::HireReady => write!(f, "Hire Ready"),
            Verdict::AlmostThere => write!(f, "Almost There"),
            Verdict::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(into = "String")]
pub enum Suggestion {
    StructureReadme,
    IncreaseActivity,
    AddRepositoryMetadata,
    DiversifyTechnologies,
    ShareProjects,
    AddProjects,
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Suggestion::StructureReadme => {
                "Improve README structure with Installation, Usage, and Features sections."
            }
            Suggestion::IncreaseActivity => {
                "Increase commit consistency. Recruiters value active contributors."
            }
            Suggestion::AddRepositoryMetadata => {
                "Add descriptions, topics, and licenses to repositories."
            }
            Suggestion::DiversifyTechnologies => {
                "Build projects using diverse technologies (APIs, databases, deployment)."
            }
            Suggestion::ShareProjects => {
                "Deploy and share projects to gain visibility and real-world traction."
            }
            Suggestion::AddProjects => {
                "Add more high-quality projects to strengthen your portfolio."
            }
        };
        f.write_str(text)
    }
}

impl From<Suggestion> for String {
    fn from(suggestion: Suggestion) -> Self {
        suggestion.to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(into = "String")]
pub enum RedFlag {
    NoRecentActivity,
    FewDocumentedRepositories,
    LimitedTechnologyDiversity,
}

impl std::fmt::Display for RedFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedFlag::NoRecentActivity => write!(f, "No activity in last 6 months."),
            RedFlag::FewDocumentedRepositories => {
                write!(f, "Very few repositories have proper documentation.")
            }
            RedFlag::LimitedTechnologyDiversity => write!(f, "Limited technology diversity."),
        }
    }
}

impl From<RedFlag> for String {
    fn from(flag: RedFlag) -> Self {
        flag.to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FeedbackReport {
    pub suggestions: Vec<Suggestion>,
    pub red_flags: Vec<RedFlag>,
}

/// Everything a renderer needs for one run.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioAnalysis {
    pub profile: UserProfile,
    pub repository_count: usize,
    pub report: ScoreReport,
    pub verdict: Verdict,
    pub feedback: FeedbackReport,
    pub summary: String,
    pub analysis_date: DateTime<Utc>,
}

impl PortfolioAnalysis {
    pub fn new(
        profile: UserProfile,
        repository_count: usize,
        report: ScoreReport,
        feedback: FeedbackReport,
        analysis_date: DateTime<Utc>,
    ) -> Self {
        let verdict = report.verdict();
        let summary = recruiter_summary(&report, verdict);
        Self {
            profile,
            repository_count,
            report,
            verdict,
            feedback,
            summary,
            analysis_date,
        }
    }
}

pub fn recruiter_summary(report: &ScoreReport, verdict: Verdict) -> String {
    format!(
        "This profile demonstrates experience in {}. \
         Overall portfolio strength is categorized as {}. \
         Improving documentation clarity and real-world deployment exposure \
         would significantly increase recruiter attractiveness.",
        report.language_list(),
        verdict
    )
}
