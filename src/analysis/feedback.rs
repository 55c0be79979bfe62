use crate::models::report::{FeedbackReport, RedFlag, ScoreReport, Suggestion};

/// Category scores below this earn an improvement suggestion.
const WEAK_CATEGORY: u8 = 10;
const WEAK_IMPACT: u8 = 5;
const MIN_PORTFOLIO_SIZE: usize = 5;
const MIN_DOCUMENTED: u32 = 2;

pub struct FeedbackEngine;

impl FeedbackEngine {
    pub fn new() -> Self {
        Self
    }

    /// Every rule is checked independently; output order is rule order.
    pub fn evaluate(&self, report: &ScoreReport, total_repo_count: usize) -> FeedbackReport {
        let scores = &report.scores;

        let suggestions = [
            (scores.documentation < WEAK_CATEGORY, Suggestion::StructureReadme),
            (scores.activity < WEAK_CATEGORY, Suggestion::IncreaseActivity),
            (scores.repository_quality < WEAK_CATEGORY, Suggestion::AddRepositoryMetadata),
            (scores.technical_depth < WEAK_CATEGORY, Suggestion::DiversifyTechnologies),
            (scores.impact < WEAK_IMPACT, Suggestion::ShareProjects),
            (total_repo_count < MIN_PORTFOLIO_SIZE, Suggestion::AddProjects),
        ];

        // Single-language portfolios only; an empty language set is not flagged.
        let red_flags = [
            (report.recent_activity == 0, RedFlag::NoRecentActivity),
            (report.readme_count < MIN_DOCUMENTED, RedFlag::FewDocumentedRepositories),
            (report.languages.len() == 1, RedFlag::LimitedTechnologyDiversity),
        ];

        FeedbackReport {
            suggestions: fired(suggestions),
            red_flags: fired(red_flags),
        }
    }
}

impl Default for FeedbackEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn fired<T, const N: usize>(rules: [(bool, T); N]) -> Vec<T> {
    rules
        .into_iter()
        .filter_map(|(hit, item)| hit.then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::CategoryScores;

    fn report(scores: CategoryScores, languages: &[&str], readmes: u32, recent: u32) -> ScoreReport {
        ScoreReport {
            total: scores.total(),
            scores,
            languages: languages.iter().map(|l| l.to_string()).collect(),
            readme_count: readmes,
            recent_activity: recent,
            top_repositories: Vec::new(),
        }
    }

    fn strong() -> CategoryScores {
        CategoryScores {
            documentation: 20,
            activity: 20,
            repository_quality: 20,
            technical_depth: 20,
            impact: 20,
        }
    }

    #[test]
    fn strong_portfolio_has_no_feedback() {
        let feedback = FeedbackEngine::new().evaluate(&report(strong(), &["Go", "Rust"], 5, 5), 12);
        assert!(feedback.suggestions.is_empty());
        assert!(feedback.red_flags.is_empty());
    }

    #[test]
    fn empty_portfolio_fires_rules_in_order() {
        let feedback =
            FeedbackEngine::new().evaluate(&report(CategoryScores::default(), &[], 0, 0), 0);
        assert_eq!(
            feedback.suggestions,
            vec![
                Suggestion::StructureReadme,
                Suggestion::IncreaseActivity,
                Suggestion::AddRepositoryMetadata,
                Suggestion::DiversifyTechnologies,
                Suggestion::ShareProjects,
                Suggestion::AddProjects,
            ]
        );
        assert_eq!(
            feedback.red_flags,
            vec![RedFlag::NoRecentActivity, RedFlag::FewDocumentedRepositories]
        );
    }

    #[test]
    fn limited_diversity_fires_at_one_language_only() {
        let engine = FeedbackEngine::new();
        let none = engine.evaluate(&report(strong(), &[], 5, 5), 10);
        let one = engine.evaluate(&report(strong(), &["Rust"], 5, 5), 10);
        let two = engine.evaluate(&report(strong(), &["Rust", "Go"], 5, 5), 10);

        assert!(!none.red_flags.contains(&RedFlag::LimitedTechnologyDiversity));
        assert_eq!(one.red_flags, vec![RedFlag::LimitedTechnologyDiversity]);
        assert!(two.red_flags.is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        let edge = CategoryScores {
            documentation: 10,
            activity: 9,
            repository_quality: 10,
            technical_depth: 10,
            impact: 5,
        };
        let feedback = FeedbackEngine::new().evaluate(&report(edge, &["Go", "Rust"], 2, 1), 5);
        assert_eq!(feedback.suggestions, vec![Suggestion::IncreaseActivity]);
        assert!(feedback.red_flags.is_empty());
    }

    #[test]
    fn impact_suggestion_below_five() {
        let scores = CategoryScores {
            impact: 0,
            ..strong()
        };
        let feedback = FeedbackEngine::new().evaluate(&report(scores, &["Go", "Rust"], 1, 3), 4);
        assert_eq!(
            feedback.suggestions,
            vec![Suggestion::ShareProjects, Suggestion::AddProjects]
        );
        assert_eq!(feedback.red_flags, vec![RedFlag::FewDocumentedRepositories]);
    }
}
