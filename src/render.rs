use clap::ValueEnum;

use crate::error::Result;
use crate::models::{Category, PortfolioAnalysis, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

pub fn render(analysis: &PortfolioAnalysis, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(analysis)?,
        OutputFormat::Markdown => format_markdown(analysis),
        OutputFormat::Text => format_text(analysis),
    })
}

fn verdict_marker(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::HireReady => "[GREEN]",
        Verdict::AlmostThere => "[YELLOW]",
        Verdict::NeedsImprovement => "[RED]",
    }
}

/// One block per point, padded to the category maximum.
fn bar(score: u8) -> String {
    let filled = score.min(crate::models::CATEGORY_MAX) as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "·".repeat(crate::models::CATEGORY_MAX as usize - filled)
    )
}

pub fn format_text(analysis: &PortfolioAnalysis) -> String {
    let profile = &analysis.profile;
    let report = &analysis.report;
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== GitHub Portfolio Analysis: {} ===\n\n",
        profile.display_name()
    ));
    output.push_str(&format!("Handle: {}\n", profile.login));
    output.push_str(&format!("Avatar: {}\n", profile.avatar_url));
    output.push_str(&format!("Followers: {}\n", profile.followers));
    output.push_str(&format!("Public Repositories: {}\n", profile.public_repos));
    if let Some(ref bio) = profile.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }

    output.push_str(&format!(
        "\nRecruiter Verdict: {} {}\n",
        verdict_marker(analysis.verdict),
        analysis.verdict
    ));
    output.push_str(&format!(
        "GitHub Portfolio Score: {}/100\n\n",
        report.total
    ));

    for category in Category::ALL {
        let score = report.scores.get(category);
        output.push_str(&format!(
            "  {:<20} {} {:>2}/20\n",
            category.to_string(),
            bar(score),
            score
        ));
    }

    output.push_str("\nStrength Indicators:\n");
    output.push_str(&format!("  Languages Used: {}\n", report.language_list()));
    output.push_str(&format!(
        "  Repositories with README: {}\n",
        report.readme_count
    ));
    output.push_str(&format!(
        "  Recently Active Repositories: {}\n",
        report.recent_activity
    ));

    output.push_str("\nTop 3 Highlight Repositories:\n");
    for repo in &report.top_repositories {
        output.push_str(&format!("  {} (Impact Score: {})\n", repo.name, repo.impact));
    }

    if !analysis.feedback.suggestions.is_empty() {
        output.push_str("\nActionable Recommendations:\n");
        for suggestion in &analysis.feedback.suggestions {
            output.push_str(&format!("  • {}\n", suggestion));
        }
    }

    if !analysis.feedback.red_flags.is_empty() {
        output.push_str("\nRecruiter Red Flags:\n");
        for flag in &analysis.feedback.red_flags {
            output.push_str(&format!("  ! {}\n", flag));
        }
    }

    output.push_str(&format!("\nRecruiter Summary:\n  {}\n", analysis.summary));
    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        analysis.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

pub fn format_markdown(analysis: &PortfolioAnalysis) -> String {
    let profile = &analysis.profile;
    let report = &analysis.report;
    let mut output = String::new();

    output.push_str(&format!(
        "# GitHub Portfolio Analysis: {}\n\n",
        profile.display_name()
    ));
    output.push_str(&format!(
        "![avatar]({})\n\n**Handle:** {}  \n**Followers:** {}  \n**Public Repositories:** {}\n\n",
        profile.avatar_url, profile.login, profile.followers, profile.public_repos
    ));
    if let Some(ref bio) = profile.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str(&format!(
        "## Recruiter Verdict: {}\n\n**Score:** {}/100\n\n",
        analysis.verdict, report.total
    ));

    output.push_str("| Category | Score | |\n|----------|-------|---|\n");
    for category in Category::ALL {
        let score = report.scores.get(category);
        output.push_str(&format!(
            "| {} | {}/20 | `{}` |\n",
            category,
            score,
            bar(score)
        ));
    }

    output.push_str("\n## Strength Indicators\n\n");
    output.push_str(&format!("- **Languages Used:** {}\n", report.language_list()));
    output.push_str(&format!(
        "- **Repositories with README:** {}\n",
        report.readme_count
    ));
    output.push_str(&format!(
        "- **Recently Active Repositories:** {}\n",
        report.recent_activity
    ));

    output.push_str("\n## Top 3 Highlight Repositories\n\n");
    for repo in &report.top_repositories {
        output.push_str(&format!("1. {} (Impact Score: {})\n", repo.name, repo.impact));
    }

    if !analysis.feedback.suggestions.is_empty() {
        output.push_str("\n## Actionable Recommendations\n\n");
        for suggestion in &analysis.feedback.suggestions {
            output.push_str(&format!("- {}\n", suggestion));
        }
    }

    if !analysis.feedback.red_flags.is_empty() {
        output.push_str("\n## Recruiter Red Flags\n\n");
        for flag in &analysis.feedback.red_flags {
            output.push_str(&format!("- **{}**\n", flag));
        }
    }

    output.push_str(&format!("\n## Recruiter Summary\n\n{}\n", analysis.summary));
    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        analysis.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
