//! Markdown report generation
//!
//! One table row per repository, one column per repository field, followed
//! by the error log.

use crate::output::CrawlReport;

const COLUMNS: &[&str] = &[
    "Owner",
    "Repository",
    "URL",
    "Stars",
    "Watchers",
    "Forks",
    "Pull Requests",
    "Issues",
    "Description",
    "Last Updated",
];

/// Formats a report as markdown
pub fn format_markdown(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Repo-Scout Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed URL**: {}\n", report.seed_url));
    md.push_str(&format!("- **Max Depth**: {}\n", report.max_depth));
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.to_rfc3339()
    ));
    if let Some(pages) = report.pages_visited {
        md.push_str(&format!("- **Pages Visited**: {}\n", pages));
    }
    if let Some(duration) = report.duration_seconds {
        md.push_str(&format!("- **Duration**: {:.1} seconds\n", duration));
    }
    md.push_str(&format!(
        "- **Repositories**: {}\n",
        report.repositories.len()
    ));
    md.push_str(&format!("- **Total Stars**: {}\n", report.total_stars()));
    md.push_str(&format!("- **Errors**: {}\n\n", report.errors.len()));

    md.push_str("## Repositories\n\n");
    if report.repositories.is_empty() {
        md.push_str("_No repositories found._\n\n");
    } else {
        md.push_str(&format!("| {} |\n", COLUMNS.join(" | ")));
        md.push_str(&format!("|{}\n", "---|".repeat(COLUMNS.len())));

        for repo in &report.repositories {
            let cells = [
                escape_cell(&repo.owner),
                escape_cell(&repo.repo_name),
                escape_cell(&repo.full_url),
                repo.stars.to_string(),
                repo.watchers.to_string(),
                repo.forks.to_string(),
                repo.pull_requests.to_string(),
                repo.issues.to_string(),
                escape_cell(repo.description.as_deref().unwrap_or("")),
                escape_cell(repo.last_updated.as_deref().unwrap_or("")),
            ];
            md.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        md.push('\n');
    }

    if !report.errors.is_empty() {
        md.push_str("## Errors\n\n");
        for error in &report.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

/// Keeps a value inside its table cell
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
