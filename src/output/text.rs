use crate::output::CrawlReport;

/// Formats a report as a plain list for the terminal
///
/// ```text
/// Found 2 unique GitHub repositories:
/// ✓ cncf/landscape (8700 stars)
/// ✓ etcd-io/etcd (47000 stars)
///
/// Errors encountered:
/// ✗ Error crawling https://example.com/x: ...
/// ```
pub fn format_table(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Found {} unique GitHub repositories:\n",
        report.repositories.len()
    ));
    for repo in &report.repositories {
        out.push_str(&format!("✓ {} ({} stars)\n", repo.slug(), repo.stars));
    }

    if !report.errors.is_empty() {
        out.push_str("\nErrors encountered:\n");
        for error in &report.errors {
            out.push_str(&format!("✗ {}\n", error));
        }
    }

    out
}
