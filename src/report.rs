use anyhow::{Context, Result};
use chrono::Utc;
use std::fmt::Write as _;
use std::path::Path;

use crate::config::Project;
use crate::store::ReleaseStore;

/// Maximum length of a release-notes excerpt, in characters.
/// Applied in both the summary file and the Telegram message.
pub const NOTES_EXCERPT_CHARS: usize = 500;

/// Truncate `text` to at most `max` characters, on a character boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Regenerate the summary file from the store.
///
/// The file is a materialized view: one section per configured project that
/// has a stored release, in configuration order, rewritten in full each time.
pub fn write_summary(path: &Path, projects: &[Project], store: &ReleaseStore) -> Result<()> {
    let content = render_summary(projects, store);
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write summary file {}", path.display()))?;
    Ok(())
}

fn render_summary(projects: &[Project], store: &ReleaseStore) -> String {
    let mut out = String::from("# Latest Releases\n\n");
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    let _ = writeln!(out, "*Last updated: {} UTC*\n", timestamp);

    for project in projects {
        let Some(release) = store.get(&project.repo) else {
            continue;
        };

        let _ = writeln!(out, "## {}\n", project.name);
        let _ = writeln!(out, "**Latest Version:** {}\n", release.tag_name);
        if let Some(published) = release.published_at {
            let _ = writeln!(out, "**Published:** {}\n", published.format("%Y-%m-%dT%H:%M:%SZ"));
        }
        let _ = writeln!(out, "**URL:** {}\n", release.html_url);
        if let Some(body) = release.body.as_deref().filter(|b| !b.is_empty()) {
            let _ = writeln!(
                out,
                "**Release Notes:**\n\n{}\n",
                truncate_chars(body, NOTES_EXCERPT_CHARS)
            );
        }
        out.push_str("---\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ReleaseInfo;

    fn widget_project() -> Project {
        Project {
            name: "Widget".to_string(),
            repo: "acme/widget".to_string(),
        }
    }

    fn widget_release(body: Option<&str>) -> ReleaseInfo {
        ReleaseInfo {
            tag_name: "v1.0.0".to_string(),
            name: "v1.0.0".to_string(),
            published_at: "2024-01-01T00:00:00Z".parse().ok(),
            html_url: "https://github.com/acme/widget/releases/tag/v1.0.0".to_string(),
            body: body.map(|b| b.to_string()),
        }
    }

    #[test]
    fn test_truncate_shorter_than_limit_is_unchanged() {
        assert_eq!(truncate_chars("hello", 500), "hello");
        assert_eq!(truncate_chars("", 500), "");
    }

    #[test]
    fn test_truncate_cuts_to_exact_char_count() {
        let text = "a".repeat(600);
        assert_eq!(truncate_chars(&text, 500).len(), 500);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(10);
        let cut = truncate_chars(&text, 5);
        assert_eq!(cut.chars().count(), 5);
    }

    #[test]
    fn test_summary_lists_project_in_config_order() {
        let projects = vec![
            Project {
                name: "Gadget".to_string(),
                repo: "acme/gadget".to_string(),
            },
            widget_project(),
        ];
        let mut store = ReleaseStore::new();
        store.insert("acme/widget".to_string(), widget_release(Some("Initial release")));
        store.insert("acme/gadget".to_string(), widget_release(None));

        let summary = render_summary(&projects, &store);
        let gadget = summary.find("## Gadget").unwrap();
        let widget = summary.find("## Widget").unwrap();
        assert!(gadget < widget);
    }

    #[test]
    fn test_summary_section_contents() {
        let projects = vec![widget_project()];
        let mut store = ReleaseStore::new();
        store.insert("acme/widget".to_string(), widget_release(Some("Initial release")));

        let summary = render_summary(&projects, &store);
        assert!(summary.starts_with("# Latest Releases\n"));
        assert!(summary.contains("*Last updated: "));
        assert!(summary.contains("## Widget"));
        assert!(summary.contains("**Latest Version:** v1.0.0"));
        assert!(summary.contains("**Published:** 2024-01-01T00:00:00Z"));
        assert!(summary.contains("**URL:** https://github.com/acme/widget/releases/tag/v1.0.0"));
        assert!(summary.contains("Initial release"));
    }

    #[test]
    fn test_summary_skips_projects_without_stored_release() {
        let projects = vec![widget_project()];
        let store = ReleaseStore::new();

        let summary = render_summary(&projects, &store);
        assert!(!summary.contains("## Widget"));
    }

    #[test]
    fn test_summary_truncates_long_notes_without_ellipsis() {
        let projects = vec![widget_project()];
        let mut store = ReleaseStore::new();
        let body = "x".repeat(700);
        store.insert("acme/widget".to_string(), widget_release(Some(&body)));

        let summary = render_summary(&projects, &store);
        assert!(summary.contains(&"x".repeat(500)));
        assert!(!summary.contains(&"x".repeat(501)));
        assert!(!summary.contains("..."));
    }

    #[test]
    fn test_summary_omits_publish_date_for_tag_only_releases() {
        let projects = vec![widget_project()];
        let mut release = widget_release(None);
        release.published_at = None;
        let mut store = ReleaseStore::new();
        store.insert("acme/widget".to_string(), release);

        let summary = render_summary(&projects, &store);
        assert!(summary.contains("## Widget"));
        assert!(!summary.contains("**Published:**"));
    }
}
