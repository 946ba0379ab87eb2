use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::config::Config;
use crate::github;
use crate::report;
use crate::store::{self, ReleaseInfo};
use crate::telegram::{self, Credentials};

/// Everything the check run needs, resolved once from CLI args and env.
pub struct Settings {
    pub config_path: String,
    pub store_path: String,
    pub output_path: String,
    pub github_token: Option<String>,
    pub telegram: Option<Credentials>,
}

/// A release detected as new during this run
struct NewRelease {
    project_name: String,
    release: ReleaseInfo,
}

/// A release is new when its tag differs from the stored one. First-ever
/// observations count; no version ordering is applied, any different tag wins.
fn is_new(previous: Option<&ReleaseInfo>, current: &ReleaseInfo) -> bool {
    previous.map(|p| p.tag_name.as_str()) != Some(current.tag_name.as_str())
}

/// Run the check command: fetch every tracked project, update the store, and
/// on new releases send notifications and regenerate the summary file.
pub async fn run(settings: Settings) -> Result<()> {
    let config = Config::load(Path::new(&settings.config_path))?;
    let store_path = Path::new(&settings.store_path);
    let mut store = store::load(store_path)?;

    let client = reqwest::Client::new();
    let mut new_releases = Vec::new();

    for project in &config.projects {
        println!("Checking {} ({})...", project.name.cyan(), project.repo);

        let fetched = match github::fetch_latest(&client, &project.repo, settings.github_token.as_deref()).await
        {
            Ok(Some(release)) => release,
            Ok(None) => {
                println!("  No releases found for {}", project.name);
                continue;
            }
            Err(e) => {
                eprintln!("  {} Failed to check {}: {}", "✗".red(), project.name, e);
                continue;
            }
        };

        if is_new(store.get(&project.repo), &fetched) {
            println!("  New release found: {}", fetched.tag_name.green());
            new_releases.push(NewRelease {
                project_name: project.name.clone(),
                release: fetched.clone(),
            });
        } else {
            println!("  No new release (current: {})", fetched.tag_name);
        }

        // The stored entry always reflects the latest successful fetch
        store.insert(project.repo.clone(), fetched);
    }

    store::save(store_path, &store)?;

    if new_releases.is_empty() {
        println!("\nNo new releases detected.");
        return Ok(());
    }

    print_new_releases(&new_releases);

    // The notification phase must never stop the summary from being written
    if let Err(e) = send_notifications(&new_releases, settings.telegram.as_ref()).await {
        eprintln!("{} Notification phase failed: {}", "✗".red(), e);
    }

    report::write_summary(Path::new(&settings.output_path), &config.projects, &store)?;
    println!("Updated {}", settings.output_path.cyan());

    Ok(())
}

fn print_new_releases(new_releases: &[NewRelease]) {
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("NEW RELEASES DETECTED:");
    println!("{}", rule);
    for item in new_releases {
        println!("\n{}:", item.project_name.green());
        println!("  Version: {}", item.release.tag_name);
        println!("  URL: {}", item.release.html_url);
        if let Some(published) = item.release.published_at {
            println!("  Published: {}", published.format("%Y-%m-%dT%H:%M:%SZ"));
        }
    }
    println!("\n{}", rule);
}

async fn send_notifications(new_releases: &[NewRelease], credentials: Option<&Credentials>) -> Result<()> {
    let client = telegram::client()?;

    for item in new_releases {
        let text = telegram::release_message(&item.project_name, &item.release);
        if telegram::notify(&client, credentials, &text).await {
            println!("  Notified about {} {}", item.project_name, item.release.tag_name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag: &str) -> ReleaseInfo {
        ReleaseInfo {
            tag_name: tag.to_string(),
            name: tag.to_string(),
            published_at: None,
            html_url: format!("https://github.com/acme/widget/releases/tag/{tag}"),
            body: None,
        }
    }

    #[test]
    fn test_first_observation_is_new() {
        assert!(is_new(None, &release("v1.0.0")));
    }

    #[test]
    fn test_changed_tag_is_new() {
        let previous = release("v1");
        assert!(is_new(Some(&previous), &release("v2")));
    }

    #[test]
    fn test_same_tag_is_not_new() {
        let previous = release("v1.0.0");
        assert!(!is_new(Some(&previous), &release("v1.0.0")));
    }

    #[test]
    fn test_no_version_ordering_is_applied() {
        // A lexicographically older tag still counts as new
        let previous = release("v2.0.0");
        assert!(is_new(Some(&previous), &release("v1.9.0")));
    }
}
