use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::store::ReleaseInfo;

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "relwatch";

/// Latest-release response, trimmed to the fields relwatch keeps
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    name: Option<String>,
    published_at: Option<DateTime<Utc>>,
    html_url: String,
    body: Option<String>,
}

/// Tag-list entry, used when a repository has no formal releases
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Fetch the latest release for `repo` ("owner/name").
///
/// Repositories without formal releases fall back to the tag list; the most
/// recent tag is reported with no publication time and no notes. `Ok(None)`
/// means no release is retrievable this run (no releases, no tags, or an
/// unexpected API status) and the caller should leave its stored state alone.
pub async fn fetch_latest(
    client: &reqwest::Client,
    repo: &str,
    token: Option<&str>,
) -> Result<Option<ReleaseInfo>> {
    let url = format!("{}/repos/{}/releases/latest", GITHUB_API_URL, repo);
    let response = get(client, &url, token)
        .await
        .with_context(|| format!("Failed to fetch latest release for {}", repo))?;

    match response.status() {
        StatusCode::OK => {
            let release: Release = response
                .json()
                .await
                .with_context(|| format!("Failed to parse release response for {}", repo))?;
            Ok(Some(release_info(release)))
        }
        StatusCode::NOT_FOUND => fetch_latest_tag(client, repo, token).await,
        _ => Ok(None),
    }
}

/// Fall back to the repository's tag list; GitHub returns tags newest-first.
async fn fetch_latest_tag(
    client: &reqwest::Client,
    repo: &str,
    token: Option<&str>,
) -> Result<Option<ReleaseInfo>> {
    let url = format!("{}/repos/{}/tags", GITHUB_API_URL, repo);
    let response = get(client, &url, token)
        .await
        .with_context(|| format!("Failed to fetch tags for {}", repo))?;

    if response.status() != StatusCode::OK {
        return Ok(None);
    }

    let tags: Vec<Tag> = response
        .json()
        .await
        .with_context(|| format!("Failed to parse tags response for {}", repo))?;

    Ok(tags.into_iter().next().map(|tag| ReleaseInfo {
        html_url: format!("https://github.com/{}/releases/tag/{}", repo, tag.name),
        name: tag.name.clone(),
        tag_name: tag.name,
        published_at: None,
        body: None,
    }))
}

async fn get(client: &reqwest::Client, url: &str, token: Option<&str>) -> reqwest::Result<reqwest::Response> {
    let mut request = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github.v3+json");

    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    request.send().await
}

fn release_info(release: Release) -> ReleaseInfo {
    // Unnamed releases display their tag
    let name = match release.name {
        Some(name) if !name.is_empty() => name,
        _ => release.tag_name.clone(),
    };

    ReleaseInfo {
        tag_name: release.tag_name,
        name,
        published_at: release.published_at,
        html_url: release.html_url,
        body: release.body,
    }
}
