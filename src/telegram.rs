use colored::*;
use serde::Serialize;
use std::time::Duration;

use crate::report::{truncate_chars, NOTES_EXCERPT_CHARS};
use crate::store::ReleaseInfo;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Bot token and target chat for notifications
#[derive(Debug, Clone)]
pub struct Credentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    /// Both the token and the chat id have to be present to notify at all.
    pub fn from_options(bot_token: Option<String>, chat_id: Option<String>) -> Option<Self> {
        match (bot_token, chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(Credentials { bot_token, chat_id }),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Build the Telegram client; sends carry a bounded timeout.
pub fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(SEND_TIMEOUT).build()
}

/// Send one message. Returns whether it was delivered.
///
/// Absent credentials are a configuration choice, not an error: the send is
/// skipped with a log line and `false`. Failures are logged, never propagated,
/// so one bad send cannot stop the rest of a run.
pub async fn notify(client: &reqwest::Client, credentials: Option<&Credentials>, text: &str) -> bool {
    let Some(credentials) = credentials else {
        println!("  {}", "Telegram credentials not set, skipping notification".yellow());
        return false;
    };

    let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_URL, credentials.bot_token);
    let payload = SendMessage {
        chat_id: &credentials.chat_id,
        text,
        parse_mode: "Markdown",
        disable_web_page_preview: true,
    };

    match client.post(&url).json(&payload).send().await {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            eprintln!(
                "  {} Telegram API returned HTTP {}",
                "✗".red(),
                response.status()
            );
            false
        }
        Err(e) => {
            eprintln!("  {} Failed to send Telegram notification: {}", "✗".red(), e);
            false
        }
    }
}

/// Compose the notification text for a newly detected release.
pub fn release_message(project_name: &str, release: &ReleaseInfo) -> String {
    let mut text = format!(
        "🚀 *New release: {}*\n\n*Version:* {}\n",
        project_name, release.tag_name
    );

    if let Some(published) = release.published_at {
        text.push_str(&format!("*Published:* {}\n", published.format("%Y-%m-%dT%H:%M:%SZ")));
    }

    if let Some(body) = release.body.as_deref().filter(|b| !b.is_empty()) {
        let excerpt = truncate_chars(body, NOTES_EXCERPT_CHARS);
        text.push('\n');
        text.push_str(excerpt);
        if excerpt.len() < body.len() {
            text.push_str("...");
        }
        text.push('\n');
    }

    text.push_str(&format!("\n🔗 [View Release]({})", release.html_url));
    text
}
