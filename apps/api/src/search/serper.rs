//! Serper-backed implementation of the `LinkVerifier` capability.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::models::session::DiscoveredProject;
use crate::search::LinkVerifier;

const SERPER_API_URL: &str = "https://google.serper.dev/search";
/// At most this many discovered projects feed the interview.
const MAX_PROJECTS: usize = 3;

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize, Default)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Clone)]
pub struct SerperClient {
    client: Client,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn search(&self, query: &str, num: u32) -> Result<SearchResults, reqwest::Error> {
        self.client
            .post(SERPER_API_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&json!({ "q": query, "num": num }))
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResults>()
            .await
    }
}

#[async_trait]
impl LinkVerifier for SerperClient {
    async fn verify_link(&self, url: &str, candidate_name: &str) -> bool {
        if self.api_key.is_empty() || url.is_empty() || candidate_name.is_empty() {
            return false;
        }

        // Search for the link itself to get the indexed title/snippet.
        let query = format!("link:\"{url}\"");
        let results = match self.search(&query, 1).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Link verification failed for {url}: {e}");
                return false;
            }
        };

        let name_parts: Vec<String> = candidate_name
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let required = name_parts.len().min(2);

        results.organic.iter().any(|result| {
            let haystack = format!(
                "{} {}",
                result.title.to_lowercase(),
                result.snippet.to_lowercase()
            );
            let matches = name_parts.iter().filter(|p| haystack.contains(*p)).count();
            matches >= required
        })
    }

    async fn fetch_projects(&self, profile_url: &str) -> Vec<DiscoveredProject> {
        if self.api_key.is_empty() || profile_url.is_empty() {
            return Vec::new();
        }

        let username = profile_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        if username.is_empty() {
            return Vec::new();
        }

        debug!("Fetching GitHub repos for {username}");
        let query = format!("site:github.com \"{username}\" repositories");
        let results = match self.search(&query, 5).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Project discovery failed for {username}: {e}");
                return Vec::new();
            }
        };

        extract_projects(&results, &username)
    }
}

/// Pulls `owner/repo` titles out of search results for the given user.
/// Results arrive duck-typed from the provider; everything leaves this
/// function as a uniform `{name, description}` record.
fn extract_projects(results: &SearchResults, username: &str) -> Vec<DiscoveredProject> {
    let user_lower = username.to_lowercase();
    results
        .organic
        .iter()
        .filter(|r| r.title.contains('/') && r.title.to_lowercase().contains(&user_lower))
        .filter_map(|r| {
            let name = r.title.split_whitespace().next()?;
            if !name.contains('/') {
                return None;
            }
            Some(DiscoveredProject {
                name: name.to_string(),
                description: r.snippet.clone(),
            })
        })
        .take(MAX_PROJECTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, snippet: &str) -> OrganicResult {
        OrganicResult {
            title: title.to_string(),
            snippet: snippet.to_string(),
        }
    }

    #[test]
    fn test_extract_projects_keeps_owner_repo_titles() {
        let results = SearchResults {
            organic: vec![
                result("jdoe/payapi — payments service", "A payments API in Rust"),
                result("GitHub profile for jdoe", "followers, repositories"),
            ],
        };
        let projects = extract_projects(&results, "jdoe");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "jdoe/payapi");
        assert_eq!(projects[0].description, "A payments API in Rust");
    }

    #[test]
    fn test_extract_projects_ignores_other_users() {
        let results = SearchResults {
            organic: vec![result("other/repo", "not ours")],
        };
        assert!(extract_projects(&results, "jdoe").is_empty());
    }

    #[test]
    fn test_extract_projects_caps_count_and_preserves_order() {
        let organic = (0..5)
            .map(|i| result(&format!("jdoe/repo{i}"), "desc"))
            .collect();
        let projects = extract_projects(&SearchResults { organic }, "jdoe");
        assert_eq!(projects.len(), MAX_PROJECTS);
        assert_eq!(projects[0].name, "jdoe/repo0");
        assert_eq!(projects[2].name, "jdoe/repo2");
    }
}
