//! Web research collaborator: profile-link verification and GitHub project
//! discovery. Best-effort by contract — provider failures degrade to
//! "unverified" / empty results and never cross this boundary as errors.

pub mod serper;

use async_trait::async_trait;

use crate::models::session::DiscoveredProject;

/// The link-verification / project-discovery capability the research agent
/// consumes. Carried in `AppState` as `Arc<dyn LinkVerifier>` so tests can
/// substitute a canned backend.
#[async_trait]
pub trait LinkVerifier: Send + Sync {
    /// Whether `url` plausibly belongs to the named candidate. `false` on
    /// any provider failure.
    async fn verify_link(&self, url: &str, candidate_name: &str) -> bool;

    /// Public projects found on a GitHub profile, provider order preserved.
    /// Empty on failure.
    async fn fetch_projects(&self, profile_url: &str) -> Vec<DiscoveredProject>;
}
