//! Research agent — verifies the candidate's profile links and compares CV
//! claims against public evidence.
//!
//! Produces the two pools the interviewer schedules from: skills lacking
//! evidence (`unverified_skills`) and projects found on GitHub
//! (`discovered_projects`). Malformed model output during analysis degrades
//! to an empty skill list plus the raw fetched projects — the conversation
//! proceeds with reduced signal rather than failing.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::agents::{Agent, AgentReply};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::session::{DiscoveredProject, Session, SessionState};
use crate::search::LinkVerifier;

const AGENT_NAME: &str = "ResearchAgent";

/// Placeholder value for a link the candidate declared they do not have.
const LINK_NOT_AVAILABLE: &str = "N/A";

const NO_LINK_PHRASES: &[&str] = &[
    "don't have",
    "do not have",
    "no github",
    "no linkedin",
    "skip",
];

/// Placeholders: {name}, {skills}, {github}, {projects_text}.
const ANALYSIS_PROMPT_TEMPLATE: &str = "\
Candidate: {name}
Core skills from CV: {skills}
GitHub profile: {github}

{projects_text}

Your task:
1. Compare the core CV skills against the discovered GitHub projects and overall background.
2. Identify which core skills are NOT evidenced by projects or online presence.
3. Return your analysis as a JSON object with this exact schema:
{
  \"analysis\": \"one encouraging sentence for the candidate about the research\",
  \"unverified_skills\": [\"1-3 CV skills that lack evidence\"],
  \"discovered_projects\": [{\"name\": \"owner/repo\", \"description\": \"...\"}]
}";

/// Structured output of the research analysis call.
#[derive(Debug, Deserialize)]
struct ResearchAnalysis {
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    unverified_skills: Vec<String>,
    #[serde(default)]
    discovered_projects: Vec<DiscoveredProject>,
}

pub struct ResearchAgent {
    llm: LlmClient,
    search: Arc<dyn LinkVerifier>,
    github_pattern: Regex,
    linkedin_pattern: Regex,
}

impl ResearchAgent {
    pub fn new(llm: LlmClient, search: Arc<dyn LinkVerifier>) -> Self {
        Self {
            llm,
            search,
            github_pattern: Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9._/-]+")
                .expect("valid github pattern"),
            linkedin_pattern: Regex::new(
                r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9._/-]+",
            )
            .expect("valid linkedin pattern"),
        }
    }

    /// Verifies any CV-supplied links that have not been checked yet.
    async fn verify_cv_links(&self, session: &mut Session) {
        let name = session
            .cv_data
            .name
            .clone()
            .unwrap_or_else(|| "candidate".to_string());

        if let Some(github) = session.cv_data.github.clone() {
            if github != LINK_NOT_AVAILABLE && !session.github_verified {
                info!("Verifying CV GitHub link: {github}");
                session.github_verified = self.search.verify_link(&github, &name).await;
                if !session.github_verified {
                    warn!("GitHub verification failed for {github}");
                }
            }
        }

        if let Some(linkedin) = session.cv_data.linkedin.clone() {
            if linkedin != LINK_NOT_AVAILABLE && !session.linkedin_verified {
                info!("Verifying CV LinkedIn link: {linkedin}");
                session.linkedin_verified = self.search.verify_link(&linkedin, &name).await;
                if !session.linkedin_verified {
                    warn!("LinkedIn verification failed for {linkedin}");
                }
            }
        }
    }

    /// Compares CV skills against GitHub evidence and fills the topic pools.
    /// Returns the one-sentence analysis shown to the candidate.
    async fn run_deep_analysis(&self, session: &mut Session) -> Result<String, AppError> {
        let github = session.cv_data.github.clone().unwrap_or_default();

        let fetched = if github.is_empty() || github == LINK_NOT_AVAILABLE {
            Vec::new()
        } else {
            self.search.fetch_projects(&github).await
        };

        let projects_text = if fetched.is_empty() {
            "No public GitHub projects found during web research.".to_string()
        } else {
            let lines: Vec<String> = fetched
                .iter()
                .map(|p| format!("- {}: {}", p.name, p.description))
                .collect();
            format!("Discovered GitHub projects:\n{}", lines.join("\n"))
        };

        let prompt = ANALYSIS_PROMPT_TEMPLATE
            .replace(
                "{name}",
                session.cv_data.name.as_deref().unwrap_or("the candidate"),
            )
            .replace("{skills}", &session.cv_data.skills.join(", "))
            .replace("{github}", &github)
            .replace("{projects_text}", &projects_text);

        match self
            .llm
            .call_json::<ResearchAnalysis>(&prompt, JSON_ONLY_SYSTEM)
            .await
        {
            Ok(analysis) => {
                session.unverified_skills = analysis.unverified_skills;
                session.discovered_projects = if analysis.discovered_projects.is_empty() {
                    fetched
                } else {
                    analysis.discovered_projects
                };
                Ok(analysis.analysis)
            }
            // Malformed model output: degrade silently to the raw fetched
            // projects so the interview can proceed with reduced signal.
            Err(LlmError::Parse(e)) => {
                warn!("Research analysis returned malformed JSON, degrading: {e}");
                session.unverified_skills = Vec::new();
                session.discovered_projects = fetched;
                Ok("I've analyzed your profiles and am ready to proceed.".to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Extracts profile URLs from chat input and verifies each against the
    /// candidate's name. Returns (any link accepted, rejection notes).
    async fn extract_and_verify_links(
        &self,
        user_input: &str,
        session: &mut Session,
    ) -> (bool, Vec<String>) {
        let name = session
            .cv_data
            .name
            .clone()
            .unwrap_or_else(|| "candidate".to_string());
        let mut accepted_any = false;
        let mut rejections = Vec::new();

        if let Some(m) = self.github_pattern.find(user_input) {
            let url = canonicalize_url(m.as_str());
            if self.search.verify_link(&url, &name).await {
                session.cv_data.github = Some(url);
                session.github_verified = true;
                accepted_any = true;
            } else {
                rejections.push(format!(
                    "GitHub link ({url}) could not be verified for {name}."
                ));
            }
        }

        if let Some(m) = self.linkedin_pattern.find(user_input) {
            let url = canonicalize_url(m.as_str());
            if self.search.verify_link(&url, &name).await {
                session.cv_data.linkedin = Some(url);
                session.linkedin_verified = true;
                accepted_any = true;
            } else {
                rejections.push(format!(
                    "LinkedIn link ({url}) could not be verified for {name}."
                ));
            }
        }

        (accepted_any, rejections)
    }
}

/// Which profile links still need to be supplied or re-verified.
fn missing_link_prompts(session: &Session) -> Vec<&'static str> {
    let mut missing = Vec::new();

    match session.cv_data.github.as_deref() {
        None | Some(LINK_NOT_AVAILABLE) => missing.push("GitHub"),
        Some(_) if !session.github_verified => {
            missing.push("a verified GitHub (the one on your CV couldn't be verified)")
        }
        Some(_) => {}
    }

    match session.cv_data.linkedin.as_deref() {
        None | Some(LINK_NOT_AVAILABLE) => missing.push("LinkedIn"),
        Some(_) if !session.linkedin_verified => {
            missing.push("a verified LinkedIn (the one on your CV couldn't be verified)")
        }
        Some(_) => {}
    }

    missing
}

fn declines_links(input: &str) -> bool {
    let lower = input.to_lowercase();
    NO_LINK_PHRASES.iter().any(|p| lower.contains(p))
}

fn mentions_link(input: &str) -> bool {
    let lower = input.to_lowercase();
    lower.contains("github.com") || lower.contains("linkedin.com") || lower.contains("http")
}

fn canonicalize_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    async fn process(
        &self,
        user_input: &str,
        session: &mut Session,
    ) -> Result<AgentReply, AppError> {
        session.state = SessionState::Research;

        self.verify_cv_links(session).await;

        // Candidate has no profiles to offer — fill placeholders and move on.
        if declines_links(user_input) {
            if session.cv_data.github.is_none() {
                session.cv_data.github = Some(LINK_NOT_AVAILABLE.to_string());
            }
            if session.cv_data.linkedin.is_none() {
                session.cv_data.linkedin = Some(LINK_NOT_AVAILABLE.to_string());
            }
            return Ok(AgentReply::advancing(
                AGENT_NAME,
                "I understand. I'll proceed with the information available on your \
                 resume. Let's calculate the interview benchmarks.",
                SessionState::KpiCalculation,
            ));
        }

        // Candidate pasted links into chat.
        if mentions_link(user_input) {
            let (accepted_any, rejections) =
                self.extract_and_verify_links(user_input, session).await;

            if !rejections.is_empty() && !accepted_any {
                return Ok(AgentReply::new(
                    AGENT_NAME,
                    format!(
                        "I received the links, but I couldn't verify them as belonging \
                         to you: {} Could you please provide the correct profile URLs?",
                        rejections.join(" ")
                    ),
                ));
            }

            if accepted_any {
                let analysis = self.run_deep_analysis(session).await?;
                return Ok(AgentReply::advancing(
                    AGENT_NAME,
                    format!("Great! I've verified your profiles. {analysis} Let's proceed to the next step."),
                    SessionState::KpiCalculation,
                ));
            }
        }

        // Still waiting on links.
        let missing = missing_link_prompts(session);
        if !missing.is_empty() {
            return Ok(AgentReply::new(
                AGENT_NAME,
                format!(
                    "I've started my research phase, but I notice your {} is missing or \
                     could not be verified. Having these lets me cross-reference your \
                     projects for a better interview. Could you please share those URLs?",
                    missing.join(" and ")
                ),
            ));
        }

        // Links present and verified — analyze and advance.
        let analysis = self.run_deep_analysis(session).await?;
        Ok(AgentReply::advancing(
            AGENT_NAME,
            format!(
                "I've successfully verified your profiles via web research. {analysis} \
                 Based on this, I'll now calculate the benchmarks for our interview."
            ),
            SessionState::KpiCalculation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::CvData;
    use uuid::Uuid;

    fn agent_patterns() -> (Regex, Regex) {
        let agent = ResearchAgent::new(
            LlmClient::new(String::new()),
            Arc::new(NeverVerifies),
        );
        (agent.github_pattern, agent.linkedin_pattern)
    }

    struct NeverVerifies;

    #[async_trait]
    impl LinkVerifier for NeverVerifies {
        async fn verify_link(&self, _url: &str, _name: &str) -> bool {
            false
        }
        async fn fetch_projects(&self, _profile_url: &str) -> Vec<DiscoveredProject> {
            Vec::new()
        }
    }

    #[test]
    fn test_github_pattern_matches_bare_and_full_urls() {
        let (github, _) = agent_patterns();
        assert!(github.is_match("my profile is github.com/jdoe"));
        assert!(github.is_match("https://www.github.com/jdoe/repo"));
        assert!(!github.is_match("I host on gitlab.com/jdoe"));
    }

    #[test]
    fn test_linkedin_pattern_requires_in_path() {
        let (_, linkedin) = agent_patterns();
        assert!(linkedin.is_match("linkedin.com/in/jane-doe"));
        assert!(!linkedin.is_match("linkedin.com/company/acme"));
    }

    #[test]
    fn test_canonicalize_url_adds_scheme_and_strips_slash() {
        assert_eq!(canonicalize_url("github.com/jdoe/"), "https://github.com/jdoe");
        assert_eq!(
            canonicalize_url("https://github.com/jdoe"),
            "https://github.com/jdoe"
        );
    }

    #[test]
    fn test_missing_prompts_for_fresh_cv() {
        let session = Session::new(Uuid::new_v4(), CvData::default());
        assert_eq!(missing_link_prompts(&session), vec!["GitHub", "LinkedIn"]);
    }

    #[test]
    fn test_unverified_cv_link_still_prompts() {
        let cv = CvData {
            github: Some("https://github.com/jdoe".to_string()),
            ..CvData::default()
        };
        let session = Session::new(Uuid::new_v4(), cv);
        let missing = missing_link_prompts(&session);
        assert!(missing[0].contains("couldn't be verified"));
    }

    #[test]
    fn test_verified_links_need_no_prompt() {
        let cv = CvData {
            github: Some("https://github.com/jdoe".to_string()),
            linkedin: Some("https://linkedin.com/in/jdoe".to_string()),
            ..CvData::default()
        };
        let mut session = Session::new(Uuid::new_v4(), cv);
        session.github_verified = true;
        session.linkedin_verified = true;
        assert!(missing_link_prompts(&session).is_empty());
    }

    #[test]
    fn test_declines_links_phrases() {
        assert!(declines_links("I don't have a GitHub"));
        assert!(declines_links("no linkedin sorry"));
        assert!(!declines_links("here is my profile"));
    }
}
