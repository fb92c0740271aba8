use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation phase for an interview session.
/// `InterviewStart` is folded into `Interviewing` on first entry;
/// `Scoring` is terminal — a scored session never interviews again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Start,
    Research,
    KpiCalculation,
    InterviewStart,
    Interviewing,
    Scoring,
}

/// What kind of topic the interviewer is currently probing.
/// First-class field — never encoded as a prefix inside the label string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicCategory {
    /// CV skill with no corroborating evidence found during research.
    Unverified,
    /// Project discovered on the candidate's GitHub.
    Project,
    /// CV skill backed by research evidence.
    VerifiedSkill,
    /// Topic-less fallback once all pools are exhausted.
    Generic,
}

/// A single interview topic: one skill or one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub category: TopicCategory,
    pub label: String,
}

impl Topic {
    pub fn new(category: TopicCategory, label: impl Into<String>) -> Self {
        Self {
            category,
            label: label.into(),
        }
    }
}

/// One turn of the conversation transcript. Append-only, insertion order
/// significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
    pub agent: Option<String>,
}

impl HistoryTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            agent: None,
        }
    }

    pub fn assistant(content: impl Into<String>, agent: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            agent: Some(agent.into()),
        }
    }
}

/// Structured resume facts, owned by the upstream parsing pipeline.
/// Read-only to the interview core except for link fields the research
/// agent fills in from chat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

/// A project found on the candidate's public profiles during research.
/// Normalized at the search-provider boundary — always `{name, description}`,
/// never a bare string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The durable per-candidate conversation state, threaded through every turn.
///
/// Created on first contact, mutated once per turn by exactly one agent,
/// never deleted by the core. The topic-ledger fields (`current_topic`,
/// `covered_topics`, the counters) have no identity outside the session;
/// their invariants are maintained by the mutators in `interview::ledger`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub state: SessionState,
    pub history: Vec<HistoryTurn>,
    pub cv_data: CvData,

    /// Active topic. `None` exactly when `topic_turns == 0`.
    pub current_topic: Option<Topic>,
    /// Retired topics, original casing preserved for display. Membership is
    /// checked on the normalized form.
    pub covered_topics: Vec<String>,
    /// Turns spent on `current_topic`, counting its opening question.
    pub topic_turns: u32,
    /// Unverified-skill topics retired so far.
    pub unverified_asked: u32,
    /// Project (and other non-unverified) topics retired so far.
    pub projects_asked: u32,

    /// Skills lacking evidence, consumed strictly front-to-back.
    pub unverified_skills: Vec<String>,
    /// Projects found during research, in provider order.
    pub discovered_projects: Vec<DiscoveredProject>,

    pub github_verified: bool,
    pub linkedin_verified: bool,

    /// Benchmark criteria produced by the KPI agent. Internal — never shown
    /// to the candidate.
    pub kpis: Option<String>,
    pub job_description: Option<String>,
}

impl Session {
    pub fn new(id: Uuid, cv_data: CvData) -> Self {
        Self {
            id,
            state: SessionState::Start,
            history: Vec::new(),
            cv_data,
            current_topic: None,
            covered_topics: Vec::new(),
            topic_turns: 0,
            unverified_asked: 0,
            projects_asked: 0,
            unverified_skills: Vec::new(),
            discovered_projects: Vec::new(),
            github_verified: false,
            linkedin_verified: false,
            kpis: None,
            job_description: None,
        }
    }
}
