//! The specialized LLM-backed agents the orchestrator dispatches to.
//! Each agent handles exactly one turn: it reads the input, mutates the
//! session through the ledger, makes at most one LLM call, and returns a
//! reply. State transitions are reported via `next_state` and adopted by the
//! orchestrator.

pub mod benchmark;
pub mod greeting;
pub mod interviewer;
pub mod research;
pub mod scoring;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::session::{Session, SessionState};

/// Result of one agent turn.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub response: String,
    pub agent: &'static str,
    /// State to adopt after this turn, if the agent advances the machine.
    pub next_state: Option<SessionState>,
    /// Set by the scoring agent — no further interviewing happens after.
    pub is_final: bool,
}

impl AgentReply {
    pub fn new(agent: &'static str, response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            agent,
            next_state: None,
            is_final: false,
        }
    }

    pub fn advancing(
        agent: &'static str,
        response: impl Into<String>,
        next_state: SessionState,
    ) -> Self {
        Self {
            response: response.into(),
            agent,
            next_state: Some(next_state),
            is_final: false,
        }
    }
}

/// One conversational agent. Implementations must mutate the session at most
/// once per turn and never perform I/O beyond their single LLM or search
/// provider call.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn process(&self, user_input: &str, session: &mut Session)
        -> Result<AgentReply, AppError>;
}
