//! Interviewer agent — the conversation core in action.
//!
//! Per turn: transition policy → topic selection (if no topic is active) →
//! prompt composition → one LLM call. All ledger mutation happens before the
//! LLM call, in `prepare_turn`, which is pure apart from the session
//! mutation and fully testable without a network.

use async_trait::async_trait;

use crate::agents::{Agent, AgentReply};
use crate::errors::AppError;
use crate::interview::{composer, policy, selector};
use crate::interview::policy::TransitionDecision;
use crate::llm_client::LlmClient;
use crate::models::session::{Session, SessionState};

const AGENT_NAME: &str = "InterviewerAgent";

/// The two strings handed to the LLM for this turn.
#[derive(Debug, Clone)]
pub struct PreparedTurn {
    pub system_prompt: String,
    pub task_prompt: String,
}

/// Runs policy and selection for one interview turn and composes the
/// prompts. Mutates the session's ledger fields; makes no I/O calls.
pub fn prepare_turn(user_input: &str, session: &mut Session) -> PreparedTurn {
    let skip_hint = match policy::apply_turn(user_input, session) {
        TransitionDecision::Forced { skip_hint } => Some(skip_hint),
        TransitionDecision::Keep => None,
    };

    session.state = SessionState::Interviewing;

    let task_prompt = match session.current_topic.clone() {
        Some(topic) => composer::build_follow_up_prompt(user_input, &topic),
        None => {
            let selection = selector::select_next_topic(session);
            composer::build_opening_prompt(&selection.opening_prompt, skip_hint.as_deref())
        }
    };

    PreparedTurn {
        system_prompt: composer::build_system_prompt(session),
        task_prompt,
    }
}

pub struct InterviewerAgent {
    llm: LlmClient,
}

impl InterviewerAgent {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Agent for InterviewerAgent {
    async fn process(
        &self,
        user_input: &str,
        session: &mut Session,
    ) -> Result<AgentReply, AppError> {
        let prepared = prepare_turn(user_input, session);
        let response = self
            .llm
            .complete(&prepared.task_prompt, &prepared.system_prompt)
            .await?;
        Ok(AgentReply::new(AGENT_NAME, response))
    }
}
