//! Conversation Orchestrator — a small finite-state router that dispatches
//! each candidate turn to exactly one agent and adopts the reported state
//! transition.
//!
//! The routing decision is a pure function of (state, input, history length)
//! so the state machine is testable without agents or a network.

use std::sync::Arc;

use crate::agents::benchmark::BenchmarkAgent;
use crate::agents::greeting::GreetingAgent;
use crate::agents::interviewer::InterviewerAgent;
use crate::agents::research::ResearchAgent;
use crate::agents::scoring::ScoringAgent;
use crate::agents::{Agent, AgentReply};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::session::{Session, SessionState};
use crate::search::LinkVerifier;

/// Candidate turns beyond this history length end the interview.
const MAX_HISTORY_TURNS: usize = 25;
/// Explicit end-of-interview request.
const FINISH_PHRASE: &str = "finish the interview";

const GREETING_WORDS: &[&str] = &["hi", "hello", "hey"];

/// Which agent handles this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Greeting,
    Research,
    Benchmark,
    Interviewer,
    Scoring,
}

/// Greeting short-circuit: a bare greeting early in the conversation, with
/// no profile links attached, goes to the greeting agent in any state.
fn is_greeting(input: &str, history_len: usize) -> bool {
    if history_len >= 3 {
        return false;
    }
    let lower = input.to_lowercase();
    if lower.contains("github.com") || lower.contains("linkedin.com") {
        return false;
    }
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GREETING_WORDS.contains(&word))
}

/// The pure routing decision for one turn.
pub fn route_decision(state: SessionState, input: &str, history_len: usize) -> Route {
    if is_greeting(input, history_len) {
        return Route::Greeting;
    }

    match state {
        SessionState::Start | SessionState::Research => Route::Research,
        SessionState::KpiCalculation => Route::Benchmark,
        SessionState::InterviewStart | SessionState::Interviewing => {
            let finished = input.to_lowercase().contains(FINISH_PHRASE);
            if finished || history_len > MAX_HISTORY_TURNS {
                Route::Scoring
            } else {
                Route::Interviewer
            }
        }
        // Terminal: repeated turns re-score the same transcript.
        SessionState::Scoring => Route::Scoring,
    }
}

/// Owns the five agents and runs one turn end to end.
pub struct Orchestrator {
    greeting: GreetingAgent,
    research: ResearchAgent,
    benchmark: BenchmarkAgent,
    interviewer: InterviewerAgent,
    scoring: ScoringAgent,
}

impl Orchestrator {
    pub fn new(llm: LlmClient, search: Arc<dyn LinkVerifier>) -> Self {
        Self {
            greeting: GreetingAgent::new(llm.clone()),
            research: ResearchAgent::new(llm.clone(), search),
            benchmark: BenchmarkAgent::new(llm.clone()),
            interviewer: InterviewerAgent::new(llm.clone()),
            scoring: ScoringAgent::new(llm),
        }
    }

    /// Routes the turn to one agent, then adopts the agent's reported next
    /// state. The session is mutated by exactly one agent per turn.
    pub async fn dispatch(
        &self,
        user_input: &str,
        session: &mut Session,
    ) -> Result<AgentReply, AppError> {
        let route = route_decision(session.state, user_input, session.history.len());
        tracing::debug!(session = %session.id, state = ?session.state, route = ?route, "routing turn");

        let reply = match route {
            Route::Greeting => self.greeting.process(user_input, session).await?,
            Route::Research => self.research.process(user_input, session).await?,
            Route::Benchmark => self.benchmark.process(user_input, session).await?,
            Route::Interviewer => self.interviewer.process(user_input, session).await?,
            Route::Scoring => {
                session.state = SessionState::Scoring;
                self.scoring.process(user_input, session).await?
            }
        };

        if let Some(next_state) = reply.next_state {
            session.state = next_state;
        }

        Ok(reply)
    }
}
