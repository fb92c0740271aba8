//! Greeting agent — handles small talk without touching interview state.

use async_trait::async_trait;

use crate::agents::{Agent, AgentReply};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::session::Session;

const AGENT_NAME: &str = "GreetingAgent";

const GREETING_SYSTEM: &str = "\
You are a friendly greeting assistant for an AI interview system. \
Respond to greetings (hi, hello), small talk (how are you), and closing \
remarks (bye, thank you). Keep it brief and professional. If the candidate \
seems lost, remind them you are here to guide them through the interview \
process.";

pub struct GreetingAgent {
    llm: LlmClient,
}

impl GreetingAgent {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Agent for GreetingAgent {
    async fn process(
        &self,
        user_input: &str,
        _session: &mut Session,
    ) -> Result<AgentReply, AppError> {
        let response = self.llm.complete(user_input, GREETING_SYSTEM).await?;
        Ok(AgentReply::new(AGENT_NAME, response))
    }
}
