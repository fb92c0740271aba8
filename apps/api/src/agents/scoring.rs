//! Scoring agent — final assessment against the stored benchmarks.
//! Idempotent: re-running it re-scores the same transcript.

use async_trait::async_trait;

use crate::agents::{Agent, AgentReply};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::session::{HistoryTurn, Session};

const AGENT_NAME: &str = "ScoringAgent";

/// Placeholders: {kpis}, {transcript}.
const SCORING_SYSTEM_TEMPLATE: &str = "\
You are a senior hiring committee member. Provide a final, objective \
assessment of the candidate based on the interview transcript and the \
defined KPIs.

KPIs to evaluate:
{kpis}

Interview transcript:
{transcript}

Provide the assessment in this format:

### Overall Score: [X/100]
[Brief summary of the candidate's performance]

### KPI Breakdown
| KPI | Score (1-10) | Evidence / Observations |
|-----|--------------|-------------------------|
| [KPI Name] | [Score] | [Short note on what they said/did] |

### Recommendation
[Hire / No Hire / Strong Hire] - [Reasoning]

Be fair but critical. Look for concrete examples provided by the candidate.";

pub struct ScoringAgent {
    llm: LlmClient,
}

impl ScoringAgent {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

/// Flattens the session history into "speaker: content" lines. Assistant
/// turns are attributed to the agent that produced them.
fn format_transcript(history: &[HistoryTurn]) -> String {
    history
        .iter()
        .map(|turn| {
            let speaker = turn.agent.as_deref().unwrap_or(&turn.role);
            format!("{speaker}: {}", turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Agent for ScoringAgent {
    async fn process(
        &self,
        _user_input: &str,
        session: &mut Session,
    ) -> Result<AgentReply, AppError> {
        let system = SCORING_SYSTEM_TEMPLATE
            .replace("{kpis}", session.kpis.as_deref().unwrap_or("N/A"))
            .replace("{transcript}", &format_transcript(&session.history));

        let evaluation = self
            .llm
            .complete("Provide the final structured score and feedback.", &system)
            .await?;

        let mut reply = AgentReply::new(
            AGENT_NAME,
            format!(
                "The interview is now complete. Thank you for your time. Here is my \
                 final assessment:\n\n{evaluation}"
            ),
        );
        reply.is_final = true;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_attributes_assistant_turns_to_agents() {
        let history = vec![
            HistoryTurn::user("hello"),
            HistoryTurn::assistant("hi there", "GreetingAgent"),
        ];
        let transcript = format_transcript(&history);
        assert_eq!(transcript, "user: hello\nGreetingAgent: hi there");
    }

    #[test]
    fn test_empty_history_formats_to_empty_string() {
        assert_eq!(format_transcript(&[]), "");
    }
}
