//! Benchmark agent — defines the internal KPIs the scoring agent later
//! evaluates against. Runs once, between research and interviewing.

use async_trait::async_trait;

use crate::agents::{Agent, AgentReply};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::session::{Session, SessionState};

const AGENT_NAME: &str = "BenchmarkAgent";

/// Placeholders: {job}, {profile}, {skills}.
const KPI_SYSTEM_TEMPLATE: &str = "\
You are an expert HR specialist and technical lead. Define 3-5 specific Key \
Performance Indicators (KPIs) for an upcoming technical interview.

Job description: {job}
Candidate summary: {profile}
Top skills: {skills}

For each KPI:
- Name it clearly (e.g. 'Architectural Reasoning', 'Rust Proficiency').
- Give a one-sentence description of what success looks like.
- Set a benchmark matched to the candidate's seniority.

Output the KPIs as a clean numbered list. No conversational filler.";

pub struct BenchmarkAgent {
    llm: LlmClient,
}

impl BenchmarkAgent {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

/// Derives a fallback job description from the CV when the caller supplied
/// none. A thin heuristic — the upstream intake flow normally sets one.
fn fallback_job_description(session: &Session) -> String {
    let cv_text = format!(
        "{} {}",
        session.cv_data.profile.as_deref().unwrap_or_default(),
        session.cv_data.skills.join(" ")
    )
    .to_lowercase();

    if cv_text.contains("junior") {
        "Junior Software Engineer".to_string()
    } else {
        "Senior Software Engineer".to_string()
    }
}

#[async_trait]
impl Agent for BenchmarkAgent {
    async fn process(
        &self,
        _user_input: &str,
        session: &mut Session,
    ) -> Result<AgentReply, AppError> {
        let job = session
            .job_description
            .clone()
            .unwrap_or_else(|| fallback_job_description(session));
        session.job_description = Some(job.clone());

        let system = KPI_SYSTEM_TEMPLATE
            .replace("{job}", &job)
            .replace(
                "{profile}",
                session
                    .cv_data
                    .profile
                    .as_deref()
                    .unwrap_or("Expert in their field"),
            )
            .replace(
                "{skills}",
                &session
                    .cv_data
                    .skills
                    .iter()
                    .take(10)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            );

        let kpis = self
            .llm
            .complete("Generate specific interview KPIs.", &system)
            .await?;
        session.kpis = Some(kpis);

        Ok(AgentReply::advancing(
            AGENT_NAME,
            format!(
                "Based on your profile and the target role ({job}), I've defined the \
                 technical benchmarks for our interview. I'm ready to begin whenever \
                 you are. Shall we start?"
            ),
            SessionState::InterviewStart,
        ))
    }
}
