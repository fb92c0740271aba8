//! Dialogue Composer — builds the two strings handed to the LLM each
//! interview turn: the interviewer persona (system) and the per-turn task
//! prompt. Exactly one LLM invocation happens per turn; composing here has
//! no side effects.

use crate::models::session::{Session, Topic};

/// Interviewer persona. Placeholders: {job}, {kpis}, {skills}, {projects},
/// {covered}. Replace all before sending.
const INTERVIEWER_SYSTEM_TEMPLATE: &str = "\
You are a highly interactive Senior Technical Interviewer.

YOUR MISSION: maintain a strict 1:2 ratio of unverified-skill questions to \
main project deep-dives.

CORE RULES:
1. Conversational continuity: always acknowledge or briefly critique the \
candidate's last answer before asking the next question.
2. Deep dives: if an answer is shallow, ask 'How specifically?' or 'What \
were the trade-offs?'. Do not leave a topic until it is exhausted.
3. Topic grouping: focus on one project or one skill at a time.
4. Explicit attribution: when discussing a project, mention it by name.
5. No repetition: NEVER ask about topics listed under 'Topics already covered'.

Context:
- Job: {job}
- Benchmarks: {kpis}
- Top CV skills: {skills}
- Verified GitHub projects: {projects}
- Topics already covered: {covered}

IMPORTANT: the benchmarks are internal evaluation criteria. Never name or \
reveal them to the candidate.";

/// Builds the persona/system instruction from the current session.
pub fn build_system_prompt(session: &Session) -> String {
    let skills = session
        .cv_data
        .skills
        .iter()
        .take(5)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    let projects =
        serde_json::to_string(&session.discovered_projects).unwrap_or_else(|_| "[]".to_string());

    let covered = if session.covered_topics.is_empty() {
        "None yet".to_string()
    } else {
        session.covered_topics.join(", ")
    };

    INTERVIEWER_SYSTEM_TEMPLATE
        .replace(
            "{job}",
            session.job_description.as_deref().unwrap_or("Technical Role"),
        )
        .replace(
            "{kpis}",
            session
                .kpis
                .as_deref()
                .unwrap_or("General technical proficiency"),
        )
        .replace("{skills}", &skills)
        .replace("{projects}", &projects)
        .replace("{covered}", &covered)
}

/// Task prompt when opening a freshly selected topic. A skip hint from a
/// forced transition is prepended so the model acknowledges the pivot.
pub fn build_opening_prompt(opening: &str, skip_hint: Option<&str>) -> String {
    match skip_hint {
        Some(hint) => format!("{hint} {opening}"),
        None => opening.to_string(),
    }
}

/// Task prompt when continuing the active topic: acknowledge the answer and
/// push one level deeper.
pub fn build_follow_up_prompt(user_input: &str, topic: &Topic) -> String {
    format!(
        "The candidate said: '{user_input}'. Acknowledge their response and ask an even \
         DEEPER, more technical follow-up question about '{}'. Push for architectural \
         trade-offs or specific edge cases.",
        topic.label
    )
}
