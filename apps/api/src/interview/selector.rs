//! Topic Selector — deterministic choice of the next interview topic.
//!
//! Canonical priority: Unverified skill → discovered Project → verified CV
//! skill → generic fallback. The unverified slot is gated by the 1:2 cadence
//! (`projects_asked == unverified_asked * 2`), so two project deep-dives are
//! retired for every unverified-skill probe. A normalized name already in
//! `covered_topics` is never re-selected.

use crate::interview::ledger::normalize;
use crate::models::session::{Session, Topic, TopicCategory};

/// Label used when every pool is exhausted and the interviewer falls back to
/// an open-ended achievement question.
pub const GENERIC_TOPIC_LABEL: &str = "Career highlights";

/// The selector's output: the newly activated topic and the opening prompt
/// fragment handed to the dialogue composer.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub topic: Topic,
    pub opening_prompt: String,
}

/// Picks and activates the next topic. Call only when no topic is active
/// (fresh interview turn or just-forced transition).
pub fn select_next_topic(session: &mut Session) -> Selection {
    let selection = pick(session);
    session.activate(selection.topic.clone());
    selection
}

fn pick(session: &Session) -> Selection {
    // 1. Unverified skill, iff the pool has entries left and the cadence is
    //    exactly due. Front-to-back consumption, no reordering.
    let pool_remaining = (session.unverified_asked as usize) < session.unverified_skills.len();
    let cadence_due = session.projects_asked == session.unverified_asked * 2;
    if pool_remaining && cadence_due {
        let skill = &session.unverified_skills[session.unverified_asked as usize];
        return Selection {
            topic: Topic::new(TopicCategory::Unverified, skill.clone()),
            opening_prompt: format!(
                "I see {skill} listed on your CV, but I don't see any relevant projects \
                 on your GitHub showing your experience with it. Ask the candidate about \
                 their professional implementation of {skill}."
            ),
        };
    }

    // 2. First discovered project not already covered.
    if let Some(project) = session
        .discovered_projects
        .iter()
        .find(|p| !session.is_covered(&p.name))
    {
        return Selection {
            topic: Topic::new(TopicCategory::Project, project.name.clone()),
            opening_prompt: format!(
                "Dive into the candidate's project '{}' ({}). Ask a rigorous architectural \
                 question about its core logic, stack choice, or the major trade-offs they faced.",
                project.name, project.description
            ),
        };
    }

    // 3. First CV skill that is neither in the unverified pool nor covered.
    let unverified: Vec<String> = session.unverified_skills.iter().map(|s| normalize(s)).collect();
    if let Some(skill) = session
        .cv_data
        .skills
        .iter()
        .find(|s| !unverified.contains(&normalize(s)) && !session.is_covered(s))
    {
        return Selection {
            topic: Topic::new(TopicCategory::VerifiedSkill, skill.clone()),
            opening_prompt: format!(
                "Discuss the candidate's experience with {skill}. Research found supporting \
                 projects, so push for a deep dive into how they applied it at scale and the \
                 biggest technical hurdles."
            ),
        };
    }

    // 4. All pools exhausted. The generic topic is still activated with a
    //    fixed label so turn accounting and the transition policy apply
    //    uniformly.
    Selection {
        topic: Topic::new(TopicCategory::Generic, GENERIC_TOPIC_LABEL),
        opening_prompt: "Ask about a major achievement from the candidate's employment \
                         history: the most significant technical challenge they overcame."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{CvData, DiscoveredProject};
    use uuid::Uuid;

    fn project(name: &str) -> DiscoveredProject {
        DiscoveredProject {
            name: name.to_string(),
            description: String::new(),
        }
    }

    fn session() -> Session {
        let cv = CvData {
            skills: vec!["Rust".to_string(), "Kubernetes".to_string(), "Postgres".to_string()],
            ..CvData::default()
        };
        let mut s = Session::new(Uuid::new_v4(), cv);
        s.unverified_skills = vec!["Kubernetes".to_string()];
        s.discovered_projects = vec![project("PayAPI"), project("Scraper")];
        s
    }

    #[test]
    fn test_unverified_slot_picked_first_when_cadence_due() {
        // 0 == 0 * 2 and the pool has one entry — the unverified slot wins.
        let mut s = session();
        let selection = select_next_topic(&mut s);
        assert_eq!(selection.topic.category, TopicCategory::Unverified);
        assert_eq!(selection.topic.label, "Kubernetes");
        assert_eq!(s.topic_turns, 1);
    }

    #[test]
    fn test_projects_follow_until_cadence_due_again() {
        // After Kubernetes is retired the cadence gate (0 != 1*2) locks out
        // the unverified pool; the next two picks must be the projects in
        // provider order.
        let mut s = session();
        let first = select_next_topic(&mut s);
        s.retire(&first.topic);
        s.clear_topic();

        let second = select_next_topic(&mut s);
        assert_eq!(second.topic.label, "PayAPI");
        s.retire(&second.topic);
        s.clear_topic();

        let third = select_next_topic(&mut s);
        assert_eq!(third.topic.label, "Scraper");
    }

    #[test]
    fn test_unverified_never_picked_off_cadence() {
        let mut s = session();
        s.unverified_skills = vec!["Kubernetes".to_string(), "Terraform".to_string()];
        s.unverified_asked = 1;
        s.covered_topics.push("Kubernetes".to_string());
        s.projects_asked = 1; // 1 != 1 * 2 — cadence not due

        let selection = select_next_topic(&mut s);
        assert_ne!(selection.topic.category, TopicCategory::Unverified);
    }

    #[test]
    fn test_covered_project_is_skipped() {
        let mut s = session();
        s.projects_asked = 1; // lock out the unverified slot
        s.unverified_asked = 0;
        s.covered_topics.push("payapi".to_string()); // normalized entry

        let selection = select_next_topic(&mut s);
        assert_eq!(selection.topic.label, "Scraper");
    }

    #[test]
    fn test_verified_skill_fallback_excludes_unverified_pool() {
        let mut s = session();
        s.discovered_projects.clear();
        s.projects_asked = 1; // cadence gate closed
        let selection = select_next_topic(&mut s);
        assert_eq!(selection.topic.category, TopicCategory::VerifiedSkill);
        // "Kubernetes" is in the unverified pool, so "Rust" is first eligible.
        assert_eq!(selection.topic.label, "Rust");
    }

    #[test]
    fn test_generic_fallback_when_everything_exhausted() {
        let mut s = session();
        s.discovered_projects.clear();
        s.unverified_skills.clear();
        s.cv_data.skills.clear();
        let selection = select_next_topic(&mut s);
        assert_eq!(selection.topic.category, TopicCategory::Generic);
        assert_eq!(selection.topic.label, GENERIC_TOPIC_LABEL);
        // Even the fallback activates a topic so the ledger invariant holds.
        assert_eq!(s.topic_turns, 1);
    }

    #[test]
    fn test_selector_never_reselects_covered_name() {
        let mut s = session();
        // Run the selector to exhaustion, retiring each pick.
        let mut seen = Vec::new();
        for _ in 0..10 {
            let selection = select_next_topic(&mut s);
            if selection.topic.category == TopicCategory::Generic {
                break;
            }
            let name = normalize(&selection.topic.label);
            assert!(!seen.contains(&name), "re-selected covered topic {name}");
            seen.push(name);
            s.retire(&selection.topic);
            s.clear_topic();
        }
        assert_eq!(seen.len(), 5); // 1 unverified + 2 projects + 2 verified
    }

    #[test]
    fn test_cadence_bound_holds_over_full_run() {
        // projects_asked never exceeds unverified_asked * 2 + 2, and an
        // unverified pick only ever happens exactly on cadence.
        let cv = CvData {
            skills: (0..3).map(|i| format!("Skill{i}")).collect(),
            ..CvData::default()
        };
        let mut s = Session::new(Uuid::new_v4(), cv);
        s.unverified_skills = (0..3).map(|i| format!("Skill{i}")).collect();
        s.discovered_projects = (0..6).map(|i| project(&format!("Proj{i}"))).collect();

        for _ in 0..12 {
            let selection = select_next_topic(&mut s);
            if selection.topic.category == TopicCategory::Unverified {
                assert_eq!(s.projects_asked, s.unverified_asked * 2);
            }
            s.retire(&selection.topic);
            s.clear_topic();
            assert!(s.projects_asked <= s.unverified_asked * 2 + 2);
        }
    }
}
