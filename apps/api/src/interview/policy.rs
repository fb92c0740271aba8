//! Transition Policy — decides, each turn, whether to abandon the current
//! topic before selection runs.
//!
//! Two triggers: a disengagement signal in the candidate's input, or the
//! per-category turn limit. Unverified skills get 2 turns (opening question
//! plus one follow-up); projects and verified skills get 3.

use crate::interview::intent::{classify_intent, Intent};
use crate::models::session::{Session, TopicCategory};

/// Outcome of the pre-selection transition check.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionDecision {
    /// Current topic (if any) stays active.
    Keep,
    /// Topic was retired and cleared. The hint steers the model's tone when
    /// it opens the next topic.
    Forced { skip_hint: String },
}

fn max_turns(category: TopicCategory) -> u32 {
    match category {
        TopicCategory::Unverified => 2,
        _ => 3,
    }
}

/// Runs the transition policy for one candidate turn.
///
/// Increments `topic_turns` for the active topic first, then checks the two
/// force conditions. The turn-limit check is strict `>` so a topic gets its
/// full follow-up allowance before being cut off. On force, the topic is
/// retired through the ledger (idempotent) and cleared.
pub fn apply_turn(user_input: &str, session: &mut Session) -> TransitionDecision {
    let topic = match session.current_topic.clone() {
        Some(t) => t,
        None => return TransitionDecision::Keep,
    };

    session.topic_turns += 1;

    let is_disengaged = classify_intent(user_input) == Intent::Disengaged;
    let over_limit = session.topic_turns > max_turns(topic.category);

    if !is_disengaged && !over_limit {
        return TransitionDecision::Keep;
    }

    tracing::debug!(
        topic = %topic.label,
        turns = session.topic_turns,
        disengaged = is_disengaged,
        "forcing topic transition"
    );

    session.retire(&topic);
    session.clear_topic();

    let skip_hint = if is_disengaged {
        format!(
            "Note: the candidate lacks knowledge of '{}'. Pivot to a DIFFERENT topic.",
            topic.label
        )
    } else {
        format!(
            "Note: '{}' has been covered sufficiently. Move to a DIFFERENT topic.",
            topic.label
        )
    };

    TransitionDecision::Forced { skip_hint }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{CvData, Topic};
    use uuid::Uuid;

    fn session_with(topic: Topic, turns: u32) -> Session {
        let mut s = Session::new(Uuid::new_v4(), CvData::default());
        s.current_topic = Some(topic);
        s.topic_turns = turns;
        s
    }

    #[test]
    fn test_no_active_topic_keeps() {
        let mut s = Session::new(Uuid::new_v4(), CvData::default());
        assert_eq!(apply_turn("hello", &mut s), TransitionDecision::Keep);
        assert_eq!(s.topic_turns, 0);
    }

    #[test]
    fn test_unverified_topic_survives_one_follow_up() {
        // Activated at turn N with topic_turns=1; the first follow-up
        // increments to 2 which is not > 2.
        let mut s = session_with(Topic::new(TopicCategory::Unverified, "Kubernetes"), 1);
        assert_eq!(apply_turn("I used it at work", &mut s), TransitionDecision::Keep);
        assert_eq!(s.topic_turns, 2);
    }

    #[test]
    fn test_unverified_topic_forced_on_third_turn() {
        // After two follow-ups topic_turns reaches 3 > max_turns(2).
        let mut s = session_with(Topic::new(TopicCategory::Unverified, "Kubernetes"), 2);
        let decision = apply_turn("we ran three clusters", &mut s);
        assert!(matches!(decision, TransitionDecision::Forced { .. }));
        assert!(s.current_topic.is_none());
        assert_eq!(s.topic_turns, 0);
        assert_eq!(s.unverified_asked, 1);
        assert!(s.is_covered("Kubernetes"));
    }

    #[test]
    fn test_project_topic_gets_extra_turn() {
        let mut s = session_with(Topic::new(TopicCategory::Project, "PayAPI"), 2);
        assert_eq!(apply_turn("it used Postgres", &mut s), TransitionDecision::Keep);
        assert_eq!(s.topic_turns, 3);

        let decision = apply_turn("and Redis for caching", &mut s);
        assert!(matches!(decision, TransitionDecision::Forced { .. }));
        assert_eq!(s.projects_asked, 1);
    }

    #[test]
    fn test_disengagement_forces_regardless_of_turns() {
        let mut s = session_with(Topic::new(TopicCategory::Project, "PayAPI"), 1);
        let decision = apply_turn("I don't know", &mut s);
        match decision {
            TransitionDecision::Forced { skip_hint } => {
                assert!(skip_hint.contains("lacks knowledge"));
                assert!(skip_hint.contains("PayAPI"));
            }
            TransitionDecision::Keep => panic!("disengagement must force a transition"),
        }
        assert!(s.is_covered("PayAPI"));
    }

    #[test]
    fn test_turn_limit_hint_says_covered() {
        let mut s = session_with(Topic::new(TopicCategory::Unverified, "Kubernetes"), 2);
        match apply_turn("more detail", &mut s) {
            TransitionDecision::Forced { skip_hint } => {
                assert!(skip_hint.contains("covered sufficiently"));
            }
            TransitionDecision::Keep => panic!("turn limit must force a transition"),
        }
    }

    #[test]
    fn test_repeated_force_counts_topic_once() {
        let mut s = session_with(Topic::new(TopicCategory::Unverified, "Kubernetes"), 2);
        apply_turn("skip", &mut s);
        // Same topic somehow active again (e.g. replayed turn) — counters
        // must not double.
        s.current_topic = Some(Topic::new(TopicCategory::Unverified, "Kubernetes"));
        s.topic_turns = 1;
        apply_turn("skip", &mut s);
        assert_eq!(s.unverified_asked, 1);
        assert_eq!(s.covered_topics.len(), 1);
    }
}
