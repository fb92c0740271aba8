//! Topic Ledger — covered-topic bookkeeping and the per-category counters
//! behind the 1:2 question cadence.
//!
//! All mutation of the ledger fields on `Session` goes through these methods.
//! Pure in-memory state; no I/O.

use crate::models::session::{Session, Topic, TopicCategory};

/// Canonical form used for all topic membership checks: trimmed, lowercased.
/// Original casing is preserved in `covered_topics` for display.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Session {
    /// Whether a topic name has already been retired, compared on the
    /// normalized form.
    pub fn is_covered(&self, name: &str) -> bool {
        let needle = normalize(name);
        self.covered_topics.iter().any(|t| normalize(t) == needle)
    }

    /// Marks a topic as covered and bumps the matching category counter.
    ///
    /// Idempotent: retiring an already-covered label is a no-op on both the
    /// set and the counters, so repeated forced transitions cannot
    /// double-count.
    pub fn retire(&mut self, topic: &Topic) {
        if self.is_covered(&topic.label) {
            return;
        }
        self.covered_topics.push(topic.label.clone());
        match topic.category {
            TopicCategory::Unverified => self.unverified_asked += 1,
            _ => self.projects_asked += 1,
        }
    }

    /// Makes `topic` the active topic and starts its turn count at 1
    /// (the opening question counts as the first turn).
    pub fn activate(&mut self, topic: Topic) {
        self.current_topic = Some(topic);
        self.topic_turns = 1;
    }

    /// Clears the active topic. Restores the `current_topic.is_none() ⇔
    /// topic_turns == 0` invariant after a forced transition.
    pub fn clear_topic(&mut self) {
        self.current_topic = None;
        self.topic_turns = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::CvData;
    use uuid::Uuid;

    fn session() -> Session {
        Session::new(Uuid::new_v4(), CvData::default())
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Kubernetes "), "kubernetes");
        assert_eq!(normalize("PayAPI"), "payapi");
    }

    #[test]
    fn test_retire_unverified_bumps_unverified_counter() {
        let mut s = session();
        s.retire(&Topic::new(TopicCategory::Unverified, "Kubernetes"));
        assert_eq!(s.unverified_asked, 1);
        assert_eq!(s.projects_asked, 0);
        assert!(s.is_covered("kubernetes"));
    }

    #[test]
    fn test_retire_project_bumps_project_counter() {
        let mut s = session();
        s.retire(&Topic::new(TopicCategory::Project, "PayAPI"));
        assert_eq!(s.projects_asked, 1);
        assert_eq!(s.unverified_asked, 0);
    }

    #[test]
    fn test_retire_verified_skill_counts_as_project() {
        let mut s = session();
        s.retire(&Topic::new(TopicCategory::VerifiedSkill, "Rust"));
        assert_eq!(s.projects_asked, 1);
    }

    #[test]
    fn test_retire_is_idempotent_on_counters() {
        let mut s = session();
        let topic = Topic::new(TopicCategory::Unverified, "Kubernetes");
        s.retire(&topic);
        s.retire(&topic);
        // Case variants of an already-covered name are also no-ops.
        s.retire(&Topic::new(TopicCategory::Unverified, "KUBERNETES "));
        assert_eq!(s.unverified_asked, 1);
        assert_eq!(s.covered_topics.len(), 1);
    }

    #[test]
    fn test_retire_preserves_original_casing() {
        let mut s = session();
        s.retire(&Topic::new(TopicCategory::Project, "PayAPI"));
        assert_eq!(s.covered_topics, vec!["PayAPI".to_string()]);
        assert!(s.is_covered("payapi"));
    }

    #[test]
    fn test_activate_sets_topic_and_resets_turns() {
        let mut s = session();
        s.topic_turns = 5;
        s.activate(Topic::new(TopicCategory::Project, "Scraper"));
        assert_eq!(s.topic_turns, 1);
        assert!(s.current_topic.is_some());
    }

    #[test]
    fn test_clear_topic_restores_invariant() {
        let mut s = session();
        s.activate(Topic::new(TopicCategory::Generic, "Career highlights"));
        s.clear_topic();
        assert!(s.current_topic.is_none());
        assert_eq!(s.topic_turns, 0);
    }
}
