//! The conversation core: topic bookkeeping, transition policy, topic
//! selection, and prompt composition for the interviewer agent.

pub mod composer;
pub mod intent;
pub mod ledger;
pub mod policy;
pub mod selector;
