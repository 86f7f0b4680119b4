//! Per-site key ACLs, the immutable snapshot that answers access questions, and its publisher.

mod record;
mod snapshot;
mod publisher;

pub use record::EncryptionKeyAcl;
pub use snapshot::{AccessDecision, AclSnapshot, DecisionReason, LegacyFallback};
pub use publisher::AclSnapshotPublisher;
