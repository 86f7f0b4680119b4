//! Authorization decisions for a multi-tenant key service: per-site key ACLs,
//! immutable ACL snapshots, and role-bearing operator principals.

pub mod acl;
pub mod config;
pub mod error;
pub mod identity;
pub mod keys;
pub mod telemetry;

pub use acl::{AccessDecision, AclSnapshot, AclSnapshotPublisher, DecisionReason, EncryptionKeyAcl, LegacyFallback};
pub use config::{AuthzConfig, AuthzOverrides};
pub use error::{AuthzError, AuthzResult};
pub use identity::{normalize_roles, OperatorKey, OperatorType, Role, RoleAuthorizable, RoleSet, SiteOwned, SitePrincipal};
pub use keys::EncryptionKey;
