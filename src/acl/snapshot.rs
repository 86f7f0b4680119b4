//! Point-in-time ACL map and the key access decision.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::record::EncryptionKeyAcl;
use crate::error::{AuthzError, AuthzResult};
use crate::identity::{SiteOwned, SitePrincipal};

/// What to answer when the key's site has no ACL configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyFallback {
    /// Historical behavior: no ACL means every site may read the keys.
    #[default]
    DefaultAllow,
    DefaultDeny,
}

impl FromStr for LegacyFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" | "default_allow" => Ok(LegacyFallback::DefaultAllow),
            "deny" | "default_deny" => Ok(LegacyFallback::DefaultDeny),
            other => Err(format!("unknown legacy fallback '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    SameSite,
    AclAllow,
    AclDeny,
    NoAclFallback,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::SameSite => "same_site",
            DecisionReason::AclAllow => "acl_allow",
            DecisionReason::AclDeny => "acl_deny",
            DecisionReason::NoAclFallback => "no_acl_fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub allow: bool,
    pub reason: DecisionReason,
}

/// Immutable `owning site -> ACL` map. Cloning shares the underlying map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AclSnapshot {
    acls: Arc<HashMap<i32, EncryptionKeyAcl>>,
}

impl AclSnapshot {
    pub fn new(acls: HashMap<i32, EncryptionKeyAcl>) -> Self { Self { acls: Arc::new(acls) } }
    pub fn empty() -> Self { Self::default() }

    /// Whether `principal` may read `key`. Errors only when the principal has no site.
    pub fn can_access_key<P, K>(&self, principal: &P, key: &K, fallback: LegacyFallback) -> AuthzResult<bool>
    where
        P: SitePrincipal + ?Sized,
        K: SiteOwned + ?Sized,
    {
        self.decide(principal, key, fallback).map(|d| d.allow)
    }

    /// Same as [`AclSnapshot::can_access_key`] but reports which branch decided.
    pub fn decide<P, K>(&self, principal: &P, key: &K, fallback: LegacyFallback) -> AuthzResult<AccessDecision>
    where
        P: SitePrincipal + ?Sized,
        K: SiteOwned + ?Sized,
    {
        let key_site = key.site_id();
        let Some(requester) = principal.site_id() else {
            warn!(target: "keyauthz::acl", key_site, "access check for principal without site id");
            return Err(AuthzError::invalid("principal has no site id"));
        };

        // Own keys are never subject to the owner's ACL.
        let decision = if requester == key_site {
            AccessDecision { allow: true, reason: DecisionReason::SameSite }
        } else {
            match self.acls.get(&key_site) {
                None => AccessDecision { allow: fallback == LegacyFallback::DefaultAllow, reason: DecisionReason::NoAclFallback },
                Some(acl) if acl.can_be_accessed_by_site(requester) => AccessDecision { allow: true, reason: DecisionReason::AclAllow },
                Some(_) => AccessDecision { allow: false, reason: DecisionReason::AclDeny },
            }
        };
        debug!(
            target: "keyauthz::acl",
            requester, key_site, allow = decision.allow, reason = decision.reason.as_str(), ?fallback,
            "key access decision"
        );
        Ok(decision)
    }

    /// Read-only view of every ACL in the snapshot.
    pub fn all_acls(&self) -> &HashMap<i32, EncryptionKeyAcl> { &self.acls }

    pub fn acl_for_site(&self, site_id: i32) -> Option<&EncryptionKeyAcl> { self.acls.get(&site_id) }
    pub fn len(&self) -> usize { self.acls.len() }
    pub fn is_empty(&self) -> bool { self.acls.is_empty() }
}

impl From<HashMap<i32, EncryptionKeyAcl>> for AclSnapshot {
    fn from(acls: HashMap<i32, EncryptionKeyAcl>) -> Self { Self::new(acls) }
}

impl FromIterator<(i32, EncryptionKeyAcl)> for AclSnapshot {
    fn from_iter<T: IntoIterator<Item = (i32, EncryptionKeyAcl)>>(iter: T) -> Self { Self::new(iter.into_iter().collect()) }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
