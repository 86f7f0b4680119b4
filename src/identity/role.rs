//! Role tags and the normalized role set carried by every principal.
//!
//! `RoleSet` can only be built through normalization, so every set in the
//! process is sorted, duplicate-free and contains `Role::DEFAULT`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AuthzError;

/// Permission tags. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Operator,
    Optout,
    OptoutService,
    Administrator,
    OperatorManager,
    SecretManager,
    PrivateOperatorSync,
}

impl Role {
    /// Carried by every principal regardless of what was granted.
    pub const DEFAULT: Role = Role::Operator;

    pub const ALL: [Role; 7] = [
        Role::Operator,
        Role::Optout,
        Role::OptoutService,
        Role::Administrator,
        Role::OperatorManager,
        Role::SecretManager,
        Role::PrivateOperatorSync,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "OPERATOR",
            Role::Optout => "OPTOUT",
            Role::OptoutService => "OPTOUT_SERVICE",
            Role::Administrator => "ADMINISTRATOR",
            Role::OperatorManager => "OPERATOR_MANAGER",
            Role::SecretManager => "SECRET_MANAGER",
            Role::PrivateOperatorSync => "PRIVATE_OPERATOR_SYNC",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = AuthzError;

    /// Case-insensitive; unknown names are a record error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AuthzError::malformed("roles", format!("unknown role '{}'", s)))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(|e: AuthzError| serde::de::Error::custom(e))
    }
}

/// Sorted, duplicate-free, never-empty set of roles. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleSet(Arc<BTreeSet<Role>>);

impl RoleSet {
    /// Build a set from any collection of roles, adding the default role.
    pub fn normalize<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        let mut set: BTreeSet<Role> = roles.into_iter().collect();
        set.insert(Role::DEFAULT);
        RoleSet(Arc::new(set))
    }

    /// Same as [`RoleSet::normalize`] for input that may be absent or hold absent entries.
    pub fn from_nullable<I: IntoIterator<Item = Option<Role>>>(roles: Option<I>) -> Self {
        match roles {
            Some(items) => Self::normalize(items.into_iter().flatten()),
            None => Self::default(),
        }
    }

    pub fn contains(&self, role: Role) -> bool { self.0.contains(&role) }
    pub fn len(&self) -> usize { self.0.len() }
    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ { self.0.iter().copied() }
    pub fn as_set(&self) -> &BTreeSet<Role> { &self.0 }

    /// Roles beyond the default one.
    pub fn granted(&self) -> impl Iterator<Item = Role> + '_ { self.iter().filter(|r| *r != Role::DEFAULT) }
}

impl Default for RoleSet {
    fn default() -> Self { Self::normalize(std::iter::empty()) }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self { Self::normalize(iter) }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a Role;
    type IntoIter = std::collections::btree_set::Iter<'a, Role>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<Vec<Option<Role>>> = Option::deserialize(deserializer)?;
        Ok(RoleSet::from_nullable(raw))
    }
}

/// Normalize a nullable role collection. Never fails.
pub fn normalize_roles<I: IntoIterator<Item = Option<Role>>>(roles: Option<I>) -> RoleSet {
    RoleSet::from_nullable(roles)
}
