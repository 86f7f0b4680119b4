use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::principal::{RoleAuthorizable, SitePrincipal};
use super::role::{Role, RoleSet};
use crate::error::AuthzError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatorType {
    Public,
    #[default]
    Private,
}

impl OperatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorType::Public => "PUBLIC",
            OperatorType::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OperatorType {
    type Err = AuthzError;

    /// Exact upper-case names only, matching what the store persists.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUBLIC" => Ok(OperatorType::Public),
            "PRIVATE" => Ok(OperatorType::Private),
            other => Err(AuthzError::malformed("operator_type", format!("unknown operator type '{}'", other))),
        }
    }
}

/// Operator principal as loaded from the operator store.
///
/// Equality and hashing cover every field, so two keys loaded from the same
/// record are interchangeable as map keys while any edit (including a role
/// change) makes them distinct. Deserialization goes through
/// [`OperatorKey::from_record`], so both paths accept and reject the same records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct OperatorKey {
    key: String,
    name: String,
    contact: String,
    protocol: String,
    /// epoch seconds
    created: i64,
    disabled: bool,
    site_id: Option<i32>,
    roles: RoleSet,
    operator_type: OperatorType,
}

impl OperatorKey {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        contact: impl Into<String>,
        protocol: impl Into<String>,
        created: i64,
        disabled: bool,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            contact: contact.into(),
            protocol: protocol.into(),
            created,
            disabled,
            site_id: None,
            roles: RoleSet::default(),
            operator_type: OperatorType::default(),
        }
    }

    pub fn with_site_id(mut self, site_id: Option<i32>) -> Self { self.site_id = site_id; self }
    pub fn with_operator_type(mut self, operator_type: OperatorType) -> Self { self.operator_type = operator_type; self }
    pub fn with_roles<I: IntoIterator<Item = Role>>(mut self, roles: I) -> Self { self.set_roles(roles); self }

    pub fn key(&self) -> &str { &self.key }
    pub fn name(&self) -> &str { &self.name }
    pub fn contact(&self) -> &str { &self.contact }
    pub fn protocol(&self) -> &str { &self.protocol }
    pub fn created(&self) -> i64 { self.created }
    pub fn is_disabled(&self) -> bool { self.disabled }
    pub fn site_id(&self) -> Option<i32> { self.site_id }
    pub fn operator_type(&self) -> OperatorType { self.operator_type }
    pub fn roles(&self) -> &RoleSet { &self.roles }

    pub fn has_role(&self, role: Role) -> bool { self.roles.contains(role) }

    /// Replace the role set. The new set is built in full before it is assigned.
    pub fn set_roles<I: IntoIterator<Item = Role>>(&mut self, roles: I) {
        self.roles = RoleSet::normalize(roles);
    }

    /// Nullable form of [`OperatorKey::set_roles`]; absent input resets to the default role.
    pub fn set_roles_nullable<I: IntoIterator<Item = Option<Role>>>(&mut self, roles: Option<I>) {
        self.roles = RoleSet::from_nullable(roles);
    }

    pub fn set_key(&mut self, key: impl Into<String>) { self.key = key.into(); }
    pub fn set_disabled(&mut self, disabled: bool) { self.disabled = disabled; }
    pub fn set_site_id(&mut self, site_id: Option<i32>) { self.site_id = site_id; }
    pub fn set_operator_type(&mut self, operator_type: OperatorType) { self.operator_type = operator_type; }
}

impl RoleAuthorizable<Role> for OperatorKey {
    fn has_role(&self, role: Role) -> bool { self.roles.contains(role) }
}

impl SitePrincipal for OperatorKey {
    fn site_id(&self) -> Option<i32> { self.site_id }
}
