//! Building operator principals from store records (parsed JSON objects).
//! Identity fields are strict; the role list is lenient and goes through normalization.

use serde_json::{Map, Value};
use tracing::warn;

use super::operator::{OperatorKey, OperatorType};
use super::role::{Role, RoleSet};
use crate::config::AuthzConfig;
use crate::error::{AuthzError, AuthzResult};

fn required_str<'a>(obj: &'a Map<String, Value>, field: &str) -> AuthzResult<&'a str> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(AuthzError::malformed(field, format!("expected string, found {}", type_name(other)))),
        None => Err(AuthzError::malformed(field, "required field is missing")),
    }
}

fn required_i64(obj: &Map<String, Value>, field: &str) -> AuthzResult<i64> {
    match obj.get(field) {
        Some(v @ Value::Number(n)) => n.as_i64().ok_or_else(|| AuthzError::malformed(field, format!("expected integer, found {}", v))),
        Some(other) => Err(AuthzError::malformed(field, format!("expected integer, found {}", type_name(other)))),
        None => Err(AuthzError::malformed(field, "required field is missing")),
    }
}

fn optional_bool(obj: &Map<String, Value>, field: &str, default: bool) -> AuthzResult<bool> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(AuthzError::malformed(field, format!("expected boolean, found {}", type_name(other)))),
    }
}

fn optional_site_id(obj: &Map<String, Value>) -> AuthzResult<Option<i32>> {
    match obj.get("site_id") {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::Number(n)) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| AuthzError::malformed("site_id", format!("expected 32-bit integer, found {}", v))),
        Some(other) => Err(AuthzError::malformed("site_id", format!("expected integer, found {}", type_name(other)))),
    }
}

fn optional_operator_type(obj: &Map<String, Value>, default: OperatorType) -> AuthzResult<OperatorType> {
    match obj.get("operator_type") {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(AuthzError::malformed("operator_type", format!("expected string, found {}", type_name(other)))),
    }
}

/// Absent, null and empty lists all collapse to the default role.
fn role_list(obj: &Map<String, Value>) -> AuthzResult<RoleSet> {
    let items = match obj.get("roles") {
        None | Some(Value::Null) => return Ok(RoleSet::default()),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(AuthzError::malformed("roles", format!("expected array, found {}", type_name(other)))),
    };
    let mut parsed: Vec<Option<Role>> = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => parsed.push(None),
            Value::String(s) => parsed.push(Some(s.parse()?)),
            other => return Err(AuthzError::malformed("roles", format!("expected role name, found {}", type_name(other)))),
        }
    }
    Ok(RoleSet::from_nullable(Some(parsed)))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl OperatorKey {
    /// Build from a store record using the stock defaults.
    pub fn from_record(record: &Value) -> AuthzResult<Self> {
        Self::from_record_with(record, &AuthzConfig::default())
    }

    /// Build from a store record; `operator_type` falls back to `config.default_operator_type`.
    pub fn from_record_with(record: &Value, config: &AuthzConfig) -> AuthzResult<Self> {
        Self::parse_record(record, config).inspect_err(|e| {
            warn!(target: "keyauthz::identity", code = e.code_str(), field = e.field().unwrap_or(""), "rejected operator record: {}", e.message());
        })
    }

    fn parse_record(record: &Value, config: &AuthzConfig) -> AuthzResult<Self> {
        let obj = record
            .as_object()
            .ok_or_else(|| AuthzError::malformed("<record>", format!("expected object, found {}", type_name(record))))?;

        let key = required_str(obj, "key")?;
        let name = required_str(obj, "name")?;
        let contact = required_str(obj, "contact")?;
        let protocol = required_str(obj, "protocol")?;
        let created = required_i64(obj, "created")?;
        let disabled = optional_bool(obj, "disabled", false)?;
        let site_id = optional_site_id(obj)?;
        let operator_type = optional_operator_type(obj, config.default_operator_type)?;
        let roles = role_list(obj)?;

        let mut op = OperatorKey::new(key, name, contact, protocol, created, disabled)
            .with_site_id(site_id)
            .with_operator_type(operator_type);
        op.set_roles(roles.iter());
        Ok(op)
    }
}

impl TryFrom<Value> for OperatorKey {
    type Error = AuthzError;

    fn try_from(record: Value) -> AuthzResult<Self> { OperatorKey::from_record(&record) }
}
