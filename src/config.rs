use serde::{Deserialize, Serialize};

use crate::acl::LegacyFallback;
use crate::identity::OperatorType;

/// Process-wide defaults for the authorization core.
///
/// Nothing here is consulted implicitly: a call site that wants the configured
/// fallback reads `legacy_fallback` and passes it to the decision call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthzConfig {
    pub legacy_fallback: LegacyFallback,
    /// Used when an operator record carries no `operator_type`.
    pub default_operator_type: OperatorType,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            legacy_fallback: LegacyFallback::DefaultAllow,
            default_operator_type: OperatorType::Private,
            log_filter: "info".to_string(),
        }
    }
}

/// Partial settings layered on top of the defaults. Unspecified values inherit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthzOverrides {
    pub legacy_fallback: Option<LegacyFallback>,
    pub default_operator_type: Option<OperatorType>,
    pub log_filter: Option<String>,
}

impl AuthzOverrides {
    /// Read `KEYAUTHZ_LEGACY_FALLBACK`, `KEYAUTHZ_DEFAULT_OPERATOR_TYPE` and `KEYAUTHZ_LOG`.
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let legacy_fallback = lookup("KEYAUTHZ_LEGACY_FALLBACK").and_then(|v| match v.parse::<LegacyFallback>() {
            Ok(f) => Some(f),
            Err(e) => { tracing::warn!(target: "keyauthz::config", "ignoring KEYAUTHZ_LEGACY_FALLBACK: {}", e); None }
        });
        let default_operator_type = lookup("KEYAUTHZ_DEFAULT_OPERATOR_TYPE").and_then(|v| match v.trim().to_ascii_uppercase().parse::<OperatorType>() {
            Ok(t) => Some(t),
            Err(e) => { tracing::warn!(target: "keyauthz::config", "ignoring KEYAUTHZ_DEFAULT_OPERATOR_TYPE: {}", e.message()); None }
        });
        let log_filter = lookup("KEYAUTHZ_LOG").filter(|v| !v.trim().is_empty());
        Self { legacy_fallback, default_operator_type, log_filter }
    }
}

impl AuthzConfig {
    pub fn from_layers(base: &AuthzConfig, overrides: &AuthzOverrides) -> Self {
        Self {
            legacy_fallback: overrides.legacy_fallback.unwrap_or(base.legacy_fallback),
            default_operator_type: overrides.default_operator_type.unwrap_or(base.default_operator_type),
            log_filter: overrides.log_filter.clone().unwrap_or_else(|| base.log_filter.clone()),
        }
    }

    /// Defaults overlaid with the environment.
    pub fn from_env() -> Self { Self::from_layers(&Self::default(), &AuthzOverrides::from_env()) }
}
