//! Logging setup for hosts embedding the authorization core.

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AuthzConfig;

static INIT: OnceCell<()> = OnceCell::new();

/// Install a fmt subscriber filtered by `RUST_LOG`, or by `config.log_filter` when unset.
/// Later calls are no-ops; a subscriber installed elsewhere is kept and noted at debug.
pub fn init_tracing(config: &AuthzConfig) -> Result<()> {
    INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_filter))
            .map_err(|e| anyhow!("invalid log filter '{}': {}", config.log_filter, e))?;
        if fmt().with_env_filter(filter).try_init().is_err() {
            tracing::debug!(target: "keyauthz::telemetry", "global subscriber already installed; keeping it");
        }
        Ok::<(), anyhow::Error>(())
    })
    .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_repeatable() {
        let cfg = AuthzConfig::default();
        init_tracing(&cfg).unwrap();
        init_tracing(&cfg).unwrap();
    }
}
