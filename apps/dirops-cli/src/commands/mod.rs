//! CLI subcommands.

pub mod disable;
pub mod search;

use dirops_gateway::{GatewayConfig, PsGateway};

/// Build the directory gateway, honoring the `DIROPS_SHELL` override.
pub(crate) fn gateway() -> PsGateway {
    let mut config = GatewayConfig::default();
    if let Ok(shell) = std::env::var("DIROPS_SHELL") {
        config.shell = shell;
    }
    PsGateway::new(config)
}
