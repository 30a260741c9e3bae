//! Configuration validation functions.

use super::Config;

/// Validate settings that would make the service unusable or insecure.
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    if config.registry.default_max_players == 0 {
        anyhow::bail!(
            "registry.default_max_players must be at least 1; \
             a server without slots can never accept a player"
        );
    }

    if config.broker.enabled {
        if config.broker.host.trim().is_empty() {
            anyhow::bail!(
                "broker.host must be provided when the broker is enabled \
                 (set GAME_REGISTRY__BROKER__HOST or GAME_REGISTRY__BROKER__ENABLED=false)"
            );
        }
        if config.broker.user.trim().is_empty() {
            anyhow::bail!("broker.user must be provided when the broker is enabled");
        }

        if is_production_mode() && config.broker.password == "guest" {
            eprintln!(
                "\nSECURITY WARNING: Default Broker Credentials in Production!\n\
                 ===================================================================\n\
                 The broker password is still the default 'guest'.\n\
                 \n\
                 Configure dedicated credentials:\n\
                 export GAME_REGISTRY__BROKER__USER=\"registry\"\n\
                 export GAME_REGISTRY__BROKER__PASSWORD=\"$(openssl rand -hex 16)\"\n\
                 ===================================================================\n"
            );
        }
    } else if is_production_mode() {
        eprintln!(
            "WARNING: broker disabled in production; messages are only routed in-process"
        );
    }

    Ok(())
}

/// Detect if we're running in production mode.
///
/// Checks `GAME_REGISTRY__ENVIRONMENT`, then generic `PRODUCTION` / `PROD` variables.
pub fn is_production_mode() -> bool {
    use std::env;

    if let Ok(mode) = env::var("GAME_REGISTRY__ENVIRONMENT") {
        let mode = mode.to_lowercase();
        return mode == "production" || mode == "prod";
    }

    env::var("GAME_REGISTRY_PRODUCTION").is_ok()
        || env::var("PRODUCTION").is_ok()
        || env::var("PROD").is_ok()
}
