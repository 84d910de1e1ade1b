//! Application state: the one shared `HintGenerator`.
//!
//! Built once at startup from env + optional TOML config, then handed to the
//! router. Nothing in here is mutated after construction.

use tracing::{info, instrument};

use crate::config::{load_hint_config_from_env, LlmSettings};
use crate::hints::HintGenerator;
use crate::provider::build_provider;

#[derive(Clone)]
pub struct AppState {
    pub hints: HintGenerator,
}

impl AppState {
    /// Build state from env: load config, build the provider client, wire the generator.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_hint_config_from_env().unwrap_or_default();
        let settings = LlmSettings::from_env();
        let provider = build_provider(&settings);
        let hints = HintGenerator::new(provider, cfg.prompts, cfg.quality_gate);

        info!(
            target: "ciphersql_backend",
            provider = hints.provider_name(),
            quality_gate = ?hints.gate_policy(),
            "Hint generator ready"
        );
        Self::with_generator(hints)
    }

    pub fn with_generator(hints: HintGenerator) -> Self {
        Self { hints }
    }
}
