pub mod redact;
pub mod scan;

use pii_config::Config;
use pii_core::PiiType;
use pii_detect::Registry;

/// Built-in registry minus the types disabled in config
pub fn registry_from_config(config: &Config) -> Registry {
    let disabled: Vec<PiiType> = config
        .disabled_types
        .iter()
        .filter_map(|tag| {
            let parsed = PiiType::from_tag(tag);
            if parsed.is_none() {
                tracing::warn!(tag = %tag, "unknown identifier type in config, ignoring");
            }
            parsed
        })
        .collect();
    Registry::built_in().clone().without(&disabled)
}
