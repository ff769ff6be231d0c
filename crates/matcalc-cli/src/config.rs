use std::path::Path;

use anyhow::{Context, Result};

use matcalc_kernel::KernelConfig;

/// Load a kernel configuration from a JSON file. Missing fields take their defaults.
pub fn load_kernel_config<P: AsRef<Path>>(path: P) -> Result<KernelConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: KernelConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Load the config at `path`, or fall back to defaults when none is given.
pub fn resolve_kernel_config(path: Option<&Path>) -> Result<KernelConfig> {
    match path {
        Some(path) => {
            log::info!("[matcalc] Using config: {:?}", path);
            load_kernel_config(path)
        }
        None => {
            let config = KernelConfig::default();
            log::debug!(
                "[matcalc] No config provided; using defaults: {}",
                serde_json::to_string(&config).unwrap_or_default()
            );
            Ok(config)
        }
    }
}
