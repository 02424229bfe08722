use serde::{Deserialize, Serialize};

use crate::driver::config::Config;

/// This struct holds the settings shared by every function of a compilation
/// unit. It is read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileUnitInfo {
    /// How multi-parameter join points are lowered.
    pub backend_mode: BackendMode,
    /// Whether to render a debug listing of each function.
    pub print_ir: bool,
}

impl CompileUnitInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            backend_mode: config.backend.mode,
            print_ir: config.debug.print_ir,
        }
    }
}

/// How the emitter passes arguments to a join point with several parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendMode {
    /// One local per parameter.
    #[default]
    PerParameter,
    /// One tuple local per join point, keyed by its label.
    Aggregate,
}
