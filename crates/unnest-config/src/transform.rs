//! Transformation defaults.

use serde::{Deserialize, Serialize};

/// Default instance ordinal.
const fn default_counter() -> u32 {
    1
}

const fn default_check_diagnostics() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransformConfig {
    /// 1-based ordinal of the wrapper to unwrap when `--counter` is absent.
    #[serde(default = "default_counter")]
    pub counter: u32,

    /// Re-parse the rewritten source and fail the run on syntax errors.
    #[serde(default = "default_check_diagnostics")]
    pub check_diagnostics: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            counter: default_counter(),
            check_diagnostics: default_check_diagnostics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = TransformConfig::default();
        assert_eq!(config.counter, 1);
        assert!(config.check_diagnostics);
    }
}
