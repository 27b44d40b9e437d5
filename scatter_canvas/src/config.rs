// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use scatter_layout::{LayoutConfig, ViewMode};
use scatter_motion::MotionConfig;
use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

/// Configuration of a [`crate::CanvasEngine`].
///
/// Every field has a default, so a configuration document only needs the
/// fields it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Packing tunables.
    pub layout: LayoutConfig,
    /// Panning tunables.
    pub motion: MotionConfig,
    /// Delay that coalesces resize and content-load relayout requests.
    pub relayout_debounce_ms: f64,
    /// Maximum number of search results.
    pub search_limit: usize,
    /// Seed for shuffling; entropy is used when absent.
    pub shuffle_seed: Option<u64>,
    /// View mode at startup.
    pub initial_mode: ViewMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            motion: MotionConfig::default(),
            relayout_debounce_ms: 120.0,
            search_limit: 12,
            shuffle_seed: None,
            initial_mode: ViewMode::Grid,
        }
    }
}

impl CanvasConfig {
    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, CanvasError> {
        serde_json::from_str(json).map_err(CanvasError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(CanvasConfig::from_json_str("{}").unwrap(), CanvasConfig::default());
    }

    #[test]
    fn partial_overrides() {
        let config = CanvasConfig::from_json_str(
            r#"{"layout": {"column_width": 300}, "motion": {"friction": 0.9},
                "shuffle_seed": 7, "initial_mode": "compact"}"#,
        )
        .unwrap();
        assert_eq!(config.layout.column_width, 300.0);
        assert_eq!(config.layout.column_gap, 60.0);
        assert_eq!(config.motion.friction, 0.9);
        assert_eq!(config.shuffle_seed, Some(7));
        assert_eq!(config.initial_mode, ViewMode::Compact);
        assert_eq!(config.search_limit, 12);
    }

    #[test]
    fn bad_document_is_config_error() {
        assert!(matches!(
            CanvasConfig::from_json_str(r#"{"search_limit": "many"}"#),
            Err(CanvasError::Config(_))
        ));
    }
}
