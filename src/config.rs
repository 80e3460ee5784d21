//! # Scaler Configuration
//!
//! Configuration for the ingredient scaling engine: factor bounds and step
//! for the multiplier controls, the section-title patterns used to locate
//! the ingredients heading, and the class/attribute names the engine reads
//! and writes on the document tree.
//!
//! An optional JSON override can be supplied through the
//! `INGREDIENT_SCALER_CONFIG_PATH` environment variable; any failure to
//! read or parse it falls back to the built-in defaults with a warning.

use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};

/// Configuration options for the scaling engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerConfig {
    /// Lower bound for the multiplier factor
    pub min_factor: f64,
    /// Upper bound for the multiplier factor
    pub max_factor: f64,
    /// Step applied by the increment/decrement controls
    pub step: f64,
    /// Case-variant spellings matched against the section heading id
    pub section_title_patterns: Vec<String>,
    /// Class added to a unit's node while its text is scaled
    pub marker_class: String,
    /// Class of the inserted multiplier control container
    pub control_class: String,
    /// Attribute marking inline spans that carry a scalable quantity
    pub parse_attr: String,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            min_factor: 0.1,
            max_factor: 10.0,
            step: 0.1,
            section_title_patterns: vec!["hozzávalók".to_string(), "Hozzávalók".to_string()],
            marker_class: "ingredient-scaled".to_string(),
            control_class: "ingredient-multiplier".to_string(),
            parse_attr: "data-qty-parse".to_string(),
        }
    }
}

impl ScalerConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> AppResult<()> {
        if !self.min_factor.is_finite() || self.min_factor <= 0.0 {
            return Err(AppError::Config(
                "min_factor must be a positive number".to_string(),
            ));
        }
        if !self.max_factor.is_finite() || self.max_factor <= self.min_factor {
            return Err(AppError::Config(
                "max_factor must be greater than min_factor".to_string(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(AppError::Config(
                "step must be a positive number".to_string(),
            ));
        }
        if self.section_title_patterns.is_empty() {
            return Err(AppError::Config(
                "section_title_patterns cannot be empty".to_string(),
            ));
        }
        for (i, pattern) in self.section_title_patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "section_title_patterns[{}] cannot be empty",
                    i
                )));
            }
        }
        if self.marker_class.trim().is_empty() || self.control_class.trim().is_empty() {
            return Err(AppError::Config(
                "marker_class and control_class cannot be empty".to_string(),
            ));
        }
        if self.parse_attr.trim().is_empty() {
            return Err(AppError::Config("parse_attr cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Load configuration, honoring the `INGREDIENT_SCALER_CONFIG_PATH`
    /// environment variable when set. Falls back to defaults on any error.
    pub fn load() -> ScalerConfig {
        if let Ok(config_path) = std::env::var("INGREDIENT_SCALER_CONFIG_PATH") {
            info!("Loading scaler config from: {}", config_path);
            match fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str::<ScalerConfig>(&content) {
                    Ok(config) => {
                        info!("Successfully loaded scaler config from: {}", config_path);
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            "Failed to parse scaler config from '{}': {}. Using defaults.",
                            config_path, e
                        );
                    }
                },
                Err(e) => {
                    warn!(
                        "Failed to read scaler config from '{}': {}. Using defaults.",
                        config_path, e
                    );
                }
            }
        }
        ScalerConfig::default()
    }

    /// Clamp a user-entered factor into the configured bounds. Non-finite
    /// input (unparsable entry upstream) falls back to the identity factor.
    pub fn clamp_factor(&self, factor: f64) -> f64 {
        if !factor.is_finite() {
            return 1.0;
        }
        factor.clamp(self.min_factor, self.max_factor)
    }
}
