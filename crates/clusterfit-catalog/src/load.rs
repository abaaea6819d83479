//! Catalog container and TOML loading.
//!
//! A [`Catalog`] is a versioned, immutable list of accelerator specs. The
//! built-in table covers current cloud parts; operators with negotiated
//! hardware or private SKUs can supply their own catalog file:
//!
//! ```toml
//! version = "custom-2026"
//!
//! [[accelerator]]
//! name = "H100 SXM"
//! vendor = "nvidia"
//! memory_gb = 80.0
//! bandwidth_gb_s = 3350.0
//! dense_tflops = 1979.0
//! low_precision_tflops = 3958.0
//! tdp_watts = 700
//! interconnect_gb_s = 900.0
//! hourly_usd_low = 2.49
//! hourly_usd_typical = 3.50
//! ```

use crate::builtin;
use crate::spec::AcceleratorSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid catalog: {0}")]
    Validation(String),
}

/// A versioned set of accelerator specs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog revision tag, surfaced in reports so recommendations can be
    /// traced back to the hardware table that produced them.
    pub version: String,
    #[serde(rename = "accelerator")]
    pub accelerators: Vec<AcceleratorSpec>,
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            version: builtin::BUILTIN_VERSION.to_string(),
            accelerators: builtin::accelerators(),
        }
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Look up an accelerator by name.
    pub fn get(&self, name: &str) -> Option<&AcceleratorSpec> {
        self.accelerators.iter().find(|s| s.name == name)
    }

    /// Accelerators the advisor considers when ranking.
    pub fn rankable(&self) -> impl Iterator<Item = &AcceleratorSpec> {
        self.accelerators.iter().filter(|s| s.rankable())
    }

    /// Validate catalog consistency.
    fn validate(&self) -> Result<(), CatalogError> {
        if self.version.trim().is_empty() {
            return Err(CatalogError::Validation(
                "version must be non-empty".to_string(),
            ));
        }
        if self.accelerators.is_empty() {
            return Err(CatalogError::Validation(
                "catalog must contain at least one accelerator".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for spec in &self.accelerators {
            if !seen.insert(spec.name.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate accelerator name: {}",
                    spec.name
                )));
            }
            if spec.memory_gb <= 0.0 {
                return Err(CatalogError::Validation(format!(
                    "{}: memory_gb must be > 0",
                    spec.name
                )));
            }
            if spec.bandwidth_gb_s <= 0.0 {
                return Err(CatalogError::Validation(format!(
                    "{}: bandwidth_gb_s must be > 0",
                    spec.name
                )));
            }
            if spec.interconnect_domain == 0 {
                return Err(CatalogError::Validation(format!(
                    "{}: interconnect_domain must be >= 1",
                    spec.name
                )));
            }
            if spec.hourly_usd_typical <= 0.0 {
                return Err(CatalogError::Validation(format!(
                    "{}: hourly_usd_typical must be > 0",
                    spec.name
                )));
            }
            if let Some(min) = spec.min_devices {
                if min == 0 {
                    return Err(CatalogError::Validation(format!(
                        "{}: min_devices must be >= 1 when set",
                        spec.name
                    )));
                }
            }
        }
        Ok(())
    }
}
