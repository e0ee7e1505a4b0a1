//! The resolved build plan.
//!
//! A plan is the registered build-artifact description handed to an
//! external build engine: every placeholder substituted, every source
//! location expanded to concrete compile units. Field order keeps scalar
//! values ahead of tables so the TOML encoding is valid as-is.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use mason_core::Settings;

use crate::error::PlanError;

/// A fully-resolved static library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLibrary {
    /// Artifact name.
    pub name: String,
    /// Include directories with placeholders substituted.
    pub include_dirs: Vec<String>,
    /// Preprocessor defines with placeholders substituted.
    pub defines: Vec<String>,
    /// Project-root-relative compile units, sorted and deduplicated.
    pub sources: Vec<String>,
}

/// The complete resolved plan for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    /// Platform the plan was resolved for.
    pub platform: String,
    /// Additional build targets, in registration order.
    pub targets: Vec<String>,
    /// The settings table the resolution ran with.
    pub settings: Settings,
    /// Resolved libraries, in declaration order.
    pub libraries: Vec<ResolvedLibrary>,
}

impl ResolvedPlan {
    /// Encode as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encode as pretty TOML.
    pub fn to_toml(&self) -> Result<String, PlanError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// SHA-256 over the canonical JSON encoding, hex-formatted.
    ///
    /// Deterministic list ordering in the plan makes the fingerprint stable
    /// across runs, so an external engine can detect an unchanged plan.
    pub fn fingerprint(&self) -> Result<String, PlanError> {
        let json = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&json);
        let digest = hasher.finalize();
        Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
    }
}
