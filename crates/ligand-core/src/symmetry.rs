//! Symmetry — the opaque serialized-state value produced by `spin` and
//! consumed by `reify`.
//!
//! A symmetry is a free-form JSON value bag. Waves that have nothing worth
//! persisting return the null symmetry and accept any symmetry back as a
//! no-op; that default is deliberate, persistence is opt-in per species.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opaque serialized state of a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symmetry(serde_json::Value);

impl Symmetry {
    /// The empty symmetry — state of a wave with nothing to persist.
    pub fn null() -> Self {
        Symmetry(serde_json::Value::Null)
    }

    /// Capture a serializable value as a symmetry.
    pub fn of<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Symmetry(serde_json::to_value(value)?))
    }

    /// Reconstruct a value from this symmetry.
    pub fn to<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.0.clone())?)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// The raw JSON value (for diagnostics and custom reification).
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl Default for Symmetry {
    fn default() -> Self {
        Self::null()
    }
}

impl From<serde_json::Value> for Symmetry {
    fn from(value: serde_json::Value) -> Self {
        Symmetry(value)
    }
}
