//! Error types for Ligand operations.
//!
//! Provides structured error handling instead of panics. Lookups that
//! merely miss return `Option`; refusals (double-bonding, double
//! association, missing anchors) surface here.

use std::error::Error;
use std::fmt;

use crate::types::{AtomicNumber, ElementId};

/// Result type for Ligand operations.
pub type Result<T> = std::result::Result<T, LigandError>;

/// Errors that can occur during Ligand operations.
#[derive(Debug, Clone)]
pub enum LigandError {
    /// Periodic-table errors.
    Table(TableError),
    /// Bond-related errors.
    Bond(BondError),
    /// Motif-container errors.
    Motif(MotifError),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for LigandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LigandError::Table(e) => write!(f, "Table error: {}", e),
            LigandError::Bond(e) => write!(f, "Bond error: {}", e),
            LigandError::Motif(e) => write!(f, "Motif error: {}", e),
            LigandError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for LigandError {}

impl From<serde_json::Error> for LigandError {
    fn from(e: serde_json::Error) -> Self {
        LigandError::Serialization(e.to_string())
    }
}

/// Periodic-table errors.
#[derive(Debug, Clone)]
pub enum TableError {
    /// The element already owns a prototype; disassociate first.
    PrototypePresent(AtomicNumber),
    /// No element is registered under this number.
    UnknownNumber(AtomicNumber),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::PrototypePresent(n) => {
                write!(f, "Element {} already has a prototype", n.0)
            }
            TableError::UnknownNumber(n) => write!(f, "No element registered as {}", n.0),
        }
    }
}

/// Bond-related errors.
#[derive(Debug, Clone)]
pub enum BondError {
    /// A non-empty bond for this species already exists on the atom.
    Occupied(AtomicNumber),
    /// The bond slot is not empty and cannot be formed over.
    SlotOccupied,
    /// The invalid number cannot be bonded.
    InvalidNumber,
    /// One or more resonant targets failed to accept a signal.
    AttenuationIncomplete { failed: usize },
}

impl fmt::Display for BondError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondError::Occupied(n) => {
                write!(f, "Species {} is already bonded; break it first", n.0)
            }
            BondError::SlotOccupied => write!(f, "Bond slot is occupied"),
            BondError::InvalidNumber => write!(f, "Cannot bond the invalid atomic number"),
            BondError::AttenuationIncomplete { failed } => {
                write!(f, "{} resonant target(s) failed to accept the signal", failed)
            }
        }
    }
}

/// Motif-container errors.
#[derive(Debug, Clone)]
pub enum MotifError {
    /// A positional insert referenced an anchor that is not present.
    AnchorNotFound(ElementId),
    /// No prototype is registered for the element species.
    NoPrototype(String),
    /// The merge source is not a motif of the same element type.
    IncompatibleSource,
}

impl fmt::Display for MotifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotifError::AnchorNotFound(id) => write!(f, "Anchor element not found: {}", id.0),
            MotifError::NoPrototype(name) => {
                write!(f, "No prototype registered for species: {}", name)
            }
            MotifError::IncompatibleSource => {
                write!(f, "Merge source is not a motif of the same element type")
            }
        }
    }
}

// Convenience constructors
impl LigandError {
    pub fn prototype_present(number: AtomicNumber) -> Self {
        LigandError::Table(TableError::PrototypePresent(number))
    }

    pub fn bond_occupied(number: AtomicNumber) -> Self {
        LigandError::Bond(BondError::Occupied(number))
    }

    pub fn anchor_not_found(id: ElementId) -> Self {
        LigandError::Motif(MotifError::AnchorNotFound(id))
    }

    pub fn no_prototype(name: impl Into<String>) -> Self {
        LigandError::Motif(MotifError::NoPrototype(name.into()))
    }
}
