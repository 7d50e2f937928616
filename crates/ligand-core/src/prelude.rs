//! Ligand Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use ligand_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    AtomicNumber, AttenuationOutcome, BondKind, BondPosition, ElementId, InsertOutcome,
    InsertionPoint, Property,
};

// Re-export the bonding machinery
pub use crate::atom::Atom;
pub use crate::bond::Bond;
pub use crate::quantum::Quantum;

// Re-export the root abstraction and downcast helpers
pub use crate::wave::{canonical_name, downcast_wave, downcast_wave_mut, Envelope, Wave};

// Re-export the registry
pub use crate::table::{Element, PeriodicTable};

// Re-export registration glue
pub use crate::elemental::{get_instance, Elemental};

// Re-export motifs
pub use crate::motif::{Excitation, LinearMotif, MotifElement, StructuralMotif, UnorderedMotif};

// Re-export serialization
pub use crate::symmetry::Symmetry;

// Re-export error types
pub use crate::error::{LigandError, Result};
