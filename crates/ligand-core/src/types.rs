//! Shared types used across all Ligand bonding primitives.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registry identifier for a species of wave — one per canonical type name.
///
/// Numbers are allocated monotonically from 1 by the [`PeriodicTable`];
/// 0 is reserved as the invalid sentinel and never maps to a real element.
///
/// [`PeriodicTable`]: crate::table::PeriodicTable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AtomicNumber(pub u32);

impl AtomicNumber {
    /// The reserved invalid number. Never allocated to an element.
    pub const INVALID: AtomicNumber = AtomicNumber(0);

    /// Whether this number refers to a real element.
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl Default for AtomicNumber {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Unique identity for a motif element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id for tests.
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u128(seed as u128))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// A capability tag recorded per species in the periodic table.
///
/// Two waves *resonate* when their tag sets share at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// The wave is a structural motif container (consumed by `import_all`).
    Structural,
    /// The wave keeps its contents in insertion order.
    Linear,
    /// The wave keeps its contents without order.
    Unordered,
    /// Domain-specific tag declared by downstream species.
    Custom(String),
}

impl Property {
    pub fn custom(tag: impl Into<String>) -> Self {
        Property::Custom(tag.into())
    }
}

/// Whether any tag is shared between two property sets.
pub fn resonates(a: &[Property], b: &[Property]) -> bool {
    a.iter().any(|p| b.contains(p))
}

/// The kind of attachment a bond records.
///
/// In Rust the atom always owns the boxed target; the kind records the
/// caller's intent and survives serialization for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondKind {
    /// No attachment — the slot is empty.
    Empty,
    /// Self-reference formed during construction of a composed object.
    Virtual,
    /// Target managed for the lifetime of the atom.
    Managed,
    /// Target conceptually borrowed from elsewhere.
    Used,
    /// Short-lived attachment expected to be broken soon.
    Temporary,
    /// Shared attachment (many atoms know this target).
    Metallic,
    /// Ordinary exclusive attachment. The default for `form_bond`.
    Covalent,
}

impl Default for BondKind {
    fn default() -> Self {
        BondKind::Covalent
    }
}

/// Position of a bond within an atom's bond list.
///
/// Slot 0 is reserved and always empty, so a real position is never zero
/// and stays stable while earlier bonds are broken and re-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BondPosition(pub usize);

/// Where to insert an element into an ordered motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// Front of the motif.
    Top,
    /// Back of the motif.
    Bottom,
    /// Immediately before the element with this id.
    Before(ElementId),
    /// Immediately after the element with this id.
    After(ElementId),
}

/// Outcome of a motif insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new slot was created for the element.
    Inserted,
    /// An element with the same identity was deleted and replaced in place.
    Replaced,
}

/// Aggregate outcome of delivering a signal across an atom's bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttenuationOutcome {
    /// Every resonant target accepted the signal.
    Delivered { count: usize },
    /// Some targets failed; delivery continued past each failure.
    Partial { delivered: usize, failed: usize },
}

impl AttenuationOutcome {
    /// Whether every delivery succeeded.
    pub fn is_complete(&self) -> bool {
        matches!(self, AttenuationOutcome::Delivered { .. })
    }
}
