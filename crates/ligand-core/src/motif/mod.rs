//! Structural motifs — typed child-element containers that ride bonds.
//!
//! A motif is how composition replaces inheritance here. A composed
//! object bonds a `LinearMotif<T>` (ordered) or `UnorderedMotif<T>`
//! (unordered) into its atom; from then on, any code holding the atom
//! can recover "the T-container" by type alone, so an ancestor can treat
//! the owner as if it natively implemented a T-collection interface it
//! never declared. A class composed of five motifs answers for five such
//! interfaces at once.
//!
//! Motifs register their species (tagged `Structural` plus `Linear` or
//! `Unordered`) in the periodic table the first time one is constructed,
//! which is what lets `import_all` discover them on a stranger's atom.

pub mod linear;
pub mod unordered;

pub use linear::LinearMotif;
pub use unordered::UnorderedMotif;

use crate::error::Result;
use crate::types::{ElementId, Property};
use crate::wave::Wave;

/// An element that can live inside a motif: a wave with stable identity.
///
/// Identity drives lookup and replacement; two elements with the same id
/// are the same logical slot, and inserting the second deletes the first.
pub trait MotifElement: Wave + Clone {
    fn id(&self) -> ElementId;

    fn set_id(&mut self, id: ElementId);

    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);
}

/// Object-safe view of a motif, used to merge containers across atoms
/// whose concrete element types are unknown to the caller.
pub trait StructuralMotif {
    /// Merge clones of `other`'s elements into this motif.
    ///
    /// `other` must be a motif of the same concrete type; anything else
    /// fails without mutation. Returns how many elements were taken in.
    fn import_from(&mut self, other: &dyn Wave) -> Result<usize>;

    /// Number of contained elements.
    fn element_count(&self) -> usize;

    /// The tags this motif species was registered with.
    fn motif_properties(&self) -> Vec<Property>;
}

/// A reified operation: a named closure applied per element by
/// [`LinearMotif::for_each`] and [`UnorderedMotif::for_each`].
///
/// Binding arguments happens at construction; the motif supplies each
/// element in turn and collects one result per element.
pub struct Excitation<T: ?Sized, R> {
    name: String,
    operation: Box<dyn FnMut(&mut T) -> R + Send>,
}

impl<T: ?Sized, R> Excitation<T, R> {
    pub fn new(name: impl Into<String>, operation: impl FnMut(&mut T) -> R + Send + 'static) -> Self {
        Self {
            name: name.into(),
            operation: Box::new(operation),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the bound operation to one element.
    pub fn excite(&mut self, element: &mut T) -> R {
        (self.operation)(element)
    }
}
