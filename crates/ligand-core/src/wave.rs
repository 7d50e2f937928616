//! Wave — the common root abstraction.
//!
//! Everything that participates in bonding derives from `Wave`: motif
//! containers, quantum-wrapped primitives, and downstream composed
//! objects. The trait carries the three contracts every participant
//! shares:
//!
//! - **capability tags** (`properties`) for resonance-based dispatch,
//! - **spin/reify** — capture and restore state as an opaque [`Symmetry`],
//! - **downcast seams** (`as_any`, `as_atom`, `as_motif`) that let bonded
//!   structure be traversed and recovered without compiler RTTI tricks.
//!
//! Downcasts go through [`std::any::Any`], so a request for the wrong
//! type yields `None` rather than a misinterpreted pointer.

use std::any::Any;

use crate::atom::Atom;
use crate::error::Result;
use crate::motif::StructuralMotif;
use crate::symmetry::Symmetry;
use crate::types::{resonates, Property};

/// Boxed-clone support for wave trait objects.
///
/// Implemented for every `Wave + Clone` type automatically; this is what
/// makes prototypes in the periodic table and bonded targets clonable.
pub trait WaveClone {
    fn clone_wave(&self) -> Box<dyn Wave>;
}

impl<T: Wave + Clone> WaveClone for T {
    fn clone_wave(&self) -> Box<dyn Wave> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Wave> {
    fn clone(&self) -> Self {
        self.clone_wave()
    }
}

/// The common root trait for everything that can ride or own a bond.
pub trait Wave: Any + Send + Sync + WaveClone {
    /// Capability tags for this wave.
    ///
    /// By convention this returns the tags recorded for the species in the
    /// periodic table. The default is no tags, which makes the wave inert
    /// to resonance-based dispatch.
    fn properties(&self) -> Vec<Property> {
        Vec::new()
    }

    /// Capture this wave's state as an opaque symmetry.
    ///
    /// Persistence is opt-in; the default has nothing to persist.
    fn spin(&self) -> Symmetry {
        Symmetry::null()
    }

    /// Restore this wave from a previously spun symmetry.
    fn reify(&mut self, _symmetry: &Symmetry) -> Result<()> {
        Ok(())
    }

    /// Receive a signal from another wave.
    ///
    /// Called by [`Atom::attenuate`] on every bonded target that resonates
    /// with the incoming wave. The default accepts and ignores the signal.
    fn attenuate(&mut self, _other: &dyn Wave) -> Result<()> {
        Ok(())
    }

    /// Withdraw a previously delivered signal.
    ///
    /// The counterpart of [`Wave::attenuate`]; same resonance gating,
    /// same default.
    fn disattenuate(&mut self, _other: &dyn Wave) -> Result<()> {
        Ok(())
    }

    /// Whether this wave shares at least one capability tag with `other`.
    fn resonates_with(&self, other: &dyn Wave) -> bool {
        resonates(&self.properties(), &other.properties())
    }

    /// The verified-downcast seam. Every implementation returns `self`.
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`Wave::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned counterpart of [`Wave::as_any`], for recovering a concrete
    /// value from a boxed wave (broken bonds, cloned prototypes).
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// The atom carried by this wave, if it is a composed object.
    fn as_atom(&self) -> Option<&Atom> {
        None
    }

    fn as_atom_mut(&mut self) -> Option<&mut Atom> {
        None
    }

    /// This wave viewed as a structural motif, if it is one.
    fn as_motif(&self) -> Option<&dyn StructuralMotif> {
        None
    }

    fn as_motif_mut(&mut self) -> Option<&mut dyn StructuralMotif> {
        None
    }
}

/// Downcast a wave reference to a concrete type.
pub fn downcast_wave<T: Wave>(wave: &dyn Wave) -> Option<&T> {
    wave.as_any().downcast_ref::<T>()
}

/// Downcast a wave reference mutably.
pub fn downcast_wave_mut<T: Wave>(wave: &mut dyn Wave) -> Option<&mut T> {
    wave.as_any_mut().downcast_mut::<T>()
}

/// Canonical species name for a type.
///
/// Strips reference decorations and module paths so that `T`, `&T`, and
/// `&mut T` all resolve to the same periodic-table entry.
pub fn canonical_name<T: ?Sized>() -> String {
    strip_decorations(std::any::type_name::<T>())
}

fn strip_decorations(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut segment = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '&' | '*' => {}
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            c if c.is_alphanumeric() || c == '_' => segment.push(c),
            c => {
                // `mut`/`const` only appear as decorations ahead of a space
                if !(c == ' ' && (segment == "mut" || segment == "const")) {
                    out.push_str(&segment);
                    out.push(c);
                }
                segment.clear();
            }
        }
    }
    out.push_str(&segment);
    out
}

/// Envelope — the signal-modulation wrapper.
///
/// A wave that carries at most one nested wave as its payload. Composed
/// objects embed an envelope when they need to relay a foreign signal
/// without knowing its concrete type; `attenuate` forwards to the payload.
#[derive(Clone, Default)]
pub struct Envelope {
    payload: Option<Box<dyn Wave>>,
}

impl Envelope {
    pub fn new() -> Self {
        Self { payload: None }
    }

    /// Load a payload, returning any wave previously carried.
    pub fn modulate(&mut self, signal: Box<dyn Wave>) -> Option<Box<dyn Wave>> {
        self.payload.replace(signal)
    }

    /// The carried wave, if any.
    pub fn demodulate(&self) -> Option<&dyn Wave> {
        self.payload.as_deref()
    }

    pub fn demodulate_mut(&mut self) -> Option<&mut (dyn Wave + 'static)> {
        self.payload.as_deref_mut()
    }

    /// The carried wave downcast to a concrete type.
    pub fn demodulate_as<T: Wave>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(downcast_wave::<T>)
    }

    /// Unload the payload.
    pub fn take(&mut self) -> Option<Box<dyn Wave>> {
        self.payload.take()
    }

    pub fn is_carrying(&self) -> bool {
        self.payload.is_some()
    }
}

impl Wave for Envelope {
    fn properties(&self) -> Vec<Property> {
        self.payload.as_ref().map(|p| p.properties()).unwrap_or_default()
    }

    fn spin(&self) -> Symmetry {
        self.payload.as_ref().map(|p| p.spin()).unwrap_or_default()
    }

    fn attenuate(&mut self, other: &dyn Wave) -> Result<()> {
        match self.payload.as_deref_mut() {
            Some(payload) => payload.attenuate(other),
            None => Ok(()),
        }
    }

    fn disattenuate(&mut self, other: &dyn Wave) -> Result<()> {
        match self.payload.as_deref_mut() {
            Some(payload) => payload.disattenuate(other),
            None => Ok(()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_collapses_decorations() {
        assert_eq!(canonical_name::<i32>(), canonical_name::<&i32>());
        assert_eq!(canonical_name::<i32>(), canonical_name::<&mut i32>());
        assert_eq!(canonical_name::<i32>(), "i32");
    }

    #[test]
    fn canonical_name_strips_module_paths() {
        assert_eq!(canonical_name::<String>(), "String");
        assert_eq!(canonical_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(
            canonical_name::<Option<(u8, String)>>(),
            "Option<(u8, String)>"
        );
    }

    #[test]
    fn distinct_types_keep_distinct_names() {
        assert_ne!(canonical_name::<u32>(), canonical_name::<u64>());
        assert_ne!(canonical_name::<Vec<u32>>(), canonical_name::<Vec<u64>>());
    }
}
