//! Elemental — one-time registration glue for downstream species.
//!
//! A species declares its capability tags once and may publish a clonable
//! prototype so that `or_create` lookups have something to copy. Both
//! registrations are first-call-wins: constructing the thousandth
//! instance of a species re-registers nothing, and a species' tags never
//! change mid-process. The periodic table itself carries the latch — a
//! `static` inside a generic fn would be shared across instantiations in
//! Rust, so the per-species state lives with the entry instead.

use crate::table::{self, PeriodicTable};
use crate::types::{AtomicNumber, Property};
use crate::wave::{canonical_name, Wave};

/// A registrable species: a clonable wave with a default instance.
pub trait Elemental: Wave + Default + Clone {
    /// Capability tags this species declares. Recorded once, on the first
    /// registration.
    fn declared_properties() -> Vec<Property> {
        Vec::new()
    }

    /// Ensure the species has a periodic-table entry with its declared
    /// tags. Later calls are no-ops and return the same number.
    fn register_species() -> AtomicNumber {
        let name = canonical_name::<Self>();
        PeriodicTable::with_global_mut(|t| {
            let number = t.number_for(&name);
            t.record_properties(&name, Self::declared_properties());
            number
        })
    }

    /// Register the species and publish a default instance as its
    /// prototype. A prototype already in place is kept; the second
    /// registration is silently ignored.
    fn register_prototype() -> AtomicNumber {
        let number = Self::register_species();
        PeriodicTable::with_global_mut(|t| {
            let _ = t.associate(number, Box::new(Self::default()));
        });
        number
    }
}

/// A fresh clone of the prototype registered for `T`.
///
/// `None` if the species is unseen or has no prototype.
pub fn get_instance<T: Wave>() -> Option<T> {
    let number = table::lookup_of::<T>()?;
    let boxed = PeriodicTable::with_global(|t| t.instance_of(number))?;
    boxed.into_any().downcast::<T>().ok().map(|b| *b)
}
