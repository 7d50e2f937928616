//! PeriodicTable — the process-wide name↔number↔tags↔prototype directory.
//!
//! Every species of wave gets one [`Element`] entry keyed by its canonical
//! type name. Entries are created lazily the first time a name is looked
//! up with allocation, and elements carry the capability tags and optional
//! clonable prototype the rest of the system relies on.
//!
//! The table is an ordinary value so it can be constructed standalone in
//! tests, plus a single process-wide instance behind a lazily-initialized
//! `RwLock` ([`PeriodicTable::global`]). Lookup-or-allocate runs as one
//! step under the write lock, so two threads racing on the same new name
//! always observe a single allocation.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::error::{LigandError, Result, TableError};
use crate::types::{AtomicNumber, Property};
use crate::wave::{canonical_name, Wave};

/// One registry entry: a species of wave.
pub struct Element {
    number: AtomicNumber,
    name: String,
    properties: Vec<Property>,
    prototype: Option<Box<dyn Wave>>,
}

impl Element {
    pub fn number(&self) -> AtomicNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn has_prototype(&self) -> bool {
        self.prototype.is_some()
    }
}

/// Name↔number↔tags↔prototype directory for wave species.
#[derive(Default)]
pub struct PeriodicTable {
    /// Element for number `n` lives at index `n - 1`.
    elements: Vec<Element>,
    by_name: HashMap<String, AtomicNumber>,
}

impl PeriodicTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number for `name`, allocating the next unused number for a
    /// previously unseen name. Allocation and lookup are one step, so the
    /// same name always maps to the same number.
    pub fn number_for(&mut self, name: &str) -> AtomicNumber {
        if let Some(&number) = self.by_name.get(name) {
            return number;
        }
        let number = AtomicNumber(self.elements.len() as u32 + 1);
        self.elements.push(Element {
            number,
            name: name.to_string(),
            properties: Vec::new(),
            prototype: None,
        });
        self.by_name.insert(name.to_string(), number);
        number
    }

    /// Pure lookup; never allocates.
    pub fn lookup(&self, name: &str) -> Option<AtomicNumber> {
        self.by_name.get(name).copied()
    }

    /// Reverse lookup.
    pub fn name_of(&self, number: AtomicNumber) -> Option<&str> {
        self.element(number).map(|e| e.name.as_str())
    }

    /// Record tags for a species, creating the entry if needed.
    ///
    /// First write wins: if the entry already carries tags the call
    /// changes nothing and returns false. Species properties never change
    /// mid-process.
    pub fn record_properties(&mut self, name: &str, properties: Vec<Property>) -> bool {
        let number = self.number_for(name);
        let element = &mut self.elements[number.0 as usize - 1];
        if !element.properties.is_empty() {
            return false;
        }
        for property in properties {
            if !element.properties.contains(&property) {
                element.properties.push(property);
            }
        }
        true
    }

    /// Union tags into a species entry, creating it if needed. Idempotent.
    pub fn extend_properties(&mut self, name: &str, properties: Vec<Property>) {
        let number = self.number_for(name);
        let element = &mut self.elements[number.0 as usize - 1];
        for property in properties {
            if !element.properties.contains(&property) {
                element.properties.push(property);
            }
        }
    }

    /// Tags recorded for a species name. Empty if unseen or untagged.
    pub fn properties_of_name(&self, name: &str) -> Vec<Property> {
        self.lookup(name)
            .map(|number| self.properties_of(number))
            .unwrap_or_default()
    }

    /// Tags recorded for an element number.
    pub fn properties_of(&self, number: AtomicNumber) -> Vec<Property> {
        self.element(number)
            .map(|e| e.properties.clone())
            .unwrap_or_default()
    }

    /// Attach an owned prototype to an element.
    ///
    /// Refuses if a prototype is already stored; disassociate first.
    pub fn associate(&mut self, number: AtomicNumber, prototype: Box<dyn Wave>) -> Result<()> {
        let element = self
            .element_mut(number)
            .ok_or(LigandError::Table(TableError::UnknownNumber(number)))?;
        if element.prototype.is_some() {
            return Err(LigandError::prototype_present(number));
        }
        element.prototype = Some(prototype);
        Ok(())
    }

    /// Drop the stored prototype. Returns whether one was present.
    pub fn disassociate(&mut self, number: AtomicNumber) -> bool {
        match self.element_mut(number) {
            Some(element) => element.prototype.take().is_some(),
            None => false,
        }
    }

    /// A fresh clone of the stored prototype, if any.
    pub fn instance_of(&self, number: AtomicNumber) -> Option<Box<dyn Wave>> {
        self.element(number)
            .and_then(|e| e.prototype.as_ref())
            .map(|p| p.clone())
    }

    pub fn element(&self, number: AtomicNumber) -> Option<&Element> {
        if !number.is_valid() {
            return None;
        }
        self.elements.get(number.0 as usize - 1)
    }

    fn element_mut(&mut self, number: AtomicNumber) -> Option<&mut Element> {
        if !number.is_valid() {
            return None;
        }
        self.elements.get_mut(number.0 as usize - 1)
    }

    /// Number of registered species.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The process-wide table.
    pub fn global() -> &'static RwLock<PeriodicTable> {
        static GLOBAL: OnceLock<RwLock<PeriodicTable>> = OnceLock::new();
        GLOBAL.get_or_init(|| RwLock::new(PeriodicTable::new()))
    }

    /// Run a read-only operation against the process-wide table.
    pub fn with_global<R>(f: impl FnOnce(&PeriodicTable) -> R) -> R {
        let guard = Self::global()
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a mutating operation against the process-wide table.
    pub fn with_global_mut<R>(f: impl FnOnce(&mut PeriodicTable) -> R) -> R {
        let mut guard = Self::global()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Number for type `T` in the process-wide table, allocating if unseen.
pub fn number_of<T: ?Sized>() -> AtomicNumber {
    let name = canonical_name::<T>();
    PeriodicTable::with_global_mut(|table| table.number_for(&name))
}

/// Number for type `T` in the process-wide table without allocation.
pub fn lookup_of<T: ?Sized>() -> Option<AtomicNumber> {
    let name = canonical_name::<T>();
    PeriodicTable::with_global(|table| table.lookup(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::Envelope;

    #[test]
    fn first_allocations_count_up_from_one() {
        let mut table = PeriodicTable::new();
        assert_eq!(table.number_for("Foo"), AtomicNumber(1));
        assert_eq!(table.number_for("Bar"), AtomicNumber(2));
        assert_eq!(table.number_for("Foo"), AtomicNumber(1));
    }

    #[test]
    fn lookup_never_allocates() {
        let mut table = PeriodicTable::new();
        assert_eq!(table.lookup("Foo"), None);
        table.number_for("Foo");
        assert_eq!(table.lookup("Foo"), Some(AtomicNumber(1)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn reverse_lookup_round_trips() {
        let mut table = PeriodicTable::new();
        let n = table.number_for("Widget");
        assert_eq!(table.name_of(n), Some("Widget"));
        assert_eq!(table.name_of(AtomicNumber::INVALID), None);
        assert_eq!(table.name_of(AtomicNumber(99)), None);
    }

    #[test]
    fn record_properties_first_write_wins() {
        let mut table = PeriodicTable::new();
        assert!(table.record_properties("Foo", vec![Property::Linear]));
        assert!(!table.record_properties("Foo", vec![Property::Unordered]));
        assert_eq!(table.properties_of_name("Foo"), vec![Property::Linear]);
    }

    #[test]
    fn extend_properties_unions() {
        let mut table = PeriodicTable::new();
        table.extend_properties("Foo", vec![Property::custom("a")]);
        table.extend_properties("Foo", vec![Property::custom("b")]);
        table.extend_properties("Foo", vec![Property::custom("a")]);
        assert_eq!(
            table.properties_of_name("Foo"),
            vec![Property::custom("a"), Property::custom("b")]
        );
    }

    #[test]
    fn prototype_association_refuses_doubles() {
        let mut table = PeriodicTable::new();
        let n = table.number_for("Envelope");
        assert!(table.associate(n, Box::new(Envelope::new())).is_ok());
        assert!(table.associate(n, Box::new(Envelope::new())).is_err());
        assert!(table.disassociate(n));
        assert!(!table.disassociate(n));
        assert!(table.associate(n, Box::new(Envelope::new())).is_ok());
    }

    #[test]
    fn instance_of_requires_a_prototype() {
        let mut table = PeriodicTable::new();
        let n = table.number_for("Envelope");
        assert!(table.instance_of(n).is_none());
        table.associate(n, Box::new(Envelope::new())).unwrap();
        assert!(table.instance_of(n).is_some());
    }
}
