//! UnorderedMotif — an owned container of identified elements with no
//! position semantics.

use std::any::Any;

use crate::error::{LigandError, MotifError, Result};
use crate::motif::{Excitation, MotifElement, StructuralMotif};
use crate::symmetry::Symmetry;
use crate::table::PeriodicTable;
use crate::types::{AtomicNumber, BondKind, BondPosition, ElementId, InsertOutcome, Property};
use crate::wave::{canonical_name, Wave};

/// Unordered homogeneous container of elements of one species.
///
/// Storage order is incidental and not part of the contract. `add`
/// refuses identity duplicates; `insert` replaces on collision.
#[derive(Clone)]
pub struct UnorderedMotif<T: MotifElement> {
    elements: Vec<T>,
}

impl<T: MotifElement> UnorderedMotif<T> {
    /// Construct an empty motif, registering the species on first sight.
    pub fn new() -> Self {
        Self::species_number();
        Self {
            elements: Vec::new(),
        }
    }

    /// Periodic-table number for this motif species, registering its name
    /// and tags if unseen.
    pub fn species_number() -> AtomicNumber {
        let name = canonical_name::<Self>();
        PeriodicTable::with_global_mut(|table| {
            let number = table.number_for(&name);
            table.record_properties(&name, vec![Property::Structural, Property::Unordered]);
            number
        })
    }

    /// Bond this motif into an owner's atom under its own species.
    pub fn bond_into(self, owner: &mut crate::atom::Atom) -> Result<BondPosition> {
        owner.form_bond(self, BondKind::Virtual)
    }

    /// Take in an element if its identity is not already present.
    ///
    /// Returns the stored element, or `None` when an element with the
    /// same id is already here (the newcomer is dropped).
    pub fn add(&mut self, element: T) -> Option<&mut T> {
        if self.has(element.id()) {
            return None;
        }
        self.elements.push(element);
        let index = self.elements.len() - 1;
        Some(&mut self.elements[index])
    }

    /// Take in an element, replacing any incumbent with the same id.
    pub fn insert(&mut self, element: T) -> InsertOutcome {
        match self.index_of(element.id()) {
            Some(index) => {
                self.elements[index] = element;
                InsertOutcome::Replaced
            }
            None => {
                self.elements.push(element);
                InsertOutcome::Inserted
            }
        }
    }

    pub fn by_id(&self, id: ElementId) -> Option<&T> {
        self.index_of(id).map(|i| &self.elements[i])
    }

    pub fn by_id_mut(&mut self, id: ElementId) -> Option<&mut T> {
        self.index_of(id).map(move |i| &mut self.elements[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&T> {
        self.elements.iter().find(|e| e.name() == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut T> {
        self.elements.iter_mut().find(|e| e.name() == name)
    }

    /// Existing element for `id`, or a prototype clone stamped with `id`.
    pub fn or_create_by_id(&mut self, id: ElementId) -> Result<&mut T> {
        if let Some(index) = self.index_of(id) {
            return Ok(&mut self.elements[index]);
        }
        let mut element = crate::elemental::get_instance::<T>()
            .ok_or_else(|| LigandError::no_prototype(canonical_name::<T>()))?;
        element.set_id(id);
        self.elements.push(element);
        let index = self.elements.len() - 1;
        Ok(&mut self.elements[index])
    }

    /// Existing element for `name`, or a freshly-identified prototype
    /// clone carrying it.
    pub fn or_create_by_name(&mut self, name: &str) -> Result<&mut T> {
        if let Some(index) = self.elements.iter().position(|e| e.name() == name) {
            return Ok(&mut self.elements[index]);
        }
        let mut element = crate::elemental::get_instance::<T>()
            .ok_or_else(|| LigandError::no_prototype(canonical_name::<T>()))?;
        element.set_id(ElementId::new());
        element.set_name(name);
        self.elements.push(element);
        let index = self.elements.len() - 1;
        Ok(&mut self.elements[index])
    }

    /// Detach the element with this id and hand it back.
    pub fn remove_by_id(&mut self, id: ElementId) -> Option<T> {
        self.index_of(id).map(|i| self.elements.swap_remove(i))
    }

    /// Detach the element with this name and hand it back.
    pub fn remove_by_name(&mut self, name: &str) -> Option<T> {
        self.elements
            .iter()
            .position(|e| e.name() == name)
            .map(|i| self.elements.swap_remove(i))
    }

    pub fn has(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.elements.iter_mut()
    }

    /// Apply a reified operation to every element, collecting one result
    /// per element. Visits in storage order; no order is promised.
    pub fn for_each<R>(&mut self, excitation: &mut Excitation<T, R>) -> Vec<R> {
        self.elements
            .iter_mut()
            .map(|element| excitation.excite(element))
            .collect()
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }
}

impl<T: MotifElement> Default for UnorderedMotif<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MotifElement> Wave for UnorderedMotif<T> {
    fn properties(&self) -> Vec<Property> {
        PeriodicTable::with_global(|t| t.properties_of_name(&canonical_name::<Self>()))
    }

    fn spin(&self) -> Symmetry {
        let spins: Vec<Symmetry> = self.elements.iter().map(|e| e.spin()).collect();
        Symmetry::of(&spins).unwrap_or_default()
    }

    fn attenuate(&mut self, other: &dyn Wave) -> Result<()> {
        let mut failed = 0;
        for element in self.elements.iter_mut() {
            if element.resonates_with(other) && element.attenuate(other).is_err() {
                failed += 1;
            }
        }
        if failed == 0 {
            Ok(())
        } else {
            Err(LigandError::Bond(
                crate::error::BondError::AttenuationIncomplete { failed },
            ))
        }
    }

    fn disattenuate(&mut self, other: &dyn Wave) -> Result<()> {
        let mut failed = 0;
        for element in self.elements.iter_mut() {
            if element.resonates_with(other) && element.disattenuate(other).is_err() {
                failed += 1;
            }
        }
        if failed == 0 {
            Ok(())
        } else {
            Err(LigandError::Bond(
                crate::error::BondError::AttenuationIncomplete { failed },
            ))
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

    fn as_motif(&self) -> Option<&dyn StructuralMotif> {
        Some(self)
    }

    fn as_motif_mut(&mut self) -> Option<&mut dyn StructuralMotif> {
        Some(self)
    }
}

impl<T: MotifElement> StructuralMotif for UnorderedMotif<T> {
    fn import_from(&mut self, other: &dyn Wave) -> Result<usize> {
        let source = other
            .as_any()
            .downcast_ref::<UnorderedMotif<T>>()
            .ok_or(LigandError::Motif(MotifError::IncompatibleSource))?;
        let mut taken = 0;
        for element in &source.elements {
            self.insert(element.clone());
            taken += 1;
        }
        Ok(taken)
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn motif_properties(&self) -> Vec<Property> {
        self.properties()
    }
}
