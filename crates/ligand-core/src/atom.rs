//! Atom — owner of a growable bond list.
//!
//! An atom is the dynamic-composition root: a composed object holds an
//! atom, bonds its parts into it, and any code holding the atom can
//! recover a part by type without knowing the owner's concrete shape.
//! Slot 0 of the bond list is created empty and stays empty, so every
//! real bond position is non-zero and stable across break/re-form cycles
//! of other bonds.
//!
//! Each species occupies at most one bond; `form_bond` refuses to
//! double-bond and the existing attachment is left untouched. That
//! refusal is the core defensive invariant of the whole system.

use std::cell::RefCell;
use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bond::Bond;
use crate::error::{BondError, LigandError, Result};
use crate::motif::StructuralMotif;
use crate::quantum::Quantum;
use crate::table::{self, PeriodicTable};
use crate::types::{AtomicNumber, AttenuationOutcome, BondKind, BondPosition, Property};
use crate::wave::{canonical_name, Wave};

thread_local! {
    /// Targets currently receiving a signal on this thread. Suppresses
    /// re-entrant delivery when a target's own `attenuate` loops back
    /// into the atom that is mid-delivery.
    static BACKFLOW: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// Marks a target as mid-delivery for the lifetime of this value.
///
/// The entry is cleared on drop, so an unwinding target does not stay
/// marked and get skipped on every later delivery.
struct BackflowEntry {
    address: usize,
}

impl BackflowEntry {
    /// `None` if the target is already mid-delivery on this thread.
    fn enter(address: usize) -> Option<Self> {
        BACKFLOW
            .with(|set| set.borrow_mut().insert(address))
            .then_some(Self { address })
    }
}

impl Drop for BackflowEntry {
    fn drop(&mut self) {
        BACKFLOW.with(|set| {
            set.borrow_mut().remove(&self.address);
        });
    }
}

/// Owner of an index-addressable collection of bonds.
#[derive(Clone)]
pub struct Atom {
    bonds: Vec<Bond>,
}

impl Default for Atom {
    fn default() -> Self {
        Self::new()
    }
}

impl Atom {
    pub fn new() -> Self {
        // Slot 0 reserved, always empty.
        Self {
            bonds: vec![Bond::empty()],
        }
    }

    /// Bond a wave value under its own species.
    ///
    /// The species number is resolved (allocating on first sight) from the
    /// canonical name of `T`, so `T`, `&T`, and `&mut T` requests all meet
    /// the same bond. Refuses if a non-empty bond for the species exists.
    pub fn form_bond<T: Wave>(&mut self, value: T, kind: BondKind) -> Result<BondPosition> {
        let number = table::number_of::<T>();
        self.form_bond_boxed(number, Box::new(value), kind)
    }

    /// Bond a plain value by wrapping it in a [`Quantum`] first.
    ///
    /// The bond is keyed under `T`'s own species, so `value::<T>()` finds
    /// it again without the caller naming the wrapper.
    pub fn form_value<T>(&mut self, value: T, kind: BondKind) -> Result<BondPosition>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let number = table::number_of::<T>();
        self.form_bond_boxed(number, Box::new(Quantum::new(value)), kind)
    }

    /// Bond an already-boxed wave under an explicit species number.
    ///
    /// Slots emptied by earlier breaks are reused before the list grows,
    /// so break/re-form cycles do not inflate it. Positions of other
    /// bonds are never disturbed.
    pub fn form_bond_boxed(
        &mut self,
        number: AtomicNumber,
        target: Box<dyn Wave>,
        kind: BondKind,
    ) -> Result<BondPosition> {
        if !number.is_valid() {
            return Err(LigandError::Bond(BondError::InvalidNumber));
        }
        if self.position_of_number(number).is_some() {
            return Err(LigandError::bond_occupied(number));
        }
        // Slot 0 stays reserved.
        for index in 1..self.bonds.len() {
            if self.bonds[index].is_empty() {
                self.bonds[index].form(number, target, kind)?;
                return Ok(BondPosition(index));
            }
        }
        let mut bond = Bond::empty();
        bond.form(number, target, kind)?;
        self.bonds.push(bond);
        Ok(BondPosition(self.bonds.len() - 1))
    }

    /// Break the bond for species `T`, returning the detached target.
    pub fn break_bond<T: Wave>(&mut self) -> Option<Box<dyn Wave>> {
        let position = self.position_of::<T>()?;
        self.bonds[position.0].break_bond()
    }

    /// Break a quantum-carried value bond, recovering the plain value.
    pub fn break_value<T>(&mut self) -> Option<T>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let position = self.position_of_name(&canonical_name::<T>())?;
        let target = self.bonds[position.0].break_bond()?;
        target
            .into_any()
            .downcast::<Quantum<T>>()
            .ok()
            .map(|q| q.into_inner())
    }

    /// Break a bond by explicit species number.
    pub fn break_bond_number(&mut self, number: AtomicNumber) -> Option<Box<dyn Wave>> {
        let position = self.position_of_number(number)?;
        self.bonds[position.0].break_bond()
    }

    /// Position of the bond for species `T`, if one is formed.
    ///
    /// Resolution never allocates a number: an unseen species cannot have
    /// a bond.
    pub fn position_of<T: Wave>(&self) -> Option<BondPosition> {
        table::lookup_of::<T>().and_then(|n| self.position_of_number(n))
    }

    /// Linear search over the bond list by species number.
    pub fn position_of_number(&self, number: AtomicNumber) -> Option<BondPosition> {
        if !number.is_valid() {
            return None;
        }
        self.bonds
            .iter()
            .position(|bond| *bond == number)
            .map(BondPosition)
    }

    /// Position lookup by canonical species name.
    pub fn position_of_name(&self, name: &str) -> Option<BondPosition> {
        PeriodicTable::with_global(|t| t.lookup(name)).and_then(|n| self.position_of_number(n))
    }

    /// The bonded part for species `T`.
    ///
    /// The downcast is verified: a stale or colliding species number
    /// yields `None`, never a misread target.
    pub fn as_bonded<T: Wave>(&self) -> Option<&T> {
        let position = self.position_of::<T>()?;
        self.bonds[position.0]
            .target()
            .and_then(|t| t.as_any().downcast_ref::<T>())
    }

    /// Mutable access to the bonded part for species `T`.
    pub fn as_bonded_mut<T: Wave>(&mut self) -> Option<&mut T> {
        let position = self.position_of::<T>()?;
        self.bonds[position.0]
            .target_mut()
            .and_then(|t| t.as_any_mut().downcast_mut::<T>())
    }

    /// Read a quantum-carried plain value.
    pub fn value<T>(&self) -> Option<&T>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let position = self.position_of_name(&canonical_name::<T>())?;
        self.bonds[position.0]
            .target()
            .and_then(|t| t.as_any().downcast_ref::<Quantum<T>>())
            .map(|q| &q.0)
    }

    /// Write through to a quantum-carried plain value.
    pub fn value_mut<T>(&mut self) -> Option<&mut T>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let position = self.position_of_name(&canonical_name::<T>())?;
        self.bonds[position.0]
            .target_mut()
            .and_then(|t| t.as_any_mut().downcast_mut::<Quantum<T>>())
            .map(|q| &mut q.0)
    }

    /// The bond at a position, if occupied.
    pub fn bond_at(&self, position: BondPosition) -> Option<&Bond> {
        self.bonds.get(position.0).filter(|b| !b.is_empty())
    }

    /// Occupied bonds, in formation order.
    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.iter().filter(|b| !b.is_empty())
    }

    /// Number of occupied bonds.
    pub fn bond_count(&self) -> usize {
        self.bonds().count()
    }

    /// Deliver `signal` to every bonded target that resonates with it.
    ///
    /// Delivery keeps going past individual failures; the outcome reports
    /// how many targets accepted and how many refused. Targets already
    /// mid-delivery on this thread are skipped, so a target whose own
    /// `attenuate` re-enters this atom does not loop forever.
    pub fn attenuate(&mut self, signal: &dyn Wave) -> AttenuationOutcome {
        self.broadcast(signal, |target, signal| target.attenuate(signal))
    }

    /// Withdraw `signal` from every bonded target that resonates with it.
    ///
    /// Same gating and re-entrancy rules as [`Atom::attenuate`].
    pub fn disattenuate(&mut self, signal: &dyn Wave) -> AttenuationOutcome {
        self.broadcast(signal, |target, signal| target.disattenuate(signal))
    }

    fn broadcast(
        &mut self,
        signal: &dyn Wave,
        deliver: fn(&mut dyn Wave, &dyn Wave) -> crate::error::Result<()>,
    ) -> AttenuationOutcome {
        let signal_properties = signal.properties();
        let mut delivered = 0;
        let mut failed = 0;
        for bond in self.bonds.iter_mut() {
            let target = match bond.target_mut() {
                Some(t) => t,
                None => continue,
            };
            if !crate::types::resonates(&target.properties(), &signal_properties) {
                continue;
            }
            let address = &*target as *const dyn Wave as *const () as usize;
            let entry = match BackflowEntry::enter(address) {
                Some(entry) => entry,
                None => continue,
            };
            let result = deliver(&mut *target, signal);
            drop(entry);
            match result {
                Ok(()) => delivered += 1,
                Err(_) => failed += 1,
            }
        }
        if failed == 0 {
            AttenuationOutcome::Delivered { count: delivered }
        } else {
            AttenuationOutcome::Partial { delivered, failed }
        }
    }

    /// Merge every structural motif bonded to `other` into the matching
    /// motif bonded here. Returns how many motifs merged.
    ///
    /// Neither side needs to know the other's concrete type: motifs are
    /// discovered by their `Structural` tag and matched by species number.
    pub fn import_all(&mut self, other: &Atom) -> usize {
        let mut merged = 0;
        for foreign in other.bonds() {
            let target = match foreign.target() {
                Some(t) => t,
                None => continue,
            };
            if !target.properties().contains(&Property::Structural) {
                continue;
            }
            let position = match self.position_of_number(foreign.number()) {
                Some(p) => p,
                None => continue,
            };
            let motif: Option<&mut dyn StructuralMotif> = self.bonds[position.0]
                .target_mut()
                .and_then(|t| t.as_motif_mut());
            if let Some(motif) = motif {
                if motif.import_from(target).is_ok() {
                    merged += 1;
                }
            }
        }
        merged
    }
}

impl Wave for Atom {
    fn attenuate(&mut self, other: &dyn Wave) -> Result<()> {
        match Atom::attenuate(self, other) {
            AttenuationOutcome::Delivered { .. } => Ok(()),
            AttenuationOutcome::Partial { failed, .. } => {
                Err(LigandError::Bond(BondError::AttenuationIncomplete { failed }))
            }
        }
    }

    fn disattenuate(&mut self, other: &dyn Wave) -> Result<()> {
        match Atom::disattenuate(self, other) {
            AttenuationOutcome::Delivered { .. } => Ok(()),
            AttenuationOutcome::Partial { failed, .. } => {
                Err(LigandError::Bond(BondError::AttenuationIncomplete { failed }))
            }
        }
    }

    fn as_atom(&self) -> Option<&Atom> {
        Some(self)
    }

    fn as_atom_mut(&mut self) -> Option<&mut Atom> {
        Some(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
        self
    }
}
