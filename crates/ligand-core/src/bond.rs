//! Bond — one attachment record on an atom.
//!
//! A bond is a `(atomic number, target, kind)` triple. The atom owns the
//! boxed target; breaking a bond empties the slot and hands the target
//! back to the caller, who decides whether to keep or drop it.

use crate::error::{BondError, LigandError, Result};
use crate::types::{AtomicNumber, BondKind};
use crate::wave::Wave;

/// A single slot in an atom's bond list.
#[derive(Clone)]
pub struct Bond {
    number: AtomicNumber,
    kind: BondKind,
    target: Option<Box<dyn Wave>>,
}

impl Bond {
    /// An unoccupied bond slot.
    pub fn empty() -> Self {
        Self {
            number: AtomicNumber::INVALID,
            kind: BondKind::Empty,
            target: None,
        }
    }

    /// Occupy this slot. Refuses if it is not empty, leaving it untouched.
    pub fn form(
        &mut self,
        number: AtomicNumber,
        target: Box<dyn Wave>,
        kind: BondKind,
    ) -> Result<()> {
        if !number.is_valid() {
            return Err(LigandError::Bond(BondError::InvalidNumber));
        }
        if !self.is_empty() {
            return Err(LigandError::Bond(BondError::SlotOccupied));
        }
        self.number = number;
        self.kind = kind;
        self.target = Some(target);
        Ok(())
    }

    /// Empty this slot unconditionally, returning the target if one was
    /// attached.
    pub fn break_bond(&mut self) -> Option<Box<dyn Wave>> {
        self.number = AtomicNumber::INVALID;
        self.kind = BondKind::Empty;
        self.target.take()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.kind == BondKind::Empty
    }

    pub fn number(&self) -> AtomicNumber {
        self.number
    }

    pub fn kind(&self) -> BondKind {
        self.kind
    }

    pub fn target(&self) -> Option<&dyn Wave> {
        self.target.as_deref()
    }

    pub fn target_mut(&mut self) -> Option<&mut (dyn Wave + 'static)> {
        self.target.as_deref_mut()
    }
}

impl Default for Bond {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bonds compare by species number; this drives position search, not value
/// comparison of targets.
impl PartialEq<AtomicNumber> for Bond {
    fn eq(&self, other: &AtomicNumber) -> bool {
        !self.is_empty() && self.number == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::Envelope;

    #[test]
    fn empty_bond_reports_empty() {
        let bond = Bond::empty();
        assert!(bond.is_empty());
        assert_eq!(bond.number(), AtomicNumber::INVALID);
        assert!(bond.target().is_none());
    }

    #[test]
    fn form_refuses_occupied_slot() {
        let mut bond = Bond::empty();
        bond.form(AtomicNumber(3), Box::new(Envelope::new()), BondKind::Covalent)
            .unwrap();
        let err = bond.form(AtomicNumber(4), Box::new(Envelope::new()), BondKind::Covalent);
        assert!(err.is_err());
        // Original attachment untouched
        assert_eq!(bond.number(), AtomicNumber(3));
    }

    #[test]
    fn form_refuses_invalid_number() {
        let mut bond = Bond::empty();
        let err = bond.form(
            AtomicNumber::INVALID,
            Box::new(Envelope::new()),
            BondKind::Covalent,
        );
        assert!(err.is_err());
        assert!(bond.is_empty());
    }

    #[test]
    fn break_empties_and_returns_target() {
        let mut bond = Bond::empty();
        bond.form(AtomicNumber(1), Box::new(Envelope::new()), BondKind::Managed)
            .unwrap();
        let target = bond.break_bond();
        assert!(target.is_some());
        assert!(bond.is_empty());
        assert!(bond.break_bond().is_none());
    }

    #[test]
    fn bonds_compare_by_number() {
        let mut bond = Bond::empty();
        bond.form(AtomicNumber(5), Box::new(Envelope::new()), BondKind::Covalent)
            .unwrap();
        assert!(bond == AtomicNumber(5));
        assert!(bond != AtomicNumber(6));
        assert!(Bond::empty() != AtomicNumber::INVALID);
    }
}
