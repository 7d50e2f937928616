//! Quantum — adapter that lets a plain value ride a bond.
//!
//! Primitives and other non-wave values cannot be bonded directly; the
//! atom wraps them in a `Quantum` first. The wrapper spins and reifies
//! its payload through serde, so quantum-carried state survives a
//! spin/reify round trip.

use std::any::Any;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::symmetry::Symmetry;
use crate::wave::Wave;

/// A plain value wrapped as a wave.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantum<T>(pub T);

impl<T> Quantum<T> {
    pub fn new(value: T) -> Self {
        Quantum(value)
    }

    /// Unwrap the carried value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Quantum<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Quantum<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> Wave for Quantum<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn spin(&self) -> Symmetry {
        Symmetry::of(&self.0).unwrap_or_default()
    }

    fn reify(&mut self, symmetry: &Symmetry) -> Result<()> {
        self.0 = symmetry.to()?;
        Ok(())
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
