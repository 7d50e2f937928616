//! # Ligand Core
//!
//! Core bonding, registry, and motif machinery for Ligand dynamic
//! composition.
//!
//! This crate lets unrelated values be composed at runtime and queried by
//! type afterward, without either side declaring the relationship up
//! front:
//!
//! - **PeriodicTable** — process-wide name↔number↔tags↔prototype
//!   directory of wave species
//! - **Bond** — one (species number, target, kind) attachment record
//! - **Atom** — a growable bond list: attach parts, break them off,
//!   recover them by type through verified downcasts
//! - **Wave** — the common root trait: capability tags, spin/reify state
//!   capture, signal attenuation
//! - **Motifs** — ordered and unordered element containers that ride
//!   bonds, giving composition-based multiple inheritance
//! - **Elemental** — one-time species/prototype registration glue
//!
//! ## Quick Start
//!
//! ```rust
//! use ligand_core::prelude::*;
//!
//! let mut atom = Atom::new();
//!
//! // Bond a plain value; it rides as a Quantum
//! atom.form_value(42i32, BondKind::Covalent).unwrap();
//! assert_eq!(atom.value::<i32>(), Some(&42));
//!
//! // Break the bond and the part is gone
//! atom.break_value::<i32>();
//! assert_eq!(atom.value::<i32>(), None);
//! ```

pub mod atom;
pub mod bond;
pub mod elemental;
pub mod error;
pub mod motif;
pub mod prelude;
pub mod quantum;
pub mod symmetry;
pub mod table;
pub mod types;
pub mod wave;
