//! # Ligand
//!
//! Dynamic composition substrate through chemical bonding primitives.
//!
//! Ligand lets a value be assembled from parts at runtime and queried for
//! those parts by type afterward, with no static relationship between the
//! part types and the code doing the querying. Parts ride **bonds** on an
//! **atom**; species of parts are registered in a process-wide **periodic
//! table** of names, numbers, capability tags, and prototypes; **motif**
//! containers turn that machinery into composition-based multiple
//! inheritance.
//!
//! ## Quick Start
//!
//! ```rust
//! use ligand::prelude::*;
//! use std::any::Any;
//!
//! // A part species: a wave with stable identity.
//! #[derive(Clone, Default)]
//! struct Receptor {
//!     id: ElementId,
//!     name: String,
//!     affinity: u32,
//! }
//!
//! impl Wave for Receptor {
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn as_any_mut(&mut self) -> &mut dyn Any { self }
//!     fn into_any(self: Box<Self>) -> Box<dyn Any> { self }
//! }
//!
//! impl MotifElement for Receptor {
//!     fn id(&self) -> ElementId { self.id }
//!     fn set_id(&mut self, id: ElementId) { self.id = id; }
//!     fn name(&self) -> &str { &self.name }
//!     fn set_name(&mut self, name: &str) { self.name = name.to_string(); }
//! }
//!
//! // Compose: bond a receptor container and a plain value into one atom.
//! let mut cell = Atom::new();
//! let mut receptors = LinearMotif::<Receptor>::new();
//! receptors.add(Receptor { id: ElementId::from_seed(1), name: "alpha".into(), affinity: 7 });
//! receptors.bond_into(&mut cell).unwrap();
//! cell.form_value(37.0f64, BondKind::Covalent).unwrap();
//!
//! // Query: recover the parts by type, from code that never saw them attached.
//! let container = cell.as_bonded::<LinearMotif<Receptor>>().unwrap();
//! assert_eq!(container.by_name("alpha").unwrap().affinity, 7);
//! assert_eq!(cell.value::<f64>(), Some(&37.0));
//! ```
//!
//! ## Architecture
//!
//! Ligand is organized into two crates:
//!
//! - [`ligand_core`] - The whole machinery: periodic table, bonds, atoms,
//!   waves, motifs, registration glue
//! - `ligand` - This facade, re-exporting the core and its prelude
//!
//! ## Key Concepts
//!
//! | Concept | Chemical Analog | What It Does |
//! |---------|-----------------|--------------|
//! | Atom | Atom | Owns the bond list of a composed object |
//! | Bond | Chemical bond | One typed attachment record |
//! | PeriodicTable | Periodic table | Species directory: names, numbers, tags, prototypes |
//! | Wave | Wave function | Root trait: tags, spin/reify, attenuation |
//! | Motif | Structural motif | Typed child container riding a bond |
//! | Resonance | Resonance | Shared capability tag between two waves |

pub use ligand_core::*;

pub mod prelude {
    //! Convenient imports for common usage.
    pub use ligand_core::prelude::*;
}
