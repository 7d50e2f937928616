//! Motif container behavior: insertion, replacement, ownership, and
//! cross-atom structural import.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ligand_core::prelude::*;

#[derive(Clone, Default)]
struct Widget {
    id: ElementId,
    name: String,
    mass: u32,
}

impl Widget {
    fn new(seed: u64, name: &str, mass: u32) -> Self {
        Self {
            id: ElementId::from_seed(seed),
            name: name.to_string(),
            mass,
        }
    }
}

impl Wave for Widget {
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

impl MotifElement for Widget {
    fn id(&self) -> ElementId {
        self.id
    }

    fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

impl Elemental for Widget {}

#[test]
fn ordered_insertion_points() {
    let mut m = LinearMotif::<Widget>::new();
    m.insert(Widget::new(1, "b", 0), InsertionPoint::Bottom).unwrap();
    m.insert(Widget::new(2, "a", 0), InsertionPoint::Top).unwrap();
    m.insert(Widget::new(3, "c", 0), InsertionPoint::Bottom).unwrap();
    m.insert(
        Widget::new(4, "between", 0),
        InsertionPoint::Before(ElementId::from_seed(3)),
    )
    .unwrap();
    m.insert(
        Widget::new(5, "after-a", 0),
        InsertionPoint::After(ElementId::from_seed(2)),
    )
    .unwrap();

    let order: Vec<&str> = m.iter().map(|w| w.name()).collect();
    assert_eq!(order, vec!["a", "after-a", "b", "between", "c"]);
}

#[test]
fn identity_collision_replaces_in_place() {
    let mut m = LinearMotif::<Widget>::new();
    m.insert(Widget::new(1, "first", 10), InsertionPoint::Bottom)
        .unwrap();
    m.insert(Widget::new(2, "second", 20), InsertionPoint::Bottom)
        .unwrap();

    let outcome = m
        .insert(Widget::new(1, "first-replacement", 99), InsertionPoint::Bottom)
        .unwrap();
    assert_eq!(outcome, InsertOutcome::Replaced);
    assert_eq!(m.len(), 2);
    let replaced = m.by_id(ElementId::from_seed(1)).unwrap();
    assert_eq!(replaced.name(), "first-replacement");
    assert_eq!(replaced.mass, 99);
    // Slot order preserved
    assert_eq!(m.iter().next().unwrap().name(), "first-replacement");
}

#[test]
fn missing_anchor_fails_without_mutation() {
    let mut m = LinearMotif::<Widget>::new();
    m.insert(Widget::new(1, "only", 0), InsertionPoint::Bottom)
        .unwrap();
    let ghost = ElementId::from_seed(404);
    assert!(m
        .insert(Widget::new(2, "lost", 0), InsertionPoint::Before(ghost))
        .is_err());
    assert!(m
        .insert(Widget::new(2, "lost", 0), InsertionPoint::After(ghost))
        .is_err());
    assert_eq!(m.len(), 1);
}

#[test]
fn lookup_and_removal_by_identity() {
    let mut m = LinearMotif::<Widget>::new();
    m.add(Widget::new(1, "alpha", 5));
    m.add(Widget::new(2, "beta", 6));

    assert_eq!(m.by_name("beta").unwrap().mass, 6);
    assert!(m.has(ElementId::from_seed(1)));

    let removed = m.remove_by_name("alpha").unwrap();
    assert_eq!(removed.mass, 5);
    assert_eq!(m.len(), 1);
    assert!(!m.has(ElementId::from_seed(1)));
    assert!(m.remove_by_id(ElementId::from_seed(1)).is_none());
}

#[test]
fn or_create_clones_the_registered_prototype() {
    Widget::register_prototype();
    let mut m = LinearMotif::<Widget>::new();

    let id = ElementId::from_seed(77);
    let created = m.or_create_by_id(id).unwrap();
    assert_eq!(created.id(), id);
    assert_eq!(created.mass, 0);
    created.mass = 12;

    // Second call finds the same element
    assert_eq!(m.or_create_by_id(id).unwrap().mass, 12);
    assert_eq!(m.len(), 1);

    let named = m.or_create_by_name("gamma").unwrap();
    assert_eq!(named.name(), "gamma");
    assert_eq!(m.len(), 2);
}

#[derive(Clone, Default)]
struct Orphan {
    id: ElementId,
    name: String,
}

impl Wave for Orphan {
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

impl MotifElement for Orphan {
    fn id(&self) -> ElementId {
        self.id
    }

    fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

#[test]
fn or_create_without_a_prototype_fails() {
    let mut m = LinearMotif::<Orphan>::new();
    assert!(m.or_create_by_id(ElementId::new()).is_err());
    assert!(m.is_empty());
}

#[derive(Clone)]
struct Counted {
    id: ElementId,
    name: String,
    drops: Arc<AtomicUsize>,
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl Wave for Counted {
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

impl MotifElement for Counted {
    fn id(&self) -> ElementId {
        self.id
    }

    fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

#[test]
fn dropping_the_motif_drops_each_element_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let mut m = LinearMotif::<Counted>::new();
        for seed in 0..3 {
            m.add(Counted {
                id: ElementId::from_seed(seed),
                name: format!("c{}", seed),
                drops: Arc::clone(&drops),
            });
        }
        assert_eq!(drops.load(Ordering::SeqCst), 0);
    }
    assert_eq!(drops.load(Ordering::SeqCst), 3);
}

#[test]
fn replacement_drops_the_incumbent() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut m = LinearMotif::<Counted>::new();
    m.add(Counted {
        id: ElementId::from_seed(1),
        name: "old".into(),
        drops: Arc::clone(&drops),
    });
    m.insert(
        Counted {
            id: ElementId::from_seed(1),
            name: "new".into(),
            drops: Arc::clone(&drops),
        },
        InsertionPoint::Bottom,
    )
    .unwrap();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert_eq!(m.by_id(ElementId::from_seed(1)).unwrap().name(), "new");
}

#[test]
fn unordered_add_refuses_duplicates() {
    let mut m = UnorderedMotif::<Widget>::new();
    assert!(m.add(Widget::new(1, "one", 1)).is_some());
    assert!(m.add(Widget::new(1, "dup", 2)).is_none());
    assert_eq!(m.len(), 1);
    assert_eq!(m.by_id(ElementId::from_seed(1)).unwrap().name(), "one");

    assert_eq!(m.insert(Widget::new(1, "forced", 3)), InsertOutcome::Replaced);
    assert_eq!(m.by_id(ElementId::from_seed(1)).unwrap().name(), "forced");
}

#[test]
fn for_each_collects_one_result_per_element() {
    let mut m = LinearMotif::<Widget>::new();
    m.add(Widget::new(1, "a", 2));
    m.add(Widget::new(2, "b", 3));

    let mut weigh = Excitation::new("weigh", |w: &mut Widget| {
        w.mass *= 10;
        w.mass
    });
    let masses = m.for_each(&mut weigh);
    assert_eq!(masses, vec![20, 30]);
}

#[test]
fn import_all_merges_matching_motifs_across_atoms() {
    let mut left = Atom::new();
    let mut left_widgets = LinearMotif::<Widget>::new();
    left_widgets.add(Widget::new(1, "ours", 1));
    left_widgets.bond_into(&mut left).unwrap();

    let mut right = Atom::new();
    let mut right_widgets = LinearMotif::<Widget>::new();
    right_widgets.add(Widget::new(2, "theirs", 2));
    right_widgets.add(Widget::new(3, "also-theirs", 3));
    right_widgets.bond_into(&mut right).unwrap();

    let merged = left.import_all(&right);
    assert_eq!(merged, 1);

    let ours = left.as_bonded::<LinearMotif<Widget>>().unwrap();
    assert_eq!(ours.len(), 3);
    assert!(ours.has(ElementId::from_seed(3)));
    // Source untouched
    assert_eq!(right.as_bonded::<LinearMotif<Widget>>().unwrap().len(), 2);
}

#[test]
fn import_all_skips_unmatched_motifs() {
    let mut left = Atom::new();
    LinearMotif::<Widget>::new().bond_into(&mut left).unwrap();

    let mut right = Atom::new();
    let mut orphans = LinearMotif::<Orphan>::new();
    orphans.add(Orphan {
        id: ElementId::new(),
        name: "stray".into(),
    });
    orphans.bond_into(&mut right).unwrap();

    // Right carries no LinearMotif<Widget>, left carries no LinearMotif<Orphan>
    assert_eq!(left.import_all(&right), 0);
    assert!(left.as_bonded::<LinearMotif<Widget>>().unwrap().is_empty());
}

#[derive(Clone, Default)]
struct Organ {
    id: ElementId,
    name: String,
    atom: Atom,
}

impl Wave for Organ {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn as_atom(&self) -> Option<&Atom> {
        Some(&self.atom)
    }

    fn as_atom_mut(&mut self) -> Option<&mut Atom> {
        Some(&mut self.atom)
    }
}

impl MotifElement for Organ {
    fn id(&self) -> ElementId {
        self.id
    }

    fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

#[test]
fn transferring_insert_keeps_the_incumbents_children() {
    let mut organs = LinearMotif::<Organ>::new();

    // Incumbent organ with nested widgets
    let mut old = Organ {
        id: ElementId::from_seed(9),
        name: "liver".into(),
        atom: Atom::new(),
    };
    let mut nested = LinearMotif::<Widget>::new();
    nested.add(Widget::new(50, "lobule", 4));
    nested.bond_into(&mut old.atom).unwrap();
    organs.insert(old, InsertionPoint::Bottom).unwrap();

    // Replacement with the same identity but its own empty nested motif
    let mut new = Organ {
        id: ElementId::from_seed(9),
        name: "liver-v2".into(),
        atom: Atom::new(),
    };
    LinearMotif::<Widget>::new().bond_into(&mut new.atom).unwrap();

    let outcome = organs
        .insert_transferring(new, InsertionPoint::Bottom)
        .unwrap();
    assert_eq!(outcome, InsertOutcome::Replaced);

    let organ = organs.by_id(ElementId::from_seed(9)).unwrap();
    assert_eq!(organ.name(), "liver-v2");
    let children = organ.atom.as_bonded::<LinearMotif<Widget>>().unwrap();
    assert!(children.has(ElementId::from_seed(50)));
}
