//! Concrete transformer catalog. Each submodule is one transformer; this module wires them into
//! the two flat lists the stage driver schedules from. Declaration order here is the catalog
//! order the scheduler uses to break ties within a batch.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{NodeIdAllocator, ParentMap};
use crate::random::RandomGenerator;
use crate::transformer::{CodeTransformer, Transformer};

mod control_flow_flattening;
mod dead_code_injection;
mod hashbang;
mod number_to_hex;
mod parentification;
mod rename_identifiers;
mod rename_properties;
mod self_defending;
mod simplifying;
mod split_strings;
mod string_array;

/// Re-exported so the stage driver can rebuild the parent map right after the Initializing
/// traversal, once it holds `&mut Node` for the root (see [`parentification::rebuild`]'s docs).
pub use parentification::rebuild as rebuild_parentification;

/// Collaborators shared by several catalog transformers within one obfuscation call.
pub struct Collaborators {
    pub rng: Rc<RefCell<RandomGenerator>>,
    pub parents: Rc<RefCell<ParentMap>>,
    /// Shared so every transformer that synthesizes a node gets a process-unique id, never
    /// colliding with an id already present in the tree.
    pub alloc: Rc<RefCell<NodeIdAllocator>>,
}

impl Collaborators {
    pub fn new(rng: RandomGenerator, alloc: NodeIdAllocator) -> Self {
        Self {
            rng: Rc::new(RefCell::new(rng)),
            parents: Rc::new(RefCell::new(ParentMap::new())),
            alloc: Rc::new(RefCell::new(alloc)),
        }
    }
}

/// Fresh instances of every node-level transformer, in catalog order.
pub fn node_catalog(collaborators: &Collaborators) -> Vec<Box<dyn Transformer>> {
    vec![
        Box::new(parentification::Parentification::new(collaborators.parents.clone())),
        Box::new(dead_code_injection::DeadCodeInjection::new(
            collaborators.rng.clone(),
            collaborators.alloc.clone(),
        )),
        Box::new(control_flow_flattening::ControlFlowFlattening::new(collaborators.rng.clone())),
        Box::new(rename_properties::RenameProperties::new(collaborators.rng.clone())),
        Box::new(split_strings::SplitStrings::new()),
        Box::new(number_to_hex::NumberToHex::new()),
        Box::new(rename_identifiers::RenameIdentifiers::new(
            collaborators.parents.clone(),
        )),
        Box::new(string_array::StringArray::new(collaborators.rng.clone())),
        Box::new(simplifying::Simplifying::new()),
        Box::new(self_defending::SelfDefending::new()),
    ]
}

/// Generates the `index`-th name in the sequence a, b, c, ..., z, aa, ab, ... — the same
/// shortest-first alphabet scheme used by renaming transformers so the most frequently
/// introduced names stay short.
pub(crate) fn short_name(mut index: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    let mut chars = Vec::new();
    loop {
        chars.push(ALPHABET[index % 26]);
        index /= 26;
        if index == 0 {
            break;
        }
        index -= 1;
    }
    chars.reverse();
    String::from_utf8(chars).expect("alphabet is ASCII")
}

/// Fresh instances of every code-level transformer, in catalog order. `HashbangStrip` and
/// `HashbangRestore` share a slot so the hashbang removed in `PreparingTransformers` can be put
/// back verbatim in `FinalizingTransformers`.
pub fn code_catalog() -> Vec<Box<dyn CodeTransformer>> {
    let slot = Rc::new(RefCell::new(None));
    vec![
        Box::new(hashbang::HashbangStrip::new(slot.clone())),
        Box::new(hashbang::HashbangRestore::new(slot)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_wraps_past_z_into_two_letters() {
        assert_eq!(short_name(0), "a");
        assert_eq!(short_name(25), "z");
        assert_eq!(short_name(26), "aa");
        assert_eq!(short_name(27), "ab");
    }
}
