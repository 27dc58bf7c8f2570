//! Family relationship derivation
//!
//! The relationship index is built once per validation run from the family
//! list and answers parent-family, sibling, spouse and ancestor queries without
//! rescanning the record set.

use crate::collections::RecordSet;
use crate::error::{Result, ValidationError};
use crate::models::Family;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::rc::Rc;

/// Parents of an individual: husband and wife of their parent family
pub type Parents<'a> = SmallVec<[&'a str; 2]>;

/// Lookup structure for derived family relationships
#[derive(Debug)]
pub struct RelationshipIndex<'a> {
    records: &'a RecordSet,
    /// Child id -> the family listing them as a child (first by family id)
    parent_family: FxHashMap<&'a str, &'a Family>,
    /// Spouse id -> every family listing them as husband or wife
    spouse_families: FxHashMap<&'a str, Vec<&'a Family>>,
}

impl<'a> RelationshipIndex<'a> {
    /// Build the index from a record set
    #[must_use]
    pub fn new(records: &'a RecordSet) -> Self {
        let mut parent_family: FxHashMap<&'a str, &'a Family> = FxHashMap::default();
        let mut spouse_families: FxHashMap<&'a str, Vec<&'a Family>> = FxHashMap::default();

        for family in records.families() {
            for child in &family.children {
                parent_family.entry(child.as_str()).or_insert(family);
            }
            for (_, spouse) in family.spouse_ids() {
                spouse_families.entry(spouse).or_default().push(family);
            }
        }

        Self {
            records,
            parent_family,
            spouse_families,
        }
    }

    /// The record set this index was built from
    #[must_use]
    pub fn records(&self) -> &'a RecordSet {
        self.records
    }

    /// The family in which the individual appears as a child
    #[must_use]
    pub fn parent_family_of(&self, id: &str) -> Option<&'a Family> {
        self.parent_family.get(id).copied()
    }

    /// Husband and wife of the individual's parent family
    #[must_use]
    pub fn parents_of(&self, id: &str) -> Parents<'a> {
        self.parent_family_of(id)
            .map(|family| family.spouse_ids().map(|(_, parent)| parent).collect())
            .unwrap_or_default()
    }

    /// All other children of the individual's parent family
    #[must_use]
    pub fn siblings_of(&self, id: &str) -> Vec<&'a str> {
        self.parent_family_of(id)
            .map(|family| {
                family
                    .children
                    .iter()
                    .map(String::as_str)
                    .filter(|child| *child != id)
                    .unique()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Families in which the individual is husband or wife, ordered by family id
    #[must_use]
    pub fn spouse_families_of(&self, id: &str) -> &[&'a Family] {
        self.spouse_families
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every individual linked to `id` through a shared family as spouse
    #[must_use]
    pub fn spouses_of(&self, id: &str) -> Vec<&'a str> {
        self.spouse_families_of(id)
            .iter()
            .filter_map(|family| family.partner_of(id))
            .unique()
            .collect()
    }

    /// Whether both individuals are children of the same parent family
    #[must_use]
    pub fn is_sibling_pair(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        match (self.parent_family_of(a), self.parent_family_of(b)) {
            (Some(left), Some(right)) => left.id == right.id,
            _ => false,
        }
    }

    /// Lazily walk the ancestors of `id`, nearest generation first
    #[must_use]
    pub fn ancestor_chain(&'a self, id: &'a str, max_depth: usize) -> AncestorChain<'a> {
        AncestorChain::new(self, id, max_depth)
    }

    /// Whether `candidate` is an ancestor of `id` within `max_depth` generations
    ///
    /// Fails if the walk runs into a cycle before finding the candidate.
    pub fn is_ancestor_of(&'a self, candidate: &str, id: &'a str, max_depth: usize) -> Result<bool> {
        for ancestor in self.ancestor_chain(id, max_depth) {
            if ancestor? == candidate {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Line of descent from the starting individual down to a queued ancestor
type Lineage<'a> = Rc<Vec<&'a str>>;

/// Breadth-first iterator over an individual's ancestors
///
/// Ancestors reached through more than one line are yielded once. An ancestor
/// that turns up among its own descendants on the line being walked yields a
/// [`ValidationError::CyclicAncestry`] and ends the walk.
#[derive(Debug)]
pub struct AncestorChain<'a> {
    index: &'a RelationshipIndex<'a>,
    max_depth: usize,
    /// (ancestor, generation, descendants it was reached through)
    queue: VecDeque<(&'a str, usize, Lineage<'a>)>,
    visited: FxHashSet<&'a str>,
    finished: bool,
}

impl<'a> AncestorChain<'a> {
    fn new(index: &'a RelationshipIndex<'a>, start: &'a str, max_depth: usize) -> Self {
        let mut chain = Self {
            index,
            max_depth,
            queue: VecDeque::new(),
            visited: FxHashSet::default(),
            finished: false,
        };
        if max_depth > 0 {
            chain.enqueue_parents(start, 1, Rc::new(vec![start]));
        }
        chain
    }

    fn enqueue_parents(&mut self, child: &'a str, generation: usize, lineage: Lineage<'a>) {
        for parent in self.index.parents_of(child) {
            self.queue.push_back((parent, generation, Rc::clone(&lineage)));
        }
    }
}

impl<'a> Iterator for AncestorChain<'a> {
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let (ancestor, generation, lineage) = self.queue.pop_front()?;

            if lineage.contains(&ancestor) {
                self.finished = true;
                let via = lineage.last().copied().unwrap_or(ancestor);
                return Some(Err(ValidationError::CyclicAncestry {
                    individual_id: ancestor.to_string(),
                    via: via.to_string(),
                }));
            }

            if !self.visited.insert(ancestor) {
                continue;
            }

            if generation < self.max_depth {
                let mut extended = Vec::with_capacity(lineage.len() + 1);
                extended.extend_from_slice(&lineage);
                extended.push(ancestor);
                self.enqueue_parents(ancestor, generation + 1, Rc::new(extended));
            }
            return Some(Ok(ancestor));
        }
        None
    }
}
