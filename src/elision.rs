// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Elision List
//!
//! The whole ordinal range of a directory as alternating runs:
//!
//! ```text
//! files:  0_a  3_b  5_c
//! list:   a (2) b (1) c
//! ```
//!
//! A `File` node occupies one ordinal. A `Space` node stands for `count`
//! consecutive free ordinals. Walking from the front and accumulating
//! reconstructs every file's absolute ordinal.
//!
//! Invariant: no two `Space` nodes are adjacent and no `Space` is empty.
//! `push` and `insert_after` coalesce to keep it that way.

use std::fmt;
use std::path::Path;

use crate::error::NmvError;
use crate::error::Result;
use crate::name::PrefixedFile;
use crate::sequence::OrderedSequence;

/// Node index type.
type Idx = u32;

/// Null index marker.
const NULL: Idx = Idx::MAX;

/// Handle to a node in an `ElisionList`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(Idx);

/// One run in the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Elision {
    /// An occupied ordinal, holding the unprefixed file name.
    File(String),
    /// A run of free ordinals.
    Space(u64),
}

impl Elision {
    /// Ordinals covered by this node.
    pub fn span(&self) -> u64 {
        return match self {
            Elision::File(_) => 1,
            Elision::Space(count) => *count,
        };
    }
}

#[derive(Clone, Debug)]
struct Slot {
    node: Elision,
    prev: Idx,
    next: Idx,
}

/// Alternating file/space runs in a doubly linked arena.
#[derive(Clone, Debug, Default)]
pub struct ElisionList {
    slots: Vec<Slot>,
    head: Option<Idx>,
    tail: Option<Idx>,
}

impl ElisionList {
    /// Create a new empty list.
    pub fn new() -> ElisionList {
        return ElisionList {
            slots: Vec::new(),
            head: None,
            tail: None,
        };
    }

    /// Build from `(name, ordinal)` pairs in non-decreasing ordinal order.
    ///
    /// A file whose ordinal is already taken goes in the next free slot.
    /// Later files keep their own ordinals.
    pub fn from_ordered<'a, I>(items: I) -> ElisionList
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut list = ElisionList::new();
        let mut expected = 0u64;
        for (name, ordinal) in items {
            if ordinal > expected {
                list.push(Elision::Space(ordinal - expected));
            }
            list.push(Elision::File(name.to_string()));
            expected = expected.max(ordinal).saturating_add(1);
        }
        return list;
    }

    /// Build from the current ordinals of a sequence.
    pub fn from_sequence(seq: &OrderedSequence) -> ElisionList {
        return ElisionList::from_ordered(
            seq.iter().map(|(_, item)| (item.name.as_str(), item.ordinal)),
        );
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        return self.slots.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.slots.is_empty();
    }

    pub fn get(&self, id: NodeId) -> &Elision {
        return &self.slots[id.0 as usize].node;
    }

    pub fn first(&self) -> Option<NodeId> {
        return self.head.map(NodeId);
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        return link(self.slots[id.0 as usize].next);
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        return link(self.slots[id.0 as usize].prev);
    }

    /// Iterate from the front.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Elision)> + '_ {
        let mut current = self.head.unwrap_or(NULL);
        return std::iter::from_fn(move || {
            if current == NULL {
                return None;
            }
            let idx = current;
            let slot = &self.slots[idx as usize];
            current = slot.next;
            return Some((NodeId(idx), &slot.node));
        });
    }

    /// Find the file node with the given unprefixed name.
    pub fn find_file(&self, name: &str) -> Option<NodeId> {
        return self
            .iter()
            .find(|(_, node)| matches!(node, Elision::File(n) if n == name))
            .map(|(id, _)| id);
    }

    /// Total ordinals covered, files and spaces.
    pub fn span(&self) -> u64 {
        return self.iter().map(|(_, node)| node.span()).sum();
    }

    /// Append a node, merging spaces and dropping empty ones.
    pub fn push(&mut self, node: Elision) {
        if let Elision::Space(count) = node {
            if count == 0 {
                return;
            }
            if let Some(tail) = self.tail {
                if let Elision::Space(existing) = &mut self.slots[tail as usize].node {
                    *existing += count;
                    return;
                }
            }
        }

        let idx = self.alloc(node);
        match self.tail {
            None => {
                self.head = Some(idx);
            }
            Some(tail) => {
                self.slots[tail as usize].next = idx;
                self.slots[idx as usize].prev = tail;
            }
        }
        self.tail = Some(idx);
    }

    /// Splice `node` right after `at`.
    ///
    /// A new file absorbs one free ordinal from a neighbouring space whose
    /// count is above one, preferring the space before the insertion point.
    /// A new space merges into an adjacent space. An empty space is dropped
    /// and `at` is returned.
    pub fn insert_after(&mut self, at: NodeId, node: Elision) -> NodeId {
        let at_idx = at.0;
        let next = self.slots[at_idx as usize].next;

        if let Elision::Space(count) = node {
            if count == 0 {
                return at;
            }
            for neighbour in [at_idx, next] {
                if neighbour == NULL {
                    continue;
                }
                if let Elision::Space(existing) = &mut self.slots[neighbour as usize].node {
                    *existing += count;
                    return NodeId(neighbour);
                }
            }
        }

        let is_file = matches!(node, Elision::File(_));
        let idx = self.alloc(node);

        // from: at <-> x
        // to  : at <-> i <-> x
        self.slots[idx as usize].prev = at_idx;
        self.slots[idx as usize].next = next;
        self.slots[at_idx as usize].next = idx;
        if next == NULL {
            self.tail = Some(idx);
        } else {
            self.slots[next as usize].prev = idx;
        }

        if is_file {
            let before = match self.slots[at_idx as usize].node {
                Elision::Space(_) => at_idx,
                Elision::File(_) => self.slots[at_idx as usize].prev,
            };
            if !self.shrink_space(before) {
                self.shrink_space(next);
            }
        }

        return NodeId(idx);
    }

    /// Take one ordinal from the space at `idx` if it can spare it.
    fn shrink_space(&mut self, idx: Idx) -> bool {
        if idx == NULL {
            return false;
        }
        if let Elision::Space(count) = &mut self.slots[idx as usize].node {
            if *count > 1 {
                *count -= 1;
                return true;
            }
        }
        return false;
    }

    fn alloc(&mut self, node: Elision) -> Idx {
        let idx = self.slots.len() as Idx;
        self.slots.push(Slot {
            node,
            prev: NULL,
            next: NULL,
        });
        return idx;
    }

    /// Assign absolute ordinals to every file in `dir`, all rendered at
    /// `width`.
    pub fn materialize(&self, dir: &Path, width: u32) -> Result<Vec<PrefixedFile>> {
        let mut files = Vec::new();
        let mut next_ordinal = 0u64;

        for (_, node) in self.iter() {
            match node {
                Elision::Space(count) => {
                    next_ordinal = next_ordinal.saturating_add(*count);
                }
                Elision::File(name) => {
                    files.push(PrefixedFile {
                        directory: dir.to_path_buf(),
                        name: name.clone(),
                        ordinal: next_ordinal,
                        width,
                    });
                    next_ordinal = next_ordinal.saturating_add(1);
                }
            }
        }

        if files.is_empty() {
            return Err(NmvError::EmptyDirectory);
        }

        return Ok(files);
    }
}

fn link(idx: Idx) -> Option<NodeId> {
    return (idx != NULL).then_some(NodeId(idx));
}

impl fmt::Display for ElisionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, node)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match node {
                Elision::File(name) => write!(f, "{}", name)?,
                Elision::Space(count) => write!(f, "({})", count)?,
            }
        }
        return Ok(());
    }
}
