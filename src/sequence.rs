// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Ordered Sequence
//!
//! A doubly linked list of items kept in non-decreasing ordinal order.
//! Nodes live in a Vec and link to each other by index (no raw pointers),
//! so an `ItemId` stays valid for the life of the sequence.
//!
//! Insertion is a linear scan from the head. Directories are small and this
//! is not a hot path.
//!
//! # Squash
//!
//! When `gap_before` has been computed (see `gap.rs`), an insertion can
//! absorb the space it needs from neighbouring gaps instead of pushing
//! every later item up:
//!
//! ```text
//! before:  b(gap 3)                 ordinals: b=3
//! insert a at 2:  a(gap 2) b(gap 0) ordinals: a=2 b=3
//! ```
//!
//! When the new item lands exactly on an occupied ordinal it takes over
//! that slot. Which way the occupant gives ground depends on `Tie`.

use std::fmt;

use crate::name;

/// Node index type.
type Idx = u32;

/// Null index marker.
const NULL: Idx = Idx::MAX;

/// Stable handle to an item in an `OrderedSequence`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Idx);

/// One prefixed file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    /// File name without the numeric prefix.
    pub name: String,
    /// Value of the numeric prefix.
    pub ordinal: u64,
    /// Digits used to render `ordinal`. Only ever grows.
    pub width: u32,
    /// Free ordinal slots between this item and its predecessor.
    /// Only meaningful right after `compute_deltas`.
    pub gap_before: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, ordinal: u64, width: u32) -> Item {
        return Item {
            name: name.into(),
            ordinal,
            width,
            gap_before: 0,
        };
    }

    /// Set the ordinal, widening `width` if the new value needs more digits.
    pub fn set_ordinal(&mut self, ordinal: u64) {
        self.width = self.width.max(name::digits(ordinal));
        self.ordinal = ordinal;
    }

    /// Render the full file name at the given width.
    pub fn file_name(&self, width: u32) -> String {
        return name::render(self.ordinal, width.max(self.width), &self.name);
    }
}

impl From<name::PrefixedName> for Item {
    fn from(parsed: name::PrefixedName) -> Item {
        return Item::new(parsed.name, parsed.ordinal, parsed.width);
    }
}

/// Where a new item goes relative to existing items with the same ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tie {
    /// After every equal item. The occupant shifts towards lower ordinals.
    #[default]
    After,
    /// Before every equal item. The occupant shifts towards higher ordinals.
    Before,
}

#[derive(Clone, Debug)]
struct Node {
    item: Item,
    prev: Idx,
    next: Idx,
}

/// Items linked in non-decreasing ordinal order.
#[derive(Clone, Debug, Default)]
pub struct OrderedSequence {
    nodes: Vec<Node>,
    head: Option<Idx>,
    tail: Option<Idx>,
    max_width: u32,
}

impl OrderedSequence {
    /// Create a new empty sequence.
    pub fn new() -> OrderedSequence {
        return OrderedSequence {
            nodes: Vec::new(),
            head: None,
            tail: None,
            max_width: 0,
        };
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        return self.nodes.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.nodes.is_empty();
    }

    /// Widest prefix over all items ever inserted.
    pub fn max_width(&self) -> u32 {
        return self.max_width;
    }

    pub fn get(&self, id: ItemId) -> &Item {
        return &self.nodes[id.0 as usize].item;
    }

    pub fn get_mut(&mut self, id: ItemId) -> &mut Item {
        return &mut self.nodes[id.0 as usize].item;
    }

    pub fn first(&self) -> Option<ItemId> {
        return self.head.map(ItemId);
    }

    pub fn last(&self) -> Option<ItemId> {
        return self.tail.map(ItemId);
    }

    pub fn next(&self, id: ItemId) -> Option<ItemId> {
        return link(self.nodes[id.0 as usize].next);
    }

    pub fn prev(&self, id: ItemId) -> Option<ItemId> {
        return link(self.nodes[id.0 as usize].prev);
    }

    /// Set an item's ordinal, widening the item and the sequence as needed.
    pub fn set_ordinal(&mut self, id: ItemId, ordinal: u64) {
        let item = self.get_mut(id);
        item.set_ordinal(ordinal);
        let width = item.width;
        self.max_width = self.max_width.max(width);
    }

    /// Iterate in ordinal order.
    pub fn iter(&self) -> Iter<'_> {
        return Iter {
            seq: self,
            current: self.head.unwrap_or(NULL),
        };
    }

    /// Ordinals in sequence order.
    pub fn ordinals(&self) -> Vec<u64> {
        return self.iter().map(|(_, item)| item.ordinal).collect();
    }

    /// Find an item by its unprefixed name.
    pub fn find(&self, name: &str) -> Option<ItemId> {
        return self
            .iter()
            .find(|(_, item)| item.name == name)
            .map(|(id, _)| id);
    }

    /// Insert an item in ordinal order, after any items with an equal ordinal.
    ///
    /// With `squash`, the item absorbs the space it needs from neighbouring
    /// gaps. This requires `compute_deltas` to have run on the sequence.
    pub fn insert(&mut self, item: Item, squash: bool) -> ItemId {
        return self.insert_with(item, squash, Tie::After);
    }

    /// Insert an item in ordinal order with an explicit tie-break.
    pub fn insert_with(&mut self, item: Item, squash: bool, tie: Tie) -> ItemId {
        self.max_width = self.max_width.max(item.width);

        let idx = self.nodes.len() as Idx;
        let ordinal = item.ordinal;
        self.nodes.push(Node {
            item,
            prev: NULL,
            next: NULL,
        });

        let Some(head) = self.head else {
            self.head = Some(idx);
            self.tail = Some(idx);
            return ItemId(idx);
        };

        // Last node that sorts before the new one.
        let mut after = NULL;
        let mut current = head;
        while current != NULL {
            let current_ordinal = self.nodes[current as usize].item.ordinal;
            let before = match tie {
                Tie::After => current_ordinal <= ordinal,
                Tie::Before => current_ordinal < ordinal,
            };
            if !before {
                break;
            }
            after = current;
            current = self.nodes[current as usize].next;
        }

        // from: a <-> x
        // to  : a <-> n <-> x
        let next = if after == NULL { head } else { self.nodes[after as usize].next };
        self.nodes[idx as usize].prev = after;
        self.nodes[idx as usize].next = next;
        if after == NULL {
            self.head = Some(idx);
        } else {
            self.nodes[after as usize].next = idx;
        }
        if next == NULL {
            self.tail = Some(idx);
        } else {
            self.nodes[next as usize].prev = idx;
        }

        if squash {
            self.squash(idx);
        }

        return ItemId(idx);
    }

    /// Fix up `gap_before` around a freshly spliced node.
    fn squash(&mut self, idx: Idx) {
        let ordinal = self.nodes[idx as usize].item.ordinal;
        let prev = self.nodes[idx as usize].prev;
        let next = self.nodes[idx as usize].next;

        let prev_ordinal = (prev != NULL).then(|| self.nodes[prev as usize].item.ordinal);
        let next_ordinal = (next != NULL).then(|| self.nodes[next as usize].item.ordinal);

        if prev_ordinal == Some(ordinal) {
            // Landed after the occupant: sit right behind it and let the
            // occupant give up one unit of space on its near side.
            self.nodes[idx as usize].item.gap_before = 0;
            if !self.absorb_backward(prev) {
                self.absorb_forward(next);
            }
            return;
        }

        if next_ordinal == Some(ordinal) {
            // Landed before the occupant: take over its gap and push it up.
            let gap = std::mem::take(&mut self.nodes[next as usize].item.gap_before);
            self.nodes[idx as usize].item.gap_before = gap;
            self.absorb_forward(self.nodes[next as usize].next);
            return;
        }

        self.nodes[idx as usize].item.gap_before = match prev_ordinal {
            Some(p) => ordinal - p - 1,
            None => ordinal,
        };
        if let Some(n) = next_ordinal {
            self.nodes[next as usize].item.gap_before = n - ordinal - 1;
        }
    }

    /// Take one unit from the first positive gap at or after `from`.
    fn absorb_forward(&mut self, from: Idx) -> bool {
        let mut current = from;
        while current != NULL {
            let node = &mut self.nodes[current as usize];
            if node.item.gap_before > 0 {
                node.item.gap_before -= 1;
                return true;
            }
            current = node.next;
        }
        return false;
    }

    /// Take one unit from the first positive gap at or before `from`.
    fn absorb_backward(&mut self, from: Idx) -> bool {
        let mut current = from;
        while current != NULL {
            let node = &mut self.nodes[current as usize];
            if node.item.gap_before > 0 {
                node.item.gap_before -= 1;
                return true;
            }
            current = node.prev;
        }
        return false;
    }

    /// Make ordinals strictly increasing by bumping any item that is not
    /// above its predecessor to predecessor + 1.
    pub fn resolve_ties(&mut self) {
        let mut current = self.first();
        let mut floor: Option<u64> = None;
        while let Some(id) = current {
            let ordinal = self.get(id).ordinal;
            if let Some(prev) = floor {
                if ordinal <= prev {
                    self.set_ordinal(id, prev.saturating_add(1));
                }
            }
            floor = Some(self.get(id).ordinal);
            current = self.next(id);
        }
    }
}

fn link(idx: Idx) -> Option<ItemId> {
    return (idx != NULL).then_some(ItemId(idx));
}

impl FromIterator<Item> for OrderedSequence {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> OrderedSequence {
        let mut seq = OrderedSequence::new();
        for item in iter {
            seq.insert(item, false);
        }
        return seq;
    }
}

/// Iterator over a sequence in ordinal order.
pub struct Iter<'a> {
    seq: &'a OrderedSequence,
    current: Idx,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ItemId, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NULL {
            return None;
        }
        let idx = self.current;
        let node = &self.seq.nodes[idx as usize];
        self.current = node.next;
        return Some((ItemId(idx), &node.item));
    }
}

impl fmt::Display for OrderedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, item)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {} (gap: {})", item.ordinal, item.name, item.gap_before)?;
        }
        return Ok(());
    }
}
