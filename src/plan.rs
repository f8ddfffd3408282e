// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Move Planner
//!
//! Turns "move this file to that ordinal" into the smallest list of renames:
//!
//! 1. Parse every directory entry, skipping unprefixed ones.
//! 2. Build a sequence of everything except the target and snapshot its
//!    gaps with `compute_deltas`.
//! 3. Re-insert the target at its new ordinal, absorbing space from
//!    neighbouring gaps.
//! 4. `compute_prefixes` to get final ordinals, render everything at the
//!    final shared width, and diff against the names on disk.
//! 5. Order the renames so they can be applied one at a time, or report
//!    that they cannot.
//!
//! The planner does no I/O.

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use std::path::Path;

use crate::elision::ElisionList;
use crate::error::NmvError;
use crate::error::Result;
use crate::name;
use crate::sequence::Item;
use crate::sequence::ItemId;
use crate::sequence::OrderedSequence;
use crate::sequence::Tie;

/// One rename for the I/O collaborator. Names are bare file names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl Rename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Rename {
        return Rename {
            from: from.into(),
            to: to.into(),
        };
    }
}

/// Knobs for a planning pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanOptions {
    /// Absorb the moved file's space from neighbouring gaps. When off,
    /// collisions are resolved by bumping later files up one at a time.
    pub squash: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        return PlanOptions { squash: true };
    }
}

/// The outcome of a planning pass.
#[derive(Clone, Debug)]
pub struct Plan {
    /// Renames in application order.
    pub renames: Vec<Rename>,
    /// True when `renames` can be applied one after another as listed.
    pub sequential_safe: bool,
    /// Prefix width every final name is rendered at.
    pub width: u32,
    /// Where the moved file ended up.
    pub target_ordinal: u64,
    /// Ordinal layout before the move.
    pub layout_before: ElisionList,
    /// Ordinal layout after the move.
    pub layout_after: ElisionList,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        return self.renames.is_empty();
    }

    /// The renames, if they are safe to apply in order.
    pub fn sequential(&self) -> Result<&[Rename]> {
        if !self.sequential_safe {
            let pending = self.renames.len() - safe_prefix_len(&self.renames);
            return Err(NmvError::UnsafeRenameOrder { pending });
        }
        return Ok(&self.renames);
    }
}

/// Plan moving `target` (a bare file name among `names`) to `new_ordinal`.
pub fn plan<I, S>(names: I, target: &str, new_ordinal: u64) -> Result<Plan>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    return plan_with(names, target, new_ordinal, PlanOptions::default());
}

/// `plan` with explicit options.
pub fn plan_with<I, S>(
    names: I,
    target: &str,
    new_ordinal: u64,
    options: PlanOptions,
) -> Result<Plan>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seq = OrderedSequence::new();
    let mut on_disk: FxHashMap<ItemId, String> = FxHashMap::default();
    let mut moved: Option<Item> = None;

    for entry in names {
        let entry = entry.as_ref();
        let parsed = match name::parse(entry) {
            Ok(parsed) => parsed,
            Err(err) if err.is_recoverable() => {
                log::debug!("skipping {}: {}", entry, err);
                continue;
            }
            Err(err) => return Err(err),
        };

        if entry == target {
            moved = Some(Item::from(parsed));
            continue;
        }

        let id = seq.insert(Item::from(parsed), false);
        on_disk.insert(id, entry.to_string());
    }

    let Some(mut item) = moved else {
        if seq.is_empty() {
            return Err(NmvError::EmptyDirectory);
        }
        return Err(NmvError::TargetNotFound {
            name: target.to_string(),
        });
    };

    let old_ordinal = item.ordinal;
    let layout_before = {
        let mut before = seq.clone();
        before.insert(item.clone(), false);
        ElisionList::from_sequence(&before)
    };

    if new_ordinal == old_ordinal {
        return Ok(Plan {
            renames: Vec::new(),
            sequential_safe: true,
            width: seq.max_width().max(item.width),
            target_ordinal: old_ordinal,
            layout_after: layout_before.clone(),
            layout_before,
        });
    }

    // Gaps are only exact once every ordinal is distinct.
    seq.resolve_ties();
    seq.compute_deltas();
    log::debug!("gaps before move:\n{}", seq);

    item.set_ordinal(new_ordinal);
    let target_id = if options.squash {
        let tie = if new_ordinal < old_ordinal { Tie::Before } else { Tie::After };
        let id = seq.insert_with(item, true, tie);
        seq.compute_prefixes();
        id
    } else {
        let id = seq.insert_with(item, false, Tie::Before);
        seq.resolve_ties();
        id
    };
    on_disk.insert(target_id, target.to_string());
    log::debug!("ordinals after move:\n{}", seq);

    let width = seq.max_width();
    let mut renames = Vec::new();
    for (id, item) in seq.iter() {
        let to = item.file_name(width);
        let from = &on_disk[&id];
        if *from != to {
            renames.push(Rename::new(from.as_str(), to));
        }
    }

    let (renames, sequential_safe) = order_renames(renames);
    if !sequential_safe {
        log::warn!("renames contain a cycle, they must be staged");
    }

    return Ok(Plan {
        renames,
        sequential_safe,
        width,
        target_ordinal: seq.get(target_id).ordinal,
        layout_before,
        layout_after: ElisionList::from_sequence(&seq),
    });
}

/// Plan a move for a caller that already holds the ordinal layout.
///
/// Every file in `layout` is taken to be rendered at `width`. `target` is
/// the unprefixed name of the file to move.
pub fn plan_layout(
    layout: &ElisionList,
    width: u32,
    target: &str,
    new_ordinal: u64,
    options: PlanOptions,
) -> Result<Plan> {
    let files = layout.materialize(Path::new(""), width)?;
    let target_file = files
        .iter()
        .find(|file| file.name == target)
        .map(|file| file.file_name())
        .ok_or_else(|| NmvError::TargetNotFound {
            name: target.to_string(),
        })?;
    let names: Vec<String> = files.iter().map(|file| file.file_name()).collect();

    return plan_with(names, &target_file, new_ordinal, options);
}

/// Order renames so no destination is still held by a pending source.
///
/// A rename waits while its destination is the source of another pending
/// rename. Whatever is left when nothing can progress forms a cycle; it
/// is appended in its original order and the result is flagged unsafe.
pub fn order_renames(renames: Vec<Rename>) -> (Vec<Rename>, bool) {
    let mut pending: FxHashSet<String> = renames.iter().map(|r| r.from.clone()).collect();
    let mut remaining = renames;
    let mut ordered = Vec::with_capacity(remaining.len());

    loop {
        let before = remaining.len();
        let mut blocked = Vec::new();
        for rename in remaining {
            if pending.contains(&rename.to) {
                blocked.push(rename);
            } else {
                pending.remove(&rename.from);
                ordered.push(rename);
            }
        }
        remaining = blocked;

        if remaining.is_empty() {
            return (ordered, true);
        }
        if remaining.len() == before {
            ordered.extend(remaining);
            return (ordered, false);
        }
    }
}

/// Number of leading renames that can be applied in order without
/// clobbering a later source.
fn safe_prefix_len(renames: &[Rename]) -> usize {
    let mut pending: FxHashSet<&str> = renames.iter().map(|r| r.from.as_str()).collect();
    for (i, rename) in renames.iter().enumerate() {
        if pending.contains(rename.to.as_str()) {
            return i;
        }
        pending.remove(rename.from.as_str());
    }
    return renames.len();
}
