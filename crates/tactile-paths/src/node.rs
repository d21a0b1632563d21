//! Per-search bookkeeping: the node arena and the open set.
//!
//! Both live only for one search call and are dropped with it.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tactile_core::Point;

/// Handle of a [`SearchNode`] inside one search's arena.
///
/// Handles are handed out in creation order, so comparing two handles tells
/// which node was discovered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

/// A candidate tile reached during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchNode {
    pub(crate) pos: Point,
    /// The node this one was reached from; `None` for the start node.
    pub(crate) parent: Option<NodeId>,
    /// Cost from the start.
    pub(crate) g: i32,
    /// Estimated cost to the goal.
    pub(crate) h: i32,
    /// `g + h`, the open-set priority.
    pub(crate) f: i32,
}

impl SearchNode {
    #[inline]
    pub(crate) fn new(pos: Point, parent: Option<NodeId>, g: i32, h: i32) -> Self {
        Self {
            pos,
            parent,
            g,
            h,
            f: g.saturating_add(h),
        }
    }
}

// ---------------------------------------------------------------------------
// NodeArena
// ---------------------------------------------------------------------------

/// Owns every node created by one search. Parent links are handles into
/// this arena, so the tree of parents has no owning references.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub(crate) fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Positions from the root down to `id`.
    pub(crate) fn backtrack(&self, id: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(i) = cur {
            let node = self.get(i);
            path.push(node.pos);
            cur = node.parent;
        }
        path.reverse();
        path
    }
}

// ---------------------------------------------------------------------------
// OpenSet
// ---------------------------------------------------------------------------

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the lowest `f`
/// first and, among equal `f`, the earliest-created node.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenEntry {
    f: i32,
    id: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidates discovered but not yet finalized.
///
/// A coordinate may have several entries when a cheaper node superseded an
/// earlier one; the cheaper entry always pops first, so the caller discards
/// later entries for coordinates it has already closed.
#[derive(Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    best_g: HashMap<Point, i32>,
}

impl OpenSet {
    pub(crate) fn push(&mut self, id: NodeId, node: &SearchNode) {
        self.heap.push(OpenEntry { f: node.f, id });
        self.best_g
            .entry(node.pos)
            .and_modify(|g| *g = (*g).min(node.g))
            .or_insert(node.g);
    }

    /// Remove the lowest-`f` entry, earliest first on ties.
    pub(crate) fn pop(&mut self, arena: &NodeArena) -> Option<NodeId> {
        let entry = self.heap.pop()?;
        self.best_g.remove(&arena.get(entry.id).pos);
        Some(entry.id)
    }

    /// Whether a new node at `pos` with cost `g` should be queued: only when
    /// no open node for `pos` already has a lower-or-equal `g`.
    #[inline]
    pub(crate) fn admits(&self, pos: Point, g: i32) -> bool {
        self.best_g.get(&pos).is_none_or(|&best| g < best)
    }
}
