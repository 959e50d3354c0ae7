//! The pivot treap.
//!
//! ## Purpose
//!
//! This module provides the ordered set of array positions ("pivots") that
//! partition the element array into contiguous regions. Each pivot position
//! is a settled order statistic; flags on the pivots record which regions
//! between them are already sorted. The tree is a treap: a binary search tree
//! on pivot index, simultaneously a max-heap on randomly assigned priorities,
//! chosen for its cheap inserts and deletes, which this engine performs
//! constantly.
//!
//! ## Design notes
//!
//! * **Arena storage**: Nodes live in a `Vec` and link to each other through
//!   integer handles, so parent back-references never form ownership cycles.
//!   Freed slots are recycled through a free list.
//! * **Sentinels**: Positions `-1` and `len` are ordinary pivots that bound
//!   every traversal; they are installed at construction and never removed.
//! * **Priorities**: Supplied by the caller, so the tree itself stays free of
//!   randomness.
//!
//! ## Invariants
//!
//! * BST order on `idx`, max-heap order on `priority`, parent back-references
//!   consistent with child links.
//! * Pivot indices are pairwise distinct.
//! * A pivot flagged `SORTED_LEFT` has an in-order successor flagged
//!   `SORTED_RIGHT`, and vice versa.
//!
//! ## Non-goals
//!
//! * This module does not touch the element array or the comparator; which
//!   regions count as sorted is decided by the executor.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::primitives::rng::PivotRng;

// ============================================================================
// Flags
// ============================================================================

/// Sortedness annotations carried by a pivot.
///
/// `SORTED_LEFT` asserts the region between this pivot and its in-order
/// successor is sorted ("this pivot sits at the left edge of a sorted run").
/// `SORTED_RIGHT` asserts the same about the region to its left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotFlags(u8);

impl PivotFlags {
    /// Neither neighboring region is known to be sorted.
    pub const UNSORTED: PivotFlags = PivotFlags(0);
    /// The region to the left of this pivot is sorted.
    pub const SORTED_RIGHT: PivotFlags = PivotFlags(1);
    /// The region to the right of this pivot is sorted.
    pub const SORTED_LEFT: PivotFlags = PivotFlags(2);
    /// Both neighboring regions are sorted.
    pub const SORTED_BOTH: PivotFlags = PivotFlags(3);

    /// True if every flag in `other` is set in `self`.
    pub fn contains(self, other: PivotFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Diagnostic name of the exact flag combination.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "UNSORTED",
            1 => "SORTED_RIGHT",
            2 => "SORTED_LEFT",
            _ => "SORTED_BOTH",
        }
    }
}

impl core::ops::BitOr for PivotFlags {
    type Output = PivotFlags;

    fn bitor(self, rhs: PivotFlags) -> PivotFlags {
        PivotFlags(self.0 | rhs.0)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Handle to a node in the tree's arena.
pub type NodeId = usize;

/// One pivot: a settled array position plus its tree linkage.
#[derive(Debug, Clone)]
pub struct PivotNode {
    /// The array position this pivot represents; `-1` and `len` for the
    /// sentinels.
    pub idx: isize,
    /// Sortedness of the neighboring regions.
    pub flags: PivotFlags,
    /// Treap heap priority, fixed at creation.
    priority: u32,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Result of bounding a target index by the nearest pivots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBound {
    /// The target index is itself a pivot.
    At(NodeId),
    /// The tightest pivots strictly surrounding the target.
    Between(NodeId, NodeId),
}

// ============================================================================
// Tree
// ============================================================================

/// Treap over pivot positions, arena-backed.
#[derive(Debug)]
pub struct PivotTree {
    nodes: Vec<PivotNode>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
}

impl PivotTree {
    /// Build a tree holding only the two sentinels, `-1` and `len`.
    pub fn new(len: usize, rng: &mut PivotRng) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
        };
        tree.insert(-1, PivotFlags::UNSORTED, rng.next_u32(), None);
        tree.insert(len as isize, PivotFlags::UNSORTED, rng.next_u32(), tree.root);
        tree
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Root handle; `None` only for a tree under construction.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Array position of a pivot.
    pub fn idx(&self, id: NodeId) -> isize {
        self.nodes[id].idx
    }

    /// Flags of a pivot.
    pub fn flags(&self, id: NodeId) -> PivotFlags {
        self.nodes[id].flags
    }

    /// Or additional flags into a pivot.
    pub fn add_flags(&mut self, id: NodeId, flags: PivotFlags) {
        self.nodes[id].flags = self.nodes[id].flags | flags;
    }

    /// Left child handle.
    pub fn left_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    /// Right child handle.
    pub fn right_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    /// Number of live pivots (sentinels included).
    pub fn pivot_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Leftmost pivot (the `-1` sentinel once construction is complete).
    pub fn first(&self) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(left) = self.nodes[current].left {
            current = left;
        }
        Some(current)
    }

    /// In-order successor, or `None` for the rightmost pivot.
    pub fn succ(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut current) = self.nodes[id].right {
            while let Some(left) = self.nodes[current].left {
                current = left;
            }
            return Some(current);
        }

        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].idx > self.nodes[current].idx {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// In-order predecessor, or `None` for the leftmost pivot.
    pub fn pred(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut current) = self.nodes[id].left {
            while let Some(right) = self.nodes[current].right {
                current = right;
            }
            return Some(current);
        }

        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].idx < self.nodes[current].idx {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Find the pivots bounding array index `k`.
    ///
    /// Descends from the root in expected O(log n). The sentinels guarantee
    /// both bounds exist for any `k` in `[0, len]`.
    pub fn bound(&self, k: isize) -> IndexBound {
        let mut left = None;
        let mut right = None;
        let mut current = self.root;

        while let Some(id) = current {
            let node = &self.nodes[id];
            if node.idx < k {
                left = Some(id);
                current = node.right;
            } else if node.idx > k {
                right = Some(id);
                current = node.left;
            } else {
                return IndexBound::At(id);
            }
        }

        match (left, right) {
            (Some(l), Some(r)) => IndexBound::Between(l, r),
            _ => unreachable!("sentinels bound every in-range index"),
        }
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert a pivot at `idx`, which must not already be present.
    ///
    /// `hint` is the node the BST descent starts from; descending from the
    /// root gives the same result, the hint just skips the upper levels when
    /// the caller already holds a bounding pivot. Rotations restore the heap
    /// invariant afterwards.
    pub fn insert(
        &mut self,
        idx: isize,
        flags: PivotFlags,
        priority: u32,
        hint: Option<NodeId>,
    ) -> NodeId {
        let id = self.alloc(PivotNode {
            idx,
            flags,
            priority,
            parent: None,
            left: None,
            right: None,
        });

        let Some(root) = self.root else {
            self.root = Some(id);
            return id;
        };

        // Standard BST descent from the hint.
        let mut current = hint.unwrap_or(root);
        loop {
            debug_assert_ne!(self.nodes[current].idx, idx, "pivot indices are unique");
            if self.nodes[current].idx < idx {
                match self.nodes[current].right {
                    Some(right) => current = right,
                    None => {
                        self.nodes[current].right = Some(id);
                        self.nodes[id].parent = Some(current);
                        break;
                    }
                }
            } else {
                match self.nodes[current].left {
                    Some(left) => current = left,
                    None => {
                        self.nodes[current].left = Some(id);
                        self.nodes[id].parent = Some(current);
                        break;
                    }
                }
            }
        }

        // Bubble the new node up while it outranks its parent.
        while let Some(parent) = self.nodes[id].parent {
            if self.nodes[id].priority <= self.nodes[parent].priority {
                break;
            }
            self.rotate_up(id, parent);
        }

        self.debug_check();
        id
    }

    /// Rotate `id` above its parent `parent`, preserving BST order.
    ///
    /// The rotated parent inherits the bubbled node's inner subtree as its
    /// replacement child.
    fn rotate_up(&mut self, id: NodeId, parent: NodeId) {
        let grandparent = self.nodes[parent].parent;

        let inner = if self.nodes[id].idx < self.nodes[parent].idx {
            // Left child rising: its right subtree becomes the parent's left.
            let inner = self.nodes[id].right;
            self.nodes[id].right = Some(parent);
            self.nodes[parent].left = inner;
            inner
        } else {
            // Right child rising: its left subtree becomes the parent's right.
            let inner = self.nodes[id].left;
            self.nodes[id].left = Some(parent);
            self.nodes[parent].right = inner;
            inner
        };

        self.nodes[parent].parent = Some(id);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(parent);
        }

        self.nodes[id].parent = grandparent;
        match grandparent {
            Some(grand) => {
                if self.nodes[grand].left == Some(parent) {
                    self.nodes[grand].left = Some(id);
                } else {
                    self.nodes[grand].right = Some(id);
                }
            }
            None => self.root = Some(id),
        }
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Remove a pivot. Sentinels must never be passed in.
    ///
    /// A node with two children is replaced by the merge of its subtrees;
    /// with one child, the child is promoted; with none, it is unlinked.
    pub fn delete(&mut self, id: NodeId) {
        let parent = self.nodes[id].parent;
        let left = self.nodes[id].left;
        let right = self.nodes[id].right;

        let replacement = match (left, right) {
            (Some(l), Some(r)) => self.merge_trees(Some(l), Some(r)),
            (Some(child), None) | (None, Some(child)) => Some(child),
            (None, None) => None,
        };

        if let Some(rep) = replacement {
            self.nodes[rep].parent = parent;
        }
        match parent {
            Some(p) => {
                if self.nodes[p].left == Some(id) {
                    self.nodes[p].left = replacement;
                } else {
                    self.nodes[p].right = replacement;
                }
            }
            None => self.root = replacement,
        }

        self.release(id);
        self.debug_check_structure();
    }

    /// Merge two treaps where every index in `left` precedes every index in
    /// `right`. The higher-priority root survives; recursion depth is bounded
    /// by the combined treap height.
    fn merge_trees(&mut self, left: Option<NodeId>, right: Option<NodeId>) -> Option<NodeId> {
        match (left, right) {
            (None, other) | (other, None) => other,
            (Some(l), Some(r)) => {
                debug_assert!(self.nodes[l].idx < self.nodes[r].idx);
                if self.nodes[l].priority > self.nodes[r].priority {
                    let merged = self.merge_trees(self.nodes[l].right, Some(r));
                    self.nodes[l].right = merged;
                    if let Some(m) = merged {
                        self.nodes[m].parent = Some(l);
                    }
                    Some(l)
                } else {
                    let merged = self.merge_trees(Some(l), self.nodes[r].left);
                    self.nodes[r].left = merged;
                    if let Some(m) = merged {
                        self.nodes[m].parent = Some(r);
                    }
                    Some(r)
                }
            }
        }
    }

    /// Coalesce adjacent sorted regions around a freshly sorted one.
    ///
    /// `left` and `right` flank a region that was just marked sorted. If
    /// either also closes a sorted region on its other side, it carries no
    /// information anymore and is removed.
    pub fn depivot(&mut self, left: NodeId, right: NodeId) {
        debug_assert!(self.nodes[left].flags.contains(PivotFlags::SORTED_LEFT));
        debug_assert!(self.nodes[right].flags.contains(PivotFlags::SORTED_RIGHT));

        if self.nodes[left].flags.contains(PivotFlags::SORTED_RIGHT) {
            self.delete(left);
        }
        if self.nodes[right].flags.contains(PivotFlags::SORTED_LEFT) {
            self.delete(right);
        }

        self.debug_check();
    }

    // ========================================================================
    // Arena
    // ========================================================================

    fn alloc(&mut self, node: PivotNode) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.free.push(id);
    }

    // ========================================================================
    // Consistency Checks
    // ========================================================================

    #[inline]
    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            self.assert_invariants();
            self.assert_flag_invariants();
        }
    }

    #[inline]
    fn debug_check_structure(&self) {
        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
    }

    /// Panic unless BST order, heap order, parent links, index uniqueness,
    /// and arena bookkeeping all hold.
    pub fn assert_invariants(&self) {
        let root = match self.root {
            Some(root) => root,
            None => return,
        };
        assert!(self.nodes[root].parent.is_none(), "root has no parent");
        let reachable = self.assert_subtree(root);
        assert_eq!(reachable, self.pivot_count(), "arena and tree agree");

        // In-order indices strictly increase, so they are pairwise distinct.
        let mut current = self.first();
        let mut prev: Option<isize> = None;
        while let Some(id) = current {
            if let Some(prev_idx) = prev {
                assert!(prev_idx < self.nodes[id].idx, "pivot indices are unique");
            }
            prev = Some(self.nodes[id].idx);
            current = self.succ(id);
        }
    }

    fn assert_subtree(&self, id: NodeId) -> usize {
        let node = &self.nodes[id];
        let mut count = 1;
        if let Some(left) = node.left {
            assert!(self.nodes[left].idx < node.idx);
            assert!(self.nodes[left].priority <= node.priority);
            assert_eq!(self.nodes[left].parent, Some(id));
            count += self.assert_subtree(left);
        }
        if let Some(right) = node.right {
            assert!(self.nodes[right].idx > node.idx);
            assert!(self.nodes[right].priority <= node.priority);
            assert_eq!(self.nodes[right].parent, Some(id));
            count += self.assert_subtree(right);
        }
        count
    }

    /// Panic unless every sorted-region annotation has its matching partner
    /// on the neighboring pivot.
    pub fn assert_flag_invariants(&self) {
        let mut prev: Option<NodeId> = None;
        let mut current = self.first();
        while let Some(id) = current {
            let next = self.succ(id);
            if self.nodes[id].flags.contains(PivotFlags::SORTED_LEFT) {
                let next = next.expect("a sorted-left pivot has a successor");
                assert!(self.nodes[next].flags.contains(PivotFlags::SORTED_RIGHT));
            }
            if self.nodes[id].flags.contains(PivotFlags::SORTED_RIGHT) {
                let prev = prev.expect("a sorted-right pivot has a predecessor");
                assert!(self.nodes[prev].flags.contains(PivotFlags::SORTED_LEFT));
            }
            prev = Some(id);
            current = next;
        }
    }
}
