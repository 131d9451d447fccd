use std::collections::VecDeque;
use std::fmt::Write as _;
use std::time::Instant;

use tracing::{debug, trace};

use crate::error::Error;
use crate::index::NodeIndex;
use crate::interval::{EntityRef, Interval};
use crate::iter::Iter;
use crate::node::Node;
use crate::report::{BatchReport, QueryReport, TreeStats};

/// An index over timeline intervals, which answers "what is visible at frame
/// F" and "what overlaps range [a, b]" queries.
///
/// Internally an AVL tree keyed on interval `start`, augmented with the
/// maximum `end` of every subtree so queries can prune subtrees that cannot
/// contain a match. Nodes are stored in a vector and linked by indices
/// rather than owned pointers, which keeps the structure `Send` and `Unpin`
/// and lets removal compact the arena with a single `swap_remove`.
#[derive(Debug)]
pub struct IntervalIndex {
    /// Vector that stores nodes; index 0 is the sentinel
    pub(crate) nodes: Vec<Node>,
    /// Root of the interval tree
    pub(crate) root: NodeIndex,
    /// Number of intervals in the index
    pub(crate) len: usize,
}

impl IntervalIndex {
    /// Create an empty `IntervalIndex`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            root: NodeIndex::SENTINEL,
            len: 0,
        }
    }

    /// Create a new `IntervalIndex` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Node::sentinel()];
        nodes.reserve(capacity);
        Self {
            nodes,
            root: NodeIndex::SENTINEL,
            len: 0,
        }
    }

    /// Insert an interval bound to the given entity.
    ///
    /// Equal starts descend left, so the tree accepts any number of
    /// intervals sharing a start frame. Fails with [`Error::InvalidRange`]
    /// when `start > end`, leaving the index untouched.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes
    /// for its `u32` arena index.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.insert(0, 10, EntityRef::object("a")).unwrap();
    /// assert!(index.insert(10, 0, EntityRef::object("b")).is_err());
    /// assert_eq!(index.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, start: i64, end: i64, data: EntityRef) -> Result<(), Error> {
        let interval = Interval::new(start, end, data)?;
        trace!(start, end, "insert interval");
        self.insert_interval(interval);
        Ok(())
    }

    /// Remove the interval whose entity id matches, returning it.
    ///
    /// Returns `None` and leaves the index untouched when no interval
    /// carries the id. When several intervals share the id, the first match
    /// in `start` order is removed.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.insert(0, 10, EntityRef::object("a")).unwrap();
    /// let removed = index.remove_by_id("a").unwrap();
    /// assert_eq!((removed.start, removed.end), (0, 10));
    /// assert_eq!(index.remove_by_id("a"), None);
    /// assert!(index.is_empty());
    /// ```
    #[inline]
    pub fn remove_by_id(&mut self, id: &str) -> Option<Interval> {
        let node_idx = self.search_by_id(self.root, id)?;
        self.remove_inner(node_idx);
        // Swap the node with the last node stored in the vector and update indices
        let mut node = self.nodes.swap_remove(node_idx.index());
        let old = NodeIndex::new(self.nodes.len());
        self.update_idx(old, node_idx);
        trace!(id, "removed interval");

        node.interval.take()
    }

    /// Find the interval whose entity id matches.
    ///
    /// This is a full-tree search with O(n) worst case; ids are not
    /// index-accelerated.
    #[inline]
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Interval> {
        self.search_by_id(self.root, id)
            .map(|idx| self.node_ref(idx, Node::interval))
    }

    /// Check if any interval carries the given entity id.
    #[inline]
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// All entity ids in the index, in interval `start` order.
    #[inline]
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|i| i.data.id.as_str()).collect()
    }

    /// Find all intervals that contain the given frame.
    ///
    /// The result order follows the traversal, not any key; callers must
    /// not rely on it. This is the query a timeline player issues once per
    /// rendered frame.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.insert(0, 10, EntityRef::object("a")).unwrap();
    /// index.insert(5, 15, EntityRef::object("b")).unwrap();
    /// index.insert(20, 30, EntityRef::object("c")).unwrap();
    /// assert_eq!(index.find_overlapping(7).len(), 2);
    /// assert_eq!(index.find_overlapping(25).len(), 1);
    /// assert_eq!(index.find_overlapping(17).len(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn find_overlapping(&self, point: i64) -> Vec<&Interval> {
        self.find_overlapping_inner(point, &mut 0)
    }

    /// Like [`find_overlapping`](Self::find_overlapping), with traversal
    /// statistics attached to the result.
    #[inline]
    #[must_use]
    pub fn find_overlapping_report(&self, point: i64) -> QueryReport {
        let started = Instant::now();
        let mut nodes_visited = 0;
        let intervals = self
            .find_overlapping_inner(point, &mut nodes_visited)
            .into_iter()
            .cloned()
            .collect();
        QueryReport {
            intervals,
            nodes_visited,
            elapsed: started.elapsed(),
        }
    }

    /// Find all intervals that overlap the closed range `[start, end]`.
    /// Touching endpoints count as overlapping; the result order is
    /// unspecified.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.insert(0, 10, EntityRef::object("a")).unwrap();
    /// index.insert(5, 15, EntityRef::object("b")).unwrap();
    /// index.insert(20, 30, EntityRef::object("c")).unwrap();
    /// // "a" touches at 10, "b" spans through, "c" touches at 20
    /// assert_eq!(index.find_interval_overlapping(10, 20).len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn find_interval_overlapping(&self, start: i64, end: i64) -> Vec<&Interval> {
        let mut list = Vec::new();
        if self.root.is_sentinel() {
            return list;
        }
        let mut queue = VecDeque::new();
        queue.push_back(self.root);
        while let Some(p) = queue.pop_front() {
            if self.node_ref(p, Node::interval).overlaps_range(start, end) {
                list.push(self.node_ref(p, Node::interval));
            }
            let p_left = self.node_ref(p, Node::left);
            if !p_left.is_sentinel() && self.node_ref(p_left, Node::max_end) >= start {
                queue.push_back(p_left);
            }
            let p_right = self.node_ref(p, Node::right);
            if !p_right.is_sentinel() && self.node_ref(p, Node::start) <= end {
                queue.push_back(p_right);
            }
        }
        list
    }

    /// All intervals, sorted by `start` ascending.
    #[inline]
    #[must_use]
    pub fn all_intervals(&self) -> Vec<&Interval> {
        self.iter().collect()
    }

    /// All intervals fully contained in the closed range `[start, end]`,
    /// sorted by `start` ascending.
    ///
    /// Containment is stricter than overlap: both endpoints must fall
    /// inside the query range.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.insert(0, 10, EntityRef::object("a")).unwrap();
    /// index.insert(5, 15, EntityRef::object("b")).unwrap();
    /// index.insert(20, 30, EntityRef::object("c")).unwrap();
    /// // "c" overlaps nothing of [0, 15] and is excluded either way;
    /// // an interval reaching past 15 would be excluded too
    /// assert_eq!(index.intervals_in_range(0, 15).len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn intervals_in_range(&self, start: i64, end: i64) -> Vec<&Interval> {
        self.iter()
            .filter(|i| i.start >= start && i.end <= end)
            .collect()
    }

    /// The interval that comes first in `start` order.
    #[inline]
    #[must_use]
    pub fn min_interval(&self) -> Option<&Interval> {
        if self.root.is_sentinel() {
            return None;
        }
        let idx = self.tree_minimum(self.root);
        Some(self.node_ref(idx, Node::interval))
    }

    /// The interval that comes last in `start` order.
    #[inline]
    #[must_use]
    pub fn max_interval(&self) -> Option<&Interval> {
        if self.root.is_sentinel() {
            return None;
        }
        let idx = self.tree_maximum(self.root);
        Some(self.node_ref(idx, Node::interval))
    }

    /// Get an iterator over the intervals, sorted by `start`.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Insert every `(start, end, data)` entry in order, recording per-item
    /// outcomes. An invalid range fails that item only; the rest of the
    /// batch still runs.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// let report = index.insert_batch(vec![
    ///     (0, 10, EntityRef::object("a")),
    ///     (9, 3, EntityRef::object("bad")),
    ///     (20, 30, EntityRef::object("c")),
    /// ]);
    /// assert_eq!(report.success_count, 2);
    /// assert_eq!(report.error_count, 1);
    /// assert_eq!(index.len(), 2);
    /// ```
    pub fn insert_batch<I>(&mut self, entries: I) -> BatchReport<Result<(), Error>>
    where
        I: IntoIterator<Item = (i64, i64, EntityRef)>,
    {
        let started = Instant::now();
        let mut results = Vec::new();
        let mut success_count = 0;
        let mut error_count = 0;
        for (start, end, data) in entries {
            let result = self.insert(start, end, data);
            match result {
                Ok(()) => success_count += 1,
                Err(_) => error_count += 1,
            }
            results.push(result);
        }
        debug!(success_count, error_count, "insert batch finished");
        BatchReport {
            results,
            success_count,
            error_count,
            elapsed: started.elapsed(),
        }
    }

    /// Remove one interval per id, in order, recording per-item outcomes.
    /// A missing id counts against `error_count` without aborting the batch.
    pub fn remove_batch<I, S>(&mut self, ids: I) -> BatchReport<Option<Interval>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let mut results = Vec::new();
        let mut success_count = 0;
        let mut error_count = 0;
        for id in ids {
            let result = self.remove_by_id(id.as_ref());
            match result {
                Some(_) => success_count += 1,
                None => error_count += 1,
            }
            results.push(result);
        }
        debug!(success_count, error_count, "remove batch finished");
        BatchReport {
            results,
            success_count,
            error_count,
            elapsed: started.elapsed(),
        }
    }

    /// Run a point query per frame, in order. Point queries are total, so
    /// every item succeeds; the report exists for symmetry with the other
    /// batch operations.
    pub fn find_overlapping_batch<I>(&self, points: I) -> BatchReport<Vec<Interval>>
    where
        I: IntoIterator<Item = i64>,
    {
        let started = Instant::now();
        let results: Vec<Vec<Interval>> = points
            .into_iter()
            .map(|p| self.find_overlapping(p).into_iter().cloned().collect())
            .collect();
        let success_count = results.len();
        debug!(success_count, "overlap batch finished");
        BatchReport {
            results,
            success_count,
            error_count: 0,
            elapsed: started.elapsed(),
        }
    }

    /// Export the index as an ordered sequence of records.
    ///
    /// Together with [`from_records`](Self::from_records) this is the
    /// persistence form: a round trip preserves the set of intervals but
    /// not the internal tree shape, which depends only on re-insertion
    /// order.
    #[inline]
    #[must_use]
    pub fn to_records(&self) -> Vec<Interval> {
        self.iter().cloned().collect()
    }

    /// Rebuild an index by inserting every record in sequence order.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, IntervalIndex};
    ///
    /// let mut index = IntervalIndex::new();
    /// index.insert(0, 10, EntityRef::object("a")).unwrap();
    /// index.insert(5, 15, EntityRef::grid("g")).unwrap();
    ///
    /// let restored = IntervalIndex::from_records(index.to_records());
    /// assert_eq!(restored.to_records(), index.to_records());
    /// ```
    #[inline]
    #[must_use]
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut index = Self::new();
        index.extend(records);
        index
    }

    /// Aggregate statistics over the whole index.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut total_length = 0;
        let mut count = 0usize;
        for interval in self.iter() {
            total_length += interval.length();
            count += 1;
        }
        TreeStats {
            len: self.len,
            height: self.root_height(),
            min_interval: self.min_interval().cloned(),
            max_interval: self.max_interval().cloned(),
            total_length,
            average_length: if count == 0 {
                0.0
            } else {
                total_length as f64 / count as f64
            },
        }
    }

    /// Render the tree structure as text, for debugging.
    #[must_use]
    pub fn dump_tree(&self) -> String {
        if self.root.is_sentinel() {
            return "empty tree".to_owned();
        }
        let mut out = String::new();
        self.dump_tree_inner(self.root, 0, "Root: ", &mut out);
        out
    }

    /// Remove all intervals from the index.
    #[inline]
    pub fn clear(&mut self) {
        debug!(len = self.len, "clear index");
        self.nodes.clear();
        self.nodes.push(Node::sentinel());
        self.root = NodeIndex::SENTINEL;
        self.len = 0;
    }

    /// Return the number of intervals in the index.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the index contains no intervals.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of the tree, 0 when empty.
    #[inline]
    #[must_use]
    pub fn root_height(&self) -> u32 {
        self.node_ref(self.root, Node::height)
    }
}

impl Default for IntervalIndex {
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl Extend<Interval> for IntervalIndex {
    fn extend<I: IntoIterator<Item = Interval>>(&mut self, records: I) {
        // records already satisfy start <= end by construction
        for record in records {
            self.insert_interval(record);
        }
    }
}

impl FromIterator<Interval> for IntervalIndex {
    fn from_iter<I: IntoIterator<Item = Interval>>(records: I) -> Self {
        Self::from_records(records)
    }
}

impl<'a> IntoIterator for &'a IntervalIndex {
    type Item = &'a Interval;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Tree internals
impl IntervalIndex {
    /// Push a validated interval into the arena and link it into the tree.
    pub(crate) fn insert_interval(&mut self, interval: Interval) {
        let node_idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node::new(interval));
        self.insert_inner(node_idx);
    }

    /// Insert a node into the tree.
    fn insert_inner(&mut self, z: NodeIndex) {
        let mut y = NodeIndex::SENTINEL;
        let mut x = self.root;
        while !x.is_sentinel() {
            y = x;
            // equal starts descend left
            if self.node_ref(z, Node::start) <= self.node_ref(x, Node::start) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if y.is_sentinel() {
            self.root = z;
        } else {
            if self.node_ref(z, Node::start) <= self.node_ref(y, Node::start) {
                self.node_mut(y, Node::set_left(z));
            } else {
                self.node_mut(y, Node::set_right(z));
            }
            self.rebalance_upward(y);
        }
        self.len = self.len.wrapping_add(1);
    }

    /// Unlink a node from the tree.
    fn remove_inner(&mut self, z: NodeIndex) {
        let from;
        let z_left = self.node_ref(z, Node::left);
        let z_right = self.node_ref(z, Node::right);
        if z_left.is_sentinel() {
            self.transplant(z, z_right);
            from = self.node_ref(z, Node::parent);
        } else if z_right.is_sentinel() {
            self.transplant(z, z_left);
            from = self.node_ref(z, Node::parent);
        } else {
            // replace z with its in-order successor y, then rebalance from
            // the point y was spliced out of
            let y = self.tree_minimum(z_right);
            let y_parent = self.node_ref(y, Node::parent);
            if y_parent == z {
                from = y;
            } else {
                from = y_parent;
                self.transplant(y, self.node_ref(y, Node::right));
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
        }
        self.rebalance_upward(from);
        self.len = self.len.wrapping_sub(1);
    }

    /// Walk from a node to the root, recomputing height and `max_end` and
    /// restoring the AVL balance at every step.
    fn rebalance_upward(&mut self, from: NodeIndex) {
        let mut p = from;
        while !p.is_sentinel() {
            self.update_augment(p);
            let top = self.rebalance(p);
            p = self.node_ref(top, Node::parent);
        }
    }

    /// Restore the balance of a single node, returning the root of its
    /// subtree afterwards. The sub-case is picked from the taller child's
    /// own balance factor.
    fn rebalance(&mut self, x: NodeIndex) -> NodeIndex {
        let bf = self.balance_factor(x);
        if bf > 1 {
            let l = self.node_ref(x, Node::left);
            if self.balance_factor(l) < 0 {
                let _ignore = self.left_rotate(l);
            }
            self.right_rotate(x)
        } else if bf < -1 {
            let r = self.node_ref(x, Node::right);
            if self.balance_factor(r) > 0 {
                let _ignore = self.right_rotate(r);
            }
            self.left_rotate(x)
        } else {
            x
        }
    }

    /// Height difference between the left and right subtrees.
    fn balance_factor(&self, x: NodeIndex) -> i64 {
        let left = self.node_ref(x, Node::left);
        let right = self.node_ref(x, Node::right);
        i64::from(self.node_ref(left, Node::height)) - i64::from(self.node_ref(right, Node::height))
    }

    /// Recompute height and `max_end` from the children.
    fn update_augment(&mut self, x: NodeIndex) {
        let left = self.node_ref(x, Node::left);
        let right = self.node_ref(x, Node::right);
        let height = 1 + self
            .node_ref(left, Node::height)
            .max(self.node_ref(right, Node::height));
        let max_end = self
            .node_ref(x, Node::end)
            .max(self.node_ref(left, Node::max_end))
            .max(self.node_ref(right, Node::max_end));
        self.node_mut(x, Node::set_height(height));
        self.node_mut(x, Node::set_max_end(max_end));
    }

    /// Binary tree left rotate. Both nodes involved are recomputed, the
    /// demoted node first.
    fn left_rotate(&mut self, x: NodeIndex) -> NodeIndex {
        let y = self.node_ref(x, Node::right);
        if y.is_sentinel() {
            return x;
        }
        let y_left = self.node_ref(y, Node::left);
        self.node_mut(x, Node::set_right(y_left));
        if !y_left.is_sentinel() {
            self.node_mut(y_left, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));

        self.update_augment(x);
        self.update_augment(y);
        y
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex) -> NodeIndex {
        let y = self.node_ref(x, Node::left);
        if y.is_sentinel() {
            return x;
        }
        let y_right = self.node_ref(y, Node::right);
        self.node_mut(x, Node::set_left(y_right));
        if !y_right.is_sentinel() {
            self.node_mut(y_right, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));

        self.update_augment(x);
        self.update_augment(y);
        y
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex, y: NodeIndex) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.node_ref(x, Node::parent).is_sentinel() {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex, v: NodeIndex) {
        if self.node_ref(u, Node::parent).is_sentinel() {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Find the node with the minimum start.
    fn tree_minimum(&self, mut x: NodeIndex) -> NodeIndex {
        while !self.node_ref(x, Node::left).is_sentinel() {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum start.
    fn tree_maximum(&self, mut x: NodeIndex) -> NodeIndex {
        while !self.node_ref(x, Node::right).is_sentinel() {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Search for a node by entity id, in order (left, self, right), so the
    /// leftmost match wins when ids repeat.
    fn search_by_id(&self, x: NodeIndex, id: &str) -> Option<NodeIndex> {
        if x.is_sentinel() {
            return None;
        }
        self.search_by_id(self.node_ref(x, Node::left), id)
            .or_else(|| {
                (self.node_ref(x, Node::interval).data.id == id).then_some(x)
            })
            .or_else(|| self.search_by_id(self.node_ref(x, Node::right), id))
    }

    /// Find all intervals containing the point, pruning on `max_end`.
    ///
    /// The result is unordered because of breadth-first search to save
    /// stack size.
    fn find_overlapping_inner(&self, point: i64, nodes_visited: &mut usize) -> Vec<&Interval> {
        let mut list = Vec::new();
        if self.root.is_sentinel() {
            return list;
        }
        let mut queue = VecDeque::new();
        queue.push_back(self.root);
        while let Some(p) = queue.pop_front() {
            *nodes_visited += 1;
            if self.node_ref(p, Node::interval).contains(point) {
                list.push(self.node_ref(p, Node::interval));
            }
            let p_left = self.node_ref(p, Node::left);
            if !p_left.is_sentinel() && self.node_ref(p_left, Node::max_end) >= point {
                queue.push_back(p_left);
            }
            let p_right = self.node_ref(p, Node::right);
            if !p_right.is_sentinel() && self.node_ref(p, Node::start) <= point {
                queue.push_back(p_right);
            }
        }
        list
    }

    /// Update node indices after a `swap_remove`: the node stored at `old`
    /// now lives at `new`, so relink its parent and children.
    fn update_idx(&mut self, old: NodeIndex, new: NodeIndex) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.node_ref(new, Node::parent).is_sentinel() {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            self.left_mut(new, Node::set_parent(new));
            self.right_mut(new, Node::set_parent(new));
        }
    }

    fn dump_tree_inner(&self, x: NodeIndex, level: usize, prefix: &str, out: &mut String) {
        let node = &self.nodes[x.index()];
        let _ignore = writeln!(
            out,
            "{}{}{} (max_end: {})",
            "    ".repeat(level),
            prefix,
            node.interval(),
            node.max_end
        );
        if node.left.is_sentinel() && node.right.is_sentinel() {
            return;
        }
        if node.left.is_sentinel() {
            let _ignore = writeln!(out, "{}L--- none", "    ".repeat(level + 1));
        } else {
            self.dump_tree_inner(node.left, level + 1, "L--- ", out);
        }
        if node.right.is_sentinel() {
            let _ignore = writeln!(out, "{}R--- none", "    ".repeat(level + 1));
        } else {
            self.dump_tree_inner(node.right, level + 1, "R--- ", out);
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a> IntervalIndex {
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }
}
