use crate::index::NodeIndex;
use crate::interval::Interval;

/// Node of the interval tree.
///
/// The sentinel (arena index 0) is the only node without an interval. It has
/// height 0 and a `max_end` below any real frame, so augmentation updates can
/// read both children unconditionally.
#[derive(Debug)]
pub(crate) struct Node {
    /// Left child
    pub left: NodeIndex,
    /// Right child
    pub right: NodeIndex,
    /// Parent
    pub parent: NodeIndex,
    /// Subtree height, 1 for a leaf
    pub height: u32,
    /// Max interval `end` within this subtree
    pub max_end: i64,
    /// Interval of the node, `None` marks the sentinel
    pub interval: Option<Interval>,
}

impl Node {
    pub fn sentinel() -> Self {
        Node {
            left: NodeIndex::SENTINEL,
            right: NodeIndex::SENTINEL,
            parent: NodeIndex::SENTINEL,
            height: 0,
            max_end: i64::MIN,
            interval: None,
        }
    }

    pub fn new(interval: Interval) -> Self {
        let max_end = interval.end;
        Node {
            left: NodeIndex::SENTINEL,
            right: NodeIndex::SENTINEL,
            parent: NodeIndex::SENTINEL,
            height: 1,
            max_end,
            interval: Some(interval),
        }
    }
}

// Convenient getter/setter methods
impl Node {
    pub fn is_sentinel(&self) -> bool {
        self.interval.is_none()
    }

    pub fn interval(&self) -> &Interval {
        self.interval.as_ref().unwrap()
    }

    pub fn start(&self) -> i64 {
        self.interval().start
    }

    pub fn end(&self) -> i64 {
        self.interval().end
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_end(&self) -> i64 {
        self.max_end
    }

    pub fn left(&self) -> NodeIndex {
        self.left
    }

    pub fn right(&self) -> NodeIndex {
        self.right
    }

    pub fn parent(&self) -> NodeIndex {
        self.parent
    }

    pub fn set_height(height: u32) -> impl FnOnce(&mut Node) {
        move |node: &mut Node| {
            node.height = height;
        }
    }

    pub fn set_max_end(max_end: i64) -> impl FnOnce(&mut Node) {
        move |node: &mut Node| {
            node.max_end = max_end;
        }
    }

    pub fn set_left(left: NodeIndex) -> impl FnOnce(&mut Node) {
        move |node: &mut Node| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex) -> impl FnOnce(&mut Node) {
        move |node: &mut Node| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: NodeIndex) -> impl FnOnce(&mut Node) {
        move |node: &mut Node| {
            node.parent = parent;
        }
    }
}
