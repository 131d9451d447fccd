use crate::index::NodeIndex;
use crate::interval::Interval;
use crate::intervalindex::IntervalIndex;
use crate::node::Node;

/// Pushes a link of nodes on the left to stack.
fn left_link(index_ref: &IntervalIndex, mut x: NodeIndex) -> Vec<NodeIndex> {
    let mut nodes = vec![];
    while !x.is_sentinel() {
        nodes.push(x);
        x = index_ref.node_ref(x, Node::left);
    }
    nodes
}

/// An iterator over the intervals of an `IntervalIndex`, in ascending
/// `start` order.
#[derive(Debug)]
pub struct Iter<'a> {
    /// Reference to the index
    index_ref: &'a IntervalIndex,
    /// Stack for iteration
    stack: Vec<NodeIndex>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(index_ref: &'a IntervalIndex) -> Self {
        Iter {
            index_ref,
            stack: left_link(index_ref, index_ref.root),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Interval;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack.extend(left_link(
            self.index_ref,
            self.index_ref.node_ref(x, Node::right),
        ));
        Some(self.index_ref.node_ref(x, Node::interval))
    }
}
