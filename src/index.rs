use std::fmt;

/// Handle of a node in the arena. Index 0 is always the sentinel.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeIndex(u32);

impl NodeIndex {
    /// The sentinel node, shared by every absent child and the empty root.
    pub(crate) const SENTINEL: NodeIndex = NodeIndex(0);

    /// # Panics
    ///
    /// This method panics when the arena is at the maximum number of nodes
    /// for a `u32` index.
    #[inline]
    pub(crate) fn new(x: usize) -> Self {
        assert!(u32::try_from(x).is_ok(), "Reached maximum number of nodes");
        NodeIndex(x as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}
