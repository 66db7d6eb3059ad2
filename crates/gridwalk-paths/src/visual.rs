use crate::node::NodeFlags;

/// Engine-owned visualization table, one [`NodeFlags`] per node index.
///
/// Renderers read this between steps; the graph itself never changes.
#[derive(Debug, Clone, Default)]
pub struct VisualState {
    flags: Vec<NodeFlags>,
}

impl VisualState {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            flags: vec![NodeFlags::NONE; len],
        }
    }

    /// Flags of node `index`, empty if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> NodeFlags {
        self.flags.get(index).copied().unwrap_or_default()
    }

    /// Flags of every node in row-major order.
    pub fn as_slice(&self) -> &[NodeFlags] {
        &self.flags
    }

    /// Number of nodes carrying all bits of `flag`.
    pub fn count(&self, flag: NodeFlags) -> usize {
        self.flags.iter().filter(|f| f.contains(flag)).count()
    }

    /// Clear every flag on every node.
    pub fn reset(&mut self) {
        self.flags.fill(NodeFlags::NONE);
    }

    #[inline]
    pub(crate) fn insert(&mut self, index: usize, flag: NodeFlags) {
        self.flags[index].insert(flag);
    }

    #[inline]
    pub(crate) fn remove(&mut self, index: usize, flag: NodeFlags) {
        self.flags[index].remove(flag);
    }

    /// Retire a node from the active step: no longer current, queued or
    /// freshly discovered, but reached.
    pub(crate) fn demote(&mut self, index: usize) {
        let f = &mut self.flags[index];
        f.remove(NodeFlags::CURRENT | NodeFlags::FRONTIER | NodeFlags::NEIGHBOUR);
        f.insert(NodeFlags::REACHED);
    }
}

/// Predecessor linkage discovered by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    /// The search origin.
    Root,
    From(usize),
}

/// Came-from map keyed by node index.
#[derive(Debug, Clone, Default)]
pub(crate) struct CameFrom {
    links: Vec<Option<Link>>,
}

impl CameFrom {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            links: vec![None; len],
        }
    }

    pub(crate) fn clear(&mut self) {
        self.links.fill(None);
    }

    #[inline]
    pub(crate) fn contains(&self, index: usize) -> bool {
        matches!(self.links.get(index), Some(Some(_)))
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<Link> {
        self.links.get(index).copied().flatten()
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, link: Link) {
        self.links[index] = Some(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demote_marks_reached() {
        let mut v = VisualState::new(3);
        v.insert(1, NodeFlags::CURRENT | NodeFlags::FRONTIER | NodeFlags::CAME_FROM_DIRECTION);
        v.demote(1);
        assert_eq!(v.get(1), NodeFlags::REACHED | NodeFlags::CAME_FROM_DIRECTION);
        assert_eq!(v.count(NodeFlags::REACHED), 1);
        v.reset();
        assert!(v.as_slice().iter().all(|f| f.is_empty()));
        assert_eq!(v.get(99), NodeFlags::NONE);
    }

    #[test]
    fn came_from_links() {
        let mut c = CameFrom::new(4);
        c.set(0, Link::Root);
        c.set(2, Link::From(0));
        assert!(c.contains(0) && c.contains(2) && !c.contains(1));
        assert_eq!(c.get(2), Some(Link::From(0)));
        c.clear();
        assert_eq!(c.get(2), None);
    }
}
