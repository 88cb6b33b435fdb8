use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;
use crate::node::Node;
use crate::rangedict::RangeDict;

/// Pushes a link of nodes on the left to stack.
fn left_link<T, V, Ix>(
    map_ref: &RangeDict<T, V, Ix>,
    mut x: Option<NodeIndex<Ix>>,
) -> Vec<NodeIndex<Ix>>
where
    Ix: IndexType,
{
    let mut nodes = vec![];
    while let Some(idx) = x {
        nodes.push(idx);
        x = map_ref.node_ref(idx, Node::left);
    }
    nodes
}

/// An iterator over the entries of a `RangeDict`, sorted by interval.
#[derive(Debug)]
pub struct Iter<'a, T, V, Ix> {
    /// Reference to the map
    map_ref: &'a RangeDict<T, V, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Number of entries yet to yield
    remaining: usize,
}

impl<'a, T, V, Ix> Iter<'a, T, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a RangeDict<T, V, Ix>) -> Self {
        Iter {
            map_ref,
            stack: left_link(map_ref, map_ref.root),
            remaining: map_ref.len(),
        }
    }
}

impl<'a, T, V, Ix> Iterator for Iter<'a, T, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a Interval<T>, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack
            .extend(left_link(self.map_ref, self.map_ref.node_ref(x, Node::right)));
        self.remaining = self.remaining.saturating_sub(1);
        Some(self.map_ref.node_ref(x, |xn| (xn.interval(), xn.value())))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, V, Ix> ExactSizeIterator for Iter<'_, T, V, Ix> where Ix: IndexType {}

/// An unsorted iterator over the entries of a `RangeDict`.
///
/// The tree is walked depth first with an explicit stack, so deep trees do not
/// exhaust the call stack.
#[derive(Debug)]
pub struct Items<'a, T, V, Ix> {
    /// Reference to the map
    map_ref: &'a RangeDict<T, V, Ix>,
    /// Nodes yet to visit
    stack: Vec<NodeIndex<Ix>>,
    /// Number of entries yet to yield
    remaining: usize,
}

impl<'a, T, V, Ix> Items<'a, T, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a RangeDict<T, V, Ix>) -> Self {
        Items {
            map_ref,
            stack: map_ref.root.into_iter().collect(),
            remaining: map_ref.len(),
        }
    }
}

impl<'a, T, V, Ix> Iterator for Items<'a, T, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a Interval<T>, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        let node = self.map_ref.node_ref(x, |xn| xn);
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.interval(), node.value()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, V, Ix> ExactSizeIterator for Items<'_, T, V, Ix> where Ix: IndexType {}
