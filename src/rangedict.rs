use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::error::Error;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::{Interval, IntoInterval, Scalar};
use crate::iter::{Items, Iter};
use crate::node::{Node, Side};

/// A descent path: every visited node with the side taken below it.
type Path<Ix> = Vec<(NodeIndex<Ix>, Side)>;

/// A map from non-overlapping intervals to values, which supports point lookups.
#[derive(Debug, Clone)]
pub struct RangeDict<T, V, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<T, V, Ix>>,
    /// Root of the AVL tree
    pub(crate) root: Option<NodeIndex<Ix>>,
    /// Number of elements in the map
    pub(crate) len: usize,
}

impl<T, V, Ix> RangeDict<T, V, Ix>
where
    T: Scalar,
    Ix: IndexType,
{
    /// Creates a new `RangeDict` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RangeDict {
            nodes: Vec::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Insert an interval-value pair into the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when the key is not a valid interval, and
    /// [`Error::Overlap`] when it overlaps an interval already in the map. The map is
    /// left unchanged on error.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use range_dict::{Interval, RangeDict};
    ///
    /// let mut map = RangeDict::new();
    /// assert!(map.insert(0..10, "a").is_ok());
    /// assert!(map.insert(10..20, "b").is_ok());
    /// assert!(map.insert([5, 15], "c").is_err());
    /// assert_eq!(map.len(), 2);
    /// ```
    #[inline]
    pub fn insert<K>(&mut self, key: K, value: V) -> Result<(), Error>
    where
        K: IntoInterval<T>,
    {
        let interval = key.into_interval()?;
        let mut path = Path::new();
        let mut x = self.root;
        while let Some(idx) = x {
            let existing = self.node_ref(idx, Node::interval);
            if interval.overlaps(existing) {
                debug!("rejected {interval}: overlaps with {existing}");
                return Err(Error::Overlap {
                    key: interval.to_string(),
                    existing: existing.to_string(),
                });
            }
            let side = Self::descend(&interval, existing);
            path.push((idx, side));
            x = self.node_ref(idx, |n| n.child(side));
        }

        let parent = path.last().copied();
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Node::new(interval, value, parent));
        self.link(parent, Some(node_idx));
        self.len = self.len.wrapping_add(1);

        self.grow(path, node_idx);
        Ok(())
    }

    /// Remove an interval from the map, returning the value stored at it.
    ///
    /// The interval must be exactly equal to a stored one, boundaries included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when the key is not a valid interval, and
    /// [`Error::KeyNotFound`] when it is not in the map.
    ///
    /// # Example
    /// ```rust
    /// use range_dict::{Interval, RangeDict};
    ///
    /// let mut map = RangeDict::new();
    /// map.insert(1..3, 1).unwrap();
    /// map.insert(3..4, 2).unwrap();
    /// assert!(map.remove(1..4).is_err());
    /// assert!(map.remove([1, 3]).is_err());
    /// assert_eq!(map.remove(3..4), Ok(2));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove<K>(&mut self, key: K) -> Result<V, Error>
    where
        K: IntoInterval<T>,
    {
        let interval = key.into_interval()?;
        let mut path = Path::new();
        let mut x = self.root;
        let target = loop {
            let Some(idx) = x else {
                return Err(Error::KeyNotFound(interval.to_string()));
            };
            let existing = self.node_ref(idx, Node::interval);
            if *existing == interval {
                break idx;
            }
            let side = Self::descend(&interval, existing);
            path.push((idx, side));
            x = self.node_ref(idx, |n| n.child(side));
        };

        self.remove_inner(target, path);
        // Swap the node with the last node stored in the vector and update indices
        let node = self.nodes.swap_remove(target.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, target);

        Ok(node.value)
    }

    /// Return a reference to the value of the interval containing the point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotANumber`] for NaN and [`Error::KeyNotFound`] when no
    /// interval contains the point.
    ///
    /// # Example
    /// ```rust
    /// use range_dict::{Interval, RangeDict};
    ///
    /// let mut map = RangeDict::new();
    /// map.insert(0.0..10.0, "a").unwrap();
    /// map.insert(10.0..20.0, "b").unwrap();
    /// assert_eq!(map.lookup(10.0), Ok(&"b"));
    /// assert_eq!(map.lookup(9.999), Ok(&"a"));
    /// assert!(map.lookup(20.0).is_err());
    /// ```
    #[inline]
    pub fn lookup(&self, point: T) -> Result<&V, Error> {
        self.search_point(point)
            .map(|idx| self.node_ref(idx, Node::value))
    }

    /// Return a mutable reference to the value of the interval containing the point.
    ///
    /// # Errors
    ///
    /// See [`RangeDict::lookup`].
    #[inline]
    pub fn lookup_mut(&mut self, point: T) -> Result<&mut V, Error> {
        let idx = self.search_point(point)?;
        Ok(self.node_mut(idx, Node::value_mut))
    }

    /// Return a reference to the value of the interval containing the point, if any.
    #[inline]
    pub fn get(&self, point: T) -> Option<&V> {
        self.lookup(point).ok()
    }

    /// Return a reference to the value of the interval containing the point, or
    /// `default` when there is none.
    ///
    /// # Example
    /// ```rust
    /// use range_dict::RangeDict;
    ///
    /// let mut map = RangeDict::new();
    /// map.insert([1, 2], 7).unwrap();
    /// assert_eq!(map.get_or(2, &0), &7);
    /// assert_eq!(map.get_or(3, &0), &0);
    /// ```
    #[inline]
    pub fn get_or<'a>(&'a self, point: T, default: &'a V) -> &'a V {
        self.get(point).unwrap_or(default)
    }

    /// Check if an interval in the map contains the point.
    #[inline]
    pub fn contains(&self, point: T) -> bool {
        self.search_point(point).is_ok()
    }

    /// Get the entries of the map sorted by their lower bound.
    #[inline]
    #[must_use]
    pub fn items_sorted(&self) -> Vec<(&Interval<T>, &V)> {
        let mut items: Vec<_> = self.items().collect();
        items.sort_by(|a, b| a.0.cmp_start(b.0));
        items
    }

    /// Get the intervals of the map sorted by their lower bound.
    #[inline]
    #[must_use]
    pub fn keys_sorted(&self) -> Vec<&Interval<T>> {
        self.items_sorted().into_iter().map(|(k, _)| k).collect()
    }

    /// Get the values of the map sorted by the lower bound of their interval.
    #[inline]
    #[must_use]
    pub fn values_sorted(&self) -> Vec<&V> {
        self.items_sorted().into_iter().map(|(_, v)| v).collect()
    }

    /// Insert every pair in order, stopping at the first failure.
    ///
    /// Pairs inserted before the failure stay in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMapping`] wrapping the error of the failed insert.
    ///
    /// # Example
    /// ```rust
    /// use range_dict::RangeDict;
    ///
    /// let mut map = RangeDict::new();
    /// assert!(map.try_extend([(0..1, 'a'), (0..2, 'b'), (5..6, 'c')]).is_err());
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn try_extend<I, K>(&mut self, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: IntoInterval<T>,
    {
        for (key, value) in pairs {
            if let Err(err) = self.insert(key, value) {
                debug!(len = self.len, "bulk insert stopped: {err}");
                return Err(err.mapping());
            }
        }
        Ok(())
    }

    /// Insert all entries of other into self.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMapping`] when an entry of other overlaps self. The
    /// entries inserted before the overlapping one stay in the map.
    #[inline]
    pub fn update(&mut self, other: &Self) -> Result<(), Error>
    where
        V: Clone,
    {
        self.try_extend(other.items().map(|(k, v)| (*k, v.clone())))
    }

    /// Create a new map holding the entries of self and other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMapping`] when an entry of other overlaps self.
    ///
    /// # Example
    /// ```rust
    /// use range_dict::RangeDict;
    ///
    /// let a = RangeDict::from_pairs([(0..1, "a"), (1..2, "b")]).unwrap();
    /// let b = RangeDict::from_pairs([(5..6, "c")]).unwrap();
    /// let merged = a.merge(&b).unwrap();
    /// assert_eq!(merged.len(), 3);
    /// assert!(a.merge(&RangeDict::from_pairs([(0..1, "d")]).unwrap()).is_err());
    /// ```
    #[inline]
    pub fn merge(&self, other: &Self) -> Result<Self, Error>
    where
        V: Clone,
    {
        let mut merged = Self::with_capacity(self.len.wrapping_add(other.len));
        merged.update(self)?;
        merged.update(other)?;
        Ok(merged)
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }
}

impl<T, V, Ix> RangeDict<T, V, Ix>
where
    Ix: IndexType,
{
    /// Get an iterator over the entries of the map, sorted by interval.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, V, Ix> {
        Iter::new(self)
    }

    /// Get an iterator over the entries of the map in no particular order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> Items<'_, T, V, Ix> {
        Items::new(self)
    }

    /// Get an iterator over the intervals of the map in no particular order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &Interval<T>> + '_ {
        self.items().map(|(k, _)| k)
    }

    /// Get an iterator over the values of the map in no particular order.
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.items().map(|(_, v)| v)
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the height of the tree, 0 when empty.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }
}

impl<T, V> RangeDict<T, V>
where
    T: Scalar,
{
    /// Create an empty `RangeDict`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a `RangeDict` from interval-value pairs, inserted in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMapping`] wrapping the first failed insert.
    #[inline]
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: IntoInterval<T>,
    {
        let mut map = Self::new();
        map.try_extend(pairs)?;
        Ok(map)
    }
}

impl<T, V> Default for RangeDict<T, V>
where
    T: Scalar,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, V, Ix> PartialEq for RangeDict<T, V, Ix>
where
    T: Scalar,
    V: PartialEq,
    Ix: IndexType,
{
    /// Maps are equal when they hold the same entries, whatever their tree shape.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.items_sorted() == other.items_sorted()
    }
}

impl<'a, T, V, Ix> IntoIterator for &'a RangeDict<T, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a Interval<T>, &'a V);
    type IntoIter = Iter<'a, T, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, V, Ix> RangeDict<T, V, Ix>
where
    T: Scalar,
    Ix: IndexType,
{
    /// The side of `existing` that `interval` belongs to.
    fn descend(interval: &Interval<T>, existing: &Interval<T>) -> Side {
        if interval.precedes(existing) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Search for the node whose interval contains the point.
    fn search_point(&self, point: T) -> Result<NodeIndex<Ix>, Error> {
        if point.is_nan() {
            return Err(Error::NotANumber);
        }
        let mut x = self.root;
        while let Some(idx) = x {
            x = match self.node_ref(idx, |n| n.interval().compare_point(point)) {
                Ordering::Equal => return Ok(idx),
                Ordering::Less => self.node_ref(idx, Node::right),
                Ordering::Greater => self.node_ref(idx, Node::left),
            };
        }
        Err(Error::KeyNotFound(point.to_string()))
    }

    /// Unlink a node from the tree, then restore the heights along its path.
    fn remove_inner(&mut self, z: NodeIndex<Ix>, mut path: Path<Ix>) {
        let slot = self.node_ref(z, Node::parent);
        match (self.node_ref(z, Node::left), self.node_ref(z, Node::right)) {
            (Some(left), Some(right)) => {
                // Replace z with its predecessor y, the right-most node on the left.
                let z_depth = path.len();
                path.push((z, Side::Left));
                let mut y = left;
                while let Some(r) = self.node_ref(y, Node::right) {
                    path.push((y, Side::Right));
                    y = r;
                }
                if y != left {
                    let y_slot = self.node_ref(y, Node::parent);
                    let y_left = self.node_ref(y, Node::left);
                    self.link(y_slot, y_left);
                    self.link(Some((y, Side::Left)), Some(left));
                }
                self.link(Some((y, Side::Right)), Some(right));
                let (height_left, height_right) =
                    self.node_ref(z, |n| (n.height_left, n.height_right));
                self.node_mut(y, Node::set_heights(height_left, height_right));
                self.link(slot, Some(y));
                path[z_depth] = (y, Side::Left);
            }
            (child, None) | (None, child) => self.link(slot, child),
        }
        self.len = self.len.wrapping_sub(1);

        self.shrink(path);
    }

    /// Restore heights along an insertion path, bottom-up, from the new `leaf`.
    ///
    /// At most one rotation is needed: it brings the subtree back to its height
    /// before the insert.
    fn grow(&mut self, path: Path<Ix>, leaf: NodeIndex<Ix>) {
        let mut child = leaf;
        let mut below = None;
        for (x, side) in path.into_iter().rev() {
            let before = self.node_ref(x, Node::height);
            self.refresh_height(x, side);
            // Only the `side` subtree grew, so `child` is on the heavy side.
            if let (Some(heavy), Some(below)) = (self.node_ref(x, Node::imbalance), below) {
                self.rebalance(x, (heavy, child), below);
                return;
            }
            if self.node_ref(x, Node::height) == before {
                return;
            }
            below = Some((side, child));
            child = x;
        }
    }

    /// Restore heights along a removal path, bottom-up, rotating wherever needed.
    fn shrink(&mut self, path: Path<Ix>) {
        for (x, side) in path.into_iter().rev() {
            self.refresh_height(x, side);
            let Some((heavy, c)) = self.node_ref(x, Node::heavy_child) else {
                continue;
            };
            if let Some(below) = self.node_ref(c, |n| n.taller_child(heavy)) {
                self.rebalance(x, (heavy, c), below);
            }
        }
    }

    /// Restore the AVL property at `x`, whose `heavy` subtree rooted at `c` is 2
    /// levels taller, `g` being the taller child of `c`.
    fn rebalance(
        &mut self,
        x: NodeIndex<Ix>,
        (heavy, c): (Side, NodeIndex<Ix>),
        (below, g): (Side, NodeIndex<Ix>),
    ) {
        let interval = self.node_ref(x, Node::interval);
        match (heavy, below) {
            (Side::Left, Side::Left) => {
                trace!(%interval, "LL rotation");
                self.rotate(x, c, Side::Left);
            }
            (Side::Left, Side::Right) => {
                trace!(%interval, "LR rotation");
                self.rotate(c, g, Side::Right);
                self.rotate(x, g, Side::Left);
            }
            (Side::Right, Side::Right) => {
                trace!(%interval, "RR rotation");
                self.rotate(x, c, Side::Right);
            }
            (Side::Right, Side::Left) => {
                trace!(%interval, "RL rotation");
                self.rotate(c, g, Side::Left);
                self.rotate(x, g, Side::Right);
            }
        }
    }

    /// Binary tree rotation raising `y`, the child of `x` on the `heavy` side.
    fn rotate(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>, heavy: Side) {
        let light = heavy.opposite();
        let middle = self.node_ref(y, |n| n.child(light));

        self.link(Some((x, heavy)), middle);
        let slot = self.node_ref(x, Node::parent);
        self.link(slot, Some(y));
        self.link(Some((y, light)), Some(x));

        self.refresh_height(x, heavy);
        self.refresh_height(y, light);
    }

    /// Recompute the height counter of `x` on `side` from that child.
    fn refresh_height(&mut self, x: NodeIndex<Ix>, side: Side) {
        let height = self.subtree_height(self.node_ref(x, |n| n.child(side)));
        self.node_mut(x, Node::set_height_on(side, height));
    }

    /// Hang `child` in `slot`, a parent and side or the root when `None`.
    fn link(&mut self, slot: Option<(NodeIndex<Ix>, Side)>, child: Option<NodeIndex<Ix>>) {
        match slot {
            Some((parent, side)) => self.node_mut(parent, Node::set_child(side, child)),
            None => self.root = child,
        }
        if let Some(c) = child {
            self.node_mut(c, Node::set_parent(slot));
        }
    }

    /// Update nodes indices after remove
    ///
    /// The node formerly stored at `old` now lives at `new`.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if old == new {
            return;
        }
        let slot = self.node_ref(new, Node::parent);
        match slot {
            Some((parent, side)) => self.node_mut(parent, Node::set_child(side, Some(new))),
            None => self.root = Some(new),
        }
        for side in [Side::Left, Side::Right] {
            if let Some(c) = self.node_ref(new, |n| n.child(side)) {
                self.node_mut(c, Node::set_parent(Some((new, side))));
            }
        }
    }
}

// Convenient methods for reference or mutate nodes
impl<'a, T, V, Ix> RangeDict<T, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    /// Height of the subtree rooted at `node`, 0 when absent.
    pub(crate) fn subtree_height(&self, node: Option<NodeIndex<Ix>>) -> usize {
        node.map_or(0, |idx| self.nodes[idx.index()].height())
    }
}
