use std::cmp::Ordering;

use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;

/// Which child of its parent a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left child
    Left,
    /// Right child
    Right,
}

impl Side {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Node of the AVL tree
#[derive(Debug, Clone)]
pub struct Node<T, V, Ix> {
    /// Left children
    pub left: Option<NodeIndex<Ix>>,
    /// Right children
    pub right: Option<NodeIndex<Ix>>,
    /// Parent, with the side this node occupies under it
    pub parent: Option<(NodeIndex<Ix>, Side)>,
    /// Height of the left subtree, 0 if absent
    pub height_left: usize,
    /// Height of the right subtree, 0 if absent
    pub height_right: usize,

    /// Interval of the node
    pub interval: Interval<T>,
    /// Value of the node
    pub value: V,
}

// Convenient getter/setter methods
impl<T, V, Ix> Node<T, V, Ix>
where
    Ix: IndexType,
{
    pub fn new(interval: Interval<T>, value: V, parent: Option<(NodeIndex<Ix>, Side)>) -> Self {
        Node {
            left: None,
            right: None,
            parent,
            height_left: 0,
            height_right: 0,
            interval,
            value,
        }
    }

    pub fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn parent(&self) -> Option<(NodeIndex<Ix>, Side)> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeIndex<Ix>> {
        self.left
    }

    pub fn right(&self) -> Option<NodeIndex<Ix>> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<NodeIndex<Ix>> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Height of the subtree rooted at this node, a leaf has height 1
    pub fn height(&self) -> usize {
        1 + self.height_left.max(self.height_right)
    }

    /// The taller side when the two subtree heights differ by 2 or more
    pub fn imbalance(&self) -> Option<Side> {
        if self.height_left >= self.height_right + 2 {
            Some(Side::Left)
        } else if self.height_right >= self.height_left + 2 {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// The child on the taller side, when this node is out of balance
    pub fn heavy_child(&self) -> Option<(Side, NodeIndex<Ix>)> {
        self.imbalance()
            .and_then(|side| self.child(side).map(|c| (side, c)))
    }

    /// The child with the taller subtree, `tie` breaking equal heights
    pub fn taller_child(&self, tie: Side) -> Option<(Side, NodeIndex<Ix>)> {
        match (self.left, self.right) {
            (None, None) => None,
            (Some(l), None) => Some((Side::Left, l)),
            (None, Some(r)) => Some((Side::Right, r)),
            (Some(l), Some(r)) => match self.height_left.cmp(&self.height_right) {
                Ordering::Greater => Some((Side::Left, l)),
                Ordering::Less => Some((Side::Right, r)),
                Ordering::Equal => Some((tie, if tie == Side::Left { l } else { r })),
            },
        }
    }

    pub fn set_child(side: Side, child: Option<NodeIndex<Ix>>) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    pub fn set_parent(
        parent: Option<(NodeIndex<Ix>, Side)>,
    ) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| {
            node.parent = parent;
        }
    }

    pub fn set_height_on(side: Side, height: usize) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| match side {
            Side::Left => node.height_left = height,
            Side::Right => node.height_right = height,
        }
    }

    pub fn set_heights(height_left: usize, height_right: usize) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| {
            node.height_left = height_left;
            node.height_right = height_right;
        }
    }
}
