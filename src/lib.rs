//! `range_dict` is a map from non-overlapping numeric intervals to values.
//!
//! Every interval is open or closed at each end independently. Inserting an
//! interval that shares a point with a stored one fails, so any point belongs to at
//! most one stored interval and can be looked up directly.
//!
//! The map is an AVL tree ordered by interval position. Each node keeps the heights
//! of its two subtrees, and insertion and deletion retrace their descent path to
//! update them and rotate where they drift apart by 2, so every modification takes
//! O(logN) time.
//!
//! Nodes live in a vector and refer to each other by index. A node owns its
//! children through their indices and keeps a non-owning index to its parent,
//! tagged with the side it hangs on.
//!
//! # Example
//!
//! ```rust
//! use range_dict::{Interval, RangeDict};
//!
//! let mut map = RangeDict::new();
//! map.insert(Interval::closed_open(0, 10).unwrap(), "a").unwrap();
//! map.insert(10..20, "b").unwrap();
//! assert_eq!(map.lookup(10), Ok(&"b"));
//! assert!(map.insert([0, 10], "c").is_err());
//! ```
//!

mod error;
mod index;
mod interval;
mod iter;
mod node;
mod rangedict;


pub use error::Error;
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use interval::{Boundary, Interval, IntoInterval, Scalar};
pub use iter::{Items, Iter};
pub use rangedict::RangeDict;
