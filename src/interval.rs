//! The `Interval` stored in `RangeDict`.
//!
//! An interval is a numeric range whose two boundaries are independently open or
//! closed, e.g. `[0, 10)`, `(0, 10]`, `[0, 10]` or `(0, 10)`. Intervals in a
//! `RangeDict` never overlap, which turns the stored intervals into a total order:
//! `a` sorts before `b` when `a` ends before `b` starts. For instance:
//! - [0, 10) < [10, 20), because they only touch at 10 and 10 is not in [0, 10)
//! - [0, 10] and [10, 20) overlap, because both contain 10
//!
//! A point is compared against an interval with [`Interval::compare_point`], which
//! routes point lookups through the tree.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Range, RangeInclusive};

use crate::error::Error;

/// A numeric bound of an `Interval`.
///
/// Integer types are never NaN nor infinite. Floating point types report both,
/// so NaN bounds and closed infinite bounds can be rejected.
pub trait Scalar: Copy + PartialOrd + fmt::Debug + fmt::Display {
    /// Whether the value is not a number
    #[inline]
    fn is_nan(&self) -> bool {
        false
    }

    /// Whether the value is positive or negative infinity
    #[inline]
    fn is_infinite(&self) -> bool {
        false
    }
}

macro_rules! impl_integer_scalar {
    ($($t:ty),*) => {
        $(impl Scalar for $t {})*
    };
}

impl_integer_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Scalar for f32 {
    #[inline]
    fn is_nan(&self) -> bool {
        f32::is_nan(*self)
    }

    #[inline]
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

impl Scalar for f64 {
    #[inline]
    fn is_nan(&self) -> bool {
        f64::is_nan(*self)
    }

    #[inline]
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

/// Whether an interval boundary includes its bound
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The bound itself is excluded
    Open,
    /// The bound itself is included
    Closed,
}

impl Boundary {
    /// Check if the boundary includes its bound
    #[inline]
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(self, Boundary::Closed)
    }
}

/// A numeric interval with independently open or closed boundaries
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval<T> {
    /// Lower bound
    start: T,
    /// Upper bound
    end: T,
    /// Boundary at `start`
    left: Boundary,
    /// Boundary at `end`
    right: Boundary,
}

impl<T: Scalar> Interval<T> {
    /// Create a new `Interval`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when a bound is NaN, when `start > end`, when
    /// a closed boundary is infinite, or when `start == end` and the interval is not
    /// closed on both ends.
    ///
    /// The last check is deliberate and stricter than a plain `start > end` test.
    /// `(5, 5)` and `[5, 5)` hold no point, so they cannot be placed before or after
    /// the keys touching them, and a map accepting them would lose the total order
    /// among its stored keys. `[5, 5]` is a valid single-point interval.
    ///
    /// # Example
    /// ```rust
    /// use range_dict::{Boundary, Interval};
    ///
    /// let int = Interval::new(0, 10, Boundary::Closed, Boundary::Open).unwrap();
    /// assert!(int.contains(0));
    /// assert!(!int.contains(10));
    /// assert!(Interval::new(3, 1, Boundary::Closed, Boundary::Closed).is_err());
    /// assert!(Interval::new(5, 5, Boundary::Closed, Boundary::Open).is_err());
    /// assert!(Interval::new(5, 5, Boundary::Closed, Boundary::Closed).is_ok());
    /// ```
    #[inline]
    pub fn new(start: T, end: T, left: Boundary, right: Boundary) -> Result<Self, Error> {
        if start.is_nan() || end.is_nan() {
            return Err(Error::InvalidRange(format!(
                "bounds {start} and {end} must be numbers"
            )));
        }
        if start > end {
            return Err(Error::InvalidRange(format!(
                "start {start} is greater than end {end}"
            )));
        }
        if left.is_closed() && start.is_infinite() {
            return Err(Error::InvalidRange(format!(
                "closed start {start} is infinite"
            )));
        }
        if right.is_closed() && end.is_infinite() {
            return Err(Error::InvalidRange(format!("closed end {end} is infinite")));
        }
        if start == end && !(left.is_closed() && right.is_closed()) {
            return Err(Error::InvalidRange(format!(
                "interval at {start} with equal bounds holds no point"
            )));
        }
        Ok(Self {
            start,
            end,
            left,
            right,
        })
    }

    /// Create the closed interval `[start, end]`
    ///
    /// # Errors
    ///
    /// See [`Interval::new`].
    #[inline]
    pub fn closed(start: T, end: T) -> Result<Self, Error> {
        Self::new(start, end, Boundary::Closed, Boundary::Closed)
    }

    /// Create the open interval `(start, end)`
    ///
    /// # Errors
    ///
    /// See [`Interval::new`].
    #[inline]
    pub fn open(start: T, end: T) -> Result<Self, Error> {
        Self::new(start, end, Boundary::Open, Boundary::Open)
    }

    /// Create the half-open interval `[start, end)`
    ///
    /// # Errors
    ///
    /// See [`Interval::new`].
    #[inline]
    pub fn closed_open(start: T, end: T) -> Result<Self, Error> {
        Self::new(start, end, Boundary::Closed, Boundary::Open)
    }

    /// Create the half-open interval `(start, end]`
    ///
    /// # Errors
    ///
    /// See [`Interval::new`].
    #[inline]
    pub fn open_closed(start: T, end: T) -> Result<Self, Error> {
        Self::new(start, end, Boundary::Open, Boundary::Closed)
    }

    /// Create the single point interval `[point, point]`
    ///
    /// # Errors
    ///
    /// See [`Interval::new`].
    #[inline]
    pub fn point(point: T) -> Result<Self, Error> {
        Self::closed(point, point)
    }

    /// Lower bound
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Upper bound
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Boundary at the lower bound
    #[inline]
    pub fn left(&self) -> Boundary {
        self.left
    }

    /// Boundary at the upper bound
    #[inline]
    pub fn right(&self) -> Boundary {
        self.right
    }

    /// Checks if the point lies in the interval.
    ///
    /// NaN is contained in no interval.
    #[inline]
    pub fn contains(&self, point: T) -> bool {
        let after_start = match self.left {
            Boundary::Closed => self.start <= point,
            Boundary::Open => self.start < point,
        };
        let before_end = match self.right {
            Boundary::Closed => point <= self.end,
            Boundary::Open => point < self.end,
        };
        after_start && before_end
    }

    /// Compares the interval with a point.
    ///
    /// Returns `Less` if the whole interval lies below the point, `Greater` if it lies
    /// above it and `Equal` if it contains the point. The result for NaN is
    /// meaningless; callers reject NaN before comparing.
    #[inline]
    pub fn compare_point(&self, point: T) -> Ordering {
        let ends_before = match self.right {
            Boundary::Closed => self.end < point,
            Boundary::Open => self.end <= point,
        };
        let starts_after = match self.left {
            Boundary::Closed => self.start > point,
            Boundary::Open => self.start >= point,
        };
        if ends_before {
            Ordering::Less
        } else if starts_after {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Checks if self ends before other starts.
    ///
    /// Touching intervals are ordered unless both touching boundaries are closed, in
    /// which case they share the touching point.
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool {
        self.end < other.start
            || (self.end == other.start && !(self.right.is_closed() && other.left.is_closed()))
    }

    /// Checks if self overlaps with other interval
    ///
    /// # Example
    /// ```rust
    /// use range_dict::Interval;
    ///
    /// let a = Interval::closed_open(0, 10).unwrap();
    /// let b = Interval::closed_open(10, 20).unwrap();
    /// let c = Interval::closed(0, 10).unwrap();
    /// assert!(!a.overlaps(&b));
    /// assert!(c.overlaps(&b));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        let (first, second) = if self.cmp_start(other) == Ordering::Greater {
            (other, self)
        } else {
            (self, other)
        };
        !first.precedes(second)
    }

    /// Compares the lower bounds of two intervals.
    ///
    /// On equal bounds the left-closed interval comes first, since it also holds
    /// the bound itself.
    #[inline]
    pub fn cmp_start(&self, other: &Self) -> Ordering {
        match self.start.partial_cmp(&other.start) {
            Some(Ordering::Equal) | None => match (self.left, other.left) {
                (Boundary::Closed, Boundary::Open) => Ordering::Less,
                (Boundary::Open, Boundary::Closed) => Ordering::Greater,
                _ => Ordering::Equal,
            },
            Some(ord) => ord,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match self.left {
            Boundary::Closed => '[',
            Boundary::Open => '(',
        };
        let close = match self.right {
            Boundary::Closed => ']',
            Boundary::Open => ')',
        };
        write!(f, "{open}{}, {}{close}", self.start, self.end)
    }
}

/// A value that can be turned into an `Interval`
///
/// - `[T; 2]` and `RangeInclusive<T>` become closed intervals
/// - `(T, T)` becomes an open interval
/// - `Range<T>` becomes the half-open interval `[start, end)`
pub trait IntoInterval<T> {
    /// Convert into an `Interval`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when the bounds are not a valid interval.
    fn into_interval(self) -> Result<Interval<T>, Error>;
}

impl<T: Scalar> IntoInterval<T> for Interval<T> {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>, Error> {
        Ok(self)
    }
}

impl<T: Scalar> IntoInterval<T> for &Interval<T> {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>, Error> {
        Ok(*self)
    }
}

impl<T: Scalar> IntoInterval<T> for [T; 2] {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>, Error> {
        Interval::closed(self[0], self[1])
    }
}

impl<T: Scalar> IntoInterval<T> for (T, T) {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>, Error> {
        Interval::open(self.0, self.1)
    }
}

impl<T: Scalar> IntoInterval<T> for Range<T> {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>, Error> {
        Interval::closed_open(self.start, self.end)
    }
}

impl<T: Scalar> IntoInterval<T> for RangeInclusive<T> {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>, Error> {
        let (start, end) = self.into_inner();
        Interval::closed(start, end)
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn invalid_range_is_rejected() {
        for res in [
            Interval::closed(3.0, 1.0),
            Interval::closed(f64::NAN, 1.0),
            Interval::closed(f64::NEG_INFINITY, 1.0),
            Interval::open_closed(0.0, f64::INFINITY),
            Interval::closed_open(1.0, 1.0),
            Interval::open(1.0, 1.0),
        ] {
            assert!(matches!(res, Err(Error::InvalidRange(_))), "{res:?}");
        }
        assert!(Interval::open(f64::NEG_INFINITY, f64::INFINITY).is_ok());
        assert!(Interval::point(1.0).is_ok());
    }

    #[test]
    fn contains_respects_boundaries() {
        let closed = Interval::closed(0, 10).unwrap();
        let open = Interval::open(0, 10).unwrap();
        let closed_open = Interval::closed_open(0, 10).unwrap();
        let open_closed = Interval::open_closed(0, 10).unwrap();

        assert!(closed.contains(0) && closed.contains(10));
        assert!(!open.contains(0) && !open.contains(10) && open.contains(5));
        assert!(closed_open.contains(0) && !closed_open.contains(10));
        assert!(!open_closed.contains(0) && open_closed.contains(10));
        assert!(!closed.contains(-1) && !closed.contains(11));
        assert!(!Interval::closed(0.0, 1.0).unwrap().contains(f64::NAN));
    }

    #[test]
    fn compare_point_routes_around_the_interval() {
        let int = Interval::closed_open(0, 10).unwrap();
        assert_eq!(int.compare_point(10), Ordering::Less);
        assert_eq!(int.compare_point(11), Ordering::Less);
        assert_eq!(int.compare_point(0), Ordering::Equal);
        assert_eq!(int.compare_point(-1), Ordering::Greater);

        let int = Interval::open_closed(0, 10).unwrap();
        assert_eq!(int.compare_point(10), Ordering::Equal);
        assert_eq!(int.compare_point(0), Ordering::Greater);
    }

    #[test]
    fn touching_intervals_overlap_only_when_both_closed() {
        let a = Interval::closed_open(0, 10).unwrap();
        let b = Interval::closed_open(10, 20).unwrap();
        let c = Interval::closed(0, 10).unwrap();
        let d = Interval::open(10, 20).unwrap();

        assert!(!a.overlaps(&b) && !b.overlaps(&a));
        assert!(c.overlaps(&b) && b.overlaps(&c));
        assert!(!c.overlaps(&d) && !d.overlaps(&c));
        assert!(a.precedes(&b) && !b.precedes(&a));
        assert!(!c.precedes(&b));
    }

    #[test]
    fn equal_starts_are_ordered_by_left_boundary() {
        let point = Interval::point(5).unwrap();
        let open = Interval::open(5, 9).unwrap();
        let closed = Interval::closed(5, 9).unwrap();

        assert!(!point.overlaps(&open) && !open.overlaps(&point));
        assert!(point.precedes(&open));
        assert!(point.overlaps(&closed) && closed.overlaps(&point));
        assert!(open.overlaps(&closed));
        assert!(open.overlaps(&open));
        assert_eq!(point.cmp_start(&open), Ordering::Less);
        assert_eq!(open.cmp_start(&point), Ordering::Greater);
    }

    #[test]
    fn interval_likes_pick_their_boundaries() {
        assert_eq!([1, 2].into_interval(), Interval::closed(1, 2));
        assert_eq!((1, 2).into_interval(), Interval::open(1, 2));
        assert_eq!((1..2).into_interval(), Interval::closed_open(1, 2));
        assert_eq!((1..=2).into_interval(), Interval::closed(1, 2));
        assert!((2, 1).into_interval().is_err());
    }

    #[test]
    fn display_uses_bracket_notation() {
        assert_eq!(Interval::closed_open(0, 10).unwrap().to_string(), "[0, 10)");
        assert_eq!(Interval::open_closed(1.5, 2.0).unwrap().to_string(), "(1.5, 2]");
    }

    fn arbitrary_interval() -> impl Strategy<Value = Interval<f64>> {
        (0..10_i32, 0..10_i32, any::<bool>(), any::<bool>()).prop_filter_map(
            "invalid interval",
            |(start, end, left, right)| {
                let boundary = |closed| {
                    if closed {
                        Boundary::Closed
                    } else {
                        Boundary::Open
                    }
                };
                Interval::new(
                    f64::from(start),
                    f64::from(end),
                    boundary(left),
                    boundary(right),
                )
                .ok()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_overlap_is_a_shared_point(a in arbitrary_interval(), b in arbitrary_interval()) {
            // Bounds are integers, so any shared region holds an integer or a half.
            let shared = (-2..=22)
                .map(|k| f64::from(k) / 2.0)
                .any(|p| a.contains(p) && b.contains(p));

            prop_assert_eq!(a.overlaps(&b), shared);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_disjoint_intervals_are_ordered(a in arbitrary_interval(), b in arbitrary_interval()) {
            if !a.overlaps(&b) {
                prop_assert!(a.precedes(&b) ^ b.precedes(&a));
            }
        }
    }
}
