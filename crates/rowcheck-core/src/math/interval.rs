// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Half-Open Intervals
//!
//! `ClosedOpenInterval<T>` models the span `[start, end)` over an integer
//! domain. Row ranges handed to validation workers are expressed with it, so
//! the emptiness, containment and adjacency rules live in one place.

use num_traits::PrimInt;
use std::iter::FusedIterator;

/// A half-open interval `[start, end)` defined by a start (inclusive) and end (exclusive).
///
/// # Invariants
/// `start_inclusive` must always be less than or equal to `end_exclusive`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClosedOpenInterval<T>
where
    T: PrimInt,
{
    start_inclusive: T,
    end_exclusive: T,
}

/// An iterator over the integer points contained within a `ClosedOpenInterval`.
///
/// # Examples
///
/// ```rust
/// # use rowcheck_core::math::interval::ClosedOpenInterval;
///
/// let iv = ClosedOpenInterval::new(1usize, 5);
/// let points: Vec<_> = iv.iter().collect();
/// assert_eq!(points, vec![1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct ClosedOpenIntervalIterator<T>
where
    T: PrimInt,
{
    end_exclusive: T,
    current: T,
}

impl<T> Iterator for ClosedOpenIntervalIterator<T>
where
    T: PrimInt,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.end_exclusive {
            let result = self.current;
            self.current = self.current + T::one();
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for ClosedOpenIntervalIterator<T>
where
    T: PrimInt,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.current < self.end_exclusive {
            self.end_exclusive = self.end_exclusive - T::one();
            Some(self.end_exclusive)
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for ClosedOpenIntervalIterator<T>
where
    T: PrimInt,
{
    fn len(&self) -> usize {
        if self.end_exclusive <= self.current {
            return 0;
        }
        (self.end_exclusive - self.current)
            .to_usize()
            .unwrap_or(usize::MAX)
    }
}

impl<T> FusedIterator for ClosedOpenIntervalIterator<T> where T: PrimInt {}

impl<T> ClosedOpenInterval<T>
where
    T: PrimInt,
{
    /// Creates a new `ClosedOpenInterval`.
    ///
    /// # Panics
    ///
    /// Panics if `start_inclusive > end_exclusive`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rowcheck_core::math::interval::ClosedOpenInterval;
    ///
    /// let iv = ClosedOpenInterval::new(0usize, 10);
    /// assert_eq!(iv.len(), 10);
    /// ```
    #[inline]
    pub fn new(start_inclusive: T, end_exclusive: T) -> Self {
        assert!(
            start_inclusive <= end_exclusive,
            "Invalid interval: start_inclusive must be less than or equal to end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Returns the inclusive start bound of the interval.
    #[inline]
    pub const fn start(&self) -> T {
        self.start_inclusive
    }

    /// Returns the exclusive end bound of the interval.
    #[inline]
    pub const fn end(&self) -> T {
        self.end_exclusive
    }

    /// Returns `true` if `value` is contained in `[start, end)`.
    #[inline]
    pub fn contains_point(&self, value: T) -> bool {
        self.start_inclusive <= value && value < self.end_exclusive
    }

    /// Returns `true` if `other` lies entirely within `self`.
    ///
    /// An empty `other` is contained as long as its bounds are within `self`,
    /// which is what bounds checks against `[0, len)` need.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rowcheck_core::math::interval::ClosedOpenInterval;
    ///
    /// let rows = ClosedOpenInterval::new(0usize, 10);
    /// assert!(rows.contains_interval(ClosedOpenInterval::new(2, 8)));
    /// assert!(rows.contains_interval(ClosedOpenInterval::new(10, 10)));
    /// assert!(!rows.contains_interval(ClosedOpenInterval::new(8, 11)));
    /// ```
    #[inline]
    pub fn contains_interval(&self, other: Self) -> bool {
        self.start_inclusive <= other.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// Returns the length of the interval (`end - start`).
    #[inline]
    pub fn len(&self) -> T {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns `true` if the interval is empty (`start == end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns an iterator over the points of the interval in ascending order.
    #[inline]
    pub fn iter(&self) -> ClosedOpenIntervalIterator<T> {
        ClosedOpenIntervalIterator {
            end_exclusive: self.end_exclusive,
            current: self.start_inclusive,
        }
    }
}

impl<T> Default for ClosedOpenInterval<T>
where
    T: PrimInt,
{
    #[inline]
    fn default() -> Self {
        Self {
            start_inclusive: T::zero(),
            end_exclusive: T::zero(),
        }
    }
}

impl<T> std::fmt::Debug for ClosedOpenInterval<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosedOpenInterval")
            .field("start_inclusive", &self.start_inclusive)
            .field("end_exclusive", &self.end_exclusive)
            .finish()
    }
}

impl<T> std::fmt::Display for ClosedOpenInterval<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T> IntoIterator for ClosedOpenInterval<T>
where
    T: PrimInt,
{
    type Item = T;
    type IntoIter = ClosedOpenIntervalIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> From<std::ops::Range<T>> for ClosedOpenInterval<T>
where
    T: PrimInt,
{
    /// # Panics
    ///
    /// Panics if `range.start > range.end`.
    fn from(range: std::ops::Range<T>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl<T> From<ClosedOpenInterval<T>> for std::ops::Range<T>
where
    T: PrimInt,
{
    fn from(interval: ClosedOpenInterval<T>) -> Self {
        interval.start_inclusive..interval.end_exclusive
    }
}
