//! The `Interval` stored in `IntervalIndex` represents the closed frame
//! range [start, end], tagged with the timeline entity it belongs to.
//!
//! Both endpoints are inclusive: `[3, 3]` covers a single frame, and two
//! intervals that merely touch at an endpoint count as overlapping. The
//! index orders intervals by `start`; intervals with equal starts keep the
//! relative position their insertion path gave them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of timeline entity an interval is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A text grid on the stage.
    Grid,
    /// A placed stage object.
    Object,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Grid => f.write_str("grid"),
            EntityKind::Object => f.write_str("object"),
        }
    }
}

/// Opaque association back to a caller-owned entity.
///
/// The id is caller-assigned. The index does not enforce uniqueness; when
/// several intervals share an id, id-based operations act on the first match
/// in `start` order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind
    pub kind: EntityKind,
    /// Caller-assigned entity id
    pub id: String,
}

impl EntityRef {
    /// Create a reference to a text grid.
    #[inline]
    pub fn grid(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Grid,
            id: id.into(),
        }
    }

    /// Create a reference to a stage object.
    #[inline]
    pub fn object(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Object,
            id: id.into(),
        }
    }
}

/// A closed interval `[start, end]` of frame numbers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
#[non_exhaustive]
pub struct Interval {
    /// First visible frame
    pub start: i64,
    /// Last visible frame (inclusive)
    pub end: i64,
    /// The entity this interval belongs to
    pub data: EntityRef,
}

impl Interval {
    /// Create a new `Interval`, rejecting ranges with `start > end`.
    ///
    /// # Example
    /// ```rust
    /// use avl_interval_index::{EntityRef, Interval};
    ///
    /// let interval = Interval::new(0, 10, EntityRef::object("a")).unwrap();
    /// assert_eq!(interval.length(), 10);
    /// assert!(Interval::new(10, 0, EntityRef::object("b")).is_err());
    /// ```
    #[inline]
    pub fn new(start: i64, end: i64, data: EntityRef) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end, data })
    }

    /// Check if the interval contains the given frame.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: i64) -> bool {
        self.start <= point && point <= self.end
    }

    /// Check if self overlaps with another interval. Touching endpoints
    /// count as overlapping.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Check if self overlaps with the closed range `[start, end]`.
    #[inline]
    #[must_use]
    pub fn overlaps_range(&self, start: i64, end: i64) -> bool {
        self.start <= end && start <= self.end
    }

    /// Number of frames between the endpoints.
    #[inline]
    #[must_use]
    pub fn length(&self) -> i64 {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] ({}:{})",
            self.start, self.end, self.data.kind, self.data.id
        )
    }
}

/// Wire shape of an interval record, validated on deserialization.
#[derive(Deserialize)]
struct RawInterval {
    start: i64,
    end: i64,
    data: EntityRef,
}

impl TryFrom<RawInterval> for Interval {
    type Error = Error;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.start, raw.end, raw.data)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_range_is_rejected() {
        let err = Interval::new(3, 1, EntityRef::grid("g")).unwrap_err();
        assert_eq!(err, Error::InvalidRange { start: 3, end: 1 });
        assert_eq!(
            err.to_string(),
            "invalid interval: start (3) must be <= end (1)"
        );
    }

    #[test]
    fn endpoints_are_inclusive() {
        let a = Interval::new(0, 10, EntityRef::object("a")).unwrap();
        let b = Interval::new(10, 20, EntityRef::object("b")).unwrap();
        assert!(a.contains(0));
        assert!(a.contains(10));
        assert!(!a.contains(11));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps_range(10, 20));
        assert!(!a.overlaps_range(11, 20));

        let point = Interval::new(5, 5, EntityRef::grid("p")).unwrap();
        assert_eq!(point.length(), 0);
        assert!(point.contains(5));
        assert!(point.overlaps(&a));
    }

    #[test]
    fn display_shows_range_and_tag() {
        let interval = Interval::new(0, 10, EntityRef::object("a")).unwrap();
        assert_eq!(interval.to_string(), "[0, 10] (object:a)");
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: Interval =
            serde_json::from_str(r#"{"start":1,"end":5,"data":{"kind":"grid","id":"g1"}}"#)
                .unwrap();
        assert_eq!(ok.data.kind, EntityKind::Grid);

        let bad = serde_json::from_str::<Interval>(
            r#"{"start":5,"end":1,"data":{"kind":"object","id":"o1"}}"#,
        );
        assert!(bad.is_err());
    }
}
