//! 2D geometry primitives.
//!
//! Scene coordinates are normalized to `[0,1]×[0,1]` by convention, but nothing
//! here enforces it. Points and vectors share the same type, [`Point`].
//!
//! The circle-vs-segment test in this module evaluates a single position: it is
//! a proximity check, not a swept test, so the reported contact time is always
//! `0.0`.

use glam::Vec2;

use crate::error::SimError;

/// 2D point or vector.
pub type Point = Vec2;

/// Below this length a segment is degenerate and below this distance a circle
/// center is considered to lie on the segment. A segment whose length is not
/// finite is degenerate too.
pub const GEOMETRY_EPSILON: f32 = 1e-4;

/// Line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    pub fn is_degenerate(&self) -> bool {
        !usable_length(self.length())
    }

    /// Unit vector from `start` to `end`, `None` for a degenerate segment.
    pub fn direction(&self) -> Option<Point> {
        let length = self.length();
        if usable_length(length) {
            Some((self.end - self.start) / length)
        } else {
            None
        }
    }

    /// Unit perpendicular (direction rotated by +90°).
    pub fn perpendicular(&self) -> Option<Point> {
        self.direction().map(|dir| Point::new(-dir.y, dir.x))
    }

    /// Closest point on the segment to `p`.
    ///
    /// The projection of `p - start` onto the segment direction is clamped to
    /// `[0, length]`. A degenerate segment collapses to its start point.
    pub fn closest_point(&self, p: Point) -> Point {
        let Some(dir) = self.direction() else {
            return self.start;
        };
        let projection = dir.dot(p - self.start);
        if projection <= 0.0 {
            self.start
        } else if projection >= self.length() {
            self.end
        } else {
            self.start + dir * projection
        }
    }
}

fn usable_length(length: f32) -> bool {
    length.is_finite() && length >= GEOMETRY_EPSILON
}

/// Result of a circle-vs-segment proximity test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Closest point on the segment.
    pub point: Point,
    /// Unit normal pointing from the segment towards the circle center.
    pub normal: Point,
    /// Fraction of the tick at which the contact happens. Always `0.0`.
    pub time: f32,
}

/// Tests a circle at `center` against `segment`.
///
/// Returns `Ok(None)` when the circle does not touch the segment
/// (`distance > radius`) and [`SimError::DegenerateGeometry`] when the segment
/// is shorter than [`GEOMETRY_EPSILON`] or has a non-finite endpoint.
///
/// When the center lies on the segment the normal falls back to the segment
/// perpendicular, flipped to point the same way as `center - segment.start`.
pub fn circle_segment_contact(
    center: Point,
    radius: f32,
    segment: &Segment,
) -> Result<Option<Contact>, SimError> {
    let length = segment.length();
    let Some(dir) = segment.direction() else {
        return Err(SimError::DegenerateGeometry { length });
    };

    let to_circle = center - segment.start;
    let point = segment.closest_point(center);
    let to_center = center - point;
    let distance = to_center.length();

    if distance > radius {
        return Ok(None);
    }

    let normal = if distance > GEOMETRY_EPSILON {
        to_center / distance
    } else {
        let perpendicular = Point::new(-dir.y, dir.x);
        if perpendicular.dot(to_circle) < 0.0 {
            -perpendicular
        } else {
            perpendicular
        }
    };

    Ok(Some(Contact {
        point,
        normal,
        time: 0.0,
    }))
}

/// Reflects `direction` about `normal`: `R = D - 2(D·N)N`.
///
/// The normal is normalized first and the result is renormalized. Zero-length
/// inputs are passed through without normalization.
pub fn reflect(direction: Point, normal: Point) -> Point {
    let normal = normal.try_normalize().unwrap_or(normal);
    let reflected = direction - 2.0 * direction.dot(normal) * normal;
    reflected.try_normalize().unwrap_or(reflected)
}
