//! Primitive collision shapes and geometric helpers
//!
//! World-space spheres, boxes and capsules plus the closest-point routines
//! the narrow phase is built from.

use crate::foundation::math::{Mat3, Vec3, EPSILON_SQUARED};

/// Alternating projections used for segment/segment and segment/box queries
const CLOSEST_POINT_ITERATIONS: usize = 3;

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Box with arbitrary orientation
///
/// Axis-aligned boxes are represented with the identity basis so both kinds
/// share the same clamping and SAT code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Center in world space
    pub center: Vec3,
    /// Orthonormal basis; columns are the box's local axes
    pub basis: Mat3,
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Create an oriented box
    pub fn new(center: Vec3, basis: Mat3, half_extents: Vec3) -> Self {
        Self {
            center,
            basis,
            half_extents,
        }
    }

    /// Create a box aligned with the world axes
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center, Mat3::identity(), half_extents)
    }

    /// Local axis `index` in world space
    pub fn axis(&self, index: usize) -> Vec3 {
        self.basis.column(index).into_owned()
    }

    /// Express a world point in the box's local frame (relative to its center)
    pub fn to_local(&self, point: &Vec3) -> Vec3 {
        self.basis.transpose() * (point - self.center)
    }

    /// Rotate a local direction back into world space
    pub fn to_world_vector(&self, local: &Vec3) -> Vec3 {
        self.basis * local
    }

    /// Clamp a local point into the box extents
    pub fn clamp_local(&self, local: &Vec3) -> Vec3 {
        Vec3::new(
            local.x.clamp(-self.half_extents.x, self.half_extents.x),
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            local.z.clamp(-self.half_extents.z, self.half_extents.z),
        )
    }

    /// Whether a local point lies inside the box (boundary included)
    pub fn contains_local(&self, local: &Vec3) -> bool {
        local.x.abs() <= self.half_extents.x
            && local.y.abs() <= self.half_extents.y
            && local.z.abs() <= self.half_extents.z
    }

    /// The eight corners in local space
    pub fn local_vertices(&self) -> [Vec3; 8] {
        let h = self.half_extents;
        [
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
        ]
    }

    /// Half length of the box's projection onto a unit axis
    pub fn projected_radius(&self, axis: &Vec3) -> f32 {
        (0..3)
            .map(|i| self.half_extents[i] * self.axis(i).dot(axis).abs())
            .sum()
    }

    /// Radius of the sphere enclosing the box (half the space diagonal)
    pub fn bounding_radius(&self) -> f32 {
        self.half_extents.magnitude()
    }
}

/// Box that always stays aligned with the world axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Center in world space
    pub center: Vec3,
    /// Half size along the world axes
    pub half_extents: Vec3,
}

impl Aabb {
    /// Create an axis-aligned box from center and half extents
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// View this box as an oriented box with the identity basis
    pub fn to_oriented(&self) -> OrientedBox {
        OrientedBox::axis_aligned(self.center, self.half_extents)
    }
}

/// Capsule described by its core segment and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// First endpoint of the core segment
    pub start: Vec3,
    /// Second endpoint of the core segment
    pub end: Vec3,
    /// Radius around the segment
    pub radius: f32,
}

impl Capsule {
    /// Create a capsule from its segment and radius
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Closest point on the core segment to `point`
    pub fn closest_point(&self, point: &Vec3) -> Vec3 {
        closest_point_on_segment(point, &self.start, &self.end)
    }
}

/// Project `point` onto segment `a`-`b`, clamped to the segment
pub fn closest_point_on_segment(point: &Vec3, a: &Vec3, b: &Vec3) -> Vec3 {
    let ab = b - a;
    let length_squared = ab.magnitude_squared();
    if length_squared <= EPSILON_SQUARED {
        return *a;
    }
    let t = ((point - a).dot(&ab) / length_squared).clamp(0.0, 1.0);
    a + ab * t
}

/// Approximate closest points between segments `a0`-`a1` and `b0`-`b1`
///
/// Alternates clamped projections from both starting sides and keeps the
/// closer pair, so swapping the segments yields the same (mirrored) pair.
pub fn closest_points_between_segments(a0: &Vec3, a1: &Vec3, b0: &Vec3, b1: &Vec3) -> (Vec3, Vec3) {
    let (pa, pb) = iterate_segment_pair(a0, a1, b0, b1);
    let (qb, qa) = iterate_segment_pair(b0, b1, a0, a1);

    if (qa - qb).magnitude_squared() < (pa - pb).magnitude_squared() {
        (qa, qb)
    } else {
        (pa, pb)
    }
}

fn iterate_segment_pair(a0: &Vec3, a1: &Vec3, b0: &Vec3, b1: &Vec3) -> (Vec3, Vec3) {
    let b_mid = (b0 + b1) * 0.5;
    let mut on_a = closest_point_on_segment(&b_mid, a0, a1);
    let mut on_b = closest_point_on_segment(&on_a, b0, b1);

    for _ in 0..CLOSEST_POINT_ITERATIONS {
        on_a = closest_point_on_segment(&on_b, a0, a1);
        on_b = closest_point_on_segment(&on_a, b0, b1);
    }

    (on_a, on_b)
}

/// Approximate closest points between a box and a segment given in the
/// box's local frame; returns `(point_in_box, point_on_segment)` in local space
pub fn closest_points_box_segment(bx: &OrientedBox, p0: &Vec3, p1: &Vec3) -> (Vec3, Vec3) {
    let mut on_segment = closest_point_on_segment(&Vec3::zeros(), p0, p1);
    let mut in_box = bx.clamp_local(&on_segment);

    for _ in 0..CLOSEST_POINT_ITERATIONS {
        on_segment = closest_point_on_segment(&in_box, p0, p1);
        in_box = bx.clamp_local(&on_segment);
    }

    (in_box, on_segment)
}
