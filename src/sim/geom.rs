//! Axis-aligned bounding volumes and voxel-grid helpers
//!
//! The beam never does exact capsule/voxel intersection; everything routes
//! through AABBs and stochastic point samples. The only geometry this module
//! needs to get right is:
//! - minimal boxes around swept segments and their unions
//! - mapping sample points to the integer voxel that contains them
//! - enumerating the voxels a box touches (broad-phase bucketing)

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// The integer voxel containing a point (floor on each axis)
#[inline]
pub fn voxel_containing(point: Vec3) -> IVec3 {
    point.floor().as_ivec3()
}

/// An axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two arbitrary corner points (order-independent)
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Grow the box by `amount` on every face
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }

    /// Smallest box containing both `self` and `other`
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Smallest box containing every box in the iterator, or None if empty
    pub fn union_all<I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Aabb>,
    {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }

    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// True for boxes that cannot contribute overlap: non-finite corners or
    /// zero/negative extent on any axis. World collaborators occasionally
    /// hand these back for dying entities; callers treat them as zero overlap.
    pub fn is_degenerate(&self) -> bool {
        !self.min.is_finite() || !self.max.is_finite() || self.max.cmple(self.min).any()
    }

    /// Every voxel whose unit cube this box touches, in x-major order
    ///
    /// Empty for degenerate boxes rather than panicking or spinning over a
    /// bogus range.
    pub fn voxels(&self) -> impl Iterator<Item = IVec3> + use<> {
        let (lo, hi) = if self.is_degenerate() {
            (IVec3::ONE, IVec3::ZERO) // empty ranges
        } else {
            (self.min.floor().as_ivec3(), self.max.floor().as_ivec3())
        };
        (lo.x..=hi.x).flat_map(move |x| {
            (lo.y..=hi.y).flat_map(move |y| (lo.z..=hi.z).map(move |z| IVec3::new(x, y, z)))
        })
    }
}
