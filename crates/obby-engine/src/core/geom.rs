//! Axis-aligned boxes and the local shapes they are derived from.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    #[inline]
    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing both points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Overlap on all three axes. Touching faces count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    #[inline]
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Copy with the bottom face pushed down by `amount`.
    #[inline]
    pub fn extended_down(&self, amount: f32) -> Aabb {
        Aabb {
            min: Vec3::new(self.min.x, self.min.y - amount, self.min.z),
            max: self.max,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Ray/box intersection (slab method).
    /// `dir` need not be normalized; the returned `t` is in units of `dir`.
    /// Returns the entry distance, or `None` when the ray misses or the box
    /// lies entirely behind the origin or beyond `max_t`.
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3, max_t: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_t;

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let o = axis.get(origin);
            let d = axis.get(dir);
            let lo = axis.get(self.min);
            let hi = axis.get(self.max);

            if d.abs() < 1e-8 {
                // Parallel to this slab: origin must already be inside it
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Local-space bounds of an entity relative to its position.
/// `volume_at` turns it into a world-space [`Aabb`] each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoxShape {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on the entity's position.
    pub fn centered(half_extents: Vec3) -> Self {
        Self {
            min: -half_extents,
            max: half_extents,
        }
    }

    /// Centred box of the given full size (width, height, depth).
    pub fn from_size(size: Vec3) -> Self {
        Self::centered(size * 0.5)
    }

    /// Box whose bottom face sits at the entity's position.
    pub fn feet(half_width: f32, height: f32, half_depth: f32) -> Self {
        Self {
            min: Vec3::new(-half_width, 0.0, -half_depth),
            max: Vec3::new(half_width, height, half_depth),
        }
    }

    #[inline]
    pub fn volume_at(&self, position: Vec3) -> Aabb {
        Aabb {
            min: position + self.min,
            max: position + self.max,
        }
    }

    /// Distance from the entity's origin down to its bottom face.
    #[inline]
    pub fn bottom_offset(&self) -> f32 {
        self.min.y
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_faces_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn separated_on_one_axis_does_not_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(0.0, 0.0, 1.5), Vec3::new(1.0, 1.0, 2.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn feet_shape_puts_bottom_at_position() {
        let shape = BoxShape::feet(0.5, 2.0, 0.5);
        let v = shape.volume_at(Vec3::new(3.0, 1.0, -2.0));
        assert_eq!(v.bottom(), 1.0);
        assert_eq!(v.top(), 3.0);
        assert_eq!(v.center().x, 3.0);
    }

    #[test]
    fn centered_shape_is_symmetric() {
        let shape = BoxShape::centered(Vec3::new(0.5, 1.25, 0.5));
        let v = shape.volume_at(Vec3::new(0.0, 1.25, 0.0));
        assert_eq!(v.bottom(), 0.0);
        assert_eq!(v.top(), 2.5);
        assert_eq!(shape.bottom_offset(), -1.25);
    }

    #[test]
    fn extended_down_only_moves_bottom() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE).extended_down(0.25);
        assert_eq!(a.min.y, -0.25);
        assert_eq!(a.max, Vec3::ONE);
        assert_eq!(a.min.x, 0.0);
    }

    #[test]
    fn ray_hits_box_ahead() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, -6.0), Vec3::new(1.0, 2.0, -4.0));
        let t = b.ray_hit(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0), 100.0);
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_box_behind_or_above() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, 4.0), Vec3::new(1.0, 2.0, 6.0));
        assert!(b.ray_hit(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0), 100.0).is_none());
        assert!(b.ray_hit(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 0.0, 1.0), 100.0).is_none());
    }

    #[test]
    fn ray_respects_max_distance() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, -30.0), Vec3::new(1.0, 2.0, -28.0));
        assert!(b.ray_hit(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0), 20.0).is_none());
    }

    #[test]
    fn axis_get_set_roundtrip() {
        let mut v = Vec3::ZERO;
        Axis::Z.set(&mut v, 4.0);
        assert_eq!(Axis::Z.get(v), 4.0);
        assert_eq!(v.x, 0.0);
    }
}
