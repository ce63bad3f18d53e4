//! Ray casting against bounding spheres.
//!
//! Used for pointer hover and click queries: the camera turns a viewport
//! pixel into a `Ray`, and `pick_nearest` returns the closest sphere the ray
//! enters.

use glam::Vec3;

/// A half-line in world space. `dir` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `dir`. Returns `None` for a zero or
    /// non-finite direction.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        if !origin.is_finite() {
            return None;
        }
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Smallest non-negative parameter at which the ray meets the sphere.
    ///
    /// A ray starting inside the sphere hits at the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return None;
        }
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let t_near = -b - root;
        let t_far = -b + root;
        if t_near >= 0.0 {
            Some(t_near)
        } else if t_far >= 0.0 {
            Some(t_far)
        } else {
            None
        }
    }
}

/// A successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit<K> {
    pub key: K,
    /// Ray parameter (distance from the ray origin).
    pub t: f32,
}

/// Return the target with the smallest ray parameter, or `None`.
///
/// Targets are `(key, center, radius)`. Ties keep the earlier target so
/// repeated queries are deterministic.
pub fn pick_nearest<K, I>(ray: &Ray, targets: I) -> Option<PickHit<K>>
where
    I: IntoIterator<Item = (K, Vec3, f32)>,
{
    let mut best: Option<PickHit<K>> = None;
    for (key, center, radius) in targets {
        let t = match ray.intersect_sphere(center, radius) {
            Some(t) => t,
            None => continue,
        };
        let closer = match &best {
            Some(hit) => t < hit.t,
            None => true,
        };
        if closer {
            best = Some(PickHit { key, t });
        }
    }
    best
}
