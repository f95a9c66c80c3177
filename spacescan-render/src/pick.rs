//! Ray picking against oriented boxes

use spacescan_core::{Point3f, Pose, Vector3f};

/// A world-space ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3f,
    /// Unit direction
    pub direction: Vector3f,
}

impl Ray {
    /// Ray from `origin` through `through`, `None` if the two coincide
    pub fn between(origin: Point3f, through: Point3f) -> Option<Self> {
        let direction = (through - origin).try_normalize(f32::EPSILON)?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Point3f {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` to the first hit on a box of `size` placed at `pose`.
///
/// The ray is moved into box-local space and tested against the
/// axis-aligned slabs there. A ray starting inside the box hits at 0.
pub fn ray_box_distance(ray: &Ray, pose: &Pose, size: &Vector3f) -> Option<f32> {
    let inverse = pose.inverse();
    let origin = inverse.transform_point(&ray.origin);
    let direction = inverse.transform_vector(&ray.direction);
    let half = size * 0.5;

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, h) = (origin[axis], direction[axis], half[axis]);
        if d.abs() < f32::EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_near = t_near.max(t1.min(t2));
        t_far = t_far.min(t1.max(t2));
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    #[test]
    fn test_hit_axis_aligned() {
        let pose = Pose::new(Point3f::new(0.0, 0.0, -10.0), UnitQuaternion::identity());
        let ray = Ray::between(Point3f::origin(), Point3f::new(0.0, 0.0, -1.0)).unwrap();
        let t = ray_box_distance(&ray, &pose, &Vector3f::new(2.0, 2.0, 2.0)).unwrap();
        assert_relative_eq!(t, 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_miss() {
        let pose = Pose::new(Point3f::new(5.0, 0.0, -10.0), UnitQuaternion::identity());
        let ray = Ray::between(Point3f::origin(), Point3f::new(0.0, 0.0, -1.0)).unwrap();
        assert!(ray_box_distance(&ray, &pose, &Vector3f::new(2.0, 2.0, 2.0)).is_none());
    }

    #[test]
    fn test_behind_origin() {
        let pose = Pose::new(Point3f::new(0.0, 0.0, 10.0), UnitQuaternion::identity());
        let ray = Ray::between(Point3f::origin(), Point3f::new(0.0, 0.0, -1.0)).unwrap();
        assert!(ray_box_distance(&ray, &pose, &Vector3f::new(2.0, 2.0, 2.0)).is_none());
    }

    #[test]
    fn test_rotated_box() {
        // a thin slab rotated 90 degrees about Y blocks a ray along -Z
        let rotation = UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), std::f32::consts::FRAC_PI_2);
        let pose = Pose::new(Point3f::new(0.0, 0.0, -5.0), rotation);
        let ray = Ray::between(Point3f::origin(), Point3f::new(0.0, 0.0, -1.0)).unwrap();
        let t = ray_box_distance(&ray, &pose, &Vector3f::new(0.2, 1.0, 4.0));
        assert!(t.is_some());
        assert_relative_eq!(t.unwrap(), 4.9, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_ray() {
        assert!(Ray::between(Point3f::origin(), Point3f::origin()).is_none());
    }
}
