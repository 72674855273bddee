// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{deg_to_rad, Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// Pinhole camera on a sphere around the origin, looking at the origin with
/// +z as the up direction. Square image plane of `resolution` pixels a side.
pub struct OrbitCamera {
    position: Vector3f,
    camera_to_world: Transform,
    fov_deg: Float,
    focal: Float,
    resolution: usize,
}

impl OrbitCamera {
    pub fn new(theta_deg: Float,
               phi_deg: Float,
               radius: Float,
               fov_deg: Float,
               resolution: usize) -> Self {
        let theta = deg_to_rad(theta_deg);
        let phi = deg_to_rad(phi_deg);
        let position = Vector3f::new(radius * theta.cos() * phi.sin(),
                                     radius * theta.sin() * phi.sin(),
                                     radius * phi.cos());
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let camera_to_world = Transform::look_at(position, Vector3f::zeros(), up).inverse();

        Self {
            position,
            camera_to_world,
            fov_deg,
            focal: 1.0 / deg_to_rad(0.5 * fov_deg).tan(),
            resolution,
        }
    }

    pub fn position(&self) -> Vector3f {
        self.position
    }

    pub fn camera_to_world(&self) -> &Transform {
        &self.camera_to_world
    }

    pub fn fov_deg(&self) -> Float {
        self.fov_deg
    }

    /// Focal length in pixels, identical on both axes.
    pub fn focal_length_px(&self) -> Float {
        self.focal * self.resolution as Float / 2.0
    }

    /// Unnormalized world-space direction through pixel `(i, j)`.
    pub fn pixel_direction(&self, i: usize, j: usize) -> Vector3f {
        let half = self.resolution as Float / 2.0;
        let p_camera = Vector3f::new(i as Float / half - 1.0,
                                     j as Float / half - 1.0,
                                     -self.focal);
        self.camera_to_world.apply_point(p_camera) - self.position
    }

    /// Every pixel direction, row-major.
    pub fn ray_directions(&self) -> Vec<Vector3f> {
        let res = self.resolution;
        let mut dirs = Vec::with_capacity(res * res);
        for j in 0..res {
            for i in 0..res {
                dirs.push(self.pixel_direction(i, j));
            }
        }
        dirs
    }
}

impl Sensor for OrbitCamera {
    fn pixel_ray(&self, i: usize, j: usize) -> Ray3f {
        Ray3f::new(self.position, self.pixel_direction(i, j))
    }

    fn resolution(&self) -> usize {
        self.resolution
    }

    fn describe(&self) -> String {
        format!("OrbitCamera\n  position: [{:.4}, {:.4}, {:.4}]\n  fov: {} deg\n  resolution: {}",
                self.position.x, self.position.y, self.position.z,
                self.fov_deg, self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Matrix4f;
    use nalgebra::{Rotation3, Vector3};

    #[test]
    fn test_orbit_position() {
        let cam = OrbitCamera::new(0.0, 90.0, 6.0, 45.0, 8);
        assert!((cam.position() - Vector3f::new(6.0, 0.0, 0.0)).norm() < 1e-12);

        let cam = OrbitCamera::new(90.0, 90.0, 6.0, 45.0, 8);
        assert!((cam.position() - Vector3f::new(0.0, 6.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_center_pixel_looks_at_origin() {
        let cam = OrbitCamera::new(30.0, 90.0, 6.0, 45.0, 16);
        let ray = cam.pixel_ray(8, 8);
        let to_origin = (-cam.position()).normalize();
        assert!((ray.dir() - to_origin).norm() < 1e-12);
        assert!((ray.at(6.0)).norm() < 1e-9);
    }

    #[test]
    fn test_corner_ray_angle_matches_fov() {
        let cam = OrbitCamera::new(0.0, 90.0, 6.0, 90.0, 16);
        // With a 90 degree field of view, f = 1 and the left edge ray sits
        // 45 degrees off the optical axis.
        let edge = cam.pixel_direction(0, 8).normalize();
        let axis = (-cam.position()).normalize();
        assert!((edge.dot(&axis) - (0.5 as Float).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_focal_length_px() {
        let cam = OrbitCamera::new(0.0, 90.0, 6.0, 45.0, 1024);
        let f = 1.0 / (22.5 as Float).to_radians().tan();
        assert!((cam.focal_length_px() - f * 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_frames_differ_by_rotation_about_up() {
        let base = OrbitCamera::new(0.0, 90.0, 6.0, 45.0, 4);
        for theta in [90.0, 180.0, 270.0].iter() {
            let cam = OrbitCamera::new(*theta, 90.0, 6.0, 45.0, 4);
            let rot: Matrix4f = Rotation3::from_axis_angle(&Vector3::z_axis(), theta.to_radians()).to_homogeneous();
            let expected = rot * base.camera_to_world().matrix();
            assert!((expected - cam.camera_to_world().matrix()).norm() < 1e-9);
        }
    }

    #[test]
    fn test_ray_directions_layout() {
        let cam = OrbitCamera::new(45.0, 90.0, 6.0, 45.0, 5);
        let dirs = cam.ray_directions();
        assert_eq!(dirs.len(), 25);
        assert_eq!(dirs[3 + 5 * 2], cam.pixel_direction(3, 2));
        for j in 0..5 {
            for i in 0..5 {
                let ray = Ray3f::new(cam.position(), dirs[i + 5 * j]);
                assert_eq!(ray, cam.pixel_ray(i, j));
            }
        }
    }
}
