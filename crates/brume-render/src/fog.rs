//! Distance fog compositing. The factor follows a quintic ease-in: fog is
//! imperceptible until roughly 70% of the fog-start distance, then ramps
//! steeply. It is deliberately NOT clamped to [0,1]; fragments past
//! FOG_START over-blend toward pure fog color. That over-blend is part of
//! the look, not something to clamp away.

use glam::{Vec2, Vec3, Vec4};

/// Planar distance at which the fog factor reaches exactly 1.
pub const FOG_START: f32 = 260.0;

/// Ease-in exponent of the fog curve.
pub const FOG_EXPONENT: i32 = 5;

/// Opaque fog color, matching the renderer's white clear color.
pub const FOG_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// CPU mirror of the fragment stage's fog term. Distance is planar (XZ);
/// height never contributes.
pub fn fog_factor(camera_position: Vec3, world_position: Vec3) -> f32 {
    let camera = Vec2::new(camera_position.x, camera_position.z);
    let fragment = Vec2::new(world_position.x, world_position.z);
    (camera.distance(fragment) / FOG_START).powi(FOG_EXPONENT)
}

/// Blend a shaded color toward the fog color. `Vec4::lerp` extrapolates
/// for factors beyond 1, exactly like the shader's `mix`.
pub fn composite(shaded: Vec4, factor: f32) -> Vec4 {
    shaded.lerp(FOG_COLOR, factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn test_zero_at_camera() {
        let camera = vec3(12.0, 40.0, -3.0);
        assert_eq!(fog_factor(camera, camera), 0.0);
    }

    #[test]
    fn test_one_at_fog_start() {
        let factor = fog_factor(Vec3::ZERO, vec3(FOG_START, 0.0, 0.0));
        assert!((factor - 1.0).abs() < 1e-6, "got {factor}");
    }

    #[test]
    fn test_thirty_two_at_double_fog_start() {
        // (2)^5 = 32, unclamped
        let factor = fog_factor(Vec3::ZERO, vec3(2.0 * FOG_START, 0.0, 0.0));
        assert!((factor - 32.0).abs() < 1e-4, "got {factor}");
    }

    #[test]
    fn test_strictly_increasing_with_distance() {
        let mut previous = -1.0;
        for step in 1..20 {
            let d = step as f32 * 30.0;
            let factor = fog_factor(Vec3::ZERO, vec3(d, 0.0, 0.0));
            assert!(factor > previous, "not increasing at distance {d}");
            previous = factor;
        }
    }

    #[test]
    fn test_height_is_ignored() {
        let near = fog_factor(Vec3::ZERO, vec3(100.0, 0.0, 0.0));
        let high = fog_factor(Vec3::ZERO, vec3(100.0, 500.0, 0.0));
        assert_eq!(near, high);
    }

    #[test]
    fn test_imperceptible_below_seventy_percent() {
        let factor = fog_factor(Vec3::ZERO, vec3(0.7 * FOG_START, 0.0, 0.0));
        assert!(factor < 0.17, "got {factor}");
    }

    #[test]
    fn test_composite_overblends_past_fog_color() {
        let shaded = Vec4::new(0.2, 0.2, 0.2, 1.0);
        let blended = composite(shaded, 2.0);
        // Extrapolation overshoots white
        assert!(blended.x > 1.0);
    }

    #[test]
    fn test_composite_endpoints() {
        let shaded = Vec4::new(0.3, 0.4, 0.5, 1.0);
        assert_eq!(composite(shaded, 0.0), shaded);
        assert_eq!(composite(shaded, 1.0), FOG_COLOR);
    }
}
