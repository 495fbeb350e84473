//! Shading property checks evaluated on rendered frames. Expected colors
//! come from the CPU mirrors of the shader math (atlas lookup, AO table,
//! fog curve), so a probe hit validates the whole decode-shade path.

use brume_render::pipeline::ShadingVariant;
use brume_render::{ao, fog};
use glam::Vec3;

use crate::runner::Frame;
use crate::scenes::{tile_color, Probe, Scene};

/// Per-channel tolerance for probe comparisons. Covers Unorm rounding and
/// interpolation noise, not logic errors.
const CHANNEL_TOLERANCE: i32 = 6;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl CheckOutcome {
    fn pass(name: String, detail: String) -> Self {
        Self {
            name,
            passed: true,
            detail,
        }
    }

    fn fail(name: String, detail: String) -> Self {
        Self {
            name,
            passed: false,
            detail,
        }
    }
}

/// The color the shading core must produce at a probe point.
fn expected_color(probe: &Probe, camera_position: Vec3, variant: ShadingVariant) -> [u8; 4] {
    let [r, g, b] = tile_color(probe.texture_id);
    let lit = Vec3::new(r as f32, g as f32, b as f32) / 255.0 * ao::ao_weight(probe.ao_index);

    let shaded = match variant {
        ShadingVariant::Textured => {
            let factor = fog::fog_factor(camera_position, probe.world);
            fog::composite(lit.extend(1.0), factor)
        }
        ShadingVariant::FaceDebug => lit.extend(1.0),
    };

    // The Unorm target clamps whatever the fog extrapolation produced.
    let clamped = shaded.clamp(glam::Vec4::ZERO, glam::Vec4::ONE);
    [
        (clamped.x * 255.0).round() as u8,
        (clamped.y * 255.0).round() as u8,
        (clamped.z * 255.0).round() as u8,
        (clamped.w * 255.0).round() as u8,
    ]
}

fn within_tolerance(sampled: [u8; 4], expected: [u8; 4]) -> bool {
    sampled
        .iter()
        .zip(expected)
        .all(|(&s, e)| (s as i32 - e as i32).abs() <= CHANNEL_TOLERANCE)
}

/// Perceived brightness of a sampled pixel, for ordering checks.
fn luminance(pixel: [u8; 4]) -> f32 {
    0.2126 * pixel[0] as f32 + 0.7152 * pixel[1] as f32 + 0.0722 * pixel[2] as f32
}

/// Evaluate every probe of a scene against the rendered frame.
pub fn evaluate(scene: &Scene, frame: &Frame, variant: ShadingVariant) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::new();
    let mut samples = Vec::new();

    for probe in &scene.probes {
        let name = format!("{}/{}", scene.name, probe.label);

        let Some((px, py)) = scene
            .camera
            .project_to_pixel(probe.world, frame.width, frame.height)
        else {
            outcomes.push(CheckOutcome::fail(name, "probe off screen".into()));
            continue;
        };

        let sampled = frame.pixel(px, py);
        let expected = expected_color(probe, scene.camera.position, variant);
        samples.push(sampled);

        if within_tolerance(sampled, expected) {
            outcomes.push(CheckOutcome::pass(
                name,
                format!("({px},{py}) = {sampled:?}"),
            ));
        } else {
            outcomes.push(CheckOutcome::fail(
                name,
                format!("({px},{py}) sampled {sampled:?}, expected {expected:?}"),
            ));
        }
    }

    // Ordering properties on top of the per-probe comparisons.
    if samples.len() == scene.probes.len() {
        match (scene.name, variant) {
            ("ao-ladder", _) => {
                outcomes.push(monotonic_check(
                    format!("{}/ao-monotonic", scene.name),
                    &samples,
                    "brighter AO bucket must yield brighter output",
                ));
            }
            ("fog-march", ShadingVariant::Textured) => {
                outcomes.push(monotonic_check(
                    format!("{}/fog-monotonic", scene.name),
                    &samples,
                    "farther walls must blend closer to fog white",
                ));
                // Past twice the fog start the extrapolated factor saturates
                let far = *samples.last().unwrap();
                let name = format!("{}/fog-saturates", scene.name);
                if far[0] >= 250 && far[1] >= 250 && far[2] >= 250 {
                    outcomes.push(CheckOutcome::pass(name, format!("far wall {far:?}")));
                } else {
                    outcomes.push(CheckOutcome::fail(
                        name,
                        format!("far wall {far:?} is not saturated to fog color"),
                    ));
                }
            }
            ("fog-march", ShadingVariant::FaceDebug) => {
                // No fog term: the far wall keeps its tile color
                let near = luminance(samples[0]);
                let far = luminance(*samples.last().unwrap());
                let name = format!("{}/debug-skips-fog", scene.name);
                if (near - far).abs() < 16.0 {
                    outcomes.push(CheckOutcome::pass(
                        name,
                        format!("near {near:.0} vs far {far:.0}"),
                    ));
                } else {
                    outcomes.push(CheckOutcome::fail(
                        name,
                        format!("debug variant fogged: near {near:.0} vs far {far:.0}"),
                    ));
                }
            }
            _ => {}
        }
    }

    outcomes
}

fn monotonic_check(name: String, samples: &[[u8; 4]], message: &str) -> CheckOutcome {
    let values: Vec<f32> = samples.iter().map(|&s| luminance(s)).collect();
    if values.windows(2).all(|w| w[0] < w[1]) {
        CheckOutcome::pass(name, format!("{values:.0?}"))
    } else {
        CheckOutcome::fail(name, format!("{message}: {values:.0?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::scene_by_name;

    #[test]
    fn test_expected_color_applies_ao() {
        let probe = Probe {
            label: "p",
            world: Vec3::ZERO,
            texture_id: 9,
            ao_index: 2,
        };
        // Camera at the probe: fog factor 0, pure AO-attenuated tile color
        let color = expected_color(&probe, Vec3::ZERO, ShadingVariant::Textured);
        let [r, _, _] = tile_color(9);
        assert_eq!(color[0], (r as f32 / 255.0 * 0.5 * 255.0).round() as u8);
        assert_eq!(color[3], 255);
    }

    #[test]
    fn test_expected_color_saturates_past_fog_start() {
        let probe = Probe {
            label: "p",
            world: Vec3::new(0.0, 0.0, -520.0),
            texture_id: 9,
            ao_index: 3,
        };
        let color = expected_color(&probe, Vec3::ZERO, ShadingVariant::Textured);
        assert_eq!(&color[..3], &[255, 255, 255]);
    }

    #[test]
    fn test_debug_variant_expectation_ignores_distance() {
        let near = Probe {
            label: "a",
            world: Vec3::ZERO,
            texture_id: 5,
            ao_index: 3,
        };
        let far = Probe {
            label: "b",
            world: Vec3::new(0.0, 0.0, -1000.0),
            texture_id: 5,
            ao_index: 3,
        };
        assert_eq!(
            expected_color(&near, Vec3::ZERO, ShadingVariant::FaceDebug),
            expected_color(&far, Vec3::ZERO, ShadingVariant::FaceDebug),
        );
    }

    #[test]
    fn test_evaluate_flags_wrong_colors() {
        let scene = scene_by_name("ao-ladder").unwrap();
        // A frame cleared to black: every probe must fail
        let frame = Frame {
            width: 256,
            height: 256,
            pixels: vec![0; 256 * 256 * 4],
        };
        let outcomes = evaluate(&scene, &frame, ShadingVariant::Textured);
        assert!(outcomes.iter().any(|o| !o.passed));
    }
}
