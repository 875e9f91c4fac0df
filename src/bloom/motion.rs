//! Per-frame idle motion as pure functions of elapsed time.
//!
//! Nothing here mutates stored placements; systems layer the result on top
//! of the spawn-time transform every frame.

use bevy::prelude::*;

use super::MotionSettings;

/// Transient offset applied to the whole rose.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BobOffset {
    /// Vertical displacement.
    pub y: f32,
    /// Roll around Z (radians).
    pub roll: f32,
    /// Float wobble around X (radians).
    pub pitch: f32,
    /// Float wobble around Y (radians).
    pub yaw: f32,
}

impl BobOffset {
    /// Rotation combining wobble and roll.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, self.roll)
    }
}

impl MotionSettings {
    /// Roll of a petal at time `t`: its stored roll plus a layer-scaled sway.
    ///
    /// Layer 0 petals never move.
    pub fn petal_roll(&self, base_roll: f32, t: f32, phase: f32, layer: u8) -> f32 {
        let amount = self.sway_per_layer * f32::from(layer);
        base_roll + (t * self.sway_speed + phase).sin() * amount
    }

    /// Bob, rock and float wobble of the whole rose at time `t`.
    ///
    /// The float term runs on a slower clock (`t / 4 · float_speed`) and
    /// layers a small hover and tilt on top of the bob.
    pub fn bob(&self, t: f32) -> BobOffset {
        let f = t / 4.0 * self.float_speed;
        BobOffset {
            y: (t * self.bob_speed).sin() * self.bob_height
                + f.sin() / 10.0 * self.float_height,
            roll: (t * self.rock_speed).sin() * self.rock_angle
                + f.sin() / 20.0 * self.float_rotation,
            pitch: f.cos() / 8.0 * self.float_rotation,
            yaw: f.sin() / 8.0 * self.float_rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bloom::BloomConfig;

    fn settings() -> MotionSettings {
        BloomConfig::default().motion
    }

    #[test]
    fn center_layer_does_not_sway() {
        let m = settings();
        for t in [0.0, 1.0, 5.5, 100.0] {
            assert_eq!(m.petal_roll(0.25, t, 1.0, 0), 0.25);
        }
    }

    #[test]
    fn sway_is_bounded_by_layer_amount() {
        let m = settings();
        for layer in 1..=5u8 {
            let bound = 0.008 * f32::from(layer) + 1e-6;
            for i in 0..200 {
                let roll = m.petal_roll(0.0, i as f32 * 0.1, 0.7, layer);
                assert!(roll.abs() <= bound);
            }
        }
    }

    #[test]
    fn sway_depends_only_on_time() {
        let m = settings();
        let a = m.petal_roll(0.1, 3.0, 2.0, 4);
        let b = m.petal_roll(0.1, 3.0, 2.0, 4);
        assert_eq!(a, b);
        assert_eq!(m.petal_roll(0.1, 0.0, 0.0, 4), 0.1);
    }

    fn without_float(m: MotionSettings) -> MotionSettings {
        MotionSettings {
            float_height: 0.0,
            float_rotation: 0.0,
            ..m
        }
    }

    #[test]
    fn bob_starts_level_with_a_forward_tilt() {
        let b = settings().bob(0.0);
        assert_eq!(b.y, 0.0);
        assert_eq!(b.roll, 0.0);
        assert_eq!(b.yaw, 0.0);
        assert!((b.pitch - 0.15 / 8.0).abs() < 1e-6);
    }

    #[test]
    fn bob_stays_small() {
        let m = settings();
        for i in 0..400 {
            let b = m.bob(i as f32 * 0.05);
            assert!(b.y.abs() <= 0.06 + 0.025 + 1e-6);
            assert!(b.roll.abs() <= 0.015 + 0.0075 + 1e-6);
            assert!(b.pitch.abs() <= 0.15 / 8.0 + 1e-6);
            assert!(b.yaw.abs() <= 0.15 / 8.0 + 1e-6);
        }
    }

    #[test]
    fn bob_peaks_at_quarter_period() {
        let m = without_float(settings());
        let t = std::f32::consts::FRAC_PI_2 / 0.35;
        assert!((m.bob(t).y - 0.06).abs() < 1e-5);
    }

    #[test]
    fn float_wobble_follows_its_slower_clock() {
        let m = MotionSettings {
            bob_height: 0.0,
            rock_angle: 0.0,
            ..settings()
        };
        // quarter turn of the float clock: t / 4 · 1.2 = π/2
        let t = std::f32::consts::FRAC_PI_2 * 4.0 / 1.2;
        let b = m.bob(t);
        assert!((b.y - 0.025).abs() < 1e-6);
        assert!((b.yaw - 0.15 / 8.0).abs() < 1e-6);
        assert!(b.pitch.abs() < 1e-6);
    }
}
