//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Vec3` inputs, making them straightforward to
//! unit-test.

use std::f32::consts::PI;

use bevy::prelude::{Quat, Vec2, Vec3};

/// The golden angle `π(3 − √5)` in radians (~137.5°).
///
/// # Examples
/// ```
/// # use rose_day::math::GOLDEN_ANGLE;
/// let expected = std::f64::consts::PI * (3.0 - 5f64.sqrt());
/// assert!((GOLDEN_ANGLE - expected).abs() < 1e-12);
/// ```
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Linearly maps `value` from `[in_min, in_max]` into `[out_min, out_max]`,
/// clamping to the output range.
///
/// Works for inverted output ranges (`out_min > out_max`).
///
/// # Examples
/// ```
/// # use rose_day::math::map_clamped;
/// assert_eq!(map_clamped(-300.0, -300.0, 300.0, 20.0, -20.0), 20.0);
/// assert_eq!(map_clamped(0.0, -300.0, 300.0, 20.0, -20.0), 0.0);
/// assert_eq!(map_clamped(900.0, -300.0, 300.0, 20.0, -20.0), -20.0);
/// ```
pub fn map_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
    out_min + t * (out_max - out_min)
}

/// Cubic ease-out curve: fast start, gentle deceleration.
///
/// `t` should be in `[0, 1]`. Returns `1 - (1 - t)^3`.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Symmetric sine ease-in-out. `t` is clamped to `[0, 1]`.
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    -((PI * t).cos() - 1.0) / 2.0
}

/// Samples a looping keyframe track at time `t` (seconds).
///
/// Keyframes are spaced evenly over `period`; each segment is eased with
/// [`ease_in_out_sine`]. A track with a single value is constant.
pub fn keyframe_loop(values: &[f32], t: f32, period: f32) -> f32 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (values.len() - 1) as f32;
            let progress = (t / period).rem_euclid(1.0) * segments;
            let idx = (progress.floor() as usize).min(values.len() - 2);
            let local = ease_in_out_sine(progress - idx as f32);
            values[idx] + (values[idx + 1] - values[idx]) * local
        }
    }
}

/// Computes the face normal of a triangle defined by three vertices.
///
/// Uses the cross product of edges `(v1 - v0)` and `(v2 - v0)`.
/// Returns `Vec3::ZERO` if the triangle is degenerate (collinear points).
pub fn compute_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

/// Straight piece between two points, for stretching a unit mesh along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Center of the piece.
    pub midpoint: Vec3,
    /// Rotation taking the mesh's long `axis` onto the piece direction.
    pub rotation: Quat,
    /// Distance between the endpoints.
    pub length: f32,
}

/// Computes the [`Segment`] from `from` to `to` for a mesh aligned with `axis`.
pub fn segment_between(from: Vec3, to: Vec3, axis: Vec3) -> Segment {
    let diff = to - from;
    let length = diff.length();
    let direction = diff.normalize_or(axis);
    Segment {
        midpoint: (from + to) / 2.0,
        rotation: Quat::from_rotation_arc(axis, direction),
        length,
    }
}

/// Clamps a polar angle so an orbiting camera stays within `[margin, max]`.
///
/// `current` is the existing polar angle measured from the +Y pole,
/// `delta` the desired change. Returns the *effective* delta.
pub fn clamp_polar(current: f32, delta: f32, margin: f32, max: f32) -> f32 {
    let clamped = (current + delta).clamp(margin, max);
    clamped - current
}

/// Position/velocity pair integrated by [`step_spring`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    /// Current value.
    pub value: f32,
    /// Current rate of change per second.
    pub velocity: f32,
}

/// Largest integration step used by [`step_spring`]; longer frames are split.
const SPRING_MAX_STEP: f32 = 1.0 / 120.0;

/// Advances a unit-mass damped spring towards `target` by `dt` seconds.
///
/// Semi-implicit Euler, sub-stepped so long frames stay stable.
pub fn step_spring(
    mut state: SpringState,
    target: f32,
    stiffness: f32,
    damping: f32,
    dt: f32,
) -> SpringState {
    let mut remaining = dt.max(0.0);
    while remaining > 0.0 {
        let h = remaining.min(SPRING_MAX_STEP);
        let accel = -stiffness * (state.value - target) - damping * state.velocity;
        state.velocity += accel * h;
        state.value += state.velocity * h;
        remaining -= h;
    }
    state
}

/// Samples a uniform Catmull-Rom spline through `points`.
///
/// The curve passes through every control point; endpoints are duplicated to
/// supply the missing neighbours. Returns `segments + 1` positions evenly
/// spaced in parameter, so every span gets the same number of samples
/// whatever its length.
///
/// This is the uniform variant (α = 0), not the centripetal one (α = 0.5)
/// that three.js `CatmullRomCurve3` uses by default, and samples are not
/// re-spaced by arc length. With unevenly spaced control points the curve
/// bulges a little more near the short spans and its samples bunch up there.
pub fn catmull_rom(points: &[Vec3], segments: usize) -> Vec<Vec3> {
    match points {
        [] => Vec::new(),
        [only] => vec![*only; segments + 1],
        _ => {
            let spans = points.len() - 1;
            (0..=segments)
                .map(|s| {
                    let u = s as f32 / segments as f32 * spans as f32;
                    let i = (u.floor() as usize).min(spans - 1);
                    let t = u - i as f32;
                    let p0 = points[i.saturating_sub(1)];
                    let p1 = points[i];
                    let p2 = points[i + 1];
                    let p3 = points[(i + 2).min(spans)];
                    catmull_rom_segment(p0, p1, p2, p3, t)
                })
                .collect()
        }
    }
}

fn catmull_rom_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Evaluates a cubic Bézier curve at `t`.
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Evaluates a quadratic Bézier curve at `t`.
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── golden angle ────────────────────────────────────────────────

    #[test]
    fn golden_angle_matches_closed_form() {
        let expected = std::f64::consts::PI * (3.0 - 5f64.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-12);
    }

    #[test]
    fn golden_angle_is_about_137_5_degrees() {
        assert!((GOLDEN_ANGLE.to_degrees() - 137.507_764).abs() < 1e-4);
    }

    // ── map_clamped ─────────────────────────────────────────────────

    #[test]
    fn map_endpoints() {
        assert_eq!(map_clamped(0.0, 0.0, 10.0, 5.0, 15.0), 5.0);
        assert_eq!(map_clamped(10.0, 0.0, 10.0, 5.0, 15.0), 15.0);
    }

    #[test]
    fn map_clamps_outside_input_range() {
        assert_eq!(map_clamped(-50.0, 0.0, 10.0, 5.0, 15.0), 5.0);
        assert_eq!(map_clamped(50.0, 0.0, 10.0, 5.0, 15.0), 15.0);
    }

    #[test]
    fn map_inverted_output() {
        let r = map_clamped(150.0, -300.0, 300.0, 20.0, -20.0);
        assert!((r - (-10.0)).abs() < 1e-5);
    }

    // ── easing ──────────────────────────────────────────────────────

    #[test]
    fn ease_out_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert!(ease_in_out_sine(0.0).abs() < 1e-6);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-6);
        let a = ease_in_out_sine(0.25);
        let b = ease_in_out_sine(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_in_out_is_monotonic() {
        let steps: Vec<f32> = (0..=100).map(|i| ease_in_out_sine(i as f32 / 100.0)).collect();
        for w in steps.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    // ── keyframe_loop ───────────────────────────────────────────────

    #[test]
    fn keyframes_hit_each_value_on_schedule() {
        let track = [0.0, 2.0, 0.0, -2.0, 0.0];
        // Four segments over six seconds: 1.5 s per segment.
        assert!(keyframe_loop(&track, 0.0, 6.0).abs() < 1e-5);
        assert!((keyframe_loop(&track, 1.5, 6.0) - 2.0).abs() < 1e-4);
        assert!(keyframe_loop(&track, 3.0, 6.0).abs() < 1e-4);
        assert!((keyframe_loop(&track, 4.5, 6.0) + 2.0).abs() < 1e-4);
    }

    #[test]
    fn keyframes_repeat() {
        let track = [0.0, -10.0, 0.0];
        let a = keyframe_loop(&track, 1.2, 6.0);
        let b = keyframe_loop(&track, 7.2, 6.0);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn single_keyframe_is_constant() {
        assert_eq!(keyframe_loop(&[3.0], 42.0, 6.0), 3.0);
        assert_eq!(keyframe_loop(&[], 42.0, 6.0), 0.0);
    }

    // ── compute_normal ──────────────────────────────────────────────

    #[test]
    fn normal_of_xy_plane_triangle() {
        let n = compute_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn degenerate_triangle_returns_zero() {
        let n = compute_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(n, Vec3::ZERO);
    }

    // ── segment_between ─────────────────────────────────────────────

    #[test]
    fn segment_maps_axis_onto_direction() {
        let seg = segment_between(Vec3::ZERO, Vec3::new(0.0, -2.0, 0.0), Vec3::Y);
        assert!((seg.length - 2.0).abs() < 1e-6);
        assert!((seg.midpoint - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
        assert!((seg.rotation * Vec3::Y - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn zero_length_segment_keeps_axis() {
        let seg = segment_between(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(seg.length, 0.0);
        assert!((seg.rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
    }

    // ── clamp_polar ─────────────────────────────────────────────────

    #[test]
    fn small_polar_delta_passes_through() {
        let delta = clamp_polar(1.0, 0.1, 0.05, 2.6);
        assert!((delta - 0.1).abs() < 1e-6);
    }

    #[test]
    fn polar_clamps_at_both_ends() {
        assert!((clamp_polar(2.55, 0.2, 0.05, 2.6) - 0.05).abs() < 1e-5);
        assert!((clamp_polar(0.1, -0.2, 0.05, 2.6) + 0.05).abs() < 1e-5);
    }

    // ── step_spring ─────────────────────────────────────────────────

    #[test]
    fn spring_converges_to_target() {
        let mut s = SpringState::default();
        for _ in 0..300 {
            s = step_spring(s, 20.0, 100.0, 20.0, 1.0 / 60.0);
        }
        assert!((s.value - 20.0).abs() < 1e-2, "got {}", s.value);
        assert!(s.velocity.abs() < 1e-2);
    }

    #[test]
    fn heavier_spring_lags_behind() {
        let mut quick = SpringState::default();
        let mut lagged = SpringState::default();
        for _ in 0..10 {
            quick = step_spring(quick, 25.0, 100.0, 20.0, 1.0 / 60.0);
            lagged = step_spring(lagged, 25.0, 80.0, 30.0, 1.0 / 60.0);
        }
        assert!(quick.value > lagged.value);
    }

    #[test]
    fn long_frame_is_stable() {
        let s = step_spring(SpringState::default(), 10.0, 100.0, 20.0, 2.0);
        assert!(s.value.is_finite());
        assert!((s.value - 10.0).abs() < 0.5);
    }

    #[test]
    fn zero_dt_is_identity() {
        let s = SpringState {
            value: 3.0,
            velocity: -1.0,
        };
        assert_eq!(step_spring(s, 10.0, 100.0, 20.0, 0.0), s);
    }

    // ── curves ──────────────────────────────────────────────────────

    #[test]
    fn catmull_rom_passes_through_control_points() {
        let pts = [
            Vec3::ZERO,
            Vec3::new(0.01, -2.0, 0.01),
            Vec3::new(-0.02, -4.0, -0.01),
            Vec3::new(0.01, -6.5, 0.01),
        ];
        let samples = catmull_rom(&pts, 30);
        assert_eq!(samples.len(), 31);
        // 30 samples over 3 spans: every 10th sample is a control point.
        for (k, p) in pts.iter().enumerate() {
            assert!((samples[k * 10] - *p).length() < 1e-5, "point {k}");
        }
    }

    #[test]
    fn catmull_rom_spaces_samples_by_parameter() {
        // one short span and one long span get the same sample count
        let pts = [Vec3::ZERO, Vec3::X, Vec3::X * 10.0];
        let samples = catmull_rom(&pts, 4);
        assert_eq!(samples.len(), 5);
        assert!((samples[2] - Vec3::X).length() < 1e-6);
        let short = samples[1].distance(samples[0]) + samples[2].distance(samples[1]);
        let long = samples[3].distance(samples[2]) + samples[4].distance(samples[3]);
        assert!(long > short * 5.0);
    }

    #[test]
    fn catmull_rom_degenerate_inputs() {
        assert!(catmull_rom(&[], 8).is_empty());
        assert_eq!(catmull_rom(&[Vec3::ONE], 2), vec![Vec3::ONE; 3]);
    }

    #[test]
    fn bezier_endpoints() {
        let (a, b, c, d) = (
            Vec2::ZERO,
            Vec2::new(15.0, -40.0),
            Vec2::new(55.0, -90.0),
            Vec2::new(0.0, -160.0),
        );
        assert_eq!(cubic_bezier(a, b, c, d, 0.0), a);
        assert!((cubic_bezier(a, b, c, d, 1.0) - d).length() < 1e-4);
        assert_eq!(quadratic_bezier(a, b, d, 0.0), a);
        assert!((quadratic_bezier(a, b, d, 1.0) - d).length() < 1e-4);
    }

    #[test]
    fn quadratic_midpoint() {
        let m = quadratic_bezier(Vec2::ZERO, Vec2::new(-10.0, 150.0), Vec2::new(-5.0, 300.0), 0.5);
        assert!((m - Vec2::new(-6.25, 150.0)).length() < 1e-4);
    }
}
