//! Per-point deformation functions for each [`PartKind`].
//!
//! Coordinates are normalized: `n_x` runs edge to edge in `[-1, 1]`, `n_y`
//! runs base to tip in `[0, 1]`. The constants are visually tuned and kept
//! as-is.

use std::f32::consts::PI;

use super::PartKind;

/// Result of deforming one grid point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
    /// Multiplier applied to the point's original x.
    pub width_factor: f32,
    /// New depth of the point.
    pub z: f32,
}

/// Dispatches to the deformation for `part`. `layer` only affects petals.
pub fn displace(part: PartKind, layer: u8, n_x: f32, n_y: f32) -> Displacement {
    match part {
        PartKind::Petal => Displacement {
            width_factor: petal_taper(n_y),
            z: petal_cup(n_x, n_y, layer) + petal_tip_curl(n_y, layer) + petal_wave(n_x, n_y, layer),
        },
        PartKind::Sepal => Displacement {
            width_factor: sepal_width(n_y),
            z: sepal_curve(n_y),
        },
        PartKind::Leaflet => Displacement {
            width_factor: leaflet_width(n_y),
            z: leaflet_curve(n_y),
        },
    }
}

// ── Petal ───────────────────────────────────────────────────────────

/// Narrow base, wide middle, slightly pointed tip.
pub fn petal_taper(n_y: f32) -> f32 {
    let shape = (n_y.powf(0.6) * PI).sin() * (1.0 + n_y * 0.1);
    let base_narrow = n_y.powf(0.4);
    shape * base_narrow
}

/// Cupping toward the edges; inner layers cup deeper, relaxing toward the tip.
pub fn petal_cup(n_x: f32, n_y: f32, layer: u8) -> f32 {
    let depth = 0.4 - f32::from(layer) * 0.05;
    n_x.abs().powf(1.5) * depth * (1.0 - n_y * 0.3)
}

/// Downward tip curl, only for layers above 2.
pub fn petal_tip_curl(n_y: f32, layer: u8) -> f32 {
    if layer > 2 {
        n_y.powf(2.5) * -0.5 * (f32::from(layer) / 5.0)
    } else {
        0.0
    }
}

/// Edge ripple; outer layers are wavier.
pub fn petal_wave(n_x: f32, n_y: f32, layer: u8) -> f32 {
    let strength = 0.02 + f32::from(layer) * 0.01;
    (n_x * PI * 3.0).sin() * strength * n_y
}

// ── Sepal ───────────────────────────────────────────────────────────

/// Long pointed outline.
pub fn sepal_width(n_y: f32) -> f32 {
    (1.0 - n_y) * (n_y * PI * 0.8).sin()
}

/// Curves downward and outward.
pub fn sepal_curve(n_y: f32) -> f32 {
    -n_y.powf(1.5) * 0.6
}

// ── Leaflet ─────────────────────────────────────────────────────────

/// Ovate outline with a serrated ripple.
pub fn leaflet_width(n_y: f32) -> f32 {
    let shape = (n_y * PI).sin();
    let serration = 1.0 + (n_y * PI * 6.0).sin() * 0.12;
    shape * serration
}

/// Slight concave curve.
pub fn leaflet_curve(n_y: f32) -> f32 {
    -n_y * 0.08
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f32; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

    // ── cupping ─────────────────────────────────────────────────────

    #[test]
    fn inner_layers_cup_at_least_as_deep() {
        for a in 0..=5u8 {
            for b in (a + 1)..=5u8 {
                for &n_y in &SAMPLES {
                    assert!(
                        petal_cup(1.0, n_y, a) >= petal_cup(1.0, n_y, b),
                        "layer {a} vs {b} at nY={n_y}"
                    );
                }
            }
        }
    }

    #[test]
    fn cup_is_zero_on_midrib() {
        for layer in 0..=5 {
            assert_eq!(petal_cup(0.0, 0.5, layer), 0.0);
        }
    }

    #[test]
    fn cup_relaxes_toward_tip() {
        assert!(petal_cup(1.0, 1.0, 0) < petal_cup(1.0, 0.0, 0));
        assert!((petal_cup(1.0, 0.0, 0) - 0.4).abs() < 1e-6);
        assert!((petal_cup(-1.0, 1.0, 0) - 0.28).abs() < 1e-6);
    }

    // ── tip curl ────────────────────────────────────────────────────

    #[test]
    fn inner_layers_never_curl() {
        for layer in 0..=2 {
            for &n_y in &SAMPLES {
                assert_eq!(petal_tip_curl(n_y, layer), 0.0);
            }
        }
    }

    #[test]
    fn outer_layers_curl_down_at_tip() {
        for layer in 3..=5u8 {
            let curl = petal_tip_curl(1.0, layer);
            assert!(curl < 0.0);
            assert!((curl - (-0.5 * f32::from(layer) / 5.0)).abs() < 1e-6);
        }
    }

    // ── wave ────────────────────────────────────────────────────────

    #[test]
    fn wave_vanishes_at_base() {
        for layer in 0..=5 {
            assert_eq!(petal_wave(0.3, 0.0, layer), 0.0);
        }
    }

    #[test]
    fn wave_amplitude_grows_with_layer() {
        // sin(1/6 · 3π) = 1: peak of the ripple.
        let n_x = 1.0 / 6.0;
        for layer in 0..5u8 {
            assert!(petal_wave(n_x, 1.0, layer + 1) > petal_wave(n_x, 1.0, layer));
        }
        assert!((petal_wave(n_x, 1.0, 0) - 0.02).abs() < 1e-6);
    }

    // ── taper ───────────────────────────────────────────────────────

    #[test]
    fn taper_closes_at_both_ends() {
        assert_eq!(petal_taper(0.0), 0.0);
        assert!(petal_taper(1.0).abs() < 1e-5);
        assert!(petal_taper(0.5) > 0.5);
    }

    // ── sepal / leaflet ─────────────────────────────────────────────

    #[test]
    fn sepal_outline_closes() {
        assert_eq!(sepal_width(0.0), 0.0);
        assert_eq!(sepal_width(1.0), 0.0);
        assert!(sepal_width(0.4) > 0.0);
    }

    #[test]
    fn leaflet_is_ovate_and_concave() {
        assert_eq!(leaflet_width(0.0), 0.0);
        assert!(leaflet_width(1.0).abs() < 1e-5);
        assert!(leaflet_width(0.5) > 0.8);
        assert!((leaflet_curve(1.0) + 0.08).abs() < 1e-6);
    }

    #[test]
    fn displace_sums_petal_terms() {
        let d = displace(PartKind::Petal, 4, 0.5, 0.7);
        let z = petal_cup(0.5, 0.7, 4) + petal_tip_curl(0.7, 4) + petal_wave(0.5, 0.7, 4);
        assert_eq!(d.z, z);
        assert_eq!(d.width_factor, petal_taper(0.7));
    }
}
