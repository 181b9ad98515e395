//! Angle helpers.
use std::f32::consts::{PI, TAU};

/// Wraps `a` into `(-π, π]`. Non-finite input comes back as NaN.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    let r = PI - (PI - a).rem_euclid(TAU);
    // rem_euclid can round up to TAU for inputs a hair above PI
    if r <= -PI { r + TAU } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn output_range_is_half_open_at_minus_pi() {
        assert!(close(normalize_angle(PI), PI));
        assert!(close(normalize_angle(-PI), PI));
        assert!(close(normalize_angle(0.0), 0.0));
        for k in -2000..2000 {
            let r = normalize_angle(k as f32 * 0.01);
            assert!(r > -PI && r <= PI, "{k}: {r}");
        }
    }

    #[test]
    fn wraps_multiple_turns() {
        assert!(close(normalize_angle(3.0 * TAU + 0.5), 0.5));
        assert!(close(normalize_angle(-5.0 * TAU - 0.5), -0.5));
        assert!(close(normalize_angle(1.5 * PI), -0.5 * PI));
    }

    #[test]
    fn non_finite_input_is_nan() {
        assert!(normalize_angle(f32::INFINITY).is_nan());
        assert!(normalize_angle(f32::NAN).is_nan());
    }
}
