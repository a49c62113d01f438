//! Linear interpolation helpers shared by curve evaluation.

/// Interpolates between `y1` and `y2` with `n` clamped to `0.0..=1.0`.
pub fn lerp_01(y1: f64, y2: f64, n: f64) -> f64 {
    y1 + (y2 - y1) * clamp_01(n)
}

pub fn clamp_01(n: f64) -> f64 {
    n.clamp(0.0, 1.0)
}

/// Returns the output at `n` on the line through `(x1, y1)` and `(x2, y2)`.
///
/// Unclamped: inputs outside `x1..=x2` extrapolate. Callers must guarantee
/// `x1 != x2`.
pub fn lerp_xy(x1: f64, x2: f64, y1: f64, y2: f64, n: f64) -> f64 {
    let percentage = (n - x1) / (x2 - x1);
    y1 + (y2 - y1) * percentage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_01_limits_to_unit_interval() {
        assert_eq!(clamp_01(-52.12), 0.0);
        assert_eq!(clamp_01(0.0), 0.0);
        assert_eq!(clamp_01(0.4287), 0.4287);
        assert_eq!(clamp_01(1.0), 1.0);
        assert_eq!(clamp_01(3910.124), 1.0);
    }

    #[test]
    fn lerp_01_saturates_outside_unit_interval() {
        let (y1, y2) = (20.0, 200.0);
        assert_eq!(lerp_01(y1, y2, -129.0), y1);
        assert_eq!(lerp_01(y1, y2, 0.0), y1);
        assert_eq!(lerp_01(y1, y2, 0.25), 0.25 * (y2 - y1) + y1);
        assert_eq!(lerp_01(y1, y2, 1.0), y2);
        assert_eq!(lerp_01(y1, y2, 18_324.178), y2);
    }

    #[test]
    fn lerp_xy_hits_both_endpoints_and_midpoints() {
        let (x1, x2, y1, y2) = (10.0, 35.0, 40.0, 5000.0);
        assert_eq!(lerp_xy(x1, x2, y1, y2, x1), y1);
        assert_eq!(lerp_xy(x1, x2, y1, y2, x2), y2);

        let n = 22.3;
        let expected = y1 + (y2 - y1) * ((n - x1) / (x2 - x1));
        assert_eq!(lerp_xy(x1, x2, y1, y2, n), expected);
    }
}
