/// Wraps an angle in degrees into [0, 360).
///
/// Non-finite inputs are returned unchanged; callers feeding user input
/// should treat them as invalid before this point.
pub fn wrap_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return deg;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs due to rounding.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::wrap_degrees;

    #[test]
    fn in_range_is_unchanged() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(90.0), 90.0);
        assert_eq!(wrap_degrees(359.9), 359.9);
    }

    #[test]
    fn wraps_over_and_under() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(450.0), 90.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(-720.0), 0.0);
    }

    #[test]
    fn result_is_always_in_range() {
        for i in -1000..1000 {
            let d = i as f64 * 7.3;
            let w = wrap_degrees(d);
            assert!((0.0..360.0).contains(&w), "{d} wrapped to {w}");
        }
    }
}
