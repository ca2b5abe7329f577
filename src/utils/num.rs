/// Rounds an unsigned integer to the nearest multiple of `step`.
///
/// > halves round up, the top bucket saturates instead of overflowing
pub fn round_to_multiple<Integral>(n: Integral, step: Integral) -> Integral
where
    Integral: num_traits::int::PrimInt + num_traits::Unsigned,
{
    if step.is_zero() {
        return n;
    }

    let half = step >> 1;
    let lower = n / step * step;
    if n - lower < half {
        return lower;
    }

    match lower.checked_add(&step) {
        Some(upper) => upper,
        None => lower,
    }
}

/// Maps `value` from `0..=max` onto `0.0..=1.0`.
///
/// > a zero `max` maps everything to 0
#[inline]
pub fn normalize<F: num_traits::Float>(value: F, max: F) -> F {
    if max <= F::zero() {
        return F::zero();
    }
    (value / max).max(F::zero()).min(F::one())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_multiple_exact() {
        assert_eq!(round_to_multiple(0u8, 8), 0);
        assert_eq!(round_to_multiple(8u8, 8), 8);
        assert_eq!(round_to_multiple(200u8, 8), 200);
    }

    #[test]
    fn test_round_to_multiple_halves_round_up() {
        assert_eq!(round_to_multiple(4u8, 8), 8); // 4-0=4, 8-4=4, prefer upper
        assert_eq!(round_to_multiple(20u8, 8), 24);
        assert_eq!(round_to_multiple(3u8, 8), 0);
        assert_eq!(round_to_multiple(131u8, 8), 128);
    }

    #[test]
    fn test_round_to_multiple_saturates() {
        // 256 does not fit, stays in the 248 bucket
        assert_eq!(round_to_multiple(252u8, 8), 248);
        assert_eq!(round_to_multiple(255u8, 8), 248);
        assert_eq!(round_to_multiple(255u32, 8), 256);
    }

    #[test]
    fn test_round_to_multiple_zero_step() {
        assert_eq!(round_to_multiple(13u16, 0), 13);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(5.0f32, 10.0), 0.5);
        assert_eq!(normalize(15.0f32, 10.0), 1.0);
        assert_eq!(normalize(3.0f64, 0.0), 0.0);
    }
}
