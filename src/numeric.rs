use crate::engine::CalcError;

/// 虚部小于该阈值的复数按实数处理。
const IMAG_EPS: f64 = 1e-10;

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// 校验数值有效后按指定小数位四舍五入。
/// NaN 或无穷大视为无效结果。
pub fn safe_round(value: f64, decimals: u32) -> Result<f64, CalcError> {
    if value.is_nan() || value.is_infinite() {
        return Err(CalcError::InvalidResult(format!(
            "计算结果无效: {value}，请检查输入参数"
        )));
    }
    Ok(round_to(value, decimals))
}

/// 把复数收敛为实数：虚部可忽略时取实部，否则报复数错误。
pub fn collapse_complex(re: f64, im: f64) -> Result<f64, CalcError> {
    if im.abs() > IMAG_EPS {
        return Err(CalcError::ComplexResult(format!(
            "计算结果为复数: {re}{im:+}i，请检查输入参数是否合理"
        )));
    }
    Ok(re)
}

/// 计算 base^exponent。底数为负且指数非整数时数学结果为复数主值，
/// 经 collapse_complex 收敛。
pub fn checked_powf(base: f64, exponent: f64) -> Result<f64, CalcError> {
    if base < 0.0 && exponent.fract() != 0.0 {
        let magnitude = (-base).powf(exponent);
        let re = magnitude * (std::f64::consts::PI * exponent).cos();
        let im = magnitude * (std::f64::consts::PI * exponent).sin();
        return collapse_complex(re, im);
    }
    Ok(base.powf(exponent))
}

/// 在 [lo, hi] 上用二分法求 f 的根。
///
/// 端点函数值同号时无法套定根，返回 None。每次迭代取区间中点，
/// 以 |f(mid)| < tol 或区间宽度 < tol 提前收敛；迭代耗尽时返回
/// 当前区间中点作为近似解，不视为失败。
pub fn bisect<F>(f: F, lo: f64, hi: f64, tol: f64, max_iter: u32) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let mut lo = lo;
    let mut hi = hi;
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo * f_hi > 0.0 {
        return None;
    }
    for _ in 0..max_iter {
        let mid = (lo + hi) * 0.5;
        let f_mid = f(mid);
        if f_mid.abs() < tol || (hi - lo) < tol {
            return Some(mid);
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }
    Some((lo + hi) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_round_rounds_half_away_from_zero() {
        assert_eq!(safe_round(1.2345675, 6).unwrap(), 1.234568);
        assert_eq!(safe_round(-2.5, 0).unwrap(), -3.0);
        assert_eq!(safe_round(3.1415926535, 4).unwrap(), 3.1416);
    }

    #[test]
    fn safe_round_is_idempotent() {
        let once = safe_round(1.2345675, 6).unwrap();
        assert_eq!(safe_round(once, 6).unwrap(), once);
        let once = safe_round(0.1 + 0.2, 6).unwrap();
        assert_eq!(safe_round(once, 6).unwrap(), once);
        let once = safe_round(-2.7182818, 6).unwrap();
        assert_eq!(safe_round(once, 6).unwrap(), once);
        let once = safe_round(3.1415926535, 4).unwrap();
        assert_eq!(safe_round(once, 4).unwrap(), once);
    }

    #[test]
    fn safe_round_rejects_nan_and_infinity() {
        assert!(matches!(
            safe_round(f64::NAN, 6),
            Err(CalcError::InvalidResult(_))
        ));
        assert!(matches!(
            safe_round(f64::INFINITY, 6),
            Err(CalcError::InvalidResult(_))
        ));
    }

    #[test]
    fn collapse_complex_tolerates_tiny_imaginary_part() {
        assert_eq!(collapse_complex(3.5, 5e-11).unwrap(), 3.5);
        assert_eq!(collapse_complex(-1.0, -9.9e-11).unwrap(), -1.0);
    }

    #[test]
    fn collapse_complex_accepts_threshold_imaginary_part() {
        // 虚部恰为阈值时仍按实数处理
        assert_eq!(collapse_complex(1.0, 1e-10).unwrap(), 1.0);
        assert_eq!(collapse_complex(1.0, -1e-10).unwrap(), 1.0);
    }

    #[test]
    fn collapse_complex_rejects_significant_imaginary_part() {
        assert!(matches!(
            collapse_complex(1.0, 2e-10),
            Err(CalcError::ComplexResult(_))
        ));
    }

    #[test]
    fn checked_powf_matches_powf_for_positive_base() {
        assert_eq!(checked_powf(2.0, 0.5).unwrap(), 2f64.powf(0.5));
        assert_eq!(checked_powf(0.0, 1.0 / 6.0).unwrap(), 0.0);
    }

    #[test]
    fn checked_powf_rejects_negative_base_with_fractional_exponent() {
        assert!(matches!(
            checked_powf(-8.0, 1.0 / 3.0),
            Err(CalcError::ComplexResult(_))
        ));
        assert!(matches!(
            checked_powf(-2.0, 0.5),
            Err(CalcError::ComplexResult(_))
        ));
    }

    #[test]
    fn checked_powf_keeps_integer_exponents_real() {
        assert_eq!(checked_powf(-3.0, 2.0).unwrap(), 9.0);
        assert_eq!(checked_powf(-2.0, 3.0).unwrap(), -8.0);
    }

    #[test]
    fn bisect_finds_simple_root() {
        let root = bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-6, 200).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn bisect_rejects_unbracketed_interval() {
        assert!(bisect(|x| x * x + 1.0, -5.0, 5.0, 1e-6, 200).is_none());
    }

    #[test]
    fn bisect_returns_midpoint_when_iterations_exhausted() {
        // 宽区间配上极小容差，两次迭代不可能收敛
        let approx = bisect(|x| x - 1.0, 0.0, 1000.0, 1e-300, 2).unwrap();
        assert!((0.0..=1000.0).contains(&approx));
    }
}
