//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function Φ
//! - `norm_pdf`: probability density function φ
//!
//! Both are generic over `T: Float`. The CDF is built on an erfc
//! approximation with exact reflection, so `Φ(x) + Φ(-x) = 1` holds to
//! rounding. Black-Scholes put-call parity relies on that.

use num_traits::Float;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz & Stegun 7.1.26 polynomial coefficients `a1..a5`.
const AS_COEFFS: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];
const AS_P: f64 = 0.327_591_1;

#[inline]
fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Complementary error function, A&S 7.1.26 (max abs error 1.5e-7).
///
/// Evaluated on |x| and reflected with `erfc(-x) = 2 - erfc(x)`.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let t = one / (one + lit::<T>(AS_P) * abs_x);
    let poly = AS_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| lit::<T>(a) + t * acc);
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        lit::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// `Φ(x) = erfc(-x/√2) / 2`, accurate to about 1e-7 and always in `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    lit::<T>(0.5) * erfc_approx(-x / lit::<T>(SQRT_2))
}

/// Standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    lit::<T>(FRAC_1_SQRT_2PI) * (-lit::<T>(0.5) * x * x).exp()
}
