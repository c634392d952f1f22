use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use num_complex::Complex64;
use num_traits::{One, Zero};

/// Numeric field carried by [`Value`](super::Node::Value) nodes.
///
/// Every tree algorithm is written once against this trait. Real trees use `f64`, complex
/// trees use [`Complex64`]; only the field arithmetic and the rendering of constants differ.
/// [`Zero::is_zero`] is the exact test used to reject division by zero.
pub trait Scalar:
    Clone
    + PartialEq
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Zero
    + One
{
    fn from_real(real: f64) -> Self;

    #[must_use]
    fn pow(&self, exponent: &Self) -> Self;

    #[must_use]
    fn sin(&self) -> Self;

    #[must_use]
    fn cos(&self) -> Self;

    #[must_use]
    fn ln(&self) -> Self;

    #[must_use]
    fn exp(&self) -> Self;

    /// Text of a constant inside the canonical rendering.
    fn render(&self) -> String;
}

impl Scalar for f64 {
    fn from_real(real: f64) -> Self {
        real
    }

    fn pow(&self, exponent: &Self) -> Self {
        self.powf(*exponent)
    }

    fn sin(&self) -> Self {
        f64::sin(*self)
    }

    fn cos(&self) -> Self {
        f64::cos(*self)
    }

    fn ln(&self) -> Self {
        f64::ln(*self)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    // Integral values print without a fractional part, so `1.0` renders as "1"
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Scalar for Complex64 {
    fn from_real(real: f64) -> Self {
        Complex64::new(real, 0.0)
    }

    fn pow(&self, exponent: &Self) -> Self {
        self.powc(*exponent)
    }

    fn sin(&self) -> Self {
        Complex64::sin(*self)
    }

    fn cos(&self) -> Self {
        Complex64::cos(*self)
    }

    fn ln(&self) -> Self {
        Complex64::ln(*self)
    }

    fn exp(&self) -> Self {
        Complex64::exp(*self)
    }

    fn render(&self) -> String {
        format!("({} + {}i)", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{E, PI};

    use super::*;

    #[test]
    fn real_rendering_drops_integral_fraction() {
        assert_eq!(5.0_f64.render(), "5");
        assert_eq!(0.0_f64.render(), "0");
        assert_eq!(1.0_f64.render(), "1");
        assert_eq!((-1.0_f64).render(), "-1");
        assert_eq!(2.5_f64.render(), "2.5");
    }

    #[test]
    fn complex_rendering() {
        assert_eq!(Complex64::new(1.0, 2.0).render(), "(1 + 2i)");
        assert_eq!(Complex64::new(0.5, -3.0).render(), "(0.5 + -3i)");
        assert_eq!(Complex64::from_real(0.0).render(), "(0 + 0i)");
    }

    #[test]
    fn real_functions() {
        assert_eq!(Scalar::sin(&0.0_f64), 0.0);
        assert_eq!(Scalar::cos(&0.0_f64), 1.0);
        assert_eq!(Scalar::exp(&0.0_f64), 1.0);
        assert!((Scalar::ln(&E) - 1.0).abs() < 1e-12);
        assert_eq!(Scalar::pow(&2.0_f64, &10.0), 1024.0);
    }

    #[test]
    fn complex_functions_use_complex_branch() {
        // ln(-1) = iπ on the principal branch
        let ln = Scalar::ln(&Complex64::from_real(-1.0));
        assert!(ln.re.abs() < 1e-12);
        assert!((ln.im - PI).abs() < 1e-12);

        // e^{iπ} = -1
        let euler = Scalar::exp(&Complex64::new(0.0, PI));
        assert!((euler.re + 1.0).abs() < 1e-12);
        assert!(euler.im.abs() < 1e-12);

        // i^2 = -1
        let square = Scalar::pow(&Complex64::i(), &Complex64::from_real(2.0));
        assert!((square.re + 1.0).abs() < 1e-12);
        assert!(square.im.abs() < 1e-12);
    }

    #[test]
    fn zero_is_exact() {
        assert!(0.0_f64.is_zero());
        assert!(!1e-300_f64.is_zero());
        assert!(Complex64::from_real(0.0).is_zero());
        assert!(!Complex64::new(0.0, 1e-300).is_zero());
    }
}
