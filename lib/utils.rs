//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;
use num_traits::Float;

/// Sign function with `sign(0) = 0`, and `sign(NaN) = NaN`.
///
/// Unlike [`f64::signum`], both `+0.0` and `-0.0` map to `0.0`.
pub fn sign<A>(x: A) -> A
where A: Float
{
    if x.is_nan() {
        A::nan()
    } else if x.is_zero() {
        A::zero()
    } else {
        x.signum()
    }
}

/// Find the index and value of the largest non-NaN element, visiting indices
/// in the order given by `order` and breaking ties by first visit.
///
/// Returns `None` if `order` is empty or visits only NaNs.
///
/// # Panics
/// Panics if `order` yields an index out of bounds for `a`.
pub fn nan_argmax_in<S, A, I>(a: &nd::ArrayBase<S, Ix1>, order: I)
    -> Option<(usize, A)>
where
    S: nd::Data<Elem = A>,
    A: Float,
    I: IntoIterator<Item = usize>,
{
    order.into_iter()
        .map(|k| (k, a[k]))
        .filter(|(_, ak)| !ak.is_nan())
        .fold(None, |acc, (k, ak)| {
            match acc {
                Some((_, best)) if best >= ak => acc,
                _ => Some((k, ak)),
            }
        })
}

/// Ratio `max |Im q| / max |Re q|`.
///
/// Zero if `q` is identically zero; `+∞` if `q` is purely imaginary.
pub fn imag_residual_ratio<S>(q: &nd::ArrayBase<S, Ix1>) -> f64
where S: nd::Data<Elem = C64>
{
    let (re, im)
        = q.iter()
        .fold((0.0_f64, 0.0_f64), |(re, im), qk| {
            (re.max(qk.re.abs()), im.max(qk.im.abs()))
        });
    if im == 0.0 { 0.0 } else { im / re }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(1e-300), 1.0);
        assert!(sign(f64::NAN).is_nan());
        assert_eq!(sign(-2.0_f32), -1.0);
    }

    #[test]
    fn argmax_skips_nan_and_keeps_first() {
        let a = nd::array![f64::NAN, 1.0, 3.0, f64::NAN, 3.0, 2.0];
        assert_eq!(nan_argmax_in(&a, 0..a.len()), Some((2, 3.0)));
        let b = nd::array![f64::NAN, f64::NAN];
        assert_eq!(nan_argmax_in(&b, 0..2), None);
        let e = nd::Array1::<f64>::zeros(0);
        assert_eq!(nan_argmax_in(&e, 0..0), None);
    }

    #[test]
    fn argmax_ties_follow_visit_order() {
        let a = nd::array![3.0, 1.0, 3.0, f64::NAN];
        assert_eq!(nan_argmax_in(&a, [3, 2, 1, 0]), Some((2, 3.0)));
        assert_eq!(nan_argmax_in(&a, (0..4).rev()), Some((2, 3.0)));
        assert_eq!(nan_argmax_in(&a, [1, 0, 2]), Some((0, 3.0)));
        // unvisited indices never win
        assert_eq!(nan_argmax_in(&a, [1, 3]), Some((1, 1.0)));
    }

    #[test]
    fn residual_ratio() {
        let q = nd::array![C64::new(2.0, 1e-9), C64::new(-4.0, 0.0)];
        assert_eq!(imag_residual_ratio(&q), 1e-9 / 4.0);
        let z = nd::Array1::<C64>::zeros(3);
        assert_eq!(imag_residual_ratio(&z), 0.0);
        let i = nd::array![C64::new(0.0, 1.0)];
        assert!(imag_residual_ratio(&i).is_infinite());
    }
}
