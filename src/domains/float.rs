//! Floating-point numbers and traits.

use std::{
    fmt::{self, Debug, Display, Formatter, Write},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A number, that is potentially floating point.
pub trait NumericalFloatLike:
    PartialEq
    + Clone
    + Debug
    + Display
    + std::ops::Neg<Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> Div<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + DivAssign<Self>
{
    fn zero(&self) -> Self;
    /// Create a zero that should only be used as a temporary value,
    /// as for some types it may have wrong precision information.
    fn new_zero() -> Self;
    fn one(&self) -> Self;
    fn pow(&self, e: u64) -> Self;
    fn inv(&self) -> Self;

    /// Convert `a` to a number of the same type as `self`.
    fn from_usize(&self, a: usize) -> Self;
}

/// A number that behaves like a single number.
pub trait SingleFloat: NumericalFloatLike {
    fn is_zero(&self) -> bool;
    fn is_finite(&self) -> bool;
}

/// A number that can be converted to an `f64`.
pub trait RealNumberLike: SingleFloat {
    fn to_f64(&self) -> f64;
}

/// A float that can be constructed without any parameters, such as f64.
pub trait ConstructibleFloat: NumericalFloatLike {
    fn new_one() -> Self;
    fn new_from_usize(a: usize) -> Self;
    fn new_from_f64(a: f64) -> Self;
    /// Sample a point on the interval [0, 1).
    fn new_sample_unit<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

/// A real number with the elementary functions needed for polar coordinates.
pub trait Real: NumericalFloatLike {
    /// Compute `sqrt(self^2 + other^2)` without intermediate overflow.
    fn hypot(&self, other: &Self) -> Self;
    fn sin(&self) -> Self;
    fn cos(&self) -> Self;
    fn atan2(&self, x: &Self) -> Self;
    fn powf(&self, e: &Self) -> Self;
}

/// A real floating point type with a fixed precision that can be used
/// as the component type of homotopy coefficients.
pub trait FixedFloat:
    Real
    + ConstructibleFloat
    + SingleFloat
    + RealNumberLike
    + Copy
    + PartialOrd
    + Send
    + Sync
    + 'static
{
}

impl<
        T: Real
            + ConstructibleFloat
            + SingleFloat
            + RealNumberLike
            + Copy
            + PartialOrd
            + Send
            + Sync
            + 'static,
    > FixedFloat for T
{
}

macro_rules! impl_primitive_float {
    ($t:ident) => {
        impl NumericalFloatLike for $t {
            #[inline(always)]
            fn zero(&self) -> Self {
                0.
            }

            #[inline(always)]
            fn new_zero() -> Self {
                0.
            }

            #[inline(always)]
            fn one(&self) -> Self {
                1.
            }

            #[inline]
            fn pow(&self, e: u64) -> Self {
                debug_assert!(e <= i32::MAX as u64);
                self.powi(e as i32)
            }

            #[inline(always)]
            fn inv(&self) -> Self {
                1. / self
            }

            #[inline(always)]
            fn from_usize(&self, a: usize) -> Self {
                a as $t
            }

        }

        impl SingleFloat for $t {
            #[inline(always)]
            fn is_zero(&self) -> bool {
                *self == 0.
            }

            #[inline(always)]
            fn is_finite(&self) -> bool {
                $t::is_finite(*self)
            }
        }

        impl RealNumberLike for $t {
            #[inline(always)]
            fn to_f64(&self) -> f64 {
                *self as f64
            }
        }

        impl ConstructibleFloat for $t {
            #[inline(always)]
            fn new_one() -> Self {
                1.
            }

            #[inline(always)]
            fn new_from_usize(a: usize) -> Self {
                a as $t
            }

            #[inline(always)]
            fn new_from_f64(a: f64) -> Self {
                a as $t
            }

            #[inline(always)]
            fn new_sample_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.gen()
            }
        }

        impl Real for $t {
            #[inline(always)]
            fn hypot(&self, other: &Self) -> Self {
                $t::hypot(*self, *other)
            }

            #[inline(always)]
            fn sin(&self) -> Self {
                $t::sin(*self)
            }

            #[inline(always)]
            fn cos(&self) -> Self {
                $t::cos(*self)
            }

            #[inline(always)]
            fn atan2(&self, x: &Self) -> Self {
                $t::atan2(*self, *x)
            }

            #[inline(always)]
            fn powf(&self, e: &Self) -> Self {
                $t::powf(*self, *e)
            }
        }
    };
}

impl_primitive_float!(f64);
impl_primitive_float!(f32);

/// A complex number, `re + i * im`, where `i` is the imaginary unit.
#[derive(Copy, Clone, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T: NumericalFloatLike> Complex<T> {
    #[inline]
    pub fn new(re: T, im: T) -> Complex<T> {
        Complex { re, im }
    }

    #[inline]
    pub fn new_zero() -> Self {
        Complex {
            re: T::new_zero(),
            im: T::new_zero(),
        }
    }

    #[inline]
    pub fn new_one() -> Self
    where
        T: ConstructibleFloat,
    {
        Complex {
            re: T::new_one(),
            im: T::new_zero(),
        }
    }

    #[inline]
    pub fn norm_squared(&self) -> T {
        self.re.clone() * &self.re + self.im.clone() * &self.im
    }
}

impl<T: Real> Complex<T> {
    /// The modulus `|z|`. Unlike `norm_squared().sqrt()` it does not overflow
    /// for components close to the largest finite value.
    #[inline]
    pub fn norm(&self) -> T {
        self.re.hypot(&self.im)
    }

    #[inline]
    pub fn arg(&self) -> T {
        self.im.atan2(&self.re)
    }

    #[inline]
    pub fn to_polar_coordinates(self) -> (T, T) {
        (self.norm(), self.arg())
    }

    #[inline]
    pub fn from_polar_coordinates(r: T, phi: T) -> Complex<T> {
        Complex::new(r.clone() * phi.cos(), r * phi.sin())
    }
}

impl<T: NumericalFloatLike> Add<Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: NumericalFloatLike> Add<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Complex::new(self.re + &rhs.re, self.im + &rhs.im)
    }
}

impl<'a, 'b, T: NumericalFloatLike> Add<&'a Complex<T>> for &'b Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn add(self, rhs: &'a Complex<T>) -> Self::Output {
        self.clone() + rhs
    }
}

impl<T: NumericalFloatLike> Add<T> for Complex<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: T) -> Self::Output {
        Complex::new(self.re + rhs, self.im)
    }
}

impl<T: NumericalFloatLike> AddAssign for Complex<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl<T: NumericalFloatLike> AddAssign<&Complex<T>> for Complex<T> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.re += &rhs.re;
        self.im += &rhs.im;
    }
}

impl<T: NumericalFloatLike> Sub for Complex<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<T: NumericalFloatLike> Sub<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Complex::new(self.re - &rhs.re, self.im - &rhs.im)
    }
}

impl<'a, 'b, T: NumericalFloatLike> Sub<&'a Complex<T>> for &'b Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn sub(self, rhs: &'a Complex<T>) -> Self::Output {
        self.clone() - rhs
    }
}

impl<T: NumericalFloatLike> Sub<T> for Complex<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: T) -> Self::Output {
        Complex::new(self.re - rhs, self.im)
    }
}

impl<T: NumericalFloatLike> SubAssign for Complex<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.re -= rhs.re;
        self.im -= rhs.im;
    }
}

impl<T: NumericalFloatLike> SubAssign<&Complex<T>> for Complex<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.re -= &rhs.re;
        self.im -= &rhs.im;
    }
}

impl<T: NumericalFloatLike> Mul for Complex<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self * &rhs
    }
}

impl<T: NumericalFloatLike> Mul<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &Self) -> Self::Output {
        Complex::new(
            self.re.clone() * &rhs.re - self.im.clone() * &rhs.im,
            self.re * &rhs.im + self.im * &rhs.re,
        )
    }
}

impl<'a, 'b, T: NumericalFloatLike> Mul<&'a Complex<T>> for &'b Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn mul(self, rhs: &'a Complex<T>) -> Self::Output {
        self.clone() * rhs
    }
}

impl<T: NumericalFloatLike> Mul<T> for Complex<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        Complex::new(self.re * &rhs, self.im * rhs)
    }
}

impl<T: NumericalFloatLike> MulAssign for Complex<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.clone() * &rhs;
    }
}

impl<T: NumericalFloatLike> MulAssign<&Complex<T>> for Complex<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        *self = self.clone() * rhs;
    }
}

impl<T: NumericalFloatLike> Div for Complex<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self / &rhs
    }
}

impl<T: NumericalFloatLike> Div<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: &Self) -> Self::Output {
        let n = rhs.norm_squared();
        let re = self.re.clone() * &rhs.re + self.im.clone() * &rhs.im;
        let im = self.im * &rhs.re - self.re * &rhs.im;
        Complex::new(re / &n, im / n)
    }
}

impl<'a, 'b, T: NumericalFloatLike> Div<&'a Complex<T>> for &'b Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn div(self, rhs: &'a Complex<T>) -> Self::Output {
        self.clone() / rhs
    }
}

impl<T: NumericalFloatLike> Div<T> for Complex<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self::Output {
        Complex::new(self.re / &rhs, self.im / rhs)
    }
}

impl<T: NumericalFloatLike> DivAssign for Complex<T> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = self.clone() / &rhs;
    }
}

impl<T: NumericalFloatLike> DivAssign<&Complex<T>> for Complex<T> {
    #[inline]
    fn div_assign(&mut self, rhs: &Self) {
        *self = self.clone() / rhs;
    }
}

impl<T: NumericalFloatLike> Neg for Complex<T> {
    type Output = Complex<T>;

    #[inline]
    fn neg(self) -> Complex<T> {
        Complex::new(-self.re, -self.im)
    }
}

impl<T: NumericalFloatLike> Display for Complex<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        Display::fmt(&self.re, f)?;
        f.write_char('+')?;
        Display::fmt(&self.im, f)?;
        f.write_str("i)")
    }
}

impl<T: NumericalFloatLike> Debug for Complex<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        Debug::fmt(&self.re, f)?;
        f.write_char('+')?;
        Debug::fmt(&self.im, f)?;
        f.write_str("i)")
    }
}

impl<T: SingleFloat> SingleFloat for Complex<T> {
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    #[inline(always)]
    fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl<T: NumericalFloatLike> NumericalFloatLike for Complex<T> {
    #[inline]
    fn zero(&self) -> Self {
        Complex {
            re: self.re.zero(),
            im: self.im.zero(),
        }
    }

    fn new_zero() -> Self {
        Complex {
            re: T::new_zero(),
            im: T::new_zero(),
        }
    }

    fn one(&self) -> Self {
        Complex {
            re: self.re.one(),
            im: self.im.zero(),
        }
    }

    fn pow(&self, mut e: u64) -> Self {
        let mut base = self.clone();
        let mut r = self.one();
        while e > 0 {
            if e & 1 == 1 {
                r *= &base;
            }
            e >>= 1;
            if e > 0 {
                base = base.clone() * &base;
            }
        }
        r
    }

    fn inv(&self) -> Self {
        let n = self.norm_squared();
        Complex::new(self.re.clone() / &n, -self.im.clone() / &n)
    }

    fn from_usize(&self, a: usize) -> Self {
        Complex {
            re: self.re.from_usize(a),
            im: self.im.zero(),
        }
    }

}

impl<T: ConstructibleFloat> ConstructibleFloat for Complex<T> {
    fn new_one() -> Self {
        Complex {
            re: T::new_one(),
            im: T::new_zero(),
        }
    }

    fn new_from_usize(a: usize) -> Self {
        Complex {
            re: T::new_from_usize(a),
            im: T::new_zero(),
        }
    }

    fn new_from_f64(a: f64) -> Self {
        Complex {
            re: T::new_from_f64(a),
            im: T::new_zero(),
        }
    }

    /// Sample a point in the unit square `[0, 1) + i [0, 1)`.
    fn new_sample_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let re = T::new_sample_unit(rng);
        let im = T::new_sample_unit(rng);
        Complex { re, im }
    }
}

impl<T: NumericalFloatLike> From<T> for Complex<T> {
    fn from(value: T) -> Self {
        let zero = value.zero();
        Complex::new(value, zero)
    }
}
