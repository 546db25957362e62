//! The field of rational numbers Q.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;

use crate::traits::{field_key_divisors, Coefficient, Field, FieldKind, Ring};

/// The field of rational numbers.
///
/// Wraps `dashu::rational::RBig`, which keeps values in lowest terms with
/// a positive denominator.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Q(RBig);

impl Q {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        let value = RBig::from_parts(IBig::from(num), UBig::from(den.unsigned_abs()));
        if den < 0 {
            Self(-value)
        } else {
            Self(value)
        }
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }

    /// Creates a rational from big-integer parts.
    ///
    /// Returns `None` when the denominator is zero.
    #[must_use]
    pub fn from_parts(num: IBig, den: IBig) -> Option<Self> {
        if den == IBig::ZERO {
            return None;
        }
        let negative = DashuSigned::is_negative(&den);
        let value = RBig::from_parts(num, den.unsigned_abs());
        Some(if negative { Self(-value) } else { Self(value) })
    }

    /// Returns the numerator (carrying the sign).
    #[must_use]
    pub fn numerator(&self) -> IBig {
        self.0.numerator().clone()
    }

    /// Returns true if the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        *self.0.denominator() == UBig::ONE
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns a reference to the inner `RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

impl Ring for Q {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }

    fn from_integer(n: &IBig) -> Self {
        Self(RBig::from(n.clone()))
    }
}

impl Coefficient for Q {
    type Key = ();

    const IS_FIELD: bool = true;

    fn lead_key(&self) -> Self::Key {}

    fn key_degree(_key: &Self::Key) -> u32 {
        0
    }

    fn key_divisors(_key: &Self::Key, min: u32, _max: u32) -> Vec<Self::Key> {
        field_key_divisors(min)
    }

    fn lead_part(&self) -> Self {
        self.clone()
    }

    fn divide_exact(&self, divisor: &Self) -> Option<Self> {
        self.field_div(divisor)
    }

    fn kind() -> FieldKind {
        FieldKind::Rational
    }

    fn denominator(&self) -> UBig {
        self.0.denominator().clone()
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self(self.0.clone().inv()))
        }
    }
}

impl num_traits::Zero for Q {
    fn zero() -> Self {
        <Self as Ring>::zero()
    }

    fn is_zero(&self) -> bool {
        <Self as Ring>::is_zero(self)
    }
}

impl num_traits::One for Q {
    fn one() -> Self {
        <Self as Ring>::one()
    }
}

impl std::ops::Add for Q {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Q {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Q {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Q {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Q {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl std::fmt::Display for Q {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0.numerator())
        } else {
            write!(f, "{}/{}", self.0.numerator(), self.0.denominator())
        }
    }
}
