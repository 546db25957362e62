//! Algebraic structure traits.
//!
//! This module defines the coefficient traits that the free-algebra
//! polynomials, the reduction engine and the solver bridge are generic
//! over.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

use dashu::integer::{IBig, UBig};

/// A commutative ring with identity.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
///
/// Coefficients commute with the generators of a free algebra, so every
/// coefficient ring used here is commutative.
pub trait Ring:
    Clone
    + Eq
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// The image of an integer under the canonical map Z → R.
    fn from_integer(n: &IBig) -> Self;

    /// Convenience wrapper around [`Ring::from_integer`].
    fn from_i64(n: i64) -> Self {
        Self::from_integer(&IBig::from(n))
    }

    /// Computes self^n for non-negative n.
    fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            exp >>= 1;
        }

        result
    }
}

/// What kind of coefficient ring a type is, as seen by the solver bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// The rational numbers (characteristic 0).
    Rational,
    /// A prime field Z_p.
    Prime(u64),
    /// Anything else; the name is used in diagnostics.
    Other(&'static str),
}

impl FieldKind {
    /// The characteristic, when the ring is one of the supported fields.
    #[must_use]
    pub const fn characteristic(self) -> Option<u64> {
        match self {
            FieldKind::Rational => Some(0),
            FieldKind::Prime(p) => Some(p),
            FieldKind::Other(_) => None,
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Rational => write!(f, "QQ"),
            FieldKind::Prime(p) => write!(f, "ZZ/{p}"),
            FieldKind::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A coefficient ring for free-algebra polynomials.
///
/// Besides ring arithmetic, reduction needs to look at the *leading part*
/// of a coefficient and to decide exact divisibility. For a field every
/// nonzero element is its own leading part and divides everything; for a
/// polynomial coefficient ring the leading part is the leading term and
/// the key is its commutative monomial.
pub trait Coefficient: Ring {
    /// Hashable key identifying the leading part of a coefficient.
    type Key: Clone + Eq + Hash + Debug;

    /// True when every nonzero element is invertible.
    const IS_FIELD: bool;

    /// The key of the leading part of `self`.
    fn lead_key(&self) -> Self::Key;

    /// The degree of a key.
    fn key_degree(key: &Self::Key) -> u32;

    /// All keys dividing `key` whose degree lies in `[min, max]`.
    fn key_divisors(key: &Self::Key, min: u32, max: u32) -> Vec<Self::Key>;

    /// The leading part of `self` (the element itself for fields).
    #[must_use]
    fn lead_part(&self) -> Self;

    /// Exact division: `Some(q)` with `q * divisor == self`, or `None`.
    fn divide_exact(&self, divisor: &Self) -> Option<Self>;

    /// Classification used by the external solver bridge.
    fn kind() -> FieldKind;

    /// Denominator of this coefficient over Z, used when clearing
    /// fractions before serialization. Integral types return one.
    fn denominator(&self) -> UBig {
        UBig::ONE
    }
}

/// A field is a coefficient ring where every nonzero element is a unit.
pub trait Field: Coefficient<Key = ()> {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Divides by another element, `None` when `other` is zero.
    fn field_div(&self, other: &Self) -> Option<Self> {
        other.inv().map(|inv| self.clone() * inv)
    }
}

/// Shared `Coefficient` behaviour for fields, used by the concrete impls.
pub(crate) fn field_key_divisors(min: u32) -> Vec<()> {
    if min == 0 {
        vec![()]
    } else {
        Vec::new()
    }
}
