//! Prime fields Z_p.

use dashu::integer::IBig;

use crate::traits::{field_key_divisors, Coefficient, Field, FieldKind, Ring};

/// A prime field Z_p with a compile-time modulus.
///
/// Values are kept in `[0, P)`. Products are computed in `u128`, so any
/// prime that fits in a `u64` is supported. A composite `P` is rejected
/// when the field is first used:
///
/// ```compile_fail
/// use ncalg_rings::FiniteField;
///
/// const SIX: FiniteField<6> = FiniteField::new(1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct FiniteField<const P: u64>(u64);

impl<const P: u64> FiniteField<P> {
    const PRIME_MODULUS: () = assert!(is_prime(P), "FiniteField modulus must be prime");

    /// Creates a new field element.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        let () = Self::PRIME_MODULUS;
        Self(value % P)
    }

    /// Creates a field element from a signed value.
    #[must_use]
    pub fn from_signed(value: i64) -> Self {
        let () = Self::PRIME_MODULUS;
        let r = i128::from(value).rem_euclid(i128::from(P));
        Self(r as u64)
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the characteristic (the prime p).
    #[must_use]
    pub const fn characteristic() -> u64 {
        P
    }
}

impl<const P: u64> Ring for FiniteField<P> {
    fn zero() -> Self {
        let () = Self::PRIME_MODULUS;
        Self(0)
    }

    fn one() -> Self {
        let () = Self::PRIME_MODULUS;
        Self(1)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }

    fn from_integer(n: &IBig) -> Self {
        let () = Self::PRIME_MODULUS;
        let r = n.clone() % IBig::from(P);
        // |r| < P, so it always fits.
        let r = i128::try_from(r).unwrap_or_default();
        Self(r.rem_euclid(i128::from(P)) as u64)
    }
}

impl<const P: u64> Coefficient for FiniteField<P> {
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
        *self
    }

    fn divide_exact(&self, divisor: &Self) -> Option<Self> {
        self.field_div(divisor)
    }

    fn kind() -> FieldKind {
        let () = Self::PRIME_MODULUS;
        FieldKind::Prime(P)
    }
}

impl<const P: u64> Field for FiniteField<P> {
    fn inv(&self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }

        // Extended Euclidean algorithm
        let mut t = 0i128;
        let mut new_t = 1i128;
        let mut r = i128::from(P);
        let mut new_r = i128::from(self.0);

        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }

        if r > 1 {
            return None;
        }

        Some(Self(t.rem_euclid(i128::from(P)) as u64))
    }
}

impl<const P: u64> num_traits::Zero for FiniteField<P> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const P: u64> num_traits::One for FiniteField<P> {
    fn one() -> Self {
        <Self as Ring>::one()
    }
}

impl<const P: u64> std::ops::Add for FiniteField<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let sum = (u128::from(self.0) + u128::from(rhs.0)) % u128::from(P);
        Self(sum as u64)
    }
}

impl<const P: u64> std::ops::Sub for FiniteField<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let diff = (u128::from(self.0) + u128::from(P) - u128::from(rhs.0)) % u128::from(P);
        Self(diff as u64)
    }
}

impl<const P: u64> std::ops::Mul for FiniteField<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let prod = (u128::from(self.0) * u128::from(rhs.0)) % u128::from(P);
        Self(prod as u64)
    }
}

impl<const P: u64> std::ops::Neg for FiniteField<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.0 == 0 {
            self
        } else {
            Self(P - self.0)
        }
    }
}

impl<const P: u64> From<u64> for FiniteField<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<i64> for FiniteField<P> {
    fn from(value: i64) -> Self {
        Self::from_signed(value)
    }
}

impl<const P: u64> std::fmt::Display for FiniteField<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic Miller-Rabin for all `u64`.
///
/// The first twelve primes as witnesses decide every 64-bit input.
#[must_use]
pub const fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
    if n < 2 {
        return false;
    }
    let mut i = 0;
    while i < WITNESSES.len() {
        let p = WITNESSES[i];
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
        i += 1;
    }

    // n - 1 = d * 2^s with d odd
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    let mut i = 0;
    while i < WITNESSES.len() {
        let mut x = pow_mod(WITNESSES[i], d, n);
        i += 1;
        if x == 1 || x == n - 1 {
            continue;
        }
        let mut r = 1;
        while r < s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                break;
            }
            r += 1;
        }
        if r == s {
            return false;
        }
    }
    true
}

#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
const fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

const fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}

/// The field with 101 elements, small enough for readable test output.
pub type GF101 = FiniteField<101>;

/// The largest prime below 2^31, a common choice for modular Gröbner work.
pub type GF2147483647 = FiniteField<2_147_483_647>;
