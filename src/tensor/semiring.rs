//! Ordered semifields for strand weights.
//!
//! A semiring (S, ⊕, ⊗, 0, 1) provides:
//! - Additive monoid (S, ⊕, 0)
//! - Multiplicative monoid (S, ⊗, 1)
//! - Multiplication distributes over addition
//! - 0 annihilates: 0 ⊗ x = x ⊗ 0 = 0
//!
//! Conditioning needs division as well, so strand weights live in an
//! ordered *semifield*: a semiring where every non-zero element has a
//! multiplicative inverse. "Ordered" means a total order compatible with the
//! operations, which lets the validator reject negative weights and keeps
//! strand maps in a canonical order.
//!
//! Weights are exact. The Markov check compares sums against one with `==`,
//! which is only meaningful without rounding, so no floating-point
//! implementation is provided.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_bigint::BigInt;
use num_rational::{BigRational, Rational64};

/// Arbitrary-precision rational, the default strand weight.
pub type Rational = BigRational;

/// An ordered semiring of exact weights.
pub trait OrderedSemiring:
    Clone + Debug + Display + PartialEq + Eq + PartialOrd + Ord + Hash + Send + Sync + 'static
{
    /// Additive identity: x ⊕ 0 = 0 ⊕ x = x
    fn zero() -> Self;

    /// Multiplicative identity: x ⊗ 1 = 1 ⊗ x = x
    fn one() -> Self;

    /// Semiring addition (⊕)
    fn add(&self, other: &Self) -> Self;

    /// Semiring multiplication (⊗)
    fn mul(&self, other: &Self) -> Self;

    /// Check if this is the additive identity
    fn is_zero(&self) -> bool {
        self == &Self::zero()
    }

    /// Check if this is the multiplicative identity
    fn is_one(&self) -> bool {
        self == &Self::one()
    }

    /// Check if this lies strictly below zero
    fn is_negative(&self) -> bool {
        self < &Self::zero()
    }
}

/// An ordered semiring with division by non-zero elements.
pub trait OrderedSemifield: OrderedSemiring {
    /// `self / other`, or `None` when `other` is zero.
    fn checked_div(&self, other: &Self) -> Option<Self>;

    /// Build the weight `numer / denom`.
    ///
    /// # Panics
    ///
    /// On a zero denominator, like the underlying ratio constructors.
    /// [`TensorBuilder::ratio`](crate::tensor::TensorBuilder::ratio) reports
    /// it as an error instead.
    fn ratio(numer: i64, denom: i64) -> Self;
}

// ============================================================================
// Arbitrary-precision rationals
// ============================================================================

impl OrderedSemiring for BigRational {
    #[inline]
    fn zero() -> Self {
        <Self as num_traits::Zero>::zero()
    }

    #[inline]
    fn one() -> Self {
        <Self as num_traits::One>::one()
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    #[inline]
    fn is_zero(&self) -> bool {
        num_traits::Zero::is_zero(self)
    }

    #[inline]
    fn is_negative(&self) -> bool {
        num_traits::Signed::is_negative(self)
    }
}

impl OrderedSemifield for BigRational {
    fn checked_div(&self, other: &Self) -> Option<Self> {
        if num_traits::Zero::is_zero(other) {
            None
        } else {
            Some(self / other)
        }
    }

    fn ratio(numer: i64, denom: i64) -> Self {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }
}

// ============================================================================
// Machine-word rationals (small models, overflow panics)
// ============================================================================

/// `Ratio<i64>` weights. `add` and `mul` panic when a numerator or
/// denominator overflows `i64`, which long compositions can reach; use
/// [`Rational`] when the chain length is not bounded.
impl OrderedSemiring for Rational64 {
    #[inline]
    fn zero() -> Self {
        <Self as num_traits::Zero>::zero()
    }

    #[inline]
    fn one() -> Self {
        <Self as num_traits::One>::one()
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    #[inline]
    fn is_negative(&self) -> bool {
        num_traits::Signed::is_negative(self)
    }
}

impl OrderedSemifield for Rational64 {
    fn checked_div(&self, other: &Self) -> Option<Self> {
        if num_traits::Zero::is_zero(other) {
            None
        } else {
            Some(self / other)
        }
    }

    fn ratio(numer: i64, denom: i64) -> Self {
        Rational64::new(numer, denom)
    }
}

// ============================================================================
// Tests
// ============================================================================
