//! Error types for tensor operations.

use std::fmt;

use crate::tensor::{FiniteSet, LatticePoint, Strand};

/// Which end of a strand a lattice point belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Domain,
    Codomain,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Domain => write!(f, "domain"),
            Side::Codomain => write!(f, "codomain"),
        }
    }
}

/// Errors raised by tensor operations
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TensorError {
    /// The codomain of the left operand differs from the domain of the right
    NotComposable {
        left: Vec<FiniteSet>,
        right: Vec<FiniteSet>,
    },
    /// Conditioning on a point with zero total mass
    DivisionByZero { point: LatticePoint },
    /// A strand key that is not an element of its declared product space
    MalformedLatticePoint {
        strand: Strand,
        side: Side,
        reason: String,
    },
    /// A split index past the end of a factor sequence
    SplitOutOfRange { split: usize, arity: usize },
    /// A weight `numer / 0` given to the builder
    ZeroDenominator { strand: Strand },
}

fn write_factors(f: &mut fmt::Formatter<'_>, factors: &[FiniteSet]) -> fmt::Result {
    write!(f, "[")?;
    for (i, factor) in factors.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", factor)?;
    }
    write!(f, "]")
}

fn write_point(f: &mut fmt::Formatter<'_>, point: &[crate::tensor::Label]) -> fmt::Result {
    write!(f, "[")?;
    for (i, label) in point.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", label)?;
    }
    write!(f, "]")
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::NotComposable { left, right } => {
                write!(f, "cannot compose: codomain ")?;
                write_factors(f, left)?;
                write!(f, " does not match domain ")?;
                write_factors(f, right)
            }
            TensorError::DivisionByZero { point } => {
                write!(f, "division by zero: point ")?;
                write_point(f, point)?;
                write!(f, " has zero total mass")
            }
            TensorError::MalformedLatticePoint {
                strand,
                side,
                reason,
            } => {
                write!(f, "malformed {} point in strand (", side)?;
                write_point(f, &strand.from)?;
                write!(f, ", ")?;
                write_point(f, &strand.to)?;
                write!(f, "): {}", reason)
            }
            TensorError::SplitOutOfRange { split, arity } => {
                write!(
                    f,
                    "split position {} out of range for {} factors",
                    split, arity
                )
            }
            TensorError::ZeroDenominator { strand } => {
                write!(f, "zero denominator in weight of strand (")?;
                write_point(f, &strand.from)?;
                write!(f, ", ")?;
                write_point(f, &strand.to)?;
                write!(f, ")")
            }
        }
    }
}

impl std::error::Error for TensorError {}

pub type TensorResult<T> = Result<T, TensorError>;
