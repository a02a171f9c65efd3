//! Markov-property checking.
//!
//! A tensor is Markov when, for every domain point with at least one stored
//! strand, the weights leaving it sum to exactly one. The check reports;
//! it never normalizes and never fails.

use std::collections::BTreeMap;

use crate::error::TensorError;

use super::lattice::LatticePoint;
use super::semiring::{OrderedSemiring, Rational};
use super::sparse::{check_strand, Strand, Tensor};

/// A reason a tensor is not a stochastic map
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation<S: OrderedSemiring = Rational> {
    /// The weights leaving `point` sum to `total`, not one
    Mass { point: LatticePoint, total: S },
    /// A strand carries a negative weight
    NegativeWeight { strand: Strand, weight: S },
    /// A strand key outside the declared product spaces
    Malformed(TensorError),
}

/// Result of checking the Markov property
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkovReport<S: OrderedSemiring = Rational> {
    /// Every domain point carries total weight one
    Markov,
    /// Some points or strands violate the property
    Violated(Vec<Violation<S>>),
}

impl<S: OrderedSemiring> MarkovReport<S> {
    pub fn is_markov(&self) -> bool {
        matches!(self, MarkovReport::Markov)
    }

    pub fn violations(&self) -> &[Violation<S>] {
        match self {
            MarkovReport::Markov => &[],
            MarkovReport::Violated(vs) => vs,
        }
    }
}

/// Check the Markov property, collecting every violation.
pub fn check_markov<S: OrderedSemiring>(tensor: &Tensor<S>) -> MarkovReport<S> {
    let mut violations = Vec::new();
    let mut totals: BTreeMap<&LatticePoint, S> = BTreeMap::new();

    for (strand, weight) in tensor.strands() {
        if let Err(err) = check_strand(tensor.profile(), strand) {
            violations.push(Violation::Malformed(err));
        }
        if weight.is_negative() {
            violations.push(Violation::NegativeWeight {
                strand: strand.clone(),
                weight: weight.clone(),
            });
        }
        totals
            .entry(&strand.from)
            .and_modify(|t| *t = t.add(weight))
            .or_insert_with(|| weight.clone());
    }

    for (point, total) in totals {
        if !total.is_one() {
            violations.push(Violation::Mass {
                point: point.clone(),
                total,
            });
        }
    }

    if violations.is_empty() {
        MarkovReport::Markov
    } else {
        MarkovReport::Violated(violations)
    }
}

/// Whether `tensor` is a stochastic map (exact equality, no tolerance).
pub fn is_markov<S: OrderedSemiring>(tensor: &Tensor<S>) -> bool {
    check_markov(tensor).is_markov()
}
