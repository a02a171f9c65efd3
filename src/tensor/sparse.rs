//! Sparse weighted tensors (materialized).

use std::collections::BTreeMap;

use crate::error::{Side, TensorError, TensorResult};

use super::lattice::{point_defect, FiniteSet, Label, LatticePoint};
use super::semiring::{OrderedSemiring, Rational};

/// The domain and codomain factor sequences of a tensor.
///
/// An empty sequence is the one-point (terminal) object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub domain: Vec<FiniteSet>,
    pub codomain: Vec<FiniteSet>,
}

impl Profile {
    pub fn new(domain: Vec<FiniteSet>, codomain: Vec<FiniteSet>) -> Self {
        Self { domain, codomain }
    }

    /// Profile of a state (distribution): empty domain
    pub fn state(codomain: Vec<FiniteSet>) -> Self {
        Self {
            domain: vec![],
            codomain,
        }
    }

    /// Whether this is the profile of a state
    pub fn is_state(&self) -> bool {
        self.domain.is_empty()
    }
}

/// A strand key: a domain lattice point paired with a codomain lattice point.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strand {
    pub from: LatticePoint,
    pub to: LatticePoint,
}

impl Strand {
    pub fn new(from: LatticePoint, to: LatticePoint) -> Self {
        Self { from, to }
    }
}

/// A sparse tensor over semiring S: a stochastic map between finite
/// product spaces.
///
/// Stores only strands with non-zero weight; an absent strand has weight
/// zero. Tensors are values: every operation reads its inputs by reference
/// and builds a fresh result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tensor<S: OrderedSemiring = Rational> {
    profile: Profile,
    strands: BTreeMap<Strand, S>,
}

impl<S: OrderedSemiring> Tensor<S> {
    /// Create a tensor from a profile and explicit strands.
    ///
    /// Zero weights are dropped. A repeated strand keeps its last weight.
    /// Keys are not checked against the profile here; see
    /// [`Tensor::check_well_formed`].
    pub fn new(profile: Profile, entries: impl IntoIterator<Item = (Strand, S)>) -> Self {
        let mut strands = BTreeMap::new();
        for (strand, weight) in entries {
            if weight.is_zero() {
                strands.remove(&strand);
            } else {
                strands.insert(strand, weight);
            }
        }
        Self { profile, strands }
    }

    /// The tensor with no strands (everywhere zero)
    pub fn zero(profile: Profile) -> Self {
        Self {
            profile,
            strands: BTreeMap::new(),
        }
    }

    /// Wrap an accumulated strand map, dropping entries that summed to zero
    pub(crate) fn from_accumulated(profile: Profile, mut strands: BTreeMap<Strand, S>) -> Self {
        strands.retain(|_, w| !w.is_zero());
        Self { profile, strands }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn domain(&self) -> &[FiniteSet] {
        &self.profile.domain
    }

    pub fn codomain(&self) -> &[FiniteSet] {
        &self.profile.codomain
    }

    /// Number of stored (non-zero) strands
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    /// Check if empty (all zero)
    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    /// Iterate over stored strands in key order
    pub fn strands(&self) -> impl Iterator<Item = (&Strand, &S)> {
        self.strands.iter()
    }

    /// Weight of a stored strand
    pub fn get(&self, strand: &Strand) -> Option<&S> {
        self.strands.get(strand)
    }

    /// Weight at `(from, to)`, zero when no strand is stored
    pub fn weight(&self, from: &[Label], to: &[Label]) -> S {
        self.strands
            .get(&Strand::new(from.to_vec(), to.to_vec()))
            .cloned()
            .unwrap_or_else(S::zero)
    }

    /// Check that every strand key is an element of the declared product
    /// spaces: right arity, and every label in its factor.
    pub fn check_well_formed(&self) -> TensorResult<()> {
        for strand in self.strands.keys() {
            check_strand(&self.profile, strand)?;
        }
        Ok(())
    }
}

/// Validate one strand key against a profile
pub(crate) fn check_strand(profile: &Profile, strand: &Strand) -> TensorResult<()> {
    if let Some(reason) = point_defect(&profile.domain, &strand.from) {
        return Err(TensorError::MalformedLatticePoint {
            strand: strand.clone(),
            side: Side::Domain,
            reason,
        });
    }
    if let Some(reason) = point_defect(&profile.codomain, &strand.to) {
        return Err(TensorError::MalformedLatticePoint {
            strand: strand.clone(),
            side: Side::Codomain,
            reason,
        });
    }
    Ok(())
}

/// Add `weight` into the strand at `key`
pub(crate) fn accumulate<S: OrderedSemiring>(
    strands: &mut BTreeMap<Strand, S>,
    key: Strand,
    weight: S,
) {
    strands
        .entry(key)
        .and_modify(|w| *w = w.add(&weight))
        .or_insert(weight);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::lattice::point;
    use crate::tensor::semiring::OrderedSemifield;

    fn coin() -> Tensor {
        Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(2)]),
            vec![
                (Strand::new(vec![], point([1usize])), Rational::ratio(1, 2)),
                (Strand::new(vec![], point([2usize])), Rational::ratio(1, 2)),
            ],
        )
    }

    #[test]
    fn test_zero_weights_not_stored() {
        let t: Tensor = Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(2)]),
            vec![
                (Strand::new(vec![], point([1usize])), Rational::ratio(1, 1)),
                (Strand::new(vec![], point([2usize])), Rational::ratio(0, 1)),
            ],
        );
        assert_eq!(t.len(), 1);
        assert_eq!(t.weight(&[], &point([2usize])), Rational::ratio(0, 1));
        assert_eq!(t.weight(&[], &point([1usize])), Rational::ratio(1, 1));
    }

    #[test]
    fn test_repeated_strand_keeps_last() {
        let key = Strand::new(vec![], point([1usize]));
        let t: Tensor = Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(1)]),
            vec![
                (key.clone(), Rational::ratio(1, 3)),
                (key.clone(), Rational::ratio(1, 1)),
            ],
        );
        assert_eq!(t.get(&key), Some(&Rational::ratio(1, 1)));

        let cleared: Tensor = Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(1)]),
            vec![(key.clone(), Rational::ratio(1, 1)), (key, Rational::ratio(0, 1))],
        );
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(coin(), coin());
        let other: Tensor = Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(2)]),
            vec![(Strand::new(vec![], point([1usize])), Rational::ratio(1, 1))],
        );
        assert_ne!(coin(), other);
    }

    #[test]
    fn test_check_well_formed() {
        assert!(coin().check_well_formed().is_ok());

        let bad_label: Tensor = Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(2)]),
            vec![(Strand::new(vec![], point([3usize])), Rational::ratio(1, 1))],
        );
        assert!(matches!(
            bad_label.check_well_formed(),
            Err(TensorError::MalformedLatticePoint { side: Side::Codomain, .. })
        ));

        let bad_arity: Tensor = Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(2)]),
            vec![(Strand::new(point([1usize]), point([1usize])), Rational::ratio(1, 1))],
        );
        assert!(matches!(
            bad_arity.check_well_formed(),
            Err(TensorError::MalformedLatticePoint { side: Side::Domain, .. })
        ));
    }

    #[test]
    fn test_accumulate() {
        let mut strands = BTreeMap::new();
        let key = Strand::new(vec![], vec![]);
        accumulate(&mut strands, key.clone(), Rational::ratio(1, 4));
        accumulate(&mut strands, key.clone(), Rational::ratio(3, 4));
        assert_eq!(strands[&key], Rational::ratio(1, 1));
    }
}
