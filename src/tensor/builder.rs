//! Builder for hand-written tensors.
//!
//! Tables of conditional probabilities are usually typed in by hand; the
//! builder takes label literals and checks every strand against the profile
//! when the tensor is built.

use crate::error::{TensorError, TensorResult};

use super::lattice::{point, FiniteSet, Label};
use super::semiring::{OrderedSemifield, OrderedSemiring, Rational};
use super::sparse::{Profile, Strand, Tensor};

/// Incremental tensor construction from label literals.
///
/// ```ignore
/// let season_temp = TensorBuilder::new(
///     vec![FiniteSet::labeled(["summer", "winter"])],
///     vec![FiniteSet::labeled(["hot", "cold"])],
/// )
/// .ratio(["summer"], ["hot"], 8, 10)
/// .ratio(["summer"], ["cold"], 2, 10)
/// .ratio(["winter"], ["hot"], 7, 10)
/// .ratio(["winter"], ["cold"], 3, 10)
/// .build()?;
/// ```
#[derive(Clone, Debug)]
pub struct TensorBuilder<S: OrderedSemiring = Rational> {
    profile: Profile,
    entries: Vec<(Strand, S)>,
    /// First strand given a `numer / 0` weight
    zero_denominator: Option<Strand>,
}

impl<S: OrderedSemiring> TensorBuilder<S> {
    pub fn new(domain: Vec<FiniteSet>, codomain: Vec<FiniteSet>) -> Self {
        Self {
            profile: Profile::new(domain, codomain),
            entries: vec![],
            zero_denominator: None,
        }
    }

    /// Builder for a state (distribution over `codomain`)
    pub fn state(codomain: Vec<FiniteSet>) -> Self {
        Self {
            profile: Profile::state(codomain),
            entries: vec![],
            zero_denominator: None,
        }
    }

    /// Add a strand
    pub fn strand<L, M>(
        mut self,
        from: impl IntoIterator<Item = L>,
        to: impl IntoIterator<Item = M>,
        weight: S,
    ) -> Self
    where
        L: Into<Label>,
        M: Into<Label>,
    {
        self.entries
            .push((Strand::new(point(from), point(to)), weight));
        self
    }

    /// Add a strand leaving the empty domain point (for states)
    pub fn outcome<M: Into<Label>>(mut self, to: impl IntoIterator<Item = M>, weight: S) -> Self {
        self.entries.push((Strand::new(vec![], point(to)), weight));
        self
    }

    /// Build, rejecting strands that are not elements of the profile and
    /// weights with a zero denominator
    pub fn build(self) -> TensorResult<Tensor<S>> {
        if let Some(strand) = self.zero_denominator {
            return Err(TensorError::ZeroDenominator { strand });
        }
        let tensor = Tensor::new(self.profile, self.entries);
        tensor.check_well_formed()?;
        Ok(tensor)
    }
}

impl<S: OrderedSemifield> TensorBuilder<S> {
    /// Add a strand with weight `numer / denom`.
    ///
    /// A zero `denom` is recorded and reported by [`TensorBuilder::build`].
    pub fn ratio<L, M>(
        mut self,
        from: impl IntoIterator<Item = L>,
        to: impl IntoIterator<Item = M>,
        numer: i64,
        denom: i64,
    ) -> Self
    where
        L: Into<Label>,
        M: Into<Label>,
    {
        if denom == 0 {
            self.zero_denominator
                .get_or_insert_with(|| Strand::new(point(from), point(to)));
            return self;
        }
        self.strand(from, to, S::ratio(numer, denom))
    }

    /// Add a state outcome with weight `numer / denom`
    pub fn outcome_ratio<M: Into<Label>>(
        self,
        to: impl IntoIterator<Item = M>,
        numer: i64,
        denom: i64,
    ) -> Self {
        self.ratio(Vec::<Label>::new(), to, numer, denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_kernel() {
        let t: Tensor = TensorBuilder::new(
            vec![FiniteSet::labeled(["黒", "白"])],
            vec![FiniteSet::labeled(["赤", "緑", "青"])],
        )
        .ratio(["黒"], ["赤"], 1, 10)
        .ratio(["黒"], ["緑"], 2, 10)
        .ratio(["黒"], ["青"], 7, 10)
        .build()
        .unwrap();

        assert_eq!(t.len(), 3);
        assert_eq!(t.weight(&point(["黒"]), &point(["青"])), Rational::ratio(7, 10));
    }

    #[test]
    fn test_build_state() {
        let t: Tensor = TensorBuilder::state(vec![FiniteSet::cardinal(2)])
            .outcome_ratio([1usize], 1, 4)
            .outcome_ratio([2usize], 3, 4)
            .build()
            .unwrap();
        assert!(t.profile().is_state());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_build_rejects_unknown_label() {
        let result: TensorResult<Tensor> = TensorBuilder::new(
            vec![FiniteSet::labeled(["M", "W"])],
            vec![FiniteSet::cardinal(2)],
        )
        .ratio(["X"], [1usize], 1, 1)
        .build();
        assert!(matches!(result, Err(TensorError::MalformedLatticePoint { .. })));
    }

    #[test]
    fn test_build_rejects_zero_denominator() {
        let result: TensorResult<Tensor> = TensorBuilder::state(vec![FiniteSet::labeled(["M", "W"])])
            .outcome_ratio(["M"], 1, 0)
            .outcome_ratio(["W"], 1, 2)
            .build();
        assert_eq!(
            result,
            Err(TensorError::ZeroDenominator {
                strand: Strand::new(vec![], point(["M"])),
            })
        );
    }
}
