//! Probability operators built from the combinators.
//!
//! Split positions count factors: `split` is the number of leading
//! codomain factors that form the first part, as in `slice::split_at`.
//! For a joint law `J : () → A ⊗ B`, `split = A.len()`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::error::{TensorError, TensorResult};

use super::algebra::{composition, tensor_product};
use super::lattice::{concat, points, FiniteSet, LatticePoint};
use super::morphism::{discard, identity, swap};
use super::semiring::{OrderedSemifield, OrderedSemiring};
use super::sparse::{accumulate, Profile, Strand, Tensor};

/// Joint law of a channel's input and output.
///
/// With `p : X → A` and `f : A → B`, returns `X → A ⊗ B` with weight
/// `(x, a++b) = p(x, a) ⊗ f(a, b)`. For a state `p : () → A` this is the
/// joint distribution of `(a, b)`.
pub fn jointify<S: OrderedSemiring>(p: &Tensor<S>, f: &Tensor<S>) -> TensorResult<Tensor<S>> {
    if p.codomain() != f.domain() {
        return Err(TensorError::NotComposable {
            left: p.codomain().to_vec(),
            right: f.domain().to_vec(),
        });
    }
    p.check_well_formed()?;
    f.check_well_formed()?;

    let mut outgoing: HashMap<&LatticePoint, Vec<(&LatticePoint, &S)>> = HashMap::new();
    for (strand, weight) in f.strands() {
        outgoing
            .entry(&strand.from)
            .or_default()
            .push((&strand.to, weight));
    }

    let mut strands = BTreeMap::new();
    for (p_strand, p_weight) in p.strands() {
        let Some(targets) = outgoing.get(&p_strand.to) else {
            continue;
        };
        for &(b, f_weight) in targets {
            let to: LatticePoint = p_strand.to.iter().chain(b).cloned().collect();
            let weight = p_weight.mul(f_weight);
            trace!(from = ?p_strand.from, ?to, %weight, "jointify: strand");
            accumulate(&mut strands, Strand::new(p_strand.from.clone(), to), weight);
        }
    }

    let profile = Profile::new(p.domain().to_vec(), concat(p.codomain(), f.codomain()));
    let result = Tensor::from_accumulated(profile, strands);
    debug!(state = p.len(), kernel = f.len(), result = result.len(), "jointify");
    Ok(result)
}

/// Recover a kernel from a joint law by normalizing.
///
/// With `j : X → A ⊗ B` (A the first `split` codomain factors), returns
/// `X ⊗ A → B` with weight `(x++a, b) = j(x, a++b) / Σ_b' j(x, a++b')`.
/// Every `x` with a stored strand must give each `a` positive mass; an
/// `(x, a)` with zero total mass has no conditional and fails with
/// [`TensorError::DivisionByZero`]. Rows `x` with no strands at all are
/// skipped.
pub fn conditionalize<S: OrderedSemifield>(
    j: &Tensor<S>,
    split: usize,
) -> TensorResult<Tensor<S>> {
    let (a, b) = split_codomain(j, split)?;
    j.check_well_formed()?;

    let condition = |strand: &Strand| -> LatticePoint {
        strand.from.iter().chain(&strand.to[..split]).cloned().collect()
    };

    // Total mass of every conditioning point
    let mut mass: BTreeMap<LatticePoint, S> = BTreeMap::new();
    for (strand, weight) in j.strands() {
        mass.entry(condition(strand))
            .and_modify(|m| *m = m.add(weight))
            .or_insert_with(|| weight.clone());
    }

    // An event that never occurs under a live row cannot be conditioned on
    let sources: BTreeSet<&LatticePoint> = j.strands().map(|(strand, _)| &strand.from).collect();
    for x in sources {
        for event in points(&a) {
            let given: LatticePoint = x.iter().chain(&event).cloned().collect();
            if !mass.contains_key(&given) {
                return Err(TensorError::DivisionByZero { point: given });
            }
        }
    }

    let mut strands = BTreeMap::new();
    for (strand, weight) in j.strands() {
        let given = condition(strand);
        let total = mass.get(&given).cloned().unwrap_or_else(S::zero);
        let Some(normalized) = weight.checked_div(&total) else {
            return Err(TensorError::DivisionByZero { point: given });
        };
        trace!(?given, to = ?&strand.to[split..], %normalized, "conditionalize: strand");
        strands.insert(Strand::new(given, strand.to[split..].to_vec()), normalized);
    }

    let profile = Profile::new(concat(j.domain(), &a), b);
    let result = Tensor::from_accumulated(profile, strands);
    debug!(joint = j.len(), result = result.len(), "conditionalize");
    Ok(result)
}

/// Marginal on the first part: `j ; (id_A ⊗ !_B)`.
pub fn first_marginalization<S: OrderedSemiring>(
    j: &Tensor<S>,
    split: usize,
) -> TensorResult<Tensor<S>> {
    let (a, b) = split_codomain(j, split)?;
    let keep_first = tensor_product(&identity(&a), &discard(&b))?;
    composition(j, &keep_first)
}

/// Marginal on the second part: `j ; (!_A ⊗ id_B)`.
pub fn second_marginalization<S: OrderedSemiring>(
    j: &Tensor<S>,
    split: usize,
) -> TensorResult<Tensor<S>> {
    let (a, b) = split_codomain(j, split)?;
    let keep_second = tensor_product(&discard(&a), &identity(&b))?;
    composition(j, &keep_second)
}

/// Bayesian inversion of a channel under a prior.
///
/// With a prior `p : () → A` and likelihood `f : A → B`, forms the joint
/// law, swaps it to `() → B ⊗ A` and conditions on `B`, giving the
/// posterior kernel `B → A`. An output `b` that the prior makes impossible
/// has no posterior and fails with [`TensorError::DivisionByZero`].
pub fn convert<S: OrderedSemifield>(p: &Tensor<S>, f: &Tensor<S>) -> TensorResult<Tensor<S>> {
    let joint = jointify(p, f)?;
    let (a, b) = (f.domain(), f.codomain());
    let swapped = composition(&joint, &swap(a, b))?;
    conditionalize(&swapped, b.len())
}

fn split_codomain<S: OrderedSemiring>(
    j: &Tensor<S>,
    split: usize,
) -> TensorResult<(Vec<FiniteSet>, Vec<FiniteSet>)> {
    let arity = j.codomain().len();
    if split > arity {
        return Err(TensorError::SplitOutOfRange { split, arity });
    }
    let (a, b) = j.codomain().split_at(split);
    Ok((a.to_vec(), b.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::builder::TensorBuilder;
    use crate::tensor::check::is_markov;
    use crate::tensor::lattice::point;
    use crate::tensor::semiring::Rational;

    fn mw() -> Vec<FiniteSet> {
        vec![FiniteSet::labeled(["M", "W"])]
    }

    fn hml() -> Vec<FiniteSet> {
        vec![FiniteSet::labeled(["H", "M", "L"])]
    }

    fn prior() -> Tensor {
        TensorBuilder::state(mw())
            .outcome_ratio(["M"], 1, 2)
            .outcome_ratio(["W"], 1, 2)
            .build()
            .unwrap()
    }

    fn likelihood() -> Tensor {
        TensorBuilder::new(mw(), hml())
            .ratio(["M"], ["H"], 2, 10)
            .ratio(["M"], ["M"], 6, 10)
            .ratio(["M"], ["L"], 2, 10)
            .ratio(["W"], ["H"], 1, 10)
            .ratio(["W"], ["M"], 5, 10)
            .ratio(["W"], ["L"], 4, 10)
            .build()
            .unwrap()
    }

    #[test]
    fn test_jointify_profile_and_weights() {
        let joint = jointify(&prior(), &likelihood()).unwrap();
        assert!(joint.profile().is_state());
        assert_eq!(joint.codomain(), &concat(&mw(), &hml())[..]);
        assert_eq!(joint.len(), 6);
        assert_eq!(joint.weight(&[], &point(["W", "L"])), Rational::ratio(1, 5));
        assert!(is_markov(&joint));
    }

    #[test]
    fn test_jointify_not_composable() {
        assert!(matches!(
            jointify(&likelihood(), &likelihood()),
            Err(TensorError::NotComposable { .. })
        ));
    }

    #[test]
    fn test_conditionalize_recovers_kernel() {
        let joint = jointify(&prior(), &likelihood()).unwrap();
        assert_eq!(conditionalize(&joint, 1).unwrap(), likelihood());
    }

    #[test]
    fn test_conditionalize_cancelling_weights() {
        // Signed weights that cancel leave a stored point with zero mass
        let j: Tensor = Tensor::new(
            Profile::state(vec![FiniteSet::cardinal(1), FiniteSet::cardinal(2)]),
            vec![
                (Strand::new(vec![], point([1usize, 1])), Rational::ratio(1, 2)),
                (Strand::new(vec![], point([1usize, 2])), Rational::ratio(-1, 2)),
            ],
        );
        assert_eq!(
            conditionalize(&j, 1),
            Err(TensorError::DivisionByZero { point: point([1usize]) })
        );
    }

    #[test]
    fn test_conditionalize_split_out_of_range() {
        let joint = jointify(&prior(), &likelihood()).unwrap();
        assert!(matches!(
            conditionalize(&joint, 3),
            Err(TensorError::SplitOutOfRange { split: 3, arity: 2 })
        ));
    }

    #[test]
    fn test_marginals_of_joint() {
        let joint = jointify(&prior(), &likelihood()).unwrap();

        let first = first_marginalization(&joint, 1).unwrap();
        assert_eq!(first, prior());

        let second = second_marginalization(&joint, 1).unwrap();
        assert_eq!(second.codomain(), &hml()[..]);
        assert_eq!(second.weight(&[], &point(["H"])), Rational::ratio(3, 20));
        assert_eq!(second.weight(&[], &point(["M"])), Rational::ratio(11, 20));
        assert_eq!(second.weight(&[], &point(["L"])), Rational::ratio(3, 10));
    }

    #[test]
    fn test_convert_bayes() {
        let posterior = convert(&prior(), &likelihood()).unwrap();
        assert_eq!(posterior.domain(), &hml()[..]);
        assert_eq!(posterior.codomain(), &mw()[..]);

        let w = |obs: &str, cause: &str| posterior.weight(&point([obs]), &point([cause]));
        assert_eq!(w("H", "M"), Rational::ratio(2, 3));
        assert_eq!(w("H", "W"), Rational::ratio(1, 3));
        assert_eq!(w("M", "M"), Rational::ratio(6, 11));
        assert_eq!(w("M", "W"), Rational::ratio(5, 11));
        assert_eq!(w("L", "M"), Rational::ratio(1, 3));
        assert_eq!(w("L", "W"), Rational::ratio(2, 3));
        assert!(is_markov(&posterior));
    }

    fn certain_man() -> Tensor {
        TensorBuilder::state(mw()).outcome_ratio(["M"], 1, 1).build().unwrap()
    }

    fn skirt() -> Tensor {
        TensorBuilder::new(mw(), vec![FiniteSet::labeled(["S+", "S-"])])
            .ratio(["M"], ["S-"], 1, 1)
            .ratio(["W"], ["S+"], 1, 1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_convert_impossible_output() {
        // Nobody in a skirt can be observed when the prior rules out W
        assert_eq!(
            convert(&certain_man(), &skirt()),
            Err(TensorError::DivisionByZero { point: point(["S+"]) })
        );
    }

    #[test]
    fn test_conditionalize_zero_mass_event() {
        let joint = jointify(&certain_man(), &skirt()).unwrap();
        assert_eq!(joint.len(), 1);
        assert_eq!(
            conditionalize(&joint, 1),
            Err(TensorError::DivisionByZero { point: point(["W"]) })
        );
    }

    #[test]
    fn test_conditionalize_skips_empty_rows() {
        // Row 2 carries no strands, so only row 1 must cover every event
        let j: Tensor = TensorBuilder::new(
            vec![FiniteSet::cardinal(2)],
            vec![FiniteSet::cardinal(1), FiniteSet::cardinal(2)],
        )
        .ratio([1usize], [1usize, 2], 1, 1)
        .build()
        .unwrap();
        let k = conditionalize(&j, 1).unwrap();
        assert_eq!(k.len(), 1);
        assert_eq!(k.weight(&point([1usize, 1]), &point([2usize])), Rational::ratio(1, 1));
    }

    #[test]
    fn test_malformed_strands_are_rejected() {
        let rogue: Tensor = Tensor::new(
            Profile::state(mw()),
            vec![(Strand::new(vec![], point(["X"])), Rational::ratio(1, 1))],
        );
        let malformed = |r: TensorResult<Tensor>| {
            matches!(r, Err(TensorError::MalformedLatticePoint { .. }))
        };
        assert!(malformed(jointify(&rogue, &likelihood())));
        assert!(malformed(conditionalize(&rogue, 1)));
    }

    #[test]
    fn test_conditionalize_keeps_domain() {
        // j : 2 → 2 ⊗ 2, conditioning on the first codomain factor gives 2 ⊗ 2 → 2
        let j: Tensor = TensorBuilder::new(
            vec![FiniteSet::cardinal(2)],
            vec![FiniteSet::cardinal(2), FiniteSet::cardinal(2)],
        )
        .ratio([1usize], [1usize, 1], 1, 4)
        .ratio([1usize], [1usize, 2], 1, 4)
        .ratio([1usize], [2usize, 2], 1, 2)
        .ratio([2usize], [1usize, 1], 1, 2)
        .ratio([2usize], [2usize, 1], 1, 2)
        .build()
        .unwrap();
        let k = conditionalize(&j, 1).unwrap();
        assert_eq!(k.domain().len(), 2);
        assert_eq!(k.codomain().len(), 1);
        assert_eq!(k.weight(&point([1usize, 1]), &point([2usize])), Rational::ratio(1, 2));
        assert_eq!(k.weight(&point([1usize, 2]), &point([2usize])), Rational::ratio(1, 1));
        assert_eq!(k.weight(&point([2usize, 1]), &point([1usize])), Rational::ratio(1, 1));
        assert!(is_markov(&k));
    }
}
