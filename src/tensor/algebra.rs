//! Binary combinators: composition and the parallel (tensor) product.
//!
//! These are the two operations of the symmetric monoidal structure. Both
//! read their operands by reference and materialize a new tensor; an
//! operand may appear in any number of derivations.
//!
//! Every strand product that lands in a result is reported as a `trace`
//! event and every finished operation as a `debug` event, so a subscriber
//! can follow a derivation step by step.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::error::{TensorError, TensorResult};

use super::lattice::{concat, Label, LatticePoint};
use super::morphism::identity;
use super::semiring::OrderedSemiring;
use super::sparse::{accumulate, Profile, Strand, Tensor};

/// Sequential composition `f ; g` (Chapman–Kolmogorov).
///
/// Requires `f.codomain == g.domain`. The result maps `f.domain` to
/// `g.codomain` with weight `(a, c) = Σ_b f(a, b) ⊗ g(b, c)`. Only stored
/// strands are paired, so zero-weight middle points never enter the sum.
pub fn composition<S: OrderedSemiring>(f: &Tensor<S>, g: &Tensor<S>) -> TensorResult<Tensor<S>> {
    if f.codomain() != g.domain() {
        return Err(TensorError::NotComposable {
            left: f.codomain().to_vec(),
            right: g.domain().to_vec(),
        });
    }
    f.check_well_formed()?;
    g.check_well_formed()?;

    // Index g's strands by their domain point
    let mut outgoing: HashMap<&LatticePoint, Vec<(&LatticePoint, &S)>> = HashMap::new();
    for (strand, weight) in g.strands() {
        outgoing
            .entry(&strand.from)
            .or_default()
            .push((&strand.to, weight));
    }

    let mut strands = BTreeMap::new();
    for (f_strand, f_weight) in f.strands() {
        let Some(targets) = outgoing.get(&f_strand.to) else {
            continue;
        };
        for &(to, g_weight) in targets {
            let weight = f_weight.mul(g_weight);
            trace!(
                from = ?f_strand.from,
                via = ?f_strand.to,
                to = ?to,
                %weight,
                "composition: accumulate"
            );
            accumulate(&mut strands, Strand::new(f_strand.from.clone(), to.clone()), weight);
        }
    }

    let profile = Profile::new(f.domain().to_vec(), g.codomain().to_vec());
    let result = Tensor::from_accumulated(profile, strands);
    debug!(
        left = f.len(),
        right = g.len(),
        result = result.len(),
        "composition"
    );
    Ok(result)
}

/// Parallel product `f ⊗ g`.
///
/// Domains and codomains concatenate; the weight of the combined strand is
/// `f(a₁, b₁) ⊗ g(a₂, b₂)` for every pair of stored strands, so the result
/// has exactly `f.len() * g.len()` strands.
pub fn tensor_product<S: OrderedSemiring>(
    f: &Tensor<S>,
    g: &Tensor<S>,
) -> TensorResult<Tensor<S>> {
    f.check_well_formed()?;
    g.check_well_formed()?;

    let profile = Profile::new(
        concat(f.domain(), g.domain()),
        concat(f.codomain(), g.codomain()),
    );

    // Cartesian product of non-zero entries
    let mut strands = BTreeMap::new();
    for (f_strand, f_weight) in f.strands() {
        for (g_strand, g_weight) in g.strands() {
            let from = concat_points(&f_strand.from, &g_strand.from);
            let to = concat_points(&f_strand.to, &g_strand.to);
            let weight = f_weight.mul(g_weight);
            trace!(?from, ?to, %weight, "tensor_product: strand");
            strands.insert(Strand::new(from, to), weight);
        }
    }

    let result = Tensor::from_accumulated(profile, strands);
    debug!(
        left = f.len(),
        right = g.len(),
        result = result.len(),
        "tensor_product"
    );
    Ok(result)
}

/// Apply `g` to the leading part of `f`'s codomain.
///
/// With `f : A → B ⊗ C` where `B` is the first `split` codomain factors and
/// `g : B → D`, returns `f ; (g ⊗ id_C) : A → D ⊗ C`.
pub fn partial_composition<S: OrderedSemiring>(
    f: &Tensor<S>,
    g: &Tensor<S>,
    split: usize,
) -> TensorResult<Tensor<S>> {
    let arity = f.codomain().len();
    if split > arity {
        return Err(TensorError::SplitOutOfRange { split, arity });
    }
    let rest = &f.codomain()[split..];
    let lifted = tensor_product(g, &identity(rest))?;
    composition(f, &lifted)
}

/// Advance `state` through `kernel` for `steps` steps.
///
/// Returns `state ; kernel ; … ; kernel`; zero steps returns `state` itself.
pub fn evolve<S: OrderedSemiring>(
    state: &Tensor<S>,
    kernel: &Tensor<S>,
    steps: usize,
) -> TensorResult<Tensor<S>> {
    let mut current = state.clone();
    for step in 0..steps {
        current = composition(&current, kernel)?;
        trace!(step = step + 1, strands = current.len(), "evolve");
    }
    Ok(current)
}

fn concat_points(p: &[Label], q: &[Label]) -> LatticePoint {
    p.iter().chain(q).cloned().collect()
}
