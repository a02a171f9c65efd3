//! Canonical morphisms built from shapes alone.
//!
//! Each constructor walks the whole product space of its shape, so the
//! result has one strand per lattice point.

use tracing::debug;

use super::lattice::{concat, points, FiniteSet};
use super::semiring::OrderedSemiring;
use super::sparse::{Profile, Strand, Tensor};

/// The identity on `shape`: weight 1 at `(x, x)`.
pub fn identity<S: OrderedSemiring>(shape: &[FiniteSet]) -> Tensor<S> {
    let strands = points(shape).map(|x| (Strand::new(x.clone(), x), S::one()));
    let result = Tensor::new(Profile::new(shape.to_vec(), shape.to_vec()), strands);
    debug!(strands = result.len(), "identity");
    result
}

/// The copy map Δ: `shape → shape ⊗ shape`, weight 1 at `(x, x++x)`.
pub fn copy<S: OrderedSemiring>(shape: &[FiniteSet]) -> Tensor<S> {
    let strands = points(shape).map(|x| {
        let doubled = concat_points(&x, &x);
        (Strand::new(x, doubled), S::one())
    });
    let result = Tensor::new(Profile::new(shape.to_vec(), concat(shape, shape)), strands);
    debug!(strands = result.len(), "copy");
    result
}

/// The discard map !: `shape → ()`, weight 1 at `(x, ())`.
pub fn discard<S: OrderedSemiring>(shape: &[FiniteSet]) -> Tensor<S> {
    let strands = points(shape).map(|x| (Strand::new(x, vec![]), S::one()));
    let result = Tensor::new(Profile::new(shape.to_vec(), vec![]), strands);
    debug!(strands = result.len(), "discard");
    result
}

/// The braiding `a ⊗ b → b ⊗ a`, weight 1 at `(p++q, q++p)`.
pub fn swap<S: OrderedSemiring>(a: &[FiniteSet], b: &[FiniteSet]) -> Tensor<S> {
    let strands = points(&concat(a, b)).map(|x| {
        let (p, q) = x.split_at(a.len());
        let swapped = concat_points(q, p);
        (Strand::new(x, swapped), S::one())
    });
    let result = Tensor::new(Profile::new(concat(a, b), concat(b, a)), strands);
    debug!(strands = result.len(), "swap");
    result
}

fn concat_points<T: Clone>(p: &[T], q: &[T]) -> Vec<T> {
    p.iter().chain(q).cloned().collect()
}
