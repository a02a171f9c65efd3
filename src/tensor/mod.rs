//! Markov tensors: sparse stochastic maps between finite product spaces
//!
//! A tensor with profile (A₀ ⊗ … ⊗ Aₙ₋₁ → B₀ ⊗ … ⊗ Bₘ₋₁) assigns a weight in
//! an ordered semifield S to every pair of lattice points (a, b). We store
//! only non-zero weights; each stored pair is a *strand*.
//!
//! A tensor is *Markov* when the weights leaving every domain point sum to
//! one. Markov tensors form a Markov category:
//! - **composition** (`;`): Chapman–Kolmogorov, Σ_b F(a,b)·G(b,c)
//! - **tensor_product** (⊗): parallel product, F(a₁,b₁)·G(a₂,b₂)
//! - **swap** is the braiding, **copy** (Δ) and **discard** (!) the
//!   comonoid structure on every object
//!
//! On top of these sit the probability operators: jointification,
//! conditionalization, marginalization and Bayesian conversion.
//!
//! # Architecture
//!
//! - **semiring**: Exact weight types (ordered semifields)
//! - **lattice**: Finite sets, labels, Cartesian enumeration
//! - **sparse**: Tensor storage (BTreeMap keyed by strand)
//! - **builder**: Hand-written tensors from label literals
//! - **morphism**: identity, copy, discard, swap
//! - **algebra**: composition, tensor product, partial composition
//! - **probability**: jointify, conditionalize, marginals, convert
//! - **check**: Markov-property validation

pub mod algebra;
mod builder;
mod check;
pub mod lattice;
mod morphism;
pub mod probability;
pub mod semiring;
mod sparse;

// Re-export main types
pub use algebra::{composition, evolve, partial_composition, tensor_product};
pub use builder::TensorBuilder;
pub use check::{check_markov, is_markov, MarkovReport, Violation};
pub use lattice::{cartesian, concat, index_range, point, points, FiniteSet, Label, LatticePoint};
pub use morphism::{copy, discard, identity, swap};
pub use probability::{
    conditionalize, convert, first_marginalization, jointify, second_marginalization,
};
pub use semiring::{OrderedSemifield, OrderedSemiring, Rational};
pub use sparse::{Profile, Strand, Tensor};
