//! fxtens: sparse exact-weight Markov tensors
//!
//! A tensor is a finite stochastic map between products of finite sets,
//! stored sparsely with exact rational weights. The crate provides the
//! structure of a Markov category over such maps (composition, tensor
//! product, copy, discard, swap) and the probability operators built on
//! it: joint laws, conditioning, marginals and Bayesian inversion.

pub mod error;
pub mod naming;
pub mod pretty;
pub mod tensor;

pub use error::{Side, TensorError, TensorResult};
pub use naming::{index_to_label, label_to_index, LabelTable, LabelTables};
pub use pretty::{render_tensor, render_tensor_with, PrettyConfig};
pub use tensor::{
    check_markov, composition, conditionalize, convert, copy, discard, evolve,
    first_marginalization, identity, is_markov, jointify, partial_composition, point,
    second_marginalization, swap, tensor_product, FiniteSet, Label, LatticePoint, MarkovReport,
    OrderedSemifield, OrderedSemiring, Profile, Rational, Strand, Tensor, TensorBuilder,
    Violation,
};
