//! Pretty-printer for tensors
//!
//! Renders a tensor as a profile line followed by one line per strand:
//!
//! ```text
//! profile: [[夏, 冬]] -> [[暑い, 寒い]]
//! [[夏], [暑い]] 4/5
//! [[夏], [寒い]] 1/5
//! ```

use std::fmt;

use crate::tensor::{points, FiniteSet, Label, OrderedSemiring, Tensor};

/// Pretty-print configuration
#[derive(Clone, Copy, Debug, Default)]
pub struct PrettyConfig {
    /// Print every (domain, codomain) pair of the profile, zeros included,
    /// instead of only the stored strands
    pub dense: bool,
}

/// A pretty-printer accumulating into a string
pub struct Pretty {
    output: String,
    config: PrettyConfig,
}

impl Default for Pretty {
    fn default() -> Self {
        Self::new()
    }
}

impl Pretty {
    pub fn new() -> Self {
        Self::with_config(PrettyConfig::default())
    }

    pub fn with_config(config: PrettyConfig) -> Self {
        Self {
            output: String::new(),
            config,
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }

    fn list<T>(&mut self, items: &[T], mut item: impl FnMut(&mut Self, &T)) {
        self.write("[");
        for (i, x) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            item(self, x);
        }
        self.write("]");
    }

    fn factors(&mut self, factors: &[FiniteSet]) {
        self.list(factors, |p, factor| p.write(&factor.to_string()));
    }

    fn point(&mut self, point: &[Label]) {
        self.list(point, |p, label| p.write(&label.to_string()));
    }

    fn strand<S: OrderedSemiring>(&mut self, from: &[Label], to: &[Label], weight: &S) {
        self.write("[");
        self.point(from);
        self.write(", ");
        self.point(to);
        self.write("] ");
        self.write(&weight.to_string());
        self.newline();
    }

    pub fn tensor<S: OrderedSemiring>(&mut self, tensor: &Tensor<S>) {
        self.write("profile: ");
        self.factors(tensor.domain());
        self.write(" -> ");
        self.factors(tensor.codomain());
        self.newline();

        if self.config.dense {
            for from in points(tensor.domain()) {
                for to in points(tensor.codomain()) {
                    let weight = tensor.weight(&from, &to);
                    self.strand(&from, &to, &weight);
                }
            }
        } else {
            for (strand, weight) in tensor.strands() {
                self.strand(&strand.from, &strand.to, weight);
            }
        }
    }
}

/// Render a tensor (stored strands only)
pub fn render_tensor<S: OrderedSemiring>(tensor: &Tensor<S>) -> String {
    render_tensor_with(tensor, PrettyConfig::default())
}

/// Render a tensor with explicit configuration
pub fn render_tensor_with<S: OrderedSemiring>(tensor: &Tensor<S>, config: PrettyConfig) -> String {
    let mut pretty = Pretty::with_config(config);
    pretty.tensor(tensor);
    pretty.finish()
}

impl<S: OrderedSemiring> fmt::Display for Tensor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_tensor(self))
    }
}
