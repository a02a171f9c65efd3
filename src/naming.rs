//! Label ↔ index canonicalization
//!
//! Labels are purely a display concern: the algebra only cares about
//! positions within each factor. This module rewrites a labeled tensor into
//! the purely numeric form (every factor `Cardinal`, every label its 1-based
//! position) and keeps per-factor tables for translating results back.

use crate::error::{Side, TensorError, TensorResult};
use crate::tensor::{FiniteSet, Label, LatticePoint, OrderedSemiring, Profile, Strand, Tensor};

/// Bidirectional mapping between one factor's labels and 1-based indices
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTable {
    factor: FiniteSet,
}

impl LabelTable {
    pub fn new(factor: FiniteSet) -> Self {
        Self { factor }
    }

    /// The original (labeled) factor
    pub fn factor(&self) -> &FiniteSet {
        &self.factor
    }

    pub fn len(&self) -> usize {
        self.factor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factor.is_empty()
    }

    /// 1-based index of a label
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.factor.position(label).map(|i| i + 1)
    }

    /// Label at a 1-based index
    pub fn label_of(&self, index: usize) -> Option<Label> {
        index.checked_sub(1).and_then(|i| self.factor.label_at(i))
    }
}

/// Lookup tables for both sides of a canonicalized tensor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTables {
    pub domain: Vec<LabelTable>,
    pub codomain: Vec<LabelTable>,
}

impl LabelTables {
    fn from_profile(profile: &Profile) -> Self {
        Self {
            domain: profile.domain.iter().cloned().map(LabelTable::new).collect(),
            codomain: profile.codomain.iter().cloned().map(LabelTable::new).collect(),
        }
    }

    fn numeric_profile(&self) -> Profile {
        let numeric = |tables: &[LabelTable]| -> Vec<FiniteSet> {
            tables
                .iter()
                .map(|t| FiniteSet::cardinal(t.len()))
                .collect()
        };
        Profile::new(numeric(&self.domain), numeric(&self.codomain))
    }

    fn labeled_profile(&self) -> Profile {
        let labeled = |tables: &[LabelTable]| -> Vec<FiniteSet> {
            tables.iter().map(|t| t.factor.clone()).collect()
        };
        Profile::new(labeled(&self.domain), labeled(&self.codomain))
    }
}

fn relabel(
    point: &[Label],
    tables: &[LabelTable],
    lookup: impl Fn(&LabelTable, &Label) -> Option<Label>,
) -> Result<LatticePoint, String> {
    if point.len() != tables.len() {
        return Err(format!(
            "expected {} coordinates, found {}",
            tables.len(),
            point.len()
        ));
    }
    point
        .iter()
        .zip(tables)
        .enumerate()
        .map(|(i, (label, table))| {
            lookup(table, label)
                .ok_or_else(|| format!("label {} has no counterpart in factor {}", label, i))
        })
        .collect()
}

fn rewrite<S: OrderedSemiring>(
    tensor: &Tensor<S>,
    tables: &LabelTables,
    profile: Profile,
    lookup: impl Fn(&LabelTable, &Label) -> Option<Label> + Copy,
) -> TensorResult<Tensor<S>> {
    let mut strands = Vec::with_capacity(tensor.len());
    for (strand, weight) in tensor.strands() {
        let malformed = |side, reason| TensorError::MalformedLatticePoint {
            strand: strand.clone(),
            side,
            reason,
        };
        let from = relabel(&strand.from, &tables.domain, lookup)
            .map_err(|reason| malformed(Side::Domain, reason))?;
        let to = relabel(&strand.to, &tables.codomain, lookup)
            .map_err(|reason| malformed(Side::Codomain, reason))?;
        strands.push((Strand::new(from, to), weight.clone()));
    }
    Ok(Tensor::new(profile, strands))
}

/// Rewrite every label as its 1-based index within its factor.
///
/// Returns the numeric tensor and the tables needed to translate it back.
/// Cardinal factors pass through unchanged.
pub fn label_to_index<S: OrderedSemiring>(
    tensor: &Tensor<S>,
) -> TensorResult<(Tensor<S>, LabelTables)> {
    tensor.check_well_formed()?;
    let tables = LabelTables::from_profile(tensor.profile());
    let numeric = rewrite(tensor, &tables, tables.numeric_profile(), |table, label| {
        table.index_of(label).map(Label::Index)
    })?;
    Ok((numeric, tables))
}

/// Translate a numeric tensor back to labels.
///
/// The tables must describe the tensor's profile factor by factor (same
/// arity, same sizes); otherwise the call fails with
/// [`TensorError::NotComposable`].
pub fn index_to_label<S: OrderedSemiring>(
    tensor: &Tensor<S>,
    tables: &LabelTables,
) -> TensorResult<Tensor<S>> {
    let expected = tables.numeric_profile();
    if tensor.domain() != &expected.domain[..] {
        return Err(TensorError::NotComposable {
            left: tensor.domain().to_vec(),
            right: expected.domain,
        });
    }
    if tensor.codomain() != &expected.codomain[..] {
        return Err(TensorError::NotComposable {
            left: tensor.codomain().to_vec(),
            right: expected.codomain,
        });
    }
    rewrite(tensor, tables, tables.labeled_profile(), |table, label| {
        match label {
            Label::Index(i) => table.label_of(*i),
            Label::Name(_) => None,
        }
    })
}
