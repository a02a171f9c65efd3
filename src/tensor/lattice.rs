//! Finite sets, labels and lattice points.
//!
//! A product space is a sequence of factors A₀ × A₁ × … × Aₙ₋₁. Each factor
//! is a [`FiniteSet`], and an element of the product (a *lattice point*) is
//! one [`Label`] per factor. The empty product is the one-point set whose
//! only element is the empty lattice point.

use std::fmt;

use indexmap::IndexSet;

/// A single coordinate of a lattice point.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// 1-based position in a [`FiniteSet::Cardinal`] factor
    Index(usize),
    /// Member of a [`FiniteSet::Labeled`] factor
    Name(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Index(i) => write!(f, "{}", i),
            Label::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<usize> for Label {
    fn from(i: usize) -> Self {
        Label::Index(i)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Name(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Name(s)
    }
}

/// One element of a product space: a label per factor.
pub type LatticePoint = Vec<Label>;

/// Build a lattice point from anything label-like.
pub fn point<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> LatticePoint {
    labels.into_iter().map(Into::into).collect()
}

/// A factor of a product space.
///
/// The variant is fixed at construction; a factor never mixes implicit
/// indices and string labels.
#[derive(Clone, Debug)]
pub enum FiniteSet {
    /// `{1, …, n}`
    Cardinal(usize),
    /// Distinct string labels in declaration order
    Labeled(IndexSet<String>),
}

impl FiniteSet {
    /// The set `{1, …, n}`
    pub fn cardinal(n: usize) -> Self {
        FiniteSet::Cardinal(n)
    }

    /// A labeled set. Repeated labels keep their first position.
    pub fn labeled<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        FiniteSet::Labeled(labels.into_iter().map(Into::into).collect())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            FiniteSet::Cardinal(n) => *n,
            FiniteSet::Labeled(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_labeled(&self) -> bool {
        matches!(self, FiniteSet::Labeled(_))
    }

    /// All labels, in order
    pub fn labels(&self) -> Vec<Label> {
        match self {
            FiniteSet::Cardinal(n) => index_range(*n),
            FiniteSet::Labeled(names) => names.iter().cloned().map(Label::Name).collect(),
        }
    }

    /// Check membership. A name never belongs to a cardinal set and an
    /// index never belongs to a labeled one.
    pub fn contains(&self, label: &Label) -> bool {
        self.position(label).is_some()
    }

    /// 0-based position of a label in this set
    pub fn position(&self, label: &Label) -> Option<usize> {
        match (self, label) {
            (FiniteSet::Cardinal(n), Label::Index(i)) if (1..=*n).contains(i) => Some(i - 1),
            (FiniteSet::Labeled(names), Label::Name(s)) => names.get_index_of(s.as_str()),
            _ => None,
        }
    }

    /// Label at a 0-based position
    pub fn label_at(&self, pos: usize) -> Option<Label> {
        match self {
            FiniteSet::Cardinal(n) if pos < *n => Some(Label::Index(pos + 1)),
            FiniteSet::Cardinal(_) => None,
            FiniteSet::Labeled(names) => names.get_index(pos).cloned().map(Label::Name),
        }
    }
}

// IndexSet equality ignores order; factors compare position by position.
impl PartialEq for FiniteSet {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FiniteSet::Cardinal(a), FiniteSet::Cardinal(b)) => a == b,
            (FiniteSet::Labeled(a), FiniteSet::Labeled(b)) => a.iter().eq(b.iter()),
            _ => false,
        }
    }
}

impl Eq for FiniteSet {}

impl fmt::Display for FiniteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiniteSet::Cardinal(n) => write!(f, "{}", n),
            FiniteSet::Labeled(names) => {
                write!(f, "[")?;
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", name)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Concatenate two factor sequences (the monoidal product of objects)
pub fn concat(a: &[FiniteSet], b: &[FiniteSet]) -> Vec<FiniteSet> {
    a.iter().chain(b).cloned().collect()
}

/// Why `point` is not an element of the product of `factors`, if it isn't.
pub(crate) fn point_defect(factors: &[FiniteSet], point: &[Label]) -> Option<String> {
    if point.len() != factors.len() {
        return Some(format!(
            "expected {} coordinates, found {}",
            factors.len(),
            point.len()
        ));
    }
    factors
        .iter()
        .zip(point)
        .enumerate()
        .find(|(_, (factor, label))| !factor.contains(label))
        .map(|(i, (factor, label))| {
            format!("label {} is not in factor {} ({})", label, i, factor)
        })
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// The ordered sequence `[1, …, n]`
pub fn index_range(n: usize) -> Vec<Label> {
    (1..=n).map(Label::Index).collect()
}

/// Iterator over the Cartesian product of label lists (odometer order:
/// the last axis varies fastest).
#[derive(Clone, Debug)]
pub struct LatticeIter {
    axes: Vec<Vec<Label>>,
    current: Vec<usize>,
    done: bool,
}

impl LatticeIter {
    pub fn new(axes: Vec<Vec<Label>>) -> Self {
        let done = axes.iter().any(Vec::is_empty);
        let current = vec![0; axes.len()];
        Self {
            axes,
            current,
            done,
        }
    }
}

impl Iterator for LatticeIter {
    type Item = LatticePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.axes.is_empty() {
            self.done = true;
            return Some(vec![]);
        }

        let result: LatticePoint = self
            .current
            .iter()
            .zip(&self.axes)
            .map(|(&i, axis)| axis[i].clone())
            .collect();

        // Advance (odometer style)
        for i in (0..self.axes.len()).rev() {
            self.current[i] += 1;
            if self.current[i] < self.axes[i].len() {
                break;
            }
            self.current[i] = 0;
            if i == 0 {
                self.done = true;
            }
        }

        Some(result)
    }
}

/// All tuples picking one label from each list, lexicographic in list order
pub fn cartesian(factor_label_lists: &[Vec<Label>]) -> Vec<LatticePoint> {
    LatticeIter::new(factor_label_lists.to_vec()).collect()
}

/// Lazily enumerate every lattice point of a factor sequence
pub fn points(factors: &[FiniteSet]) -> LatticeIter {
    LatticeIter::new(factors.iter().map(FiniteSet::labels).collect())
}
