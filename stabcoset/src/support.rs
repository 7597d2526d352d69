use std::{cmp::Ordering, fmt};

use indexmap::map::Entry;
use itertools::Itertools;

use crate::{
    pauli::{PauliStr, PauliString},
    FxIndexMap,
};

/// The sorted, 1-indexed qubit positions on which an operator acts non-trivially.
///
/// Supports are ordered shortlex: a shorter support always sorts before a longer one, and
/// supports of the same weight compare lexicographically. The smallest support in any
/// collection is therefore one of minimum weight.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Support(Vec<usize>);

impl Support {
    /// The support of `op`
    pub fn of(op: &PauliStr) -> Self {
        op.support()
    }

    /// Builds a support from arbitrary positions, sorting them and dropping repeats.
    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> Self {
        Support(positions.into_iter().sorted_unstable().dedup().collect())
    }

    /// Assumes `positions` is already strictly increasing.
    pub(crate) fn from_sorted(positions: Vec<usize>) -> Self {
        debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Support(positions)
    }

    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn weight(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        self.0.binary_search(&position).is_ok()
    }

    /// Is every position of `self` also in `other`
    pub fn is_subset_of(&self, other: &Support) -> bool {
        if self.weight() > other.weight() {
            return false;
        }
        let mut rest = other.0.iter();
        self.0.iter().all(|p| rest.any(|q| q == p))
    }

    /// Every subset of `1..=num_qubits`, by size and then lexicographically.
    ///
    /// There are `2^num_qubits` of them, starting with the empty support.
    pub fn all_subsets(num_qubits: usize) -> impl Iterator<Item = Support> {
        (0..=num_qubits).flat_map(move |size| {
            (1..=num_qubits)
                .combinations(size)
                .map(Support::from_sorted)
        })
    }
}

impl Ord for Support {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight()
            .cmp(&other.weight())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Support {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

impl fmt::Debug for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<Support> for Vec<usize> {
    fn from(value: Support) -> Self {
        value.0
    }
}

/// Operators grouped by their support.
///
/// Supports keep the order in which they were first seen, as do the operators listed
/// under each support.
#[derive(Clone, Debug, Default)]
pub struct SupportTable {
    by_support: FxIndexMap<Support, Vec<PauliString>>,
}

impl SupportTable {
    pub fn from_operators<I, T>(operators: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<PauliStr>,
    {
        let mut by_support: FxIndexMap<Support, Vec<PauliString>> = FxIndexMap::default();
        for op in operators {
            let op = op.as_ref();
            match by_support.entry(op.support()) {
                Entry::Occupied(mut entry) => entry.get_mut().push(op.to_owned()),
                Entry::Vacant(entry) => {
                    entry.insert(vec![op.to_owned()]);
                }
            }
        }
        SupportTable { by_support }
    }

    /// Number of distinct supports
    #[inline]
    pub fn len(&self) -> usize {
        self.by_support.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_support.is_empty()
    }

    pub fn get(&self, support: &Support) -> Option<&[PauliString]> {
        self.by_support.get(support).map(Vec::as_slice)
    }

    pub fn supports(&self) -> impl Iterator<Item = &Support> {
        self.by_support.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Support, &[PauliString])> {
        self.by_support.iter().map(|(s, ops)| (s, ops.as_slice()))
    }

    /// The weight of the lightest operator in the table, or `None` if it is empty.
    pub fn minimum_weight(&self) -> Option<usize> {
        self.supports().map(Support::weight).min()
    }

    /// All supports of minimum weight, in shortlex order.
    pub fn minimum_weight_supports(&self) -> Vec<&Support> {
        let Some(min_weight) = self.minimum_weight() else {
            return Vec::new();
        };
        self.supports()
            .filter(|s| s.weight() == min_weight)
            .sorted()
            .collect()
    }

    /// The operators sitting on the smallest support in shortlex order.
    ///
    /// Every one of them is a minimum-weight representative; no further tie-break is applied.
    pub fn minimum_weight_representatives(&self) -> &[PauliString] {
        self.by_support
            .iter()
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(_, ops)| ops.as_slice())
            .unwrap_or_default()
    }
}
