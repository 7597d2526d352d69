use std::fmt;

use itertools::Itertools;
use tracing::debug;

use crate::{
    code::CodeDefinition,
    error::EccError,
    pauli::{multiply, PauliString},
    support::Support,
    FxIndexMap,
};

/// A logical operator whose implementability is tracked by an [`AccessStructure`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum LogicalLabel {
    X(usize),
    Z(usize),
    Y(usize),
    /// A classical bit operator of a hybrid code
    Classical(usize),
    /// The product of two classical bit operators
    ClassicalPair(usize, usize),
}

impl fmt::Display for LogicalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalLabel::X(i) => write!(f, "X{i}"),
            LogicalLabel::Z(i) => write!(f, "Z{i}"),
            LogicalLabel::Y(i) => write!(f, "Y{i}"),
            LogicalLabel::Classical(i) => write!(f, "Z{i}"),
            LogicalLabel::ClassicalPair(i, j) => write!(f, "Z{i}Z{j}"),
        }
    }
}

/// How much of the encoded information a set of qubits gives access to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InformationClass {
    /// No tracked logical operator can be implemented
    None,
    /// Some, but not all, of the tracked logical operators can be implemented
    Partial,
    /// Every tracked logical operator can be implemented
    Full,
}

/// For one logical qubit, the logical operators each subset of physical qubits can implement.
///
/// A label is implementable on a subset if some operator equivalent to it (modulo the
/// stabilizer group) is supported inside the subset. Implementability is monotone: a
/// superset of a subset implementing a label implements it too.
#[derive(Clone, Debug)]
pub struct AccessStructure {
    logical_index: usize,
    num_qubits: usize,
    labels: Vec<LogicalLabel>,
    implementable: FxIndexMap<Support, Vec<LogicalLabel>>,
}

impl AccessStructure {
    /// Computes the access structure of logical qubit `index` of `code`.
    ///
    /// The tracked labels are `X_i`, `Z_i` and `Y_i = X_i * Z_i`, followed for hybrid codes by
    /// each classical operator and each product of two classical operators. The stabilizer
    /// group is built once, then every label's coset is reduced to its set of supports, and
    /// all `2^n` subsets of qubits are checked against those supports.
    ///
    /// # Errors
    ///
    /// [`EccError::UnknownLogical`] if `code` has no logical qubit `index`.
    pub fn build(code: &CodeDefinition, index: usize) -> Result<Self, EccError> {
        let (x, z) = code.logical_pair(index)?;
        let mut targets: Vec<(LogicalLabel, PauliString)> = vec![
            (LogicalLabel::X(index), x.clone()),
            (LogicalLabel::Z(index), z.clone()),
            (LogicalLabel::Y(index), multiply(x, z)?),
        ];
        let classical: Vec<(usize, &PauliString)> = code.classical_operators().collect();
        for &(i, op) in &classical {
            targets.push((LogicalLabel::Classical(i), op.clone()));
        }
        for (&(i, a), &(j, b)) in classical.iter().tuple_combinations() {
            targets.push((LogicalLabel::ClassicalPair(i, j), multiply(a, b)?));
        }

        let group = code.stabilizer_group()?;
        let achievable = targets
            .iter()
            .map(|(label, op)| {
                let supports: Vec<Support> =
                    group.coset(op)?.support_table().supports().cloned().collect();
                Ok::<_, EccError>((*label, supports))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let num_qubits = code.n();
        let implementable: FxIndexMap<_, _> = Support::all_subsets(num_qubits)
            .map(|subset| {
                let labels = achievable
                    .iter()
                    .filter(|(_, supports)| supports.iter().any(|s| s.is_subset_of(&subset)))
                    .map(|(label, _)| *label)
                    .collect();
                (subset, labels)
            })
            .collect();

        debug!(
            code = code.name(),
            logical_index = index,
            num_labels = achievable.len(),
            num_subsets = implementable.len(),
            "built access structure"
        );
        Ok(AccessStructure {
            logical_index: index,
            num_qubits,
            labels: achievable.into_iter().map(|(label, _)| label).collect(),
            implementable,
        })
    }

    #[inline]
    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Every tracked label, in the order they are reported for each subset
    pub fn labels(&self) -> &[LogicalLabel] {
        &self.labels
    }

    /// Number of subsets, i.e. `2^n`
    #[inline]
    pub fn len(&self) -> usize {
        self.implementable.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.implementable.is_empty()
    }

    /// The labels implementable on `subset`, or `None` if it is not a subset of `1..=n`.
    pub fn get(&self, subset: &Support) -> Option<&[LogicalLabel]> {
        self.implementable.get(subset).map(Vec::as_slice)
    }

    pub fn is_implementable(&self, subset: &Support, label: LogicalLabel) -> bool {
        self.get(subset).is_some_and(|labels| labels.contains(&label))
    }

    /// Subsets by size, then lexicographically, with the labels implementable on each.
    pub fn iter(&self) -> impl Iterator<Item = (&Support, &[LogicalLabel])> {
        self.implementable
            .iter()
            .map(|(subset, labels)| (subset, labels.as_slice()))
    }

    pub fn classify(&self, subset: &Support) -> Option<InformationClass> {
        let implementable = self.get(subset)?.len();
        Some(if implementable == 0 {
            InformationClass::None
        } else if implementable == self.labels.len() {
            InformationClass::Full
        } else {
            InformationClass::Partial
        })
    }

    /// The subsets implementing `label` none of whose proper subsets do.
    ///
    /// By monotonicity it is enough to check the subsets one qubit smaller.
    pub fn minimal_subsets(&self, label: LogicalLabel) -> Vec<&Support> {
        self.implementable
            .iter()
            .filter(|(subset, labels)| {
                labels.contains(&label)
                    && (0..subset.weight()).all(|skip| {
                        let smaller = Support::from_sorted(
                            subset
                                .positions()
                                .iter()
                                .enumerate()
                                .filter(|&(i, _)| i != skip)
                                .map(|(_, &q)| q)
                                .collect(),
                        );
                        !self.is_implementable(&smaller, label)
                    })
            })
            .map(|(subset, _)| subset)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registry::CodeRegistry;
    use rustc_hash::FxHashMap;

    fn support(positions: &[usize]) -> Support {
        Support::from_positions(positions.iter().copied())
    }

    fn names(labels: &[LogicalLabel]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn access(code: &str, index: usize) -> AccessStructure {
        CodeRegistry::standard()
            .unwrap()
            .get(code)
            .unwrap()
            .supported_operators(index)
            .unwrap()
    }

    /// how many subsets implement each number of labels
    fn label_count_histogram(access: &AccessStructure) -> FxHashMap<usize, usize> {
        let mut counts = FxHashMap::default();
        for (_, labels) in access.iter() {
            *counts.entry(labels.len()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn four_one_two() {
        let access = access("four_one_two", 1);
        assert_eq!(access.len(), 16);
        assert_eq!(names(access.labels()), ["X1", "Z1", "Y1"]);
        assert!(access.get(&support(&[])).unwrap().is_empty());
        assert!(access.get(&support(&[3])).unwrap().is_empty());
        assert_eq!(names(access.get(&support(&[1, 2])).unwrap()), ["X1"]);
        assert_eq!(names(access.get(&support(&[3, 4])).unwrap()), ["X1"]);
        assert_eq!(names(access.get(&support(&[2, 4])).unwrap()), ["Z1"]);
        assert_eq!(
            names(access.get(&support(&[1, 2, 4])).unwrap()),
            ["X1", "Z1", "Y1"]
        );
        assert_eq!(access.get(&support(&[5])), None);

        let minimal_x: Vec<String> = access
            .minimal_subsets(LogicalLabel::X(1))
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(minimal_x, ["(1, 2)", "(3, 4)"]);
        assert_eq!(access.minimal_subsets(LogicalLabel::Z(1)).len(), 4);
        assert_eq!(access.minimal_subsets(LogicalLabel::Y(1)).len(), 4);
    }

    #[test]
    fn hybrid_code() {
        let access = access("eight_one_two_three", 1);
        assert_eq!(access.len(), 256);
        assert_eq!(
            names(access.labels()),
            ["X1", "Z1", "Y1", "Z2", "Z3", "Z2Z3"]
        );
        assert!(access.get(&support(&[])).unwrap().is_empty());
        assert_eq!(names(access.get(&support(&[1, 2, 4])).unwrap()), ["Y1"]);
        assert_eq!(names(access.get(&support(&[1, 2, 6, 8])).unwrap()), ["X1"]);
        assert_eq!(
            names(access.get(&support(&[1, 2, 3, 4, 5, 6, 7, 8])).unwrap()),
            ["X1", "Z1", "Y1", "Z2", "Z3", "Z2Z3"]
        );

        let counts = label_count_histogram(&access);
        assert_eq!(counts[&0], 133);
        assert_eq!(counts[&1], 22);
        assert_eq!(counts[&2], 42);
        assert_eq!(counts[&4], 22);
        assert_eq!(counts[&6], 37);

        let smallest_full = access
            .iter()
            .find(|(subset, _)| access.classify(subset) == Some(InformationClass::Full))
            .map(|(subset, _)| subset.to_string());
        assert_eq!(smallest_full.as_deref(), Some("(1, 2, 3, 4, 5, 6)"));
    }

    #[test]
    fn eight_three_three_second_qubit() {
        let access = access("eight_three_three", 2);
        assert_eq!(names(access.labels()), ["X2", "Z2", "Y2"]);
        let counts = label_count_histogram(&access);
        assert_eq!(counts[&0], 139);
        assert_eq!(counts[&1], 68);
        assert_eq!(counts[&3], 49);
        assert_eq!(names(access.get(&support(&[1, 3, 8])).unwrap()), ["Y2"]);
        assert_eq!(names(access.get(&support(&[1, 2, 4, 8])).unwrap()), ["X2"]);
    }

    #[test]
    fn monotone() {
        let access = access("eight_three_three", 1);
        for (smaller, smaller_labels) in access.iter() {
            for (larger, larger_labels) in access.iter() {
                if smaller.is_subset_of(larger) {
                    for label in smaller_labels {
                        assert!(
                            larger_labels.contains(label),
                            "{label} on {smaller} but not {larger}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn classification() {
        let five = access("five_one_three", 1);
        let counts = label_count_histogram(&five);
        assert_eq!(counts[&0], 16);
        assert_eq!(counts[&3], 16);
        assert_eq!(five.classify(&support(&[1, 2, 3])), Some(InformationClass::Full));
        assert_eq!(five.classify(&support(&[1, 2])), Some(InformationClass::None));
        assert_eq!(five.classify(&support(&[9])), None);

        let hybrid = access("eight_one_two_three", 1);
        assert_eq!(
            hybrid.classify(&support(&[1, 2, 4])),
            Some(InformationClass::Partial)
        );
    }

    #[test]
    fn unknown_logical() {
        let registry = CodeRegistry::standard().unwrap();
        let code = registry.get("seven_one_three").unwrap();
        assert_eq!(
            AccessStructure::build(code, 2).unwrap_err(),
            EccError::UnknownLogical(2)
        );
    }

    #[test]
    fn label_display() {
        assert_eq!(LogicalLabel::Classical(2).to_string(), "Z2");
        assert_eq!(LogicalLabel::ClassicalPair(2, 3).to_string(), "Z2Z3");
        assert_eq!(LogicalLabel::Y(3).to_string(), "Y3");
    }
}
