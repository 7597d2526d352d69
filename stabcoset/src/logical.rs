use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::debug;

use crate::{
    code::CodeDefinition,
    error::EccError,
    pauli::{PauliLetter, PauliString},
};

/// A logical Pauli operator together with a lightest physical operator implementing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalWeight {
    /// One letter per logical qubit, in increasing logical index order
    pub logical: PauliString,
    /// The product of the chosen logical representatives
    pub operator: PauliString,
    /// The first operator of least weight in the coset of `operator`
    pub representative: PauliString,
    pub weight: usize,
}

/// Minimum weights of all `4^k` logical Pauli operators of a code.
#[derive(Clone, Debug)]
pub struct LogicalWeightTable {
    entries: Vec<LogicalWeight>,
}

impl LogicalWeightTable {
    /// Runs through the logical operators `P_1 ... P_k` with each `P_i` in `I, X, Y, Z` (in
    /// that order, the last logical qubit varying fastest), multiplies out the physical
    /// operator using `X_i`, `Z_i` and `Y_i = X_i * Z_i`, and records a lightest member of its
    /// coset.
    ///
    /// # Errors
    ///
    /// Only fails if the code's operators are inconsistent, which construction rules out.
    pub fn build(code: &CodeDefinition) -> Result<Self, EccError> {
        let group = code.stabilizer_group()?;
        let indices: Vec<usize> = code.logical_indices().collect();
        let mut representatives = Vec::with_capacity(indices.len());
        for &i in &indices {
            let (x, z) = code.logical_pair(i)?;
            representatives.push([x.clone(), code.logical_y(i)?, z.clone()]);
        }

        let mut entries = Vec::with_capacity(1 << (2 * indices.len()));
        let all_letters = itertools::repeat_n(PauliLetter::ALL, indices.len());
        for letters in all_letters.multi_cartesian_product() {
            let mut operator = PauliString::identity(code.n());
            for (letter, [x, y, z]) in letters.iter().zip(&representatives) {
                match letter {
                    PauliLetter::I => {}
                    PauliLetter::X => operator *= x,
                    PauliLetter::Y => operator *= y,
                    PauliLetter::Z => operator *= z,
                }
            }
            let coset = group.coset(&operator)?;
            let representative = coset
                .minimum_weight_element()
                .cloned()
                .unwrap_or_else(|| operator.clone());
            entries.push(LogicalWeight {
                logical: PauliString::from_letters(letters),
                weight: representative.weight(),
                operator,
                representative,
            });
        }

        debug!(
            code = code.name(),
            num_entries = entries.len(),
            "computed logical weight table"
        );
        Ok(LogicalWeightTable { entries })
    }

    pub fn entries(&self) -> &[LogicalWeight] {
        &self.entries
    }

    pub fn get(&self, logical: &PauliString) -> Option<&LogicalWeight> {
        self.entries.iter().find(|e| &e.logical == logical)
    }

    /// The logical operators grouped by minimum weight, each group in enumeration order.
    pub fn by_weight(&self) -> BTreeMap<usize, Vec<&LogicalWeight>> {
        let mut grouped: BTreeMap<usize, Vec<&LogicalWeight>> = BTreeMap::new();
        for entry in &self.entries {
            grouped.entry(entry.weight).or_default().push(entry);
        }
        grouped
    }

    /// The smallest weight of any non-identity logical operator, i.e. the actual distance.
    pub fn distance(&self) -> Option<usize> {
        self.entries
            .iter()
            .filter(|e| !e.logical.is_identity())
            .map(|e| e.weight)
            .min()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::registry::CodeRegistry;

    fn p(s: &str) -> PauliString {
        PauliString::parse(s).expect("Manifestly a Pauli String")
    }

    #[test]
    fn eight_three_three_weights() {
        let registry = CodeRegistry::standard().unwrap();
        let code = registry.get("eight_three_three").unwrap();
        let table = LogicalWeightTable::build(code).unwrap();
        assert_eq!(table.entries().len(), 64);

        let by_weight = table.by_weight();
        assert_eq!(by_weight.keys().copied().collect::<Vec<_>>(), [0, 3, 4]);
        assert_eq!(by_weight[&0].len(), 1);
        assert_eq!(by_weight[&3].len(), 28);
        assert_eq!(by_weight[&4].len(), 35);

        let first_weight_three: Vec<String> = by_weight[&3]
            .iter()
            .take(4)
            .map(|e| e.logical.to_string())
            .collect();
        assert_eq!(first_weight_three, ["IIY", "IXY", "IYI", "IYX"]);

        assert_eq!(table.get(&p("III")).unwrap().representative, p("IIIIIIII"));
        assert_eq!(table.get(&p("XII")).unwrap().operator, p("XXIIIZIZ"));
        assert_eq!(table.get(&p("YII")).unwrap().weight, 3);
        assert_eq!(table.distance(), Some(3));
    }

    #[test]
    fn representatives_are_equivalent() {
        let registry = CodeRegistry::standard().unwrap();
        let code = registry.get("five_one_three").unwrap();
        let group = code.stabilizer_group().unwrap();
        let table = LogicalWeightTable::build(code).unwrap();
        assert_eq!(table.entries().len(), 4);
        for entry in table.entries() {
            let difference = &*entry.operator * &*entry.representative;
            assert!(group.contains(&difference), "{}", entry.logical);
            assert_eq!(entry.representative.weight(), entry.weight);
        }
        assert_eq!(table.distance(), Some(3));
    }
}
