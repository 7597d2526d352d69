use std::{collections::BTreeMap, fmt};

use crate::{
    access::AccessStructure,
    error::EccError,
    pauli::{multiply, PauliStr, PauliString},
    stabilizer::{Coset, StabilizerGroup},
    support::SupportTable,
};

/// A stabilizer code, or a hybrid code if it also carries classical operators.
///
/// Every operator is checked to act on exactly `n` qubits when the code is built, and the
/// definition is never mutated afterwards. Groups, cosets and access structures are derived
/// from it on demand and are not cached.
#[derive(Clone, Debug)]
pub struct CodeDefinition {
    name: String,
    n: usize,
    k: usize,
    d: usize,
    generators: Vec<PauliString>,
    logical_x: BTreeMap<usize, PauliString>,
    logical_z: BTreeMap<usize, PauliString>,
    classical: BTreeMap<usize, PauliString>,
}

impl CodeDefinition {
    /// # Errors
    ///
    /// [`EccError::Validation`] if a generator or logical operator does not act on `n`
    /// qubits, if the logical X and Z operators are not given for the same indices, or if
    /// there are not exactly `k` of them.
    pub fn new(
        name: impl Into<String>,
        n: usize,
        k: usize,
        d: usize,
        generators: Vec<PauliString>,
        logical_x: BTreeMap<usize, PauliString>,
        logical_z: BTreeMap<usize, PauliString>,
    ) -> Result<Self, EccError> {
        let name = name.into();
        for (i, generator) in generators.iter().enumerate() {
            check_length(&name, n, &format!("generator {}", i + 1), generator)?;
        }
        for (i, op) in &logical_x {
            check_length(&name, n, &format!("logical X{i}"), op)?;
        }
        for (i, op) in &logical_z {
            check_length(&name, n, &format!("logical Z{i}"), op)?;
        }
        if !logical_x.keys().eq(logical_z.keys()) {
            return Err(EccError::Validation(format!(
                "{name}: logical X and Z operators are given for different indices"
            )));
        }
        if logical_x.len() != k {
            return Err(EccError::Validation(format!(
                "{name}: expected {k} logical qubits, found {}",
                logical_x.len()
            )));
        }

        Ok(CodeDefinition {
            name,
            n,
            k,
            d,
            generators,
            logical_x,
            logical_z,
            classical: BTreeMap::new(),
        })
    }

    /// Turns this into a hybrid code carrying the given classical operators.
    ///
    /// # Errors
    ///
    /// [`EccError::Validation`] if a classical operator does not act on `n` qubits.
    pub fn with_classical(
        mut self,
        classical: BTreeMap<usize, PauliString>,
    ) -> Result<Self, EccError> {
        for (i, op) in &classical {
            check_length(&self.name, self.n, &format!("classical Z{i}"), op)?;
        }
        self.classical = classical;
        Ok(self)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of physical qubits
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of logical qubits
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Code distance, as declared
    #[inline]
    pub fn d(&self) -> usize {
        self.d
    }

    /// Number of classical bits, zero unless the code is hybrid
    #[inline]
    pub fn k_c(&self) -> usize {
        self.classical.len()
    }

    /// the standard `[[n,k,d]]` notation
    pub fn n_k_d(&self) -> [usize; 3] {
        [self.n, self.k, self.d]
    }

    pub fn is_hybrid(&self) -> bool {
        !self.classical.is_empty()
    }

    pub fn generators(&self) -> &[PauliString] {
        &self.generators
    }

    pub fn logical_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.logical_x.keys().copied()
    }

    pub fn logical_x(&self, index: usize) -> Option<&PauliString> {
        self.logical_x.get(&index)
    }

    pub fn logical_z(&self, index: usize) -> Option<&PauliString> {
        self.logical_z.get(&index)
    }

    /// `Y_i = X_i * Z_i`, up to phase.
    ///
    /// # Errors
    ///
    /// [`EccError::UnknownLogical`] if there is no logical qubit `index`.
    pub fn logical_y(&self, index: usize) -> Result<PauliString, EccError> {
        let (x, z) = self.logical_pair(index)?;
        multiply(x, z)
    }

    /// The logical X and Z operators of logical qubit `index`.
    ///
    /// # Errors
    ///
    /// [`EccError::UnknownLogical`] if there is no logical qubit `index`.
    pub fn logical_pair(&self, index: usize) -> Result<(&PauliString, &PauliString), EccError> {
        match (self.logical_x.get(&index), self.logical_z.get(&index)) {
            (Some(x), Some(z)) => Ok((x, z)),
            _ => Err(EccError::UnknownLogical(index)),
        }
    }

    pub fn classical(&self, index: usize) -> Option<&PauliString> {
        self.classical.get(&index)
    }

    /// The classical operators in increasing index order
    pub fn classical_operators(&self) -> impl Iterator<Item = (usize, &PauliString)> {
        self.classical.iter().map(|(&i, op)| (i, op))
    }

    /// All elements of the stabilizer group, each with a generator subset producing it.
    ///
    /// # Errors
    ///
    /// Only fails if the generators are inconsistent, which construction rules out.
    pub fn stabilizer_group(&self) -> Result<StabilizerGroup, EccError> {
        StabilizerGroup::generate(self.n, &self.generators)
    }

    /// Every operator equivalent to `op` modulo the stabilizer group.
    ///
    /// # Errors
    ///
    /// [`EccError::LengthMismatch`] if `op` does not act on `n` qubits.
    pub fn logical_operators(&self, op: &PauliStr) -> Result<Coset, EccError> {
        self.stabilizer_group()?.coset(op)
    }

    /// The operators equivalent to `op`, grouped by support.
    ///
    /// # Errors
    ///
    /// [`EccError::LengthMismatch`] if `op` does not act on `n` qubits.
    pub fn all_supports(&self, op: &PauliStr) -> Result<SupportTable, EccError> {
        Ok(self.logical_operators(op)?.support_table())
    }

    /// Which logical operators of logical qubit `index` each subset of qubits can implement.
    ///
    /// # Errors
    ///
    /// [`EccError::UnknownLogical`] if there is no logical qubit `index`.
    pub fn supported_operators(&self, index: usize) -> Result<AccessStructure, EccError> {
        AccessStructure::build(self, index)
    }

    /// Checks that the generators commute with each other, and that every logical and
    /// classical operator commutes with every generator.
    ///
    /// # Errors
    ///
    /// [`EccError::Anticommuting`] naming the first offending pair.
    pub fn verify_commutation(&self) -> Result<(), EccError> {
        let others = self
            .logical_x
            .values()
            .chain(self.logical_z.values())
            .chain(self.classical.values());
        for (idx, generator) in self.generators.iter().enumerate() {
            for earlier in &self.generators[..idx] {
                ensure_commute(generator, earlier)?;
            }
        }
        for op in others {
            for generator in &self.generators {
                ensure_commute(op, generator)?;
            }
        }
        Ok(())
    }
}

fn check_length(name: &str, n: usize, what: &str, op: &PauliStr) -> Result<(), EccError> {
    if op.len() == n {
        Ok(())
    } else {
        Err(EccError::Validation(format!(
            "{name}: {what} {op} acts on {} qubits, expected {n}",
            op.len()
        )))
    }
}

fn ensure_commute(a: &PauliStr, b: &PauliStr) -> Result<(), EccError> {
    if a.commutes_with(b) {
        Ok(())
    } else {
        Err(EccError::Anticommuting {
            left: a.to_string(),
            right: b.to_string(),
        })
    }
}

impl fmt::Display for CodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hybrid() {
            write!(
                f,
                "[[{},{}:{},{}]] Hybrid Code",
                self.n,
                self.k,
                self.k_c(),
                self.d
            )
        } else {
            write!(f, "[[{},{},{}]] Stabilizer Code", self.n, self.k, self.d)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{registry::CodeRegistry, stabilizer::GeneratorSubset};

    fn p(s: &str) -> PauliString {
        PauliString::parse(s).expect("Manifestly a Pauli String")
    }

    fn indexed(ops: &[(usize, &str)]) -> BTreeMap<usize, PauliString> {
        ops.iter().map(|&(i, s)| (i, p(s))).collect()
    }

    fn four_one_two() -> Result<CodeDefinition, EccError> {
        CodeDefinition::new(
            "four_one_two",
            4,
            1,
            2,
            vec![p("XXXX"), p("IIZZ"), p("ZZII")],
            indexed(&[(1, "XXII")]),
            indexed(&[(1, "ZIZI")]),
        )
    }

    #[test]
    fn display() {
        let registry = CodeRegistry::standard().unwrap();
        assert_eq!(
            registry.get("four_one_two").unwrap().to_string(),
            "[[4,1,2]] Stabilizer Code"
        );
        assert_eq!(
            registry.get("eight_one_two_three").unwrap().to_string(),
            "[[8,1:2,3]] Hybrid Code"
        );
    }

    #[test]
    fn queries() {
        let code = four_one_two().unwrap();
        assert_eq!(code.n_k_d(), [4, 1, 2]);
        assert_eq!(code.k_c(), 0);
        assert!(!code.is_hybrid());
        assert_eq!(code.logical_x(1).unwrap().support().positions(), &[1, 2]);
        assert_eq!(code.logical_y(1).unwrap(), p("YXZI"));
        assert_eq!(code.logical_y(2), Err(EccError::UnknownLogical(2)));
        assert_eq!(code.stabilizer_group().unwrap().len(), 8);

        let coset = code.logical_operators(&p("XXII")).unwrap();
        assert_eq!(coset.len(), 8);
        assert!(coset.contains(&p("IIXX")));

        let supports = code.all_supports(&p("ZIZI")).unwrap();
        assert_eq!(supports.len(), 5);
        assert_eq!(supports.minimum_weight(), Some(2));

        assert_eq!(
            code.logical_operators(&p("XX")).unwrap_err(),
            EccError::LengthMismatch { left: 2, right: 4 }
        );
    }

    #[test]
    fn rejects_wrong_lengths() {
        let err = CodeDefinition::new(
            "bad",
            4,
            1,
            2,
            vec![p("XXXX"), p("IIZ")],
            indexed(&[(1, "XXII")]),
            indexed(&[(1, "ZIZI")]),
        )
        .unwrap_err();
        assert!(matches!(err, EccError::Validation(_)), "{err}");

        let err = CodeDefinition::new(
            "bad",
            4,
            1,
            2,
            vec![p("XXXX")],
            indexed(&[(1, "XXIII")]),
            indexed(&[(1, "ZIZI")]),
        )
        .unwrap_err();
        assert!(matches!(err, EccError::Validation(_)), "{err}");

        let err = four_one_two()
            .unwrap()
            .with_classical(indexed(&[(2, "ZZ")]))
            .unwrap_err();
        assert!(matches!(err, EccError::Validation(_)), "{err}");
    }

    #[test]
    fn rejects_mismatched_logicals() {
        let err = CodeDefinition::new(
            "bad",
            4,
            1,
            2,
            vec![p("XXXX")],
            indexed(&[(1, "XXII")]),
            indexed(&[(2, "ZIZI")]),
        )
        .unwrap_err();
        assert!(matches!(err, EccError::Validation(_)), "{err}");

        let err = CodeDefinition::new(
            "bad",
            4,
            2,
            2,
            vec![p("XXXX")],
            indexed(&[(1, "XXII")]),
            indexed(&[(1, "ZIZI")]),
        )
        .unwrap_err();
        assert!(matches!(err, EccError::Validation(_)), "{err}");
    }

    #[test]
    fn commutation_of_standard_codes() {
        let registry = CodeRegistry::standard().unwrap();
        for code in registry.iter() {
            code.verify_commutation().unwrap();
            for i in code.logical_indices() {
                let (x, z) = code.logical_pair(i).unwrap();
                assert!(!x.commutes_with(z), "{} X{i} and Z{i}", code.name());
            }
        }
    }

    #[test]
    fn standard_groups_and_cosets() {
        let registry = CodeRegistry::standard().unwrap();
        let mut sizes = vec![];
        for code in registry.iter() {
            let group = code.stabilizer_group().unwrap();
            assert_eq!(group.len(), 1 << code.generators().len(), "{}", code.name());
            assert!(group.is_closed(), "{}", code.name());
            assert_eq!(
                group.provenance(&PauliString::identity(code.n())),
                Some(&GeneratorSubset::default())
            );
            for i in code.logical_indices() {
                let (x, z) = code.logical_pair(i).unwrap();
                assert_eq!(code.logical_operators(x).unwrap().len(), group.len());
                assert_eq!(code.logical_operators(z).unwrap().len(), group.len());
            }
            sizes.push(group.len());
        }
        assert_eq!(sizes, [8, 128, 32, 32, 64, 16]);
    }

    #[test]
    fn detects_anticommuting_generators() {
        let code = CodeDefinition::new(
            "bad",
            2,
            0,
            1,
            vec![p("XI"), p("ZI")],
            BTreeMap::new(),
            BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(
            code.verify_commutation(),
            Err(EccError::Anticommuting {
                left: "ZI".to_owned(),
                right: "XI".to_owned()
            })
        );
    }
}
