use std::fmt;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    error::EccError,
    pauli::{multiply, multiply_sequence, PauliStr, PauliString},
    support::SupportTable,
    FxIndexMap,
};

/// The 1-indexed positions of the generators whose product gave an element.
///
/// The empty subset stands for the empty product, i.e. the identity.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct GeneratorSubset(Vec<usize>);

impl GeneratorSubset {
    /// Converts 0-indexed generator positions, as produced by the enumeration, to a subset.
    fn from_zero_indexed(indices: &[usize]) -> Self {
        GeneratorSubset(indices.iter().map(|i| i + 1).collect())
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GeneratorSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl From<Vec<usize>> for GeneratorSubset {
    fn from(mut value: Vec<usize>) -> Self {
        value.sort_unstable();
        value.dedup();
        GeneratorSubset(value)
    }
}

/// What to do when a second generator subset produces an element that is already recorded.
///
/// Both variants keep the element at the position where it was first inserted; they differ
/// only in which subset is reported as its provenance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProvenancePolicy {
    /// The subset recorded first is kept.
    KeepFirst,
    /// Each later subset overwrites the recorded one.
    KeepLast,
}

impl ProvenancePolicy {
    /// Records `element` with provenance `subset`, returning `true` if it was not there yet.
    pub(crate) fn record(
        self,
        elements: &mut FxIndexMap<PauliString, GeneratorSubset>,
        element: PauliString,
        subset: GeneratorSubset,
    ) -> bool {
        match self {
            ProvenancePolicy::KeepLast => elements.insert(element, subset).is_none(),
            ProvenancePolicy::KeepFirst => {
                if elements.contains_key(&element) {
                    false
                } else {
                    elements.insert(element, subset);
                    true
                }
            }
        }
    }
}

/// A stabilizer group, listed element by element together with the generators producing
/// each element.
///
/// Elements are kept in the order they are first produced by [`StabilizerGroup::generate`].
#[derive(Clone, Debug)]
pub struct StabilizerGroup {
    num_qubits: usize,
    num_generators: usize,
    elements: FxIndexMap<PauliString, GeneratorSubset>,
}

impl StabilizerGroup {
    /// Later generator subsets overwrite the provenance of an element produced earlier.
    pub const PROVENANCE_POLICY: ProvenancePolicy = ProvenancePolicy::KeepLast;

    /// Closes `generators` under multiplication by multiplying out every subset of them.
    ///
    /// The `2^m` subsets are visited by size, from the empty subset up to all `m` generators,
    /// and lexicographically within each size. When two subsets give the same element, the
    /// element stays where it was first produced and its provenance is the subset visited
    /// last (see [`Self::PROVENANCE_POLICY`]). With independent generators the group has
    /// exactly `2^m` elements and no collisions happen.
    ///
    /// # Errors
    ///
    /// [`EccError::LengthMismatch`] if a generator does not act on `num_qubits` qubits.
    pub fn generate<T: AsRef<PauliStr>>(
        num_qubits: usize,
        generators: &[T],
    ) -> Result<Self, EccError> {
        for generator in generators {
            let len = generator.as_ref().len();
            if len != num_qubits {
                return Err(EccError::LengthMismatch {
                    left: num_qubits,
                    right: len,
                });
            }
        }

        let num_generators = generators.len();
        let mut elements =
            FxIndexMap::with_capacity_and_hasher(1 << num_generators, Default::default());
        for size in 0..=num_generators {
            for combo in (0..num_generators).combinations(size) {
                let product = if combo.is_empty() {
                    PauliString::identity(num_qubits)
                } else {
                    multiply_sequence(combo.iter().map(|&i| generators[i].as_ref()))?
                };
                let subset = GeneratorSubset::from_zero_indexed(&combo);
                if !Self::PROVENANCE_POLICY.record(&mut elements, product, subset) {
                    trace!(?combo, "generator subset reproduced an existing element");
                }
            }
        }

        debug!(
            num_qubits,
            num_generators,
            num_elements = elements.len(),
            "generated stabilizer group"
        );
        Ok(StabilizerGroup {
            num_qubits,
            num_generators,
            elements,
        })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn num_generators(&self) -> usize {
        self.num_generators
    }

    /// Number of distinct elements
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Never true for a generated group, which always holds the identity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether no two generator subsets collided, i.e. the group has `2^m` elements.
    pub fn is_independent(&self) -> bool {
        self.len() == 1 << self.num_generators
    }

    pub fn contains(&self, op: &PauliStr) -> bool {
        self.elements.contains_key(op)
    }

    /// Some generator subset whose product is `op`; not necessarily a smallest one.
    pub fn provenance(&self, op: &PauliStr) -> Option<&GeneratorSubset> {
        self.elements.get(op)
    }

    pub fn elements(&self) -> impl Iterator<Item = &PauliString> {
        self.elements.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, &GeneratorSubset)> {
        self.elements.iter()
    }

    /// Checks that the product of every pair of elements is again an element.
    pub fn is_closed(&self) -> bool {
        self.elements
            .keys()
            .cartesian_product(self.elements.keys())
            .all(|(a, b)| self.contains(&(&**a * &**b)))
    }

    /// The coset `base * S` of this group, with the provenance of each `s` in `S`.
    ///
    /// The group is walked in its stored order and the first element to produce a given
    /// product decides its provenance (see [`Coset::PROVENANCE_POLICY`]). Since
    /// multiplying by `base` is a bijection, the coset has as many elements as the group.
    ///
    /// # Errors
    ///
    /// [`EccError::LengthMismatch`] if `base` does not act on [`Self::num_qubits`] qubits.
    pub fn coset(&self, base: &PauliStr) -> Result<Coset, EccError> {
        let mut elements = FxIndexMap::with_capacity_and_hasher(self.len(), Default::default());
        for (stabilizer, subset) in self.iter() {
            let product = multiply(base, stabilizer)?;
            Coset::PROVENANCE_POLICY.record(&mut elements, product, subset.clone());
        }
        debug!(base = %base, num_elements = elements.len(), "computed coset");
        Ok(Coset {
            base: base.to_owned(),
            elements,
        })
    }
}

/// The equivalence class of an operator modulo a stabilizer group.
///
/// Each element records the generator subset of the stabilizer it was multiplied by.
#[derive(Clone, Debug)]
pub struct Coset {
    base: PauliString,
    elements: FxIndexMap<PauliString, GeneratorSubset>,
}

impl Coset {
    /// The first stabilizer to produce an element keeps it.
    ///
    /// This is the opposite of [`StabilizerGroup::PROVENANCE_POLICY`].
    pub const PROVENANCE_POLICY: ProvenancePolicy = ProvenancePolicy::KeepFirst;

    #[inline]
    pub fn base(&self) -> &PauliString {
        &self.base
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, op: &PauliStr) -> bool {
        self.elements.contains_key(op)
    }

    pub fn provenance(&self, op: &PauliStr) -> Option<&GeneratorSubset> {
        self.elements.get(op)
    }

    pub fn elements(&self) -> impl Iterator<Item = &PauliString> {
        self.elements.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, &GeneratorSubset)> {
        self.elements.iter()
    }

    /// Groups the elements by support
    pub fn support_table(&self) -> SupportTable {
        SupportTable::from_operators(self.elements())
    }

    /// The first element of least weight, in stored order.
    pub fn minimum_weight_element(&self) -> Option<&PauliString> {
        self.elements().min_by_key(|op| op.weight())
    }
}
