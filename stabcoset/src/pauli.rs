#![allow(clippy::suspicious_arithmetic_impl)]
use std::{
    borrow::Borrow,
    fmt,
    ops::{Deref, Mul, MulAssign},
    str::FromStr,
};

use rand::Rng;
use ref_cast::RefCast;

use crate::{error::EccError, support::Support};

/// A single-qubit Pauli operator, up to phase.
///
/// Each letter is a pair of symplectic bits `(x, z)`: `I = (0,0)`, `X = (1,0)`,
/// `Z = (0,1)` and `Y = (1,1)`. Multiplying letters XORs the pairs, which gives the
/// Klein four-group table `X*Z = Y`, `X*Y = Z`, `Y*Z = X`, with every letter its own
/// inverse.
///
/// The derived ordering `I < X < Y < Z` agrees with the ordering of the characters.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum PauliLetter {
    I,
    X,
    Y,
    Z,
}

impl PauliLetter {
    pub const ALL: [PauliLetter; 4] = [
        PauliLetter::I,
        PauliLetter::X,
        PauliLetter::Y,
        PauliLetter::Z,
    ];

    #[inline]
    pub fn from_xz(x_part: bool, z_part: bool) -> Self {
        match (x_part, z_part) {
            (false, false) => PauliLetter::I,
            (true, false) => PauliLetter::X,
            (true, true) => PauliLetter::Y,
            (false, true) => PauliLetter::Z,
        }
    }

    #[inline]
    pub fn xz(self) -> (bool, bool) {
        match self {
            PauliLetter::I => (false, false),
            PauliLetter::X => (true, false),
            PauliLetter::Y => (true, true),
            PauliLetter::Z => (false, true),
        }
    }

    /// Only the upper-case letters `I`, `X`, `Y` and `Z` are accepted.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PauliLetter::I),
            'X' => Some(PauliLetter::X),
            'Y' => Some(PauliLetter::Y),
            'Z' => Some(PauliLetter::Z),
            _ => None,
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        match self {
            PauliLetter::I => 'I',
            PauliLetter::X => 'X',
            PauliLetter::Y => 'Y',
            PauliLetter::Z => 'Z',
        }
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == PauliLetter::I
    }
}

impl Mul for PauliLetter {
    type Output = PauliLetter;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let (x0, z0) = self.xz();
        let (x1, z1) = rhs.xz();
        PauliLetter::from_xz(x0 ^ x1, z0 ^ z1)
    }
}

impl fmt::Display for PauliLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A borrowed Pauli string, i.e. a slice of [`PauliLetter`]s.
///
/// This is to [`PauliString`] what `str` is to `String`. Most read-only methods live here
/// and are reached from a `PauliString` through `Deref`.
#[derive(RefCast, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PauliStr([PauliLetter]);

/// An owned, phase-free Pauli string such as `XIZY`.
///
/// Equality is exact letter-by-letter equality; no global phase is tracked.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PauliString(Vec<PauliLetter>);

impl PauliStr {
    #[inline]
    pub fn from_letters(letters: &[PauliLetter]) -> &Self {
        PauliStr::ref_cast(letters)
    }

    #[inline]
    pub fn letters(&self) -> &[PauliLetter] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = PauliLetter> + '_ {
        self.0.iter().copied()
    }

    /// Number of qubits the operator acts on, including identities.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|l| l.is_identity())
    }

    /// The 1-indexed positions where this operator is not the identity.
    pub fn support(&self) -> Support {
        Support::from_sorted(
            self.0
                .iter()
                .enumerate()
                .filter(|(_, l)| !l.is_identity())
                .map(|(i, _)| i + 1)
                .collect(),
        )
    }

    /// The number of non-identity letters
    pub fn weight(&self) -> usize {
        self.0.iter().filter(|l| !l.is_identity()).count()
    }

    /// Do these two commute as operators
    ///
    /// They anticommute on each position where both are non-identity and differ, so they
    /// commute iff the number of such positions is even.
    ///
    /// # Panics
    ///
    /// The two must act on the same number of qubits.
    pub fn commutes_with(&self, other: &PauliStr) -> bool {
        assert_eq!(self.len(), other.len());
        let anticommuting = self
            .iter()
            .zip(other.iter())
            .filter(|&(a, b)| !a.is_identity() && !b.is_identity() && a != b)
            .count();
        anticommuting % 2 == 0
    }
}

impl fmt::Display for PauliStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl fmt::Debug for PauliStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl ToOwned for PauliStr {
    type Owned = PauliString;

    fn to_owned(&self) -> Self::Owned {
        PauliString(self.0.to_vec())
    }
}

impl AsRef<PauliStr> for PauliStr {
    fn as_ref(&self) -> &PauliStr {
        self
    }
}

impl PauliString {
    /// Parse a shorthand string like `XZZIX`.
    ///
    /// # Errors
    ///
    /// Any character other than `I`, `X`, `Y` or `Z` is rejected, rather than being
    /// treated as the identity.
    pub fn parse(s: &str) -> Result<Self, EccError> {
        s.chars()
            .enumerate()
            .map(|(position, symbol)| {
                PauliLetter::from_char(symbol).ok_or(EccError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PauliString)
    }

    /// The all-`I` string on `num_qubits` qubits
    pub fn identity(num_qubits: usize) -> Self {
        PauliString(vec![PauliLetter::I; num_qubits])
    }

    pub fn from_letters(letters: Vec<PauliLetter>) -> Self {
        PauliString(letters)
    }

    pub fn into_letters(self) -> Vec<PauliLetter> {
        self.0
    }

    /// A uniformly random Pauli string, including identities
    pub fn random(rng: &mut impl Rng, num_qubits: usize) -> Self {
        (0..num_qubits)
            .map(|_| PauliLetter::ALL[rng.random_range(0..4)])
            .collect()
    }

    #[inline]
    pub fn as_pauli_str(&self) -> &PauliStr {
        PauliStr::ref_cast(&self.0)
    }
}

impl Deref for PauliString {
    type Target = PauliStr;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_pauli_str()
    }
}

impl Borrow<PauliStr> for PauliString {
    fn borrow(&self) -> &PauliStr {
        self.as_pauli_str()
    }
}

impl AsRef<PauliStr> for PauliString {
    fn as_ref(&self) -> &PauliStr {
        self.as_pauli_str()
    }
}

impl FromStr for PauliString {
    type Err = EccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PauliString::parse(s)
    }
}

impl FromIterator<PauliLetter> for PauliString {
    fn from_iter<T: IntoIterator<Item = PauliLetter>>(iter: T) -> Self {
        PauliString(Vec::from_iter(iter))
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_pauli_str(), f)
    }
}

impl fmt::Debug for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_pauli_str(), f)
    }
}

impl MulAssign<&PauliStr> for PauliString {
    /// # Panics
    ///
    /// The two must act on the same number of qubits. Use [`multiply`] for a checked product.
    fn mul_assign(&mut self, rhs: &PauliStr) {
        assert_eq!(self.len(), rhs.len());
        for (lhs, &r) in self.0.iter_mut().zip(rhs.letters()) {
            *lhs = *lhs * r;
        }
    }
}

impl MulAssign<&PauliString> for PauliString {
    fn mul_assign(&mut self, rhs: &PauliString) {
        *self *= rhs.as_pauli_str();
    }
}

impl Mul for &PauliStr {
    type Output = PauliString;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut product = self.to_owned();
        product *= rhs;
        product
    }
}

/// Elementwise product of two Pauli strings, ignoring phase.
///
/// # Errors
///
/// [`EccError::LengthMismatch`] if the strings act on different numbers of qubits.
pub fn multiply(a: &PauliStr, b: &PauliStr) -> Result<PauliString, EccError> {
    if a.len() != b.len() {
        return Err(EccError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a * b)
}

/// Left fold of [`multiply`] over a sequence of Pauli strings.
///
/// # Errors
///
/// [`EccError::EmptyInput`] if the sequence is empty, or [`EccError::LengthMismatch`] if
/// any two strings have different lengths.
pub fn multiply_sequence<I, T>(paulis: I) -> Result<PauliString, EccError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<PauliStr>,
{
    let mut paulis = paulis.into_iter();
    let mut product = paulis.next().ok_or(EccError::EmptyInput)?.as_ref().to_owned();
    for next in paulis {
        let next = next.as_ref();
        if product.len() != next.len() {
            return Err(EccError::LengthMismatch {
                left: product.len(),
                right: next.len(),
            });
        }
        product *= next;
    }
    Ok(product)
}
