//! `stabcoset` is a Rust library for exploring small quantum stabilizer codes by brute-force
//! enumeration. Some features include:
//! - multiplying Pauli strings, ignoring global phase
//! - enumerating a stabilizer group together with the generator subset each element came from
//! - enumerating the coset of a logical operator and grouping it by support
//! - computing, for every set of qubits, which logical operators of a given logical qubit
//!   can be implemented there (its access structure)
//! - a registry of named example codes, including a hybrid quantum-classical code
//!
//! The main data structures provided by this crate are:
//! - [`PauliString`]: an owned string of single-qubit Pauli letters, with [`PauliStr`] as its
//!   borrowed form
//! - [`StabilizerGroup`] and [`Coset`]: fully enumerated groups and cosets with provenance
//! - [`CodeDefinition`]: an `[[n,k,d]]` code, read from a [`CodeRegistry`]
//! - [`AccessStructure`]: the implementable logical operators for each qubit subset

#![allow(
    clippy::suspicious_arithmetic_impl,
    clippy::uninlined_format_args,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod access;
pub mod code;
pub mod error;
pub mod logical;
pub mod pauli;
pub mod registry;
pub mod stabilizer;
pub mod support;

pub use access::{AccessStructure, InformationClass, LogicalLabel};
pub use code::CodeDefinition;
pub use error::EccError;
pub use logical::{LogicalWeight, LogicalWeightTable};
pub use pauli::{multiply, multiply_sequence, PauliLetter, PauliStr, PauliString};
pub use registry::CodeRegistry;
pub use stabilizer::{Coset, GeneratorSubset, ProvenancePolicy, StabilizerGroup};
pub use support::{Support, SupportTable};

/// An insertion-ordered map using the Fx hasher
pub(crate) type FxIndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
