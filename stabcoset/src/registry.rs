use std::{collections::BTreeMap, sync::OnceLock};

use serde::Deserialize;
use tracing::debug;

use crate::{code::CodeDefinition, error::EccError, pauli::PauliString, FxIndexMap};

const STANDARD_CODES: &str = include_str!("codes.toml");

/// One `[[code]]` entry of a code table, before validation
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CodeRecord {
    name: String,
    n: usize,
    k: usize,
    d: usize,
    #[serde(default)]
    k_c: usize,
    stabilizers: Vec<String>,
    logical_x: BTreeMap<String, String>,
    logical_z: BTreeMap<String, String>,
    #[serde(default)]
    classical_z: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CodeTable {
    #[serde(rename = "code", default)]
    codes: Vec<CodeRecord>,
}

fn parse_indexed(
    code: &str,
    ops: BTreeMap<String, String>,
) -> Result<BTreeMap<usize, PauliString>, EccError> {
    ops.into_iter()
        .map(|(index, op)| {
            let index = index.parse::<usize>().map_err(|_| {
                EccError::Validation(format!("{code}: operator index {index:?} is not a number"))
            })?;
            Ok((index, PauliString::parse(&op)?))
        })
        .collect()
}

impl TryFrom<CodeRecord> for CodeDefinition {
    type Error = EccError;

    fn try_from(record: CodeRecord) -> Result<Self, Self::Error> {
        let generators = record
            .stabilizers
            .iter()
            .map(|s| PauliString::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        let logical_x = parse_indexed(&record.name, record.logical_x)?;
        let logical_z = parse_indexed(&record.name, record.logical_z)?;
        let classical = parse_indexed(&record.name, record.classical_z)?;
        if classical.len() != record.k_c {
            return Err(EccError::Validation(format!(
                "{}: k_c is {} but {} classical operators are given",
                record.name,
                record.k_c,
                classical.len()
            )));
        }
        CodeDefinition::new(
            record.name,
            record.n,
            record.k,
            record.d,
            generators,
            logical_x,
            logical_z,
        )?
        .with_classical(classical)
    }
}

/// An immutable table of named code definitions.
///
/// Build it once, with [`CodeRegistry::standard`] for the built-in codes or
/// [`CodeRegistry::from_toml_str`] for a custom table, and share it by reference.
#[derive(Clone, Debug, Default)]
pub struct CodeRegistry {
    codes: FxIndexMap<String, CodeDefinition>,
}

impl CodeRegistry {
    /// The built-in codes: `four_one_two`, `eight_one_three`, `eight_one_two_three`,
    /// `eight_three_three`, `seven_one_three` and `five_one_three`.
    ///
    /// # Errors
    ///
    /// Only if the embedded table is malformed.
    pub fn standard() -> Result<Self, EccError> {
        Self::from_toml_str(STANDARD_CODES)
    }

    /// The built-in codes, parsed on first use and shared for the rest of the process.
    ///
    /// # Errors
    ///
    /// Only if the embedded table is malformed. The error is kept and returned on every call.
    pub fn shared() -> Result<&'static Self, EccError> {
        static SHARED: OnceLock<Result<CodeRegistry, EccError>> = OnceLock::new();
        SHARED
            .get_or_init(Self::standard)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Reads a table of `[[code]]` entries, validating every code in it.
    ///
    /// # Errors
    ///
    /// [`EccError::Config`] if the TOML cannot be read, [`EccError::InvalidSymbol`] for a bad
    /// operator string, and [`EccError::Validation`] for an inconsistent code or a repeated
    /// name.
    pub fn from_toml_str(s: &str) -> Result<Self, EccError> {
        let table: CodeTable = toml::from_str(s)?;
        let mut codes = FxIndexMap::default();
        for record in table.codes {
            let code = CodeDefinition::try_from(record)?;
            let name = code.name().to_owned();
            if codes.insert(name.clone(), code).is_some() {
                return Err(EccError::Validation(format!("code {name:?} is defined twice")));
            }
        }
        debug!(num_codes = codes.len(), "loaded code table");
        Ok(CodeRegistry { codes })
    }

    /// # Errors
    ///
    /// [`EccError::UnknownCode`] if there is no code called `name`.
    pub fn get(&self, name: &str) -> Result<&CodeDefinition, EccError> {
        self.codes
            .get(name)
            .ok_or_else(|| EccError::UnknownCode(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeDefinition> {
        self.codes.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
