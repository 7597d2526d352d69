use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use stabcoset::{EccError, PauliString};

pub(crate) fn value_error(err: EccError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub(crate) fn parse(s: &str) -> PyResult<PauliString> {
    PauliString::parse(s).map_err(value_error)
}

/// Multiplies two Pauli strings of equal length, ignoring phase
#[pyfunction]
pub fn pauli_multiply(p1: &str, p2: &str) -> PyResult<String> {
    let product = stabcoset::multiply(&parse(p1)?, &parse(p2)?).map_err(value_error)?;
    Ok(product.to_string())
}

/// Multiplies a non-empty list of Pauli strings left to right, ignoring phase
#[pyfunction]
pub fn multiply_pauli_list(paulis: Vec<String>) -> PyResult<String> {
    let paulis = paulis
        .iter()
        .map(|p| parse(p))
        .collect::<PyResult<Vec<_>>>()?;
    let product = stabcoset::multiply_sequence(&paulis).map_err(value_error)?;
    Ok(product.to_string())
}

/// Returns the 1-indexed positions where the operator is not the identity, as a tuple
#[pyfunction]
pub fn get_support<'py>(py: Python<'py>, op: &str) -> PyResult<Bound<'py, PyTuple>> {
    PyTuple::new(py, parse(op)?.support().positions().iter().copied())
}
