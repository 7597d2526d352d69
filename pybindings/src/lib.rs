// There seems to be some issues with the pyo3 bindings generation on methods returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod code;
pub mod pauli;

use crate::code::PyStabilizerCode;
use pyo3::prelude::*;

#[pymodule]
#[pyo3(name = "libstabcoset")]
fn stabcoset(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(pauli::pauli_multiply, m)?)?;
    m.add_function(wrap_pyfunction!(pauli::multiply_pauli_list, m)?)?;
    m.add_function(wrap_pyfunction!(pauli::get_support, m)?)?;
    m.add_class::<PyStabilizerCode>()?;
    Ok(())
}
