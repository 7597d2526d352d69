use pyo3::prelude::*;
use pyo3::types::{PyDict, PyTuple};

use stabcoset::{CodeDefinition, CodeRegistry, Support};

use crate::pauli::{parse, value_error};

fn support_key<'py>(py: Python<'py>, support: &Support) -> PyResult<Bound<'py, PyTuple>> {
    PyTuple::new(py, support.positions().iter().copied())
}

#[pyclass(name = "StabilizerCode")]
#[derive(Clone)]
pub struct PyStabilizerCode {
    pub(crate) inner: CodeDefinition,
}

#[pymethods]
impl PyStabilizerCode {
    /// Loads one of the built-in codes by name
    #[staticmethod]
    pub fn standard(name: &str) -> PyResult<Self> {
        let registry = CodeRegistry::shared().map_err(value_error)?;
        let inner = registry.get(name).map_err(value_error)?.clone();
        Ok(PyStabilizerCode { inner })
    }

    /// Names of the built-in codes
    #[staticmethod]
    pub fn standard_names() -> PyResult<Vec<String>> {
        let registry = CodeRegistry::shared().map_err(value_error)?;
        Ok(registry.names().map(str::to_owned).collect())
    }

    #[getter]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    #[getter]
    pub fn n(&self) -> usize {
        self.inner.n()
    }

    #[getter]
    pub fn k(&self) -> usize {
        self.inner.k()
    }

    #[getter]
    pub fn d(&self) -> usize {
        self.inner.d()
    }

    #[getter]
    pub fn k_c(&self) -> usize {
        self.inner.k_c()
    }

    /// The stabilizer group as a dict from each element to the list of 1-indexed
    /// generators whose product it is
    pub fn get_stabilizer_group<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let group = self.inner.stabilizer_group().map_err(value_error)?;
        let dict = PyDict::new(py);
        for (element, subset) in group.iter() {
            dict.set_item(element.to_string(), subset.indices().to_vec())?;
        }
        Ok(dict)
    }

    /// The coset `op * S` as a dict from each element to its generator list
    pub fn get_logical_operators<'py>(
        &self,
        py: Python<'py>,
        op: &str,
    ) -> PyResult<Bound<'py, PyDict>> {
        let coset = self.inner.logical_operators(&parse(op)?).map_err(value_error)?;
        let dict = PyDict::new(py);
        for (element, subset) in coset.iter() {
            dict.set_item(element.to_string(), subset.indices().to_vec())?;
        }
        Ok(dict)
    }

    /// The coset `op * S` grouped by support, as a dict from support tuples to lists of
    /// operators
    pub fn get_all_supports<'py>(&self, py: Python<'py>, op: &str) -> PyResult<Bound<'py, PyDict>> {
        let table = self.inner.all_supports(&parse(op)?).map_err(value_error)?;
        let dict = PyDict::new(py);
        for (support, ops) in table.iter() {
            let ops: Vec<String> = ops.iter().map(ToString::to_string).collect();
            dict.set_item(support_key(py, support)?, ops)?;
        }
        Ok(dict)
    }

    /// For every qubit subset, the labels of the logical operators of logical qubit `index`
    /// that can be implemented on it
    pub fn get_supported_operators<'py>(
        &self,
        py: Python<'py>,
        index: usize,
    ) -> PyResult<Bound<'py, PyDict>> {
        let access = self.inner.supported_operators(index).map_err(value_error)?;
        let dict = PyDict::new(py);
        for (support, labels) in access.iter() {
            let labels: Vec<String> = labels.iter().map(ToString::to_string).collect();
            dict.set_item(support_key(py, support)?, labels)?;
        }
        Ok(dict)
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("StabilizerCode(name={:?})", self.inner.name())
    }
}
