//! Python bindings
//!
//! Exposes `CollectionCondition` with one static constructor per kind
//! (`CollectionCondition.AllIn([...])`), `to_json`/`from_json` over plain
//! dicts, and `is_satisfied`. Construction and decoding failures raise
//! `ConditionCreationError`.

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
use pyo3::IntoPyObjectExt;
use serde_json::Value;

use crate::condition::{CollectionCondition, ConditionKind};
use crate::error::ConditionCreationError as CreationError;
use crate::host::{self, HostValue};

create_exception!(abac_conditions, ConditionCreationError, PyValueError);

impl From<CreationError> for PyErr {
    fn from(err: CreationError) -> PyErr {
        ConditionCreationError::new_err(err.to_string())
    }
}

// ============================================================================
// Value Conversion
// ============================================================================

fn type_name(obj: &Bound<'_, PyAny>) -> String {
    obj.get_type()
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "object".to_string())
}

/// Mirror a Python object as a [`HostValue`]; conversion decisions live in `host`
fn host_value(obj: &Bound<'_, PyAny>) -> HostValue {
    if obj.is_none() {
        return HostValue::None;
    }
    if let Ok(flag) = obj.cast::<PyBool>() {
        return HostValue::Bool(flag.is_true());
    }
    if obj.is_instance_of::<PyInt>() {
        if let Ok(int) = obj.extract::<i64>() {
            return HostValue::Int(int);
        }
        if let Ok(int) = obj.extract::<u64>() {
            return HostValue::UInt(int);
        }
        return HostValue::Other(type_name(obj));
    }
    if let Ok(float) = obj.cast::<PyFloat>() {
        return HostValue::Float(float.value());
    }
    if let Ok(text) = obj.cast::<PyString>() {
        return match text.to_str() {
            Ok(text) => HostValue::Str(text.to_string()),
            Err(_) => HostValue::Other(type_name(obj)),
        };
    }
    if let Ok(list) = obj.cast::<PyList>() {
        return HostValue::List(list.iter().map(|item| host_value(&item)).collect());
    }
    if let Ok(tuple) = obj.cast::<PyTuple>() {
        return HostValue::Tuple(tuple.iter().map(|item| host_value(&item)).collect());
    }
    if let Ok(dict) = obj.cast::<PyDict>() {
        return HostValue::Dict(
            dict.iter()
                .map(|(key, value)| (host_value(&key), host_value(&value)))
                .collect(),
        );
    }
    HostValue::Other(type_name(obj))
}

fn json_to_py(py: Python<'_>, value: &Value) -> PyResult<Py<PyAny>> {
    match value {
        Value::Null => Ok(py.None()),
        Value::Bool(flag) => flag.into_py_any(py),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.into_py_any(py)
            } else if let Some(int) = number.as_u64() {
                int.into_py_any(py)
            } else {
                number.as_f64().unwrap_or(f64::NAN).into_py_any(py)
            }
        }
        Value::String(text) => text.as_str().into_py_any(py),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            Ok(list.into())
        }
        Value::Object(fields) => {
            let dict = PyDict::new(py);
            for (key, item) in fields {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            Ok(dict.into())
        }
    }
}

// ============================================================================
// CollectionCondition PyClass
// ============================================================================

/// Immutable collection condition shared with Python
#[pyclass(name = "CollectionCondition", module = "abac_conditions", frozen)]
pub struct PyCollectionCondition {
    inner: CollectionCondition,
}

impl PyCollectionCondition {
    fn build(kind: ConditionKind, values: &Bound<'_, PyAny>) -> PyResult<Self> {
        let inner = host::condition_from_host(kind, &host_value(values))?;
        Ok(PyCollectionCondition { inner })
    }
}

#[pymethods]
impl PyCollectionCondition {
    #[staticmethod]
    #[pyo3(name = "AllIn")]
    fn all_in(values: &Bound<'_, PyAny>) -> PyResult<Self> {
        Self::build(ConditionKind::AllIn, values)
    }

    #[staticmethod]
    #[pyo3(name = "AllNotIn")]
    fn all_not_in(values: &Bound<'_, PyAny>) -> PyResult<Self> {
        Self::build(ConditionKind::AllNotIn, values)
    }

    #[staticmethod]
    #[pyo3(name = "AnyIn")]
    fn any_in(values: &Bound<'_, PyAny>) -> PyResult<Self> {
        Self::build(ConditionKind::AnyIn, values)
    }

    #[staticmethod]
    #[pyo3(name = "AnyNotIn")]
    fn any_not_in(values: &Bound<'_, PyAny>) -> PyResult<Self> {
        Self::build(ConditionKind::AnyNotIn, values)
    }

    #[staticmethod]
    #[pyo3(name = "IsIn")]
    fn is_in(values: &Bound<'_, PyAny>) -> PyResult<Self> {
        Self::build(ConditionKind::IsIn, values)
    }

    #[staticmethod]
    #[pyo3(name = "IsNotIn")]
    fn is_not_in(values: &Bound<'_, PyAny>) -> PyResult<Self> {
        Self::build(ConditionKind::IsNotIn, values)
    }

    #[staticmethod]
    #[pyo3(name = "IsEmpty")]
    fn is_empty() -> Self {
        PyCollectionCondition {
            inner: CollectionCondition::is_empty(),
        }
    }

    #[staticmethod]
    #[pyo3(name = "IsNotEmpty")]
    fn is_not_empty() -> Self {
        PyCollectionCondition {
            inner: CollectionCondition::is_not_empty(),
        }
    }

    /// Decode a `{"condition": ..., "value": [...]}` dict
    #[staticmethod]
    fn from_json(data: &Bound<'_, PyAny>) -> PyResult<Self> {
        let inner = host::record_from_host(&host_value(data))?;
        Ok(PyCollectionCondition { inner })
    }

    fn to_json(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        json_to_py(py, &self.inner.to_json())
    }

    /// Evaluate against a runtime value; never raises
    #[pyo3(signature = (what=None))]
    fn is_satisfied(&self, what: Option<&Bound<'_, PyAny>>) -> bool {
        match what {
            None => self.inner.is_satisfied(None::<&Value>),
            Some(obj) => host::evaluate_host(&self.inner, &host_value(obj)),
        }
    }

    #[getter]
    fn kind(&self) -> &'static str {
        self.inner.kind().name()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __repr__(&self) -> String {
        match self.inner.reference() {
            Some(values) => format!("{}({})", self.inner.kind(), Value::Array(values.to_vec())),
            None => format!("{}()", self.inner.kind()),
        }
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn abac_conditions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCollectionCondition>()?;
    m.add(
        "ConditionCreationError",
        m.py().get_type::<ConditionCreationError>(),
    )?;
    Ok(())
}
