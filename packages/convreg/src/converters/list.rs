//! `Vec<T>` → Python list adapter
//!
//! Builds a new list and appends each element's Python representation in
//! order. The returned object is owned by the Python object model; `produces`
//! declares the concrete host type for callers that reason about return
//! types.

use std::any::Any;
use std::marker::PhantomData;

use pyo3::prelude::*;
use pyo3::types::PyList;

use crate::errors::ConvertError;
use crate::registry::ToPyAdapter;

pub struct VecToList<T> {
    _marker: PhantomData<T>,
}

impl<T> VecToList<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> ToPyAdapter for VecToList<T>
where
    T: ToPyObject + Send + Sync + 'static,
{
    fn convert(&self, py: Python<'_>, value: &dyn Any) -> PyResult<PyObject> {
        let items = value
            .downcast_ref::<Vec<T>>()
            .ok_or(ConvertError::TypeMismatch {
                target: std::any::type_name::<Vec<T>>(),
            })?;

        let list = PyList::empty(py);
        for item in items {
            list.append(item.to_object(py))?;
        }

        Ok(list.into())
    }

    fn produces(&self) -> &'static str {
        "list"
    }
}
