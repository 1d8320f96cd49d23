//! Sequence → `Vec<T>` adapter
//!
//! Accepts any object passing Python's sequence check (defined length and
//! positional item access): list, tuple, str, range, and user types with
//! `__len__`/`__getitem__` slots. Items are copied in ascending index order.

use std::any::Any;
use std::marker::PhantomData;

use pyo3::prelude::*;
use pyo3::types::PySequence;

use crate::registry::FromPyAdapter;

pub struct SequenceToVec<T> {
    _marker: PhantomData<T>,
}

impl<T> SequenceToVec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> FromPyAdapter for SequenceToVec<T>
where
    T: for<'source> FromPyObject<'source> + Send + Sync + 'static,
{
    fn convertible(&self, obj: &PyAny) -> bool {
        obj.downcast::<PySequence>().is_ok()
    }

    fn construct(&self, obj: &PyAny) -> PyResult<Box<dyn Any + Send>> {
        let sequence: &PySequence = obj.downcast().map_err(PyErr::from)?;
        let len = sequence.len()?;

        let mut items: Vec<T> = Vec::with_capacity(len);
        for index in 0..len {
            let item = sequence.get_item(index)?;
            items.push(item.extract::<T>()?);
        }

        Ok(Box::new(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::exceptions::PyTypeError;

    fn adapter() -> SequenceToVec<i64> {
        SequenceToVec::<i64>::new()
    }

    #[test]
    fn test_list_is_convertible() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("[1, 2, 3]", None, None).unwrap();
            assert!(adapter().convertible(obj));
        });
    }

    #[test]
    fn test_iterator_is_not_convertible() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("iter([1, 2, 3])", None, None).unwrap();
            assert!(!adapter().convertible(obj));
        });
    }

    #[test]
    fn test_preserves_length_and_order() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("[5, 4, 3, 2, 1]", None, None).unwrap();
            let boxed = adapter().construct(obj).unwrap();
            let items = *boxed.downcast::<Vec<i64>>().unwrap();
            assert_eq!(items, vec![5, 4, 3, 2, 1]);
        });
    }

    #[test]
    fn test_tuple_converts() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("(7, 8)", None, None).unwrap();
            let boxed = adapter().construct(obj).unwrap();
            let items = *boxed.downcast::<Vec<i64>>().unwrap();
            assert_eq!(items, vec![7, 8]);
        });
    }

    #[test]
    fn test_bad_element_aborts_conversion() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("[1, 2, 'three', 4]", None, None).unwrap();
            assert!(adapter().convertible(obj));
            let err = adapter().construct(obj).unwrap_err();
            assert!(err.is_instance_of::<PyTypeError>(py));
        });
    }
}
