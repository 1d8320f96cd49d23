//! Iterator → `Vec<T>` adapter
//!
//! Accepts objects implementing the iteration protocol that are NOT
//! sequences; sequence access takes priority (mutual exclusion with the
//! sequence adapter, since some objects satisfy both interfaces).
//!
//! An error raised inside the producing iterator — a generator body raising
//! after n yields is the canonical case — surfaces as the final element of
//! PyO3's iteration protocol, after the n already-converted items were
//! accumulated. `drain_into` keeps that prefix in the caller's buffer so the
//! behavior stays observable.

use std::any::Any;
use std::marker::PhantomData;

use pyo3::prelude::*;
use pyo3::types::{PyIterator, PySequence};

use crate::registry::FromPyAdapter;

pub struct IteratorToVec<T> {
    _marker: PhantomData<T>,
}

impl<T> IteratorToVec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

/// Pull items from `iter` into `out` until exhaustion, converting each.
///
/// On error the items converted so far remain in `out`.
pub fn drain_into<'py, T>(iter: &'py PyIterator, out: &mut Vec<T>) -> PyResult<()>
where
    T: FromPyObject<'py>,
{
    for item in iter {
        // A generator-raised error arrives here as the terminating item.
        let value = item?;
        out.push(value.extract::<T>()?);
    }
    Ok(())
}

impl<T> FromPyAdapter for IteratorToVec<T>
where
    T: for<'source> FromPyObject<'source> + Send + Sync + 'static,
{
    fn convertible(&self, obj: &PyAny) -> bool {
        obj.downcast::<PyIterator>().is_ok() && obj.downcast::<PySequence>().is_err()
    }

    fn construct(&self, obj: &PyAny) -> PyResult<Box<dyn Any + Send>> {
        let iter: &PyIterator = obj.downcast().map_err(PyErr::from)?;
        let mut items: Vec<T> = Vec::new();
        drain_into(iter, &mut items)?;
        Ok(Box::new(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::exceptions::PyValueError;
    use pyo3::types::PyDict;

    fn adapter() -> IteratorToVec<i64> {
        IteratorToVec::<i64>::new()
    }

    /// Helper: build a generator object from Python source.
    fn make_generator<'py>(py: Python<'py>, body: &str) -> &'py PyAny {
        let namespace = PyDict::new(py);
        py.run(body, Some(namespace), None).unwrap();
        py.eval("gen()", Some(namespace), None).unwrap()
    }

    #[test]
    fn test_iterator_is_convertible() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("iter([1, 2, 3])", None, None).unwrap();
            assert!(adapter().convertible(obj));
        });
    }

    #[test]
    fn test_sequence_is_never_routed_here() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("[1, 2, 3]", None, None).unwrap();
            assert!(!adapter().convertible(obj));
        });
    }

    #[test]
    fn test_drains_in_order() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = make_generator(py, "def gen():\n    yield 3\n    yield 1\n    yield 2\n");
            assert!(adapter().convertible(obj));
            let boxed = adapter().construct(obj).unwrap();
            let items = *boxed.downcast::<Vec<i64>>().unwrap();
            assert_eq!(items, vec![3, 1, 2]);
        });
    }

    #[test]
    fn test_generator_error_propagates_after_prefix() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = make_generator(
                py,
                "def gen():\n    yield 1\n    yield 2\n    yield 3\n    raise ValueError('boom')\n",
            );
            let iter: &PyIterator = obj.downcast().unwrap();

            let mut items: Vec<i64> = Vec::new();
            let err = drain_into(iter, &mut items).unwrap_err();

            // The yielded prefix was accumulated before the error surfaced.
            assert_eq!(items, vec![1, 2, 3]);
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn test_empty_iterator() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let obj = py.eval("iter([])", None, None).unwrap();
            let boxed = adapter().construct(obj).unwrap();
            let items = *boxed.downcast::<Vec<i64>>().unwrap();
            assert!(items.is_empty());
        });
    }
}
