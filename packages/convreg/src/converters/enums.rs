//! Enum ↔ int adapters
//!
//! An `IntEnum` is a `Copy` enumeration carried over the wire as its
//! underlying `u32`. Int → enum extracts the Python integer as `u64`
//! (negative values raise, like `PyLong_AsUnsignedLong`), truncates to the
//! underlying width, and hands the raw value to `from_underlying`. No range
//! validation happens in the adapter: out-of-range values alias through
//! whatever policy `from_underlying` implements. Enum → int widens the
//! underlying value back to a Python `int`.

use std::any::Any;
use std::marker::PhantomData;

use pyo3::prelude::*;
use pyo3::types::PyLong;

use crate::errors::ConvertError;
use crate::registry::{FromPyAdapter, ToPyAdapter};

/// Enumeration with a fixed `u32` underlying representation.
///
/// `from_underlying` is infallible by contract; implementors decide how
/// values outside the enumerator set alias (truncate, saturate, map to a
/// default). The adapters never validate the range themselves.
pub trait IntEnum: Copy + Send + Sync + 'static {
    fn from_underlying(raw: u32) -> Self;
    fn to_underlying(self) -> u32;
}

pub struct IntToEnum<E> {
    _marker: PhantomData<E>,
}

impl<E> IntToEnum<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> FromPyAdapter for IntToEnum<E>
where
    E: IntEnum,
{
    fn convertible(&self, obj: &PyAny) -> bool {
        obj.downcast::<PyLong>().is_ok()
    }

    fn construct(&self, obj: &PyAny) -> PyResult<Box<dyn Any + Send>> {
        let raw: u64 = obj.extract()?;
        Ok(Box::new(E::from_underlying(raw as u32)))
    }
}

pub struct EnumToInt<E> {
    _marker: PhantomData<E>,
}

impl<E> EnumToInt<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> ToPyAdapter for EnumToInt<E>
where
    E: IntEnum,
{
    fn convert(&self, py: Python<'_>, value: &dyn Any) -> PyResult<PyObject> {
        let enumval = value.downcast_ref::<E>().ok_or(ConvertError::TypeMismatch {
            target: std::any::type_name::<E>(),
        })?;
        Ok((u64::from(enumval.to_underlying())).to_object(py))
    }

    fn produces(&self) -> &'static str {
        "int"
    }
}
