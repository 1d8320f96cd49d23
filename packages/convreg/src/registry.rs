//! Process-wide converter registry
//!
//! Conversions are dispatched through a global table keyed by the `TypeId`
//! of the target native type. From-Python entries are ordered lists of
//! adapters, each pairing a capability check with a type-erased
//! construction step; to-Python entries hold a single adapter per type.
//!
//! The table is written only by the registration functions (called from
//! module init) and read by `extract`/`to_python` afterwards. Duplicate
//! registration for the same target type is ignored with a warning, so
//! module re-import cannot double-register.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pyo3::prelude::*;
use tracing::{debug, warn};

use crate::converters::{EnumToInt, IntEnum, IntToEnum, IteratorToVec, SequenceToVec, VecToList};
use crate::errors::ConvertError;

// ═══════════════════════════════════════════════════════════════════════════
// Adapter Traits
// ═══════════════════════════════════════════════════════════════════════════

/// Object-safe from-Python adapter: capability check + type-erased construct.
///
/// `construct` is only called after `convertible` returned true for the same
/// object. Its boxed result must downcast to the target type the adapter was
/// registered under.
pub trait FromPyAdapter: Send + Sync {
    /// Cheap capability check deciding whether this adapter accepts `obj`.
    fn convertible(&self, obj: &PyAny) -> bool;

    /// Convert `obj` into the target native type, boxed for type erasure.
    fn construct(&self, obj: &PyAny) -> PyResult<Box<dyn Any + Send>>;
}

/// Object-safe to-Python adapter.
pub trait ToPyAdapter: Send + Sync {
    /// Convert a native value (erased) into an owned Python object.
    fn convert(&self, py: Python<'_>, value: &dyn Any) -> PyResult<PyObject>;

    /// Name of the concrete Python type this adapter produces ("list", "int").
    fn produces(&self) -> &'static str;
}

// ═══════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct ConverterRegistry {
    from_py: HashMap<TypeId, Vec<Box<dyn FromPyAdapter>>>,
    to_py: HashMap<TypeId, Box<dyn ToPyAdapter>>,
    names: HashMap<TypeId, &'static str>,
}

static REGISTRY: Lazy<RwLock<ConverterRegistry>> =
    Lazy::new(|| RwLock::new(ConverterRegistry::default()));

/// Register the ordered-container conversions for element type `T`:
/// sequence → `Vec<T>`, iterator → `Vec<T>`, and `Vec<T>` → list.
///
/// Called once per element type during module initialization. The sequence
/// adapter is installed ahead of the iterator adapter; together with the
/// adapters' mutually exclusive capability checks this gives sequence access
/// priority for objects satisfying both protocols.
pub fn register_vec_converters<T>()
where
    T: for<'source> FromPyObject<'source> + ToPyObject + Send + Sync + 'static,
{
    let mut guard = REGISTRY.write();
    let registry = &mut *guard;
    let key = TypeId::of::<Vec<T>>();
    let name = type_name::<Vec<T>>();

    if registry.names.contains_key(&key) {
        warn!(target_type = name, "converters already registered, ignoring");
        return;
    }
    registry.names.insert(key, name);

    let entries = registry.from_py.entry(key).or_default();
    entries.push(Box::new(SequenceToVec::<T>::new()));
    entries.push(Box::new(IteratorToVec::<T>::new()));
    registry.to_py.insert(key, Box::new(VecToList::<T>::new()));

    debug!(target_type = name, "registered container converters");
}

/// Register the enumerated-value conversions for `E`: int → `E` and
/// `E` → int. Called once per enum type during module initialization.
pub fn register_enum_converters<E>()
where
    E: IntEnum,
{
    let mut guard = REGISTRY.write();
    let registry = &mut *guard;
    let key = TypeId::of::<E>();
    let name = type_name::<E>();

    if registry.names.contains_key(&key) {
        warn!(target_type = name, "converters already registered, ignoring");
        return;
    }
    registry.names.insert(key, name);

    registry
        .from_py
        .entry(key)
        .or_default()
        .push(Box::new(IntToEnum::<E>::new()));
    registry.to_py.insert(key, Box::new(EnumToInt::<E>::new()));

    debug!(target_type = name, "registered enum converters");
}

// ═══════════════════════════════════════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════════════════════════════════════

/// Convert a Python object into `T` through the registered adapters.
///
/// Adapters registered for `T` are tried in registration order; the first
/// whose capability check accepts `obj` performs the conversion. Failures
/// inside an accepted adapter propagate as-is; an input no adapter accepts
/// raises `TypeError`.
pub fn extract<T: Any + Send>(obj: &PyAny) -> PyResult<T> {
    let registry = REGISTRY.read();
    let target = type_name::<T>();

    let adapters = registry
        .from_py
        .get(&TypeId::of::<T>())
        .ok_or(ConvertError::MissingConverter { target })?;

    for adapter in adapters {
        if adapter.convertible(obj) {
            let boxed = adapter.construct(obj)?;
            return boxed
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| ConvertError::TypeMismatch { target }.into());
        }
    }

    Err(ConvertError::NotConvertible {
        input: python_type_name(obj),
        target,
    }
    .into())
}

/// Convert a native value into an owned Python object through the
/// registered to-Python adapter for `T`.
pub fn to_python<T: Any>(py: Python<'_>, value: &T) -> PyResult<PyObject> {
    let registry = REGISTRY.read();
    match registry.to_py.get(&TypeId::of::<T>()) {
        Some(adapter) => adapter.convert(py, value),
        None => Err(ConvertError::MissingConverter {
            target: type_name::<T>(),
        }
        .into()),
    }
}

/// Human-readable names of every registered target type, sorted.
pub fn registered_type_names() -> Vec<&'static str> {
    let registry = REGISTRY.read();
    let mut names: Vec<&'static str> = registry.names.values().copied().collect();
    names.sort_unstable();
    names
}

fn python_type_name(obj: &PyAny) -> String {
    obj.get_type()
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
