/*
 * convreg - runtime converter registry for PyO3 extension modules
 *
 * Layout:
 * - converters/ : leaf adapters (sequence, iterator, list, enum)
 * - registry    : process-wide dispatch table, written at module init
 * - errors      : ConvertError and its PyErr mapping
 *
 * Conversions run synchronously under the GIL; the registry is populated
 * once when the module is imported and is read-only afterwards.
 */

use pyo3::prelude::*;

/// Leaf conversion adapters
pub mod converters;

/// Error types
pub mod errors;

/// Converter registry and dispatch
pub mod registry;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use converters::IntEnum;
pub use errors::ConvertError;
pub use registry::{
    extract, register_enum_converters, register_vec_converters, registered_type_names, to_python,
    FromPyAdapter, ToPyAdapter,
};

// ═══════════════════════════════════════════════════════════════════════════
// Python Module Registration
// ═══════════════════════════════════════════════════════════════════════════

/// Install converters for the stock element types. Runs once per process;
/// repeated calls are no-ops by registry policy.
fn register_default_converters() {
    registry::register_vec_converters::<i32>();
    registry::register_vec_converters::<i64>();
    registry::register_vec_converters::<f64>();
    registry::register_vec_converters::<String>();
}

/// Names of every target type currently registered, sorted.
#[pyfunction]
fn registered_types() -> Vec<&'static str> {
    registry::registered_type_names()
}

/// Debug helper: push an object through the registry both ways.
///
/// Accepts any sequence or iterator of ints and returns a fresh list built
/// by the container-to-list adapter.
#[pyfunction]
fn roundtrip_i64_list(py: Python<'_>, obj: &PyAny) -> PyResult<PyObject> {
    let items: Vec<i64> = registry::extract(obj)?;
    registry::to_python(py, &items)
}

#[pymodule]
fn convreg(_py: Python, m: &PyModule) -> PyResult<()> {
    register_default_converters();

    m.add_function(wrap_pyfunction!(registered_types, m)?)?;
    m.add_function(wrap_pyfunction!(roundtrip_i64_list, m)?)?;

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
