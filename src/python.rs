//! Python bindings
//!
//! The host holds one engine and one settings record for the whole process.
//! Both are cached here: `init_config` builds the engine once, and the
//! settings window flips flags through `set_settings` while hooks run.

use crate::age::AgeMapping;
use crate::config::{EngineConfig, Settings, SpeciesProfile};
use crate::error::BirthQualityError;
use crate::ritual::{BirthQualityEngine, Subject};
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Cached State
// ============================================================================

/// Global cached engine
static CACHED_ENGINE: OnceCell<Arc<RwLock<BirthQualityEngine>>> = OnceCell::new();

/// Process-wide settings, copied out whole on every evaluation
static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::default()));

fn cached_engine() -> Result<Arc<RwLock<BirthQualityEngine>>, BirthQualityError> {
    CACHED_ENGINE
        .get()
        .cloned()
        .ok_or(BirthQualityError::ConfigNotInitialized)
}

#[inline]
fn current_settings() -> Settings {
    *SETTINGS.read()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Helper to get attribute from either dict or object
fn get_attr<'py>(obj: &Bound<'py, PyAny>, name: &str) -> PyResult<Bound<'py, PyAny>> {
    if let Ok(dict) = obj.downcast::<PyDict>() {
        dict.get_item(name)?
            .ok_or_else(|| pyo3::exceptions::PyKeyError::new_err(name.to_string()))
    } else {
        obj.getattr(name)
    }
}

/// Helper to get optional attribute from either dict or object
fn get_attr_opt<'py>(obj: &Bound<'py, PyAny>, name: &str) -> Option<Bound<'py, PyAny>> {
    if let Ok(dict) = obj.downcast::<PyDict>() {
        dict.get_item(name).ok().flatten()
    } else {
        obj.getattr(name).ok()
    }
}

/// Species list: [{"def_name": "Human", "adult_min_age": 18, "life_expectancy": 80}],
/// the same shape `EngineConfig` reads from JSON
fn extract_species(obj: &Bound<'_, PyAny>) -> PyResult<Vec<SpeciesProfile>> {
    let list = obj.downcast::<PyList>()?;
    let mut profiles = Vec::with_capacity(list.len());
    for item in list.iter() {
        let def_name: String = get_attr(&item, "def_name")?.extract()?;
        let adult_min_age: Option<f32> = get_attr_opt(&item, "adult_min_age")
            .and_then(|v| v.extract::<Option<f32>>().ok())
            .flatten();
        let life_expectancy: f32 = get_attr(&item, "life_expectancy")?.extract()?;
        profiles.push(SpeciesProfile::new(def_name, adult_min_age, life_expectancy));
    }
    Ok(profiles)
}

fn extract_mapping(obj: &Bound<'_, PyAny>) -> PyResult<AgeMapping> {
    let name: String = obj.extract()?;
    match name.as_str() {
        "plateau" => Ok(AgeMapping::Plateau),
        "legacy" => Ok(AgeMapping::Legacy),
        other => Err(BirthQualityError::DeserializationError(format!(
            "unknown mapping: {}",
            other
        ))
        .into()),
    }
}

fn extract_settings(obj: &Bound<'_, PyAny>) -> Settings {
    let flag = |name: &str| {
        get_attr_opt(obj, name)
            .and_then(|v| v.extract::<bool>().ok())
            .unwrap_or(false)
    };
    Settings::new(
        flag("preventShortLifespanPenalty"),
        flag("AgelessAtPeakBirthQuality"),
    )
}

/// Pawn snapshot: {"name", "def_name", "biological_age", "biological_age_tick_factor"}
fn extract_subject(obj: &Bound<'_, PyAny>) -> PyResult<Subject> {
    let name: String = get_attr_opt(obj, "name")
        .and_then(|v| v.extract().ok())
        .unwrap_or_default();
    let def_name: String = get_attr(obj, "def_name")?.extract()?;
    let biological_age: f32 = get_attr(obj, "biological_age")?.extract()?;
    let tick_factor: Option<f32> = get_attr_opt(obj, "biological_age_tick_factor")
        .and_then(|v| v.extract::<Option<f32>>().ok())
        .flatten();

    Ok(Subject::new(name, def_name, biological_age).with_tick_factor(tick_factor))
}

fn extract_optional_subject(obj: Option<&Bound<'_, PyAny>>) -> PyResult<Option<Subject>> {
    match obj {
        Some(obj) if !obj.is_none() => Ok(Some(extract_subject(obj)?)),
        _ => Ok(None),
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Initialize the engine (call once at startup, again to reload)
///
/// # Arguments
/// * `config` - Optional dict with the `EngineConfig` keys (`species`,
///   `curve`, `mapping`) plus `settings`; anything missing uses the
///   vanilla defaults
#[pyfunction]
#[pyo3(signature = (config=None))]
fn init_config(config: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
    let mut engine_config = EngineConfig::default();

    if let Some(config) = config {
        if let Some(species) = config.get_item("species")? {
            engine_config.species = extract_species(&species)?;
        }
        if let Some(points) = config.get_item("curve")? {
            engine_config.curve = Some(points.extract()?);
        }
        if let Some(name) = config.get_item("mapping")? {
            engine_config.mapping = extract_mapping(&name)?;
        }
        if let Some(settings) = config.get_item("settings")? {
            *SETTINGS.write() = extract_settings(&settings);
        }
    }

    let engine = BirthQualityEngine::from_config(&engine_config)?;

    // If already initialized, update the engine
    if let Some(existing) = CACHED_ENGINE.get() {
        *existing.write() = engine;
    } else {
        let _ = CACHED_ENGINE.set(Arc::new(RwLock::new(engine)));
    }

    Ok(())
}

/// Check if the engine is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    CACHED_ENGINE.get().is_some()
}

/// Update one or both settings flags; omitted flags keep their value
#[pyfunction]
#[pyo3(signature = (prevent_short_lifespan_penalty=None, ageless_at_peak_birth_quality=None))]
fn set_settings(
    prevent_short_lifespan_penalty: Option<bool>,
    ageless_at_peak_birth_quality: Option<bool>,
) {
    let mut settings = SETTINGS.write();
    if let Some(value) = prevent_short_lifespan_penalty {
        settings.prevent_short_lifespan_penalty = value;
    }
    if let Some(value) = ageless_at_peak_birth_quality {
        settings.ageless_at_peak_birth_quality = value;
    }
}

/// Current settings keyed by their save names
#[pyfunction]
fn get_settings() -> HashMap<String, bool> {
    let settings = current_settings();
    let mut map = HashMap::with_capacity(2);
    map.insert(
        "preventShortLifespanPenalty".to_string(),
        settings.prevent_short_lifespan_penalty,
    );
    map.insert(
        "AgelessAtPeakBirthQuality".to_string(),
        settings.ageless_at_peak_birth_quality,
    );
    map
}

/// Human-equivalent age of a pawn of a registered species
///
/// # Raises
/// KeyError if `def_name` is not registered
#[pyfunction]
#[pyo3(signature = (def_name, biological_age, biological_age_tick_factor=Some(1.0)))]
fn human_equivalent_age(
    def_name: &str,
    biological_age: f32,
    biological_age_tick_factor: Option<f32>,
) -> PyResult<f32> {
    let engine_arc = cached_engine()?;
    let engine = engine_arc.read();
    engine.registry().require(def_name)?;

    let subject = Subject::new("", def_name, biological_age)
        .with_tick_factor(biological_age_tick_factor);
    Ok(engine.equivalent_age(Some(&subject), &current_settings()))
}

/// Quality offset of the cached curve at `equivalent_age`
#[pyfunction]
fn evaluate_quality(equivalent_age: f32) -> PyResult<f32> {
    let engine_arc = cached_engine()?;
    let engine = engine_arc.read();
    Ok(engine.evaluate_quality(equivalent_age))
}

/// Magnitude hook; returns `original` when the hook does not apply
#[pyfunction]
#[pyo3(signature = (role_id, pawn, original))]
fn ritual_count(role_id: &str, pawn: Option<&Bound<'_, PyAny>>, original: f32) -> PyResult<f32> {
    let subject = extract_optional_subject(pawn)?;
    let engine_arc = cached_engine()?;
    let engine = engine_arc.read();
    Ok(engine.count(role_id, subject.as_ref(), original, &current_settings()))
}

/// Description hook; `None` keeps the host's text
#[pyfunction]
#[pyo3(signature = (role_id, label, pawn))]
fn ritual_description(
    role_id: &str,
    label: &str,
    pawn: Option<&Bound<'_, PyAny>>,
) -> PyResult<Option<String>> {
    let subject = extract_optional_subject(pawn)?;
    let engine_arc = cached_engine()?;
    let engine = engine_arc.read();
    Ok(engine.describe(role_id, label, subject.as_ref(), &current_settings()))
}

/// Quality-factor hook; `None` keeps the host's row
#[pyfunction]
#[pyo3(signature = (role_id, label, pawn))]
fn ritual_quality_factor(
    py: Python<'_>,
    role_id: &str,
    label: &str,
    pawn: Option<&Bound<'_, PyAny>>,
) -> PyResult<Option<Py<PyAny>>> {
    let subject = extract_optional_subject(pawn)?;
    let engine_arc = cached_engine()?;
    let engine = engine_arc.read();

    let Some(factor) = engine.quality_factor(role_id, label, subject.as_ref(), &current_settings())
    else {
        return Ok(None);
    };

    let dict = PyDict::new(py);
    dict.set_item("label", factor.label)?;
    dict.set_item("count", factor.count)?;
    dict.set_item("quality", factor.quality)?;
    dict.set_item("positive", factor.positive)?;
    dict.set_item("quality_change", factor.quality_change.to_string())?;
    Ok(Some(dict.into_any().unbind()))
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn birth_quality_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(set_settings, m)?)?;
    m.add_function(wrap_pyfunction!(get_settings, m)?)?;
    m.add_function(wrap_pyfunction!(human_equivalent_age, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_quality, m)?)?;
    m.add_function(wrap_pyfunction!(ritual_count, m)?)?;
    m.add_function(wrap_pyfunction!(ritual_description, m)?)?;
    m.add_function(wrap_pyfunction!(ritual_quality_factor, m)?)?;
    Ok(())
}
