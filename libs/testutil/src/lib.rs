use anyhow::{Context, Result, anyhow};
use jsonschema::{Validator, validator_for};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

mod assertions;
mod evaluators;

pub use assertions::{attachment_content_types, message_contains_text};
pub use evaluators::{RecordingEvaluator, StaticEvaluator};

pub const ACTIVITY_SCHEMA: &str = "libs/core/tests/fixtures/schema/activity.schema.json";

pub fn workspace_root() -> PathBuf {
    // workspace root is two levels up from this crate's manifest (libs/testutil)
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root")
        .to_path_buf()
}

/// Loads a JSON or YAML fixture as a JSON value.
pub fn load_fixture_value<P>(path: P) -> Result<Value>
where
    P: AsRef<Path>,
{
    let absolute = fixture_path(path)?;
    let content = fs::read_to_string(&absolute)
        .with_context(|| format!("failed to read {}", absolute.display()))?;
    let extension = absolute
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse json {}", absolute.display())),
        "yaml" | "yml" => serde_yaml_bw::from_str(&content)
            .with_context(|| format!("failed to parse yaml {}", absolute.display())),
        other => Err(anyhow!("unsupported fixture extension: {other}")),
    }
}

/// Reads a fixture as raw text.
pub fn load_fixture_text<P>(path: P) -> Result<String>
where
    P: AsRef<Path>,
{
    let absolute = fixture_path(path)?;
    fs::read_to_string(&absolute).with_context(|| format!("failed to read {}", absolute.display()))
}

/// Resolves a fixture path against the workspace root. Absolute paths are accepted as long
/// as they stay inside the workspace.
pub fn fixture_path<P>(path: P) -> Result<PathBuf>
where
    P: AsRef<Path>,
{
    let root = workspace_root()
        .canonicalize()
        .context("workspace root is not accessible")?;
    let resolved = root.join(path.as_ref());
    let canonical = resolved
        .canonicalize()
        .with_context(|| format!("fixture {} not found", resolved.display()))?;
    anyhow::ensure!(
        canonical.starts_with(&root),
        "fixture {} is outside {}",
        canonical.display(),
        root.display()
    );
    Ok(canonical)
}

pub fn assert_matches_schema<P>(schema_path: P, value: &Value) -> Result<()>
where
    P: AsRef<Path>,
{
    let compiled = load_compiled_schema(schema_path.as_ref())?;

    let messages: Vec<String> = compiled.iter_errors(value).map(|err| err.to_string()).collect();
    anyhow::ensure!(
        messages.is_empty(),
        "schema validation failed: {}",
        messages.join("; ")
    );
    Ok(())
}

/// Validates a serialized activity against the activity schema fixture.
pub fn assert_activity_shape<T>(activity: &T) -> Result<()>
where
    T: Serialize,
{
    let value = to_json_value(activity)?;
    assert_matches_schema(ACTIVITY_SCHEMA, &value)
}

fn load_compiled_schema(path: &Path) -> Result<Arc<Validator>> {
    static CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Validator>>>> =
        Lazy::new(|| Mutex::new(HashMap::new()));

    let absolute = fixture_path(path)?;

    {
        let cache = CACHE.lock().unwrap();
        if let Some(schema) = cache.get(&absolute) {
            return Ok(schema.clone());
        }
    }

    let schema_value = load_fixture_value(&absolute)?;
    let compiled = validator_for(&schema_value)
        .map_err(|err| anyhow!("failed to compile json schema: {err}"))?;
    let compiled = Arc::new(compiled);

    let mut cache = CACHE.lock().unwrap();
    let entry = cache.entry(absolute).or_insert_with(|| compiled.clone());
    Ok(entry.clone())
}

pub fn to_json_value<T>(value: &T) -> Result<Value>
where
    T: Serialize,
{
    serde_json::to_value(value).context("failed to convert to json value")
}

#[macro_export]
macro_rules! load_fixture {
    ($path:expr $(,)?) => {{
        $crate::load_fixture_value($path)
            .unwrap_or_else(|err| panic!("failed to load fixture {}: {}", $path, err))
    }};
}
