use std::fs;
use std::path::{Path, PathBuf};

use classmark_config::GenerationSettings;
use classmark_model::{CodeModel, TypeId};

/// Get path to a fixture under tests/fixtures/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).unwrap_or_else(|err| panic!("Failed to load fixture {name}: {err}"))
}

/// Load a code model fixture
pub fn load_model(name: &str) -> CodeModel {
    serde_json::from_str(&load_fixture(name)).unwrap_or_else(|err| panic!("Invalid model fixture {name}: {err}"))
}

/// Load generation settings from a fixture
pub fn load_settings(name: &str) -> GenerationSettings {
    GenerationSettings::load(fixture_path(name)).unwrap_or_else(|err| panic!("Invalid settings fixture {name}: {err}"))
}

/// Look up a type of the model by name
pub fn type_id(model: &CodeModel, name: &str) -> TypeId {
    model
        .find_by_name(name)
        .unwrap_or_else(|| panic!("Expected type named {name}"))
}
