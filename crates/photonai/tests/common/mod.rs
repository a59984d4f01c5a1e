//! Common test utilities and helpers

use std::path::Path;

fn load_fixture(kind: &str, file: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(kind)
        .join(file);

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("Failed to load fixture '{}' from {:?}: {}", file, path, e)
    })
}

/// Load a JSON response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    load_fixture("responses", &format!("{}.json", name))
}

/// Load a server-sent event stream fixture
#[allow(dead_code)]
pub fn load_stream_fixture(name: &str) -> String {
    load_fixture("streams", &format!("{}.txt", name))
}

/// Create a test API key
#[allow(dead_code)]
pub fn test_api_key() -> String {
    "sk-test-key-01234567890123456789012345678901234567890123456789".to_string()
}

/// `Authorization` header value for [`test_api_key`]
#[allow(dead_code)]
pub fn bearer() -> String {
    format!("Bearer {}", test_api_key())
}
