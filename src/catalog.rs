//! Fixture and error catalogs for the mock interception layer.
//!
//! A [`MockCatalog`] maps request paths to canned outcomes. It is built once
//! (from the built-in fixtures or a YAML file) and never mutated afterwards.
//!
//! Catalog files look like:
//!
//! ```yaml
//! fixtures:
//!   /todos:
//!     todos: []
//! errors:
//!   /todos:
//!     status: 400
//!     message: Mocked error message
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Message used when an error descriptor has none.
pub const DEFAULT_MOCK_ERROR_MESSAGE: &str = "mock error";

/// Errors raised while loading a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog path {0:?} must start with '/'")]
    InvalidPath(String),
    #[error("error entry for {0:?} has no matching fixture")]
    OrphanError(String),
}

/// What the mock layer replays for a path.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOutcome {
    Success(Value),
    Failure { status: u16, message: String },
}

/// Simulated-error descriptor as written in a catalog.
///
/// A status of `0` or one whose decimal form starts with `2` (`200`, `204`,
/// `2000`) is not an error and replays the descriptor as a success payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MockErrorDescriptor {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
}

impl MockErrorDescriptor {
    /// Whether the status replays as a success rather than an error.
    pub fn is_success_status(&self) -> bool {
        self.status == 0 || self.status.to_string().starts_with('2')
    }

    /// Classify the descriptor.
    pub fn into_outcome(self) -> MockOutcome {
        if self.is_success_status() {
            let mut payload = json!({ "status": self.status });
            if let Some(message) = self.message {
                payload["message"] = Value::String(message);
            }
            return MockOutcome::Success(payload);
        }

        MockOutcome::Failure {
            status: self.status,
            message: self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MOCK_ERROR_MESSAGE.to_string()),
        }
    }
}

/// On-disk catalog shape.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub fixtures: BTreeMap<String, Value>,
    #[serde(default)]
    pub errors: BTreeMap<String, MockErrorDescriptor>,
}

/// Immutable fixture and error catalogs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockCatalog {
    fixtures: BTreeMap<String, Value>,
    errors: BTreeMap<String, MockOutcome>,
}

impl MockCatalog {
    /// Empty catalog; nothing is ever intercepted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a catalog in code.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Arc<MockCatalog> {
        BUILTIN.clone()
    }

    /// Load a catalog from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Load a catalog from YAML text.
    pub fn parse_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    /// Validate and classify a parsed catalog file.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut builder = Self::builder();
        for (path, payload) in file.fixtures {
            validate_path(&path)?;
            builder = builder.fixture(path, payload);
        }
        for (path, descriptor) in file.errors {
            validate_path(&path)?;
            if !builder.fixtures.contains_key(&path) {
                return Err(CatalogError::OrphanError(path));
            }
            builder = builder.error_descriptor(path, descriptor);
        }
        Ok(builder.build())
    }

    /// Whether requests for `path` are intercepted when mocking is active.
    pub fn is_mocked(&self, path: &str) -> bool {
        self.fixtures.contains_key(path)
    }

    pub fn fixture(&self, path: &str) -> Option<&Value> {
        self.fixtures.get(path)
    }

    pub fn error(&self, path: &str) -> Option<&MockOutcome> {
        self.errors.get(path)
    }

    /// Outcome replayed for `path`. `None` when the path has no fixture, or
    /// when an error was requested and the path has none configured.
    pub fn outcome(&self, path: &str, want_error: bool) -> Option<MockOutcome> {
        if want_error {
            self.errors.get(path).cloned()
        } else {
            self.fixtures.get(path).cloned().map(MockOutcome::Success)
        }
    }

    /// Mocked paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fixtures.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

/// Builder for [`MockCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    fixtures: BTreeMap<String, Value>,
    errors: BTreeMap<String, MockOutcome>,
}

impl CatalogBuilder {
    pub fn fixture(mut self, path: impl Into<String>, payload: Value) -> Self {
        self.fixtures.insert(path.into(), payload);
        self
    }

    pub fn error(self, path: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        self.error_descriptor(
            path,
            MockErrorDescriptor {
                status,
                message: Some(message.into()),
            },
        )
    }

    pub fn error_descriptor(
        mut self,
        path: impl Into<String>,
        descriptor: MockErrorDescriptor,
    ) -> Self {
        self.errors.insert(path.into(), descriptor.into_outcome());
        self
    }

    pub fn build(self) -> MockCatalog {
        MockCatalog {
            fixtures: self.fixtures,
            errors: self.errors,
        }
    }
}

fn validate_path(path: &str) -> Result<(), CatalogError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(CatalogError::InvalidPath(path.to_string()))
    }
}

static BUILTIN: Lazy<Arc<MockCatalog>> = Lazy::new(|| {
    Arc::new(
        MockCatalog::builder()
            .fixture(
                "/todos",
                json!({
                    "todos": [
                        {
                            "id": 1,
                            "todo": "Do something nice for someone I care about",
                            "completed": true,
                            "userId": 26
                        },
                        {
                            "id": 2,
                            "todo": "Memorize the fifty states and their capitals",
                            "completed": false,
                            "userId": 48
                        }
                    ]
                }),
            )
            .error("/todos", 400, "Mocked error message")
            .build(),
    )
});
