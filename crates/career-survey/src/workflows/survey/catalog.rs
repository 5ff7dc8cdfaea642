use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

/// Slug prefix under which spec-check definitions are stored.
pub const SPEC_CHECK_PREFIX: &str = "spec-check-";

pub fn spec_check_slug(job_category: &str) -> String {
    format!("{SPEC_CHECK_PREFIX}{job_category}")
}

/// Source of raw survey definition documents, keyed by slug.
pub trait DefinitionSource: Send + Sync {
    fn load(&self, slug: &str) -> Result<Value, SourceError>;
}

/// Error enumeration for definition lookups.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("survey data '{0}' not found")]
    NotFound(String),
    #[error("survey data unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    #[error("survey data '{slug}' is not valid JSON: {source}")]
    Invalid {
        slug: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Searches an ordered list of directories for `<slug>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryDefinitionSource {
    directories: Vec<PathBuf>,
}

impl DirectoryDefinitionSource {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    fn resolve(&self, slug: &str) -> Option<PathBuf> {
        if !is_plain_slug(slug) {
            return None;
        }
        let filename = if slug.ends_with(".json") {
            slug.to_string()
        } else {
            format!("{slug}.json")
        };

        self.directories
            .iter()
            .map(|base| base.join(&filename))
            .find(|candidate| candidate.is_file())
    }
}

impl DefinitionSource for DirectoryDefinitionSource {
    fn load(&self, slug: &str) -> Result<Value, SourceError> {
        let path = self
            .resolve(slug)
            .ok_or_else(|| SourceError::NotFound(slug.to_string()))?;
        debug!(slug, path = %path.display(), "loading survey definition");

        let contents = fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => SourceError::NotFound(slug.to_string()),
            _ => SourceError::Unavailable(err),
        })?;

        serde_json::from_str(&contents).map_err(|source| SourceError::Invalid {
            slug: slug.to_string(),
            source,
        })
    }
}

/// Slugs may not escape the configured directories.
fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.contains("..")
        && Path::new(slug).components().count() == 1
        && !slug.contains(['/', '\\'])
}

/// Fixed set of documents, for tests and offline demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDefinitionSource {
    documents: HashMap<String, Value>,
}

impl InMemoryDefinitionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, slug: impl Into<String>, document: Value) -> Self {
        self.documents.insert(slug.into(), document);
        self
    }
}

impl DefinitionSource for InMemoryDefinitionSource {
    fn load(&self, slug: &str) -> Result<Value, SourceError> {
        self.documents
            .get(slug)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(slug.to_string()))
    }
}
