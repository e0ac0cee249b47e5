//! File type registry
//!
//! One [`FileTypeSpec`] per category, built once at startup and shared
//! read-only between requests.

use filegate_core::{Config, FileCategory};

use crate::upload::bytes_to_mb;
use crate::validator::{file_extension, ValidationError};

/// Accepted extensions and size ceiling for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTypeSpec {
    pub category: FileCategory,
    /// Lower case, without the leading dot.
    pub extensions: Vec<String>,
    pub max_bytes: usize,
}

impl FileTypeSpec {
    pub fn new(category: FileCategory, extensions: &[&str], max_bytes: usize) -> Self {
        Self {
            category,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
            max_bytes,
        }
    }

    pub fn accepts_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.extensions.iter().any(|e| *e == extension)
    }

    /// Extensions as displayed to clients (`.jpg`).
    pub fn dotted_extensions(&self) -> Vec<String> {
        self.extensions.iter().map(|e| format!(".{}", e)).collect()
    }

    pub fn max_size_mb(&self) -> f64 {
        bytes_to_mb(self.max_bytes)
    }
}

#[derive(Debug, Clone)]
pub struct TypeRegistry {
    specs: Vec<FileTypeSpec>,
}

impl TypeRegistry {
    pub fn new(specs: Vec<FileTypeSpec>) -> Self {
        Self { specs }
    }

    /// All ten categories with their default extensions and the configured limits.
    pub fn from_config(config: &Config) -> Self {
        let specs = FileCategory::ALL
            .into_iter()
            .map(|category| {
                FileTypeSpec::new(
                    category,
                    category.default_extensions(),
                    config.max_upload_bytes(category),
                )
            })
            .collect();
        Self::new(specs)
    }

    pub fn specs(&self) -> impl Iterator<Item = &FileTypeSpec> {
        self.specs.iter()
    }

    pub fn resolve_by_category(
        &self,
        category: FileCategory,
    ) -> Result<&FileTypeSpec, ValidationError> {
        self.specs
            .iter()
            .find(|spec| spec.category == category)
            .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))
    }

    /// Resolve a category key such as `zip` or `word-document`.
    pub fn resolve_by_name(&self, name: &str) -> Result<&FileTypeSpec, ValidationError> {
        let category: FileCategory = name
            .parse()
            .map_err(|_| ValidationError::UnknownCategory(name.to_string()))?;
        self.resolve_by_category(category)
    }

    /// First entry, in registry order, whose extensions include the filename's suffix.
    pub fn resolve_by_extension(&self, filename: &str) -> Result<&FileTypeSpec, ValidationError> {
        let extension = file_extension(filename);
        extension
            .as_deref()
            .and_then(|ext| self.specs.iter().find(|spec| spec.accepts_extension(ext)))
            .ok_or_else(|| ValidationError::UnsupportedExtension {
                extension: extension.clone().unwrap_or_default(),
                allowed: self
                    .specs
                    .iter()
                    .flat_map(|spec| spec.dotted_extensions())
                    .collect(),
            })
    }
}
