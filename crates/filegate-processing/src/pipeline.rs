//! Single-file upload pipeline: resolve, gate, inspect.

use std::sync::Arc;

use filegate_core::FileCategory;

use crate::batch::{process_batch, BatchItemResult};
use crate::inspect::inspect;
use crate::metadata::FileDescriptor;
use crate::registry::TypeRegistry;
use crate::upload::Upload;
use crate::validator::{check_extension, check_size, ValidationError};

#[derive(Debug, Clone)]
pub struct UploadPipeline {
    registry: Arc<TypeRegistry>,
}

impl UploadPipeline {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Extension gate, then size gate, then the category inspector. A
    /// descriptor is only built once both gates pass.
    pub fn process(
        &self,
        category: FileCategory,
        upload: &Upload,
    ) -> Result<FileDescriptor, ValidationError> {
        let spec = self.registry.resolve_by_category(category)?;
        check_extension(&upload.filename, spec)?;
        check_size(upload.size_bytes(), spec)?;
        inspect(category, upload)
    }

    pub fn process_batch(&self, uploads: &[Upload]) -> Result<Vec<BatchItemResult>, ValidationError> {
        process_batch(&self.registry, uploads)
    }
}
