//! filegate processing
//!
//! Upload validation and introspection: the file type registry, the
//! extension and size gates, per-category inspectors and the batch
//! orchestrator.

pub mod batch;
pub mod inspect;
pub mod metadata;
pub mod pipeline;
pub mod registry;
pub mod upload;
pub mod validator;

pub use batch::{process_batch, BatchItemResult};
pub use inspect::{describe_image, ImageInfo, Inspector};
pub use metadata::{FileDescriptor, FileSummary, JsonShape, ScalarKind};
pub use pipeline::UploadPipeline;
pub use registry::{FileTypeSpec, TypeRegistry};
pub use upload::{bytes_to_mb, round2, Upload};
pub use validator::{check_extension, check_size, validate_extension, validate_size, ValidationError};
