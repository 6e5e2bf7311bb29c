//! # linecodec-core
//!
//! Core traits, types, and the line-mapping primitives shared across all
//! LineCodec crates. The batch engine and any line-supply adapter are built
//! on top of the interfaces defined here.

pub mod catalog;
pub mod convert;
pub mod error;
pub mod mapper;
pub mod options;
pub mod record;
pub mod result;
pub mod schema;

pub use catalog::MessageCatalog;
pub use convert::{CustomField, EnumField, FieldConvert};
pub use error::{ConvertError, ParseError, StructuralError};
pub use options::ParseOptions;
pub use record::FileRecord;
pub use result::{BatchResult, OperationResult};
pub use schema::{resolve, ColumnSpec, FieldKind, RecordSchema};
