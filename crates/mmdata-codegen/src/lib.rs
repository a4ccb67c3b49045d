//! mmdata-codegen - Table generator for the mmdata shared-memory runtime
//!
//! Turns protobuf schemas annotated with `[(Key) = true]` / `[(Value) = true]`
//! into C++ table declarations, build/diagnostic helpers and a table manifest:
//! - [`SchemaIndex`] resolves type references across the whole request
//! - [`roles`] detects table-entry messages and validates role pairing
//! - [`TypeResolver`] maps fields to runtime container types
//! - [`FingerprintEngine`] stamps each table with a schema fingerprint
//! - [`Generator`] drives a run and produces a [`TableRegistry`]
//!
//! ```
//! use mmdata_codegen::{CodeGeneratorRequest, Generator, GeneratorConfig};
//!
//! let request = CodeGeneratorRequest::default();
//! let err = Generator::new(GeneratorConfig::default()).generate(&request).unwrap_err();
//! assert_eq!(err.error_code(), 4);
//! ```

mod config;
mod error;
mod generator;
mod registry;

pub mod descriptor;
pub mod emit;
pub mod fingerprint;
pub mod naming;
pub mod roles;
pub mod schema;
pub mod types;

pub use config::GeneratorConfig;
pub use descriptor::{CodeGeneratorRequest, CodeGeneratorResponse, FileDescriptorSet};
pub use emit::{FileArtifacts, GeneratedFile};
pub use error::{GenerateError, GenerateResult};
pub use fingerprint::FingerprintEngine;
pub use generator::{GenerationOutput, Generator, response_from};
pub use registry::{TableRegistration, TableRegistry};
pub use schema::SchemaIndex;
pub use types::TypeResolver;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CodeGeneratorRequest, CodeGeneratorResponse, FileDescriptorSet, GenerateError,
        GenerateResult, GenerationOutput, Generator, GeneratorConfig, TableRegistry,
    };
}

#[cfg(test)]
mod test_support;
