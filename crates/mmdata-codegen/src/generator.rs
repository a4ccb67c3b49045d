//! Generation driver: one request in, artifacts and a table registry out.

use crate::config::GeneratorConfig;
use crate::descriptor::{
    CodeGeneratorRequest, CodeGeneratorResponse, FileDescriptorProto, code_generator_response,
};
use crate::emit::{self, GeneratedFile};
use crate::error::{GenerateError, GenerateResult};
use crate::registry::TableRegistry;
use crate::roles;
use crate::schema::SchemaIndex;
use prost::Message;
use std::collections::HashMap;

/// Everything produced by one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    /// Header, source and manifest per qualifying file, in request order.
    pub files: Vec<GeneratedFile>,

    /// Every table emitted during the run.
    pub registry: TableRegistry,
}

/// Table generator
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run generation for every file named in `file_to_generate`.
    ///
    /// The whole `proto_file` batch is indexed first so references into
    /// dependencies resolve. Any error aborts the run.
    pub fn generate(&self, request: &CodeGeneratorRequest) -> GenerateResult<GenerationOutput> {
        if request.file_to_generate.is_empty() {
            return Err(GenerateError::EmptyRequest);
        }

        let index = SchemaIndex::from_files(&request.proto_file);
        let by_name: HashMap<&str, &FileDescriptorProto> = request
            .proto_file
            .iter()
            .map(|f| (f.name(), f))
            .collect();

        let mut output = GenerationOutput::default();
        for name in &request.file_to_generate {
            let file = by_name
                .get(name.as_str())
                .ok_or_else(|| GenerateError::MissingFile { name: name.clone() })?;
            self.generate_file(file, &index, &mut output)?;
        }

        tracing::debug!(
            files = output.files.len(),
            tables = output.registry.len(),
            "generation finished"
        );
        Ok(output)
    }

    fn generate_file(
        &self,
        file: &FileDescriptorProto,
        index: &SchemaIndex<'_>,
        output: &mut GenerationOutput,
    ) -> GenerateResult<()> {
        let roles = roles::verify_file(file)?;
        if roles.is_empty() {
            tracing::debug!(file = file.name(), "no table entries, skipping");
            return Ok(());
        }

        if let Some(artifacts) =
            emit::emit_file(file, index, &roles, &self.config, &mut output.registry)?
        {
            output.files.extend(artifacts.into_files());
        }
        Ok(())
    }

    /// Run generation and wrap the outcome in a protoc plugin response.
    ///
    /// Failures are reported through `error` with no files attached.
    pub fn generate_response(&self, request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
        match self.generate(request) {
            Ok(output) => response_from(output),
            Err(err) => {
                tracing::error!(code = err.error_code(), "{err}");
                CodeGeneratorResponse {
                    error: Some(err.to_string()),
                    ..Default::default()
                }
            }
        }
    }

    /// Decode a serialized request, generate, and encode the response.
    pub fn run_plugin(&self, request_bytes: &[u8]) -> GenerateResult<Vec<u8>> {
        let request = CodeGeneratorRequest::decode(request_bytes)?;
        Ok(self.generate_response(&request).encode_to_vec())
    }
}

/// Response carrying every generated file.
pub fn response_from(output: GenerationOutput) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        file: output
            .files
            .into_iter()
            .map(|f| code_generator_response::File {
                name: Some(f.name),
                content: Some(f.content),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}
