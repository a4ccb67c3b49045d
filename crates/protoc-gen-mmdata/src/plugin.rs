//! protoc plugin mode.

use crate::logging;
use anyhow::{Context, Result};
use mmdata_codegen::{
    CodeGeneratorRequest, CodeGeneratorResponse, GenerateResult, GenerationOutput, Generator,
    GeneratorConfig, response_from,
};
use prost::Message;
use std::io::{self, Read, Write};
use std::process::ExitCode;

/// Read the request from stdin and write the response to stdout.
///
/// The response is written even when generation fails; the exit status then
/// carries the error code.
pub fn run(log_level: Option<&str>) -> Result<ExitCode> {
    let mut input = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;

    let (response, code) = respond(&input, log_level);

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .and_then(|()| stdout.flush())
        .context("Failed to write CodeGeneratorResponse to stdout")?;

    Ok(ExitCode::from(code))
}

/// Response and exit status for a serialized request.
pub(crate) fn respond(input: &[u8], log_level: Option<&str>) -> (CodeGeneratorResponse, u8) {
    match process(input, log_level) {
        Ok(output) => (response_from(output), 0),
        Err(err) => {
            tracing::error!(code = err.error_code(), "{err}");
            let response = CodeGeneratorResponse {
                error: Some(err.to_string()),
                ..Default::default()
            };
            (response, err.error_code())
        }
    }
}

fn process(input: &[u8], log_level: Option<&str>) -> GenerateResult<GenerationOutput> {
    let (request, config) = match load(input) {
        Ok(loaded) => loaded,
        Err(err) => {
            logging::init(log_level.unwrap_or(logging::DEFAULT_LEVEL));
            return Err(err);
        }
    };
    logging::init(log_level.unwrap_or(&config.log_level));

    tracing::debug!(
        files = ?request.file_to_generate,
        parameter = request.parameter.as_deref().unwrap_or(""),
        "received request"
    );
    Generator::new(config).generate(&request)
}

fn load(input: &[u8]) -> GenerateResult<(CodeGeneratorRequest, GeneratorConfig)> {
    let request = CodeGeneratorRequest::decode(input)?;
    let config = GeneratorConfig::from_parameter(request.parameter.as_deref())?;
    Ok((request, config))
}

#[cfg(test)]
#[path = "plugin/plugin_tests.rs"]
mod plugin_tests;
