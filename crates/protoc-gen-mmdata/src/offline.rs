//! Offline mode: generate from a `FileDescriptorSet` on disk.

use crate::logging;
use anyhow::{Context, Result};
use mmdata_codegen::{
    CodeGeneratorRequest, FileDescriptorSet, GeneratedFile, GenerationOutput, Generator,
    GeneratorConfig, TableRegistry,
};
use prost::Message;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Arguments of the `generate` command
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub descriptor_set: PathBuf,
    pub files: Vec<String>,
    pub out_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub param: Option<String>,
}

/// JSON shape printed by `list --json`
#[derive(Debug, Serialize)]
struct Listing<'a> {
    descriptor_set: &'a Path,
    tables: &'a TableRegistry,
}

/// Generate artifacts and write them under `out_dir`.
pub fn generate(args: &GenerateArgs, log_level: Option<&str>) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref(), args.param.as_deref())?;
    logging::init(log_level.unwrap_or(&config.log_level));

    let set = load_descriptor_set(&args.descriptor_set)?;
    let request = build_request(set, &args.files);
    let output = Generator::new(config)
        .generate(&request)
        .with_context(|| format!("Generation failed for {}", args.descriptor_set.display()))?;

    let written = write_artifacts(&args.out_dir, &output.files)?;
    tracing::info!(
        files = written.len(),
        tables = output.registry.len(),
        out_dir = %args.out_dir.display(),
        "generation complete"
    );
    Ok(ExitCode::SUCCESS)
}

/// Print every table the descriptor set defines.
pub fn list(
    descriptor_set: &Path,
    config: Option<&Path>,
    json: bool,
    log_level: Option<&str>,
) -> Result<ExitCode> {
    let config = load_config(config, None)?;
    logging::init(log_level.unwrap_or(&config.log_level));

    let set = load_descriptor_set(descriptor_set)?;
    let request = build_request(set, &[]);
    let output = Generator::new(config)
        .generate(&request)
        .with_context(|| format!("Generation failed for {}", descriptor_set.display()))?;

    if json {
        let listing = Listing {
            descriptor_set,
            tables: &output.registry,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", render_listing(&output));
    }
    Ok(ExitCode::SUCCESS)
}

/// `--config` first, then `--param` on top.
pub(crate) fn load_config(path: Option<&Path>, param: Option<&str>) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(param) = param {
        config
            .apply_parameter(param)
            .with_context(|| format!("Invalid --param '{param}'"))?;
    }
    Ok(config)
}

pub(crate) fn load_descriptor_set(path: &Path) -> Result<FileDescriptorSet> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read descriptor set: {}", path.display()))?;
    let set = FileDescriptorSet::decode(bytes.as_slice())
        .map_err(mmdata_codegen::GenerateError::from)
        .with_context(|| format!("Failed to decode descriptor set: {}", path.display()))?;
    Ok(set)
}

/// A plugin request over the whole set, generating `files` or every file.
pub(crate) fn build_request(set: FileDescriptorSet, files: &[String]) -> CodeGeneratorRequest {
    let file_to_generate = if files.is_empty() {
        set.file.iter().map(|f| f.name().to_string()).collect()
    } else {
        files.to_vec()
    };
    CodeGeneratorRequest {
        file_to_generate,
        proto_file: set.file,
        ..Default::default()
    }
}

pub(crate) fn write_artifacts(out_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}

/// One `name  fingerprint  source` line per table.
pub(crate) fn render_listing(output: &GenerationOutput) -> String {
    output
        .registry
        .iter()
        .map(|t| format!("{}\t{}\t{}\n", t.table_name, t.fingerprint, t.source_file))
        .collect()
}
