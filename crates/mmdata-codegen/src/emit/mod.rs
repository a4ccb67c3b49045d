//! C++ artifact emission.
//!
//! For each file with at least one table entry this produces three artifacts:
//! the declarations header, the scaffolding source that registers every
//! table with the runtime, and a manifest listing the table types.

mod header;
mod source;

use crate::config::GeneratorConfig;
use crate::descriptor::{DescriptorProto, FileDescriptorProto};
use crate::error::GenerateResult;
use crate::fingerprint::FingerprintEngine;
use crate::naming;
use crate::registry::{TableRegistration, TableRegistry};
use crate::roles::FileRoles;
use crate::schema::{MapEntryShape, SchemaIndex};
use crate::types::TypeResolver;
use serde::Serialize;
use std::collections::HashSet;

/// First line of every generated artifact.
pub const BANNER: &str = "// Generated by protoc-gen-mmdata. DO NOT EDIT!";

/// A generated file, named relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// The artifacts generated from one proto file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifacts {
    pub header: GeneratedFile,
    pub source: GeneratedFile,
    pub manifest: GeneratedFile,
}

impl FileArtifacts {
    /// Header, source and manifest, in that order.
    pub fn into_files(self) -> [GeneratedFile; 3] {
        [self.header, self.source, self.manifest]
    }
}

/// Line-oriented text buffer with block indentation.
#[derive(Debug)]
pub(crate) struct CodeWriter {
    buf: String,
    unit: String,
    depth: usize,
}

impl CodeWriter {
    pub(crate) fn new(indent: usize) -> Self {
        Self {
            buf: String::new(),
            unit: " ".repeat(indent),
            depth: 0,
        }
    }

    /// Write one indented line.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.buf.push_str(&self.unit);
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    /// Write an empty line, never indented.
    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// `opener`, then `{`, then the body one level deeper, then `closer`.
    pub(crate) fn block(&mut self, opener: impl AsRef<str>, closer: &str, body: impl FnOnce(&mut Self)) {
        self.line(opener);
        self.line("{");
        self.indent();
        body(self);
        self.dedent();
        self.line(closer);
    }

    /// Same as [`CodeWriter::block`] for bodies that can fail.
    pub(crate) fn try_block(
        &mut self,
        opener: impl AsRef<str>,
        closer: &str,
        body: impl FnOnce(&mut Self) -> GenerateResult<()>,
    ) -> GenerateResult<()> {
        self.line(opener);
        self.line("{");
        self.indent();
        let result = body(self);
        self.dedent();
        self.line(closer);
        result
    }

    /// Open one `namespace` block per package segment.
    pub(crate) fn open_namespaces(&mut self, segments: &[&str]) {
        for segment in segments {
            self.line(format!("namespace {segment}"));
            self.line("{");
            self.indent();
        }
    }

    pub(crate) fn close_namespaces(&mut self, segments: &[&str]) {
        for _ in segments {
            self.dedent();
            self.line("}");
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}

/// `#include` directive for a configured include entry.
pub(crate) fn include_line(entry: &str) -> String {
    if entry.starts_with('<') && entry.ends_with('>') {
        format!("#include {entry}")
    } else {
        format!("#include \"{entry}\"")
    }
}

/// Emit the artifacts for `file`.
///
/// Returns `Ok(None)` when the file has no table entries. Every table
/// emitted is added to `registry`.
pub fn emit_file<'a>(
    file: &FileDescriptorProto,
    index: &SchemaIndex<'a>,
    roles: &FileRoles<'a>,
    config: &GeneratorConfig,
    registry: &mut TableRegistry,
) -> GenerateResult<Option<FileArtifacts>> {
    if roles.is_empty() {
        return Ok(None);
    }

    let proto_path = file.name();
    let header_name = format!("{proto_path}{}", config.header_suffix);
    let source_name = format!("{proto_path}{}", config.source_suffix);
    let manifest_name = format!("{proto_path}{}", config.manifest_suffix);
    let segments = naming::namespace_segments(file.package());

    let mut emitter = FileEmitter {
        file,
        roles,
        resolver: TypeResolver::new(index),
        index,
        fingerprints: FingerprintEngine::new(index).with_cycle_guard(config.cycle_guard),
        header: CodeWriter::new(config.indent),
        source: CodeWriter::new(config.indent),
        key_support: HashSet::new(),
        registry,
    };

    header::write_prologue(&mut emitter.header, proto_path, config);
    source::write_prologue(&mut emitter.source, proto_path, &header_name, config);
    emitter.header.open_namespaces(&segments);
    emitter.source.open_namespaces(&segments);

    let package_scope = naming::package_scope(file.package());
    for message in &file.message_type {
        emitter.emit_message(&package_scope, &package_scope, message)?;
    }

    emitter.header.close_namespaces(&segments);
    emitter.source.close_namespaces(&segments);
    header::write_epilogue(&mut emitter.header, proto_path, config);

    let manifest = emitter.registry.manifest_for(proto_path).join("\n");

    Ok(Some(FileArtifacts {
        header: GeneratedFile {
            name: header_name,
            content: emitter.header.finish(),
        },
        source: GeneratedFile {
            name: source_name,
            content: emitter.source.finish(),
        },
        manifest: GeneratedFile {
            name: manifest_name,
            content: manifest,
        },
    }))
}

/// Per-file emission state.
pub(crate) struct FileEmitter<'e, 'i, 'a> {
    pub(crate) file: &'e FileDescriptorProto,
    pub(crate) roles: &'e FileRoles<'a>,
    pub(crate) index: &'i SchemaIndex<'a>,
    pub(crate) resolver: TypeResolver<'i, 'a>,
    pub(crate) fingerprints: FingerprintEngine<'i, 'a>,
    pub(crate) header: CodeWriter,
    pub(crate) source: CodeWriter,
    /// Key types whose `hash_value`/`operator==` are already in the header.
    pub(crate) key_support: HashSet<String>,
    pub(crate) registry: &'e mut TableRegistry,
}

impl FileEmitter<'_, '_, '_> {
    fn emit_message(
        &mut self,
        package_scope: &str,
        scope: &str,
        message: &DescriptorProto,
    ) -> GenerateResult<()> {
        // Map entries are rendered as associative containers, never as records.
        if MapEntryShape::detect(message).is_some() {
            return Ok(());
        }

        let qualified = format!("{scope}.{}", message.name());
        for nested in &message.nested_type {
            self.emit_message(package_scope, &qualified, nested)?;
        }

        let local = naming::local_name(package_scope, &qualified);
        let record = naming::record_type_name(local);
        let Some(roles) = self.roles.get(&qualified) else {
            return header::write_record(&mut self.header, &self.resolver, &record, message, None);
        };

        header::write_key_support(
            &mut self.header,
            self.index,
            &self.resolver,
            roles.key,
            &mut self.key_support,
        )?;
        header::write_record(&mut self.header, &self.resolver, &record, message, Some(roles))?;

        let fingerprint = self.fingerprints.fingerprint(message)?;
        header::write_table(&mut self.header, &self.resolver, &record, roles, fingerprint)?;

        let entry = TableRegistration::new(self.file.package(), local, self.file.name(), fingerprint);
        source::write_helper(&mut self.source, roles, &entry)?;

        tracing::info!(
            table = %entry.table_name,
            fingerprint = entry.fingerprint,
            source_file = %entry.source_file,
            "emitted table"
        );
        self.registry.register(entry)
    }
}
