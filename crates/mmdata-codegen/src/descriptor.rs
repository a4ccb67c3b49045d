//! Protobuf descriptor model consumed by the generator.
//!
//! These are `prost` mirrors of the parts of `google/protobuf/descriptor.proto`
//! and `google/protobuf/compiler/plugin.proto` that the generator reads. They
//! are wire-compatible with the real definitions, so a `CodeGeneratorRequest`
//! sent by `protoc` decodes straight into them.
//!
//! `prost-types` is not used here because its `FieldOptions` drops unknown
//! fields, and the table roles live in extension fields of `FieldOptions`:
//!
//! ```text
//! extend google.protobuf.FieldOptions {
//!     bool Key   = 51234;
//!     bool Value = 51235;
//! }
//! ```
//!
//! [`FieldOptions`] and [`MessageOptions`] declare the options the generator
//! reads and keep everything else as [`UnknownFields`]. Options the generator
//! never reads are carried as their encoded bytes. Either way a declaration
//! re-encodes with everything protoc sent, which the fingerprint relies on.

mod unknown;

pub use unknown::UnknownFields;

use crate::error::{GenerateError, GenerateResult};
use prost::DecodeError;
use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext};

/// Extension number of the `Key` role annotation.
pub const KEY_EXTENSION: u32 = 51234;

/// Extension number of the `Value` role annotation.
pub const VALUE_EXTENSION: u32 = 51235;

/// `MessageOptions.map_entry`
const MAP_ENTRY_OPTION: u32 = 7;

/// `FieldDescriptorProto.Label.LABEL_REPEATED`
const LABEL_REPEATED: i32 = 3;

// ============================================================================
// plugin.proto
// ============================================================================

/// Request sent by `protoc` to a plugin on stdin.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CodeGeneratorRequest {
    /// Files named on the protoc command line, in order.
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,

    /// Text after the `=` in `--mmdata_opt` / `--mmdata_out=<param>:dir`.
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,

    /// Every file in `file_to_generate` plus everything they import,
    /// topologically ordered.
    #[prost(message, repeated, tag = "15")]
    pub proto_file: Vec<FileDescriptorProto>,

    #[prost(message, optional, tag = "3")]
    pub compiler_version: Option<Version>,
}

/// protoc version that produced a request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Version {
    #[prost(int32, optional, tag = "1")]
    pub major: Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub minor: Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub patch: Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub suffix: Option<String>,
}

/// Response written by a plugin on stdout.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CodeGeneratorResponse {
    /// Set when generation failed; protoc reports it and exits non-zero.
    #[prost(string, optional, tag = "1")]
    pub error: Option<String>,

    #[prost(uint64, optional, tag = "2")]
    pub supported_features: Option<u64>,

    #[prost(message, repeated, tag = "15")]
    pub file: Vec<code_generator_response::File>,
}

/// Nested types of [`CodeGeneratorResponse`].
pub mod code_generator_response {
    /// One generated output file.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct File {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(string, optional, tag = "2")]
        pub insertion_point: Option<String>,
        #[prost(string, optional, tag = "15")]
        pub content: Option<String>,
    }
}

// ============================================================================
// descriptor.proto
// ============================================================================

/// Output of `protoc --descriptor_set_out`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorSet {
    #[prost(message, repeated, tag = "1")]
    pub file: Vec<FileDescriptorProto>,
}

/// A complete `.proto` file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorProto {
    /// Path relative to the proto root, e.g. `cfg/item.proto`.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    /// Dotted package, e.g. `game.cfg`.
    #[prost(string, optional, tag = "2")]
    pub package: Option<String>,

    #[prost(string, repeated, tag = "3")]
    pub dependency: Vec<String>,

    #[prost(message, repeated, tag = "4")]
    pub message_type: Vec<DescriptorProto>,

    #[prost(message, repeated, tag = "5")]
    pub enum_type: Vec<EnumDescriptorProto>,

    /// Encoded `FileOptions`, never read.
    #[prost(bytes = "vec", optional, tag = "8")]
    pub options: Option<Vec<u8>>,

    #[prost(string, optional, tag = "12")]
    pub syntax: Option<String>,
}

/// A message type declaration.
///
/// Every field of `DescriptorProto` is mirrored: the fingerprint re-encodes
/// declarations, and reserved or extension ranges are part of the schema.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    #[prost(message, repeated, tag = "2")]
    pub field: Vec<FieldDescriptorProto>,

    #[prost(message, repeated, tag = "6")]
    pub extension: Vec<FieldDescriptorProto>,

    #[prost(message, repeated, tag = "3")]
    pub nested_type: Vec<DescriptorProto>,

    #[prost(message, repeated, tag = "4")]
    pub enum_type: Vec<EnumDescriptorProto>,

    #[prost(message, repeated, tag = "5")]
    pub extension_range: Vec<descriptor_proto::ExtensionRange>,

    #[prost(message, repeated, tag = "8")]
    pub oneof_decl: Vec<OneofDescriptorProto>,

    #[prost(message, optional, tag = "7")]
    pub options: Option<MessageOptions>,

    #[prost(message, repeated, tag = "9")]
    pub reserved_range: Vec<descriptor_proto::ReservedRange>,

    /// Reserved field names.
    #[prost(string, repeated, tag = "10")]
    pub reserved_name: Vec<String>,
}

/// Nested types of [`DescriptorProto`].
pub mod descriptor_proto {
    /// `extensions <start> to <end>;`, end exclusive.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ExtensionRange {
        #[prost(int32, optional, tag = "1")]
        pub start: Option<i32>,

        #[prost(int32, optional, tag = "2")]
        pub end: Option<i32>,

        /// Encoded `ExtensionRangeOptions`, never read.
        #[prost(bytes = "vec", optional, tag = "3")]
        pub options: Option<Vec<u8>>,
    }

    /// `reserved <start> to <end>;`, end exclusive.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ReservedRange {
        #[prost(int32, optional, tag = "1")]
        pub start: Option<i32>,

        #[prost(int32, optional, tag = "2")]
        pub end: Option<i32>,
    }
}

/// Message-level options.
///
/// Only `map_entry` is read. Every other option is kept in `unknown_fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    /// Set by protoc on the synthetic `XxxEntry` type behind a `map<K, V>` field.
    pub map_entry: Option<bool>,

    pub unknown_fields: UnknownFields,
}

impl MessageOptions {
    pub fn map_entry(&self) -> bool {
        self.map_entry.unwrap_or(false)
    }
}

impl ::prost::Message for MessageOptions {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        self.unknown_fields.encode_where(buf, |tag| tag < MAP_ENTRY_OPTION);
        if let Some(map_entry) = &self.map_entry {
            encoding::bool::encode(MAP_ENTRY_OPTION, map_entry, buf);
        }
        self.unknown_fields.encode_where(buf, |tag| tag > MAP_ENTRY_OPTION);
    }

    fn merge_field<B: Buf>(
        &mut self,
        tag: u32,
        wire_type: encoding::WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            MAP_ENTRY_OPTION => {
                encoding::bool::merge(wire_type, self.map_entry.get_or_insert(false), buf, ctx)
            }
            _ => self.unknown_fields.merge(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        self.map_entry
            .as_ref()
            .map_or(0, |v| encoding::bool::encoded_len(MAP_ENTRY_OPTION, v))
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A field declaration.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    #[prost(string, optional, tag = "2")]
    pub extendee: Option<String>,

    #[prost(int32, optional, tag = "3")]
    pub number: Option<i32>,

    /// `FieldDescriptorProto.Label` as its raw number.
    #[prost(int32, optional, tag = "4")]
    pub label: Option<i32>,

    /// `FieldDescriptorProto.Type` as its raw number, see [`WireType`].
    #[prost(int32, optional, tag = "5")]
    pub r#type: Option<i32>,

    /// Fully-qualified reference for message and enum fields, e.g. `.game.cfg.Item`.
    #[prost(string, optional, tag = "6")]
    pub type_name: Option<String>,

    #[prost(string, optional, tag = "7")]
    pub default_value: Option<String>,

    #[prost(message, optional, tag = "8")]
    pub options: Option<FieldOptions>,

    #[prost(int32, optional, tag = "9")]
    pub oneof_index: Option<i32>,

    #[prost(string, optional, tag = "10")]
    pub json_name: Option<String>,

    #[prost(bool, optional, tag = "17")]
    pub proto3_optional: Option<bool>,
}

/// Field-level options, including the two table role extensions.
///
/// Only the role extensions are read. Every other option is kept in
/// `unknown_fields` and written back around them in tag order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions {
    /// `[(Key) = true]`
    pub key: Option<bool>,

    /// `[(Value) = true]`
    pub value: Option<bool>,

    pub unknown_fields: UnknownFields,
}

impl FieldOptions {
    pub fn key(&self) -> bool {
        self.key.unwrap_or(false)
    }

    pub fn value(&self) -> bool {
        self.value.unwrap_or(false)
    }
}

impl ::prost::Message for FieldOptions {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        self.unknown_fields.encode_where(buf, |tag| tag < KEY_EXTENSION);
        if let Some(key) = &self.key {
            encoding::bool::encode(KEY_EXTENSION, key, buf);
        }
        if let Some(value) = &self.value {
            encoding::bool::encode(VALUE_EXTENSION, value, buf);
        }
        self.unknown_fields.encode_where(buf, |tag| tag > VALUE_EXTENSION);
    }

    fn merge_field<B: Buf>(
        &mut self,
        tag: u32,
        wire_type: encoding::WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            KEY_EXTENSION => encoding::bool::merge(wire_type, self.key.get_or_insert(false), buf, ctx),
            VALUE_EXTENSION => {
                encoding::bool::merge(wire_type, self.value.get_or_insert(false), buf, ctx)
            }
            _ => self.unknown_fields.merge(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        self.key
            .as_ref()
            .map_or(0, |v| encoding::bool::encoded_len(KEY_EXTENSION, v))
            + self
                .value
                .as_ref()
                .map_or(0, |v| encoding::bool::encoded_len(VALUE_EXTENSION, v))
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OneofDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    /// Encoded `OneofOptions`, never read.
    #[prost(bytes = "vec", optional, tag = "2")]
    pub options: Option<Vec<u8>>,
}

/// An enum type declaration.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnumDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    #[prost(message, repeated, tag = "2")]
    pub value: Vec<EnumValueDescriptorProto>,

    /// Encoded `EnumOptions`, never read.
    #[prost(bytes = "vec", optional, tag = "3")]
    pub options: Option<Vec<u8>>,

    #[prost(message, repeated, tag = "4")]
    pub reserved_range: Vec<enum_descriptor_proto::EnumReservedRange>,

    #[prost(string, repeated, tag = "5")]
    pub reserved_name: Vec<String>,
}

/// Nested types of [`EnumDescriptorProto`].
pub mod enum_descriptor_proto {
    /// `reserved <start> to <end>;` in an enum, end inclusive.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EnumReservedRange {
        #[prost(int32, optional, tag = "1")]
        pub start: Option<i32>,

        #[prost(int32, optional, tag = "2")]
        pub end: Option<i32>,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnumValueDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    #[prost(int32, optional, tag = "2")]
    pub number: Option<i32>,

    /// Encoded `EnumValueOptions`, never read.
    #[prost(bytes = "vec", optional, tag = "3")]
    pub options: Option<Vec<u8>>,
}

// ============================================================================
// Typed views over raw descriptor numbers
// ============================================================================

/// Wire types the generator knows how to lay out.
///
/// Mirrors `FieldDescriptorProto.Type` minus `TYPE_GROUP`, which has no
/// shared-memory representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl WireType {
    /// Every supported wire type, in descriptor number order.
    pub const ALL: [WireType; 17] = [
        WireType::Double,
        WireType::Float,
        WireType::Int64,
        WireType::Uint64,
        WireType::Int32,
        WireType::Fixed64,
        WireType::Fixed32,
        WireType::Bool,
        WireType::String,
        WireType::Message,
        WireType::Bytes,
        WireType::Uint32,
        WireType::Enum,
        WireType::Sfixed32,
        WireType::Sfixed64,
        WireType::Sint32,
        WireType::Sint64,
    ];

    /// Map a raw `FieldDescriptorProto.Type` number.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(WireType::Double),
            2 => Some(WireType::Float),
            3 => Some(WireType::Int64),
            4 => Some(WireType::Uint64),
            5 => Some(WireType::Int32),
            6 => Some(WireType::Fixed64),
            7 => Some(WireType::Fixed32),
            8 => Some(WireType::Bool),
            9 => Some(WireType::String),
            11 => Some(WireType::Message),
            12 => Some(WireType::Bytes),
            13 => Some(WireType::Uint32),
            14 => Some(WireType::Enum),
            15 => Some(WireType::Sfixed32),
            16 => Some(WireType::Sfixed64),
            17 => Some(WireType::Sint32),
            18 => Some(WireType::Sint64),
            _ => None,
        }
    }

    /// The raw `FieldDescriptorProto.Type` number.
    pub fn as_i32(self) -> i32 {
        match self {
            WireType::Double => 1,
            WireType::Float => 2,
            WireType::Int64 => 3,
            WireType::Uint64 => 4,
            WireType::Int32 => 5,
            WireType::Fixed64 => 6,
            WireType::Fixed32 => 7,
            WireType::Bool => 8,
            WireType::String => 9,
            WireType::Message => 11,
            WireType::Bytes => 12,
            WireType::Uint32 => 13,
            WireType::Enum => 14,
            WireType::Sfixed32 => 15,
            WireType::Sfixed64 => 16,
            WireType::Sint32 => 17,
            WireType::Sint64 => 18,
        }
    }

    /// Wire type of a field; anything outside the supported set is fatal.
    pub fn of(field: &FieldDescriptorProto) -> GenerateResult<Self> {
        let raw = field.r#type();
        Self::from_i32(raw).ok_or_else(|| GenerateError::UnsupportedType {
            field: field.name().to_string(),
            type_id: raw,
        })
    }
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Singular,
    Repeated,
}

impl Cardinality {
    /// Cardinality of a field. `optional` and `required` are both singular.
    pub fn of(field: &FieldDescriptorProto) -> Self {
        if field.label() == LABEL_REPEATED {
            Cardinality::Repeated
        } else {
            Cardinality::Singular
        }
    }
}

impl FieldDescriptorProto {
    /// Whether the field carries `[(Key) = true]`.
    pub fn has_key_role(&self) -> bool {
        self.options.as_ref().is_some_and(|o| o.key())
    }

    /// Whether the field carries `[(Value) = true]`.
    pub fn has_value_role(&self) -> bool {
        self.options.as_ref().is_some_and(|o| o.value())
    }
}

impl DescriptorProto {
    /// Whether protoc marked this type as the entry of a `map<K, V>` field.
    pub fn is_map_entry(&self) -> bool {
        self.options.as_ref().is_some_and(|o| o.map_entry())
    }
}
