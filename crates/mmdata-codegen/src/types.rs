//! Field type resolution for the mmdata runtime.
//!
//! # Type Mappings
//!
//! | Wire type | Scalar type |
//! |-----------|-------------|
//! | `double` / `float` | `double` / `float` |
//! | `int64`, `sint64`, `sfixed64` | `int64_t` |
//! | `uint64`, `fixed64` | `uint64_t` |
//! | `int32`, `sint32`, `sfixed32` | `int32_t` |
//! | `uint32`, `fixed32` | `uint32_t` |
//! | `bool` | `bool` |
//! | `string`, `bytes` | `mmdata::SHMString` |
//! | `enum` | `::pkg::Enum` |
//! | message | flattened record name, `Outer_Inner` for a nested type |
//!
//! Repeated fields become `mmdata::SHMVector<T>::Type` over the scalar type,
//! except repeated map entries, which become `mmdata::SHMHashMap<K, V>::Type`.

use crate::descriptor::{Cardinality, FieldDescriptorProto, WireType};
use crate::error::GenerateResult;
use crate::naming;
use crate::schema::SchemaIndex;
use std::fmt;

/// Growable byte/character buffer used for `string` and `bytes`.
pub const BUFFER_TYPE: &str = "mmdata::SHMString";

/// Container a field is emitted as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmittedType {
    /// A primitive, buffer, enum or record, stored inline.
    Scalar(String),

    /// `repeated T`, parameterized by the element's scalar type.
    Sequence(String),

    /// `map<K, V>`, parameterized by the entry's key and value scalar types.
    Associative { key: String, value: String },
}

impl EmittedType {
    /// Container classification without the type parameters.
    pub fn kind(&self) -> ContainerKind {
        match self {
            EmittedType::Scalar(_) => ContainerKind::Scalar,
            EmittedType::Sequence(_) => ContainerKind::Sequence,
            EmittedType::Associative { .. } => ContainerKind::Associative,
        }
    }
}

impl fmt::Display for EmittedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmittedType::Scalar(ty) => f.write_str(ty),
            EmittedType::Sequence(elem) => write!(f, "mmdata::SHMVector<{elem}>::Type"),
            EmittedType::Associative { key, value } => {
                write!(f, "{}", associative_type(key, value))
            }
        }
    }
}

/// Container classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Scalar,
    Sequence,
    Associative,
}

/// The runtime's associative container over `key` and `value`.
pub fn associative_type(key: &str, value: &str) -> String {
    format!("mmdata::SHMHashMap<{key}, {value}>::Type")
}

/// Resolves field declarations to emitted container types.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'i, 'a> {
    index: &'i SchemaIndex<'a>,
}

impl<'i, 'a> TypeResolver<'i, 'a> {
    pub fn new(index: &'i SchemaIndex<'a>) -> Self {
        Self { index }
    }

    /// Container type to declare `field` with.
    pub fn emitted_type(&self, field: &FieldDescriptorProto) -> GenerateResult<EmittedType> {
        if Cardinality::of(field) == Cardinality::Singular {
            return Ok(EmittedType::Scalar(self.scalar_type(field)?));
        }

        if WireType::of(field)? == WireType::Message {
            if let Some(shape) = self.index.map_entry(field.type_name()) {
                return Ok(EmittedType::Associative {
                    key: self.scalar_type(shape.key)?,
                    value: self.scalar_type(shape.value)?,
                });
            }
        }
        Ok(EmittedType::Sequence(self.scalar_type(field)?))
    }

    /// Scalar type of a field, with message references resolved to the
    /// record type emitted for their declaration.
    ///
    /// A reference the index does not know falls back to its short name.
    pub fn scalar_type(&self, field: &FieldDescriptorProto) -> GenerateResult<String> {
        if WireType::of(field)? == WireType::Message {
            if let Some(record) = self.index.record_name(field.type_name()) {
                return Ok(record.to_string());
            }
        }
        scalar_type(field)
    }
}

/// Scalar type of a field, ignoring cardinality and without an index.
pub fn scalar_type(field: &FieldDescriptorProto) -> GenerateResult<String> {
    let ty = match WireType::of(field)? {
        WireType::Double => "double",
        WireType::Float => "float",
        WireType::Int64 | WireType::Sfixed64 | WireType::Sint64 => "int64_t",
        WireType::Uint64 | WireType::Fixed64 => "uint64_t",
        WireType::Int32 | WireType::Sfixed32 | WireType::Sint32 => "int32_t",
        WireType::Uint32 | WireType::Fixed32 => "uint32_t",
        WireType::Bool => "bool",
        WireType::String | WireType::Bytes => BUFFER_TYPE,
        WireType::Enum => return Ok(naming::scoped_type_name(field.type_name())),
        WireType::Message => return Ok(naming::short_type_name(field.type_name()).to_string()),
    };
    Ok(ty.to_string())
}

/// Whether a field needs allocator-aware construction and non-bitwise comparison.
///
/// Repeated fields, buffers and records are composite; numeric, bool and enum
/// singular fields are not.
pub fn is_composite(field: &FieldDescriptorProto) -> GenerateResult<bool> {
    if Cardinality::of(field) == Cardinality::Repeated {
        // Still reject unsupported element types.
        WireType::of(field)?;
        return Ok(true);
    }
    Ok(matches!(
        WireType::of(field)?,
        WireType::String | WireType::Bytes | WireType::Message
    ))
}

/// Literal zero value for a non-composite field, if it has one.
///
/// Composite fields never get one; enum fields are left default-constructed.
pub fn default_value(field: &FieldDescriptorProto) -> GenerateResult<Option<&'static str>> {
    if is_composite(field)? {
        return Ok(None);
    }
    let value = match WireType::of(field)? {
        WireType::Double | WireType::Float => Some("0.0"),
        WireType::Bool => Some("false"),
        WireType::Enum => None,
        WireType::String | WireType::Bytes | WireType::Message => None,
        WireType::Int64
        | WireType::Uint64
        | WireType::Int32
        | WireType::Fixed64
        | WireType::Fixed32
        | WireType::Uint32
        | WireType::Sfixed32
        | WireType::Sfixed64
        | WireType::Sint32
        | WireType::Sint64 => Some("0"),
    };
    Ok(value)
}
