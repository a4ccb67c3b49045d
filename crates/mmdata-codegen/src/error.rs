//! Error types for table generation

use thiserror::Error;

/// Result type alias for generator operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generator operations
///
/// Every variant is fatal for the run: the generator never writes a partial
/// artifact set. The caller decides how to stop (exit status, protoc error).
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A message carries the same role annotation on two fields
    #[error("duplicate role annotation in message {message}: more than one field with [({role}) = true]")]
    DuplicateRole { message: String, role: String },

    /// A message carries a Key without a Value, or a Value without a Key
    #[error(
        "incomplete role pairing in message {message}: expected both [(Key) = true] and [(Value) = true]"
    )]
    IncompleteRolePairing { message: String },

    /// A single field carries both role annotations
    #[error("field {message}.{field} carries both [(Key) = true] and [(Value) = true]")]
    ConflictingRoles { message: String, field: String },

    /// Field wire type outside the supported set
    #[error("unsupported type {type_id} on field {field}")]
    UnsupportedType { field: String, type_id: i32 },

    /// No files were requested for generation
    #[error("no files to generate")]
    EmptyRequest,

    /// A file named in `file_to_generate` is missing from the request
    #[error("requested file not present in request: {name}")]
    MissingFile { name: String },

    /// A message reference needed for emission is not in the schema index
    #[error("unresolved type reference: {type_name}")]
    UnresolvedType { type_name: String },

    /// The fingerprint closure reached a declaration already on its path
    #[error("reference cycle in table schema: {path}")]
    ReferenceCycle { path: String },

    /// Two table-entry messages map to the same registered table name
    #[error("duplicate table registration: {name}")]
    DuplicateTable { name: String },

    /// Request or descriptor set bytes could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid plugin parameter or configuration file
    #[error("configuration error: {0}")]
    Config(String),
}

impl GenerateError {
    /// Returns a stable code for this error, used as the process exit status
    pub fn error_code(&self) -> u8 {
        match self {
            GenerateError::DuplicateRole { .. } => 1,
            GenerateError::IncompleteRolePairing { .. } => 2,
            GenerateError::UnsupportedType { .. } => 3,
            GenerateError::EmptyRequest => 4,
            GenerateError::UnresolvedType { .. } => 5,
            GenerateError::ReferenceCycle { .. } => 6,
            GenerateError::DuplicateTable { .. } => 7,
            GenerateError::Decode(_) => 8,
            GenerateError::Config(_) => 9,
            GenerateError::ConflictingRoles { .. } => 10,
            GenerateError::MissingFile { .. } => 11,
        }
    }

    /// Whether the error comes from the schema itself rather than the invocation
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            GenerateError::DuplicateRole { .. }
                | GenerateError::IncompleteRolePairing { .. }
                | GenerateError::ConflictingRoles { .. }
                | GenerateError::UnsupportedType { .. }
                | GenerateError::UnresolvedType { .. }
                | GenerateError::ReferenceCycle { .. }
                | GenerateError::DuplicateTable { .. }
        )
    }
}

impl From<prost::DecodeError> for GenerateError {
    fn from(err: prost::DecodeError) -> Self {
        GenerateError::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for GenerateError {
    fn from(err: toml::de::Error) -> Self {
        GenerateError::Config(err.to_string())
    }
}
