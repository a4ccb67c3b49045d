//! Table role detection.
//!
//! A message becomes a table entry when exactly one field is annotated
//! `[(Key) = true]` and exactly one `[(Value) = true]`. A message with
//! neither is a plain record. Anything in between is a schema violation.

use crate::descriptor::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};
use crate::error::{GenerateError, GenerateResult};
use crate::naming;
use std::collections::HashMap;
use std::fmt;

/// Role annotation on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Key,
    Value,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Key => write!(f, "Key"),
            Role::Value => write!(f, "Value"),
        }
    }
}

/// Key and Value fields of a table-entry message.
#[derive(Debug, Clone, Copy)]
pub struct TableRoles<'a> {
    pub key: &'a FieldDescriptorProto,
    pub value: &'a FieldDescriptorProto,
}

impl TableRoles<'_> {
    /// Role of `field` within this entry, compared by identity.
    pub fn role_of(&self, field: &FieldDescriptorProto) -> Option<Role> {
        if std::ptr::eq(field, self.key) {
            Some(Role::Key)
        } else if std::ptr::eq(field, self.value) {
            Some(Role::Value)
        } else {
            None
        }
    }
}

/// Classify a single message.
///
/// Returns `Ok(None)` for a plain record.
pub fn classify(message: &DescriptorProto) -> GenerateResult<Option<TableRoles<'_>>> {
    classify_as(message.name(), message)
}

fn classify_as<'a>(
    qualified: &str,
    message: &'a DescriptorProto,
) -> GenerateResult<Option<TableRoles<'a>>> {
    let mut key = None;
    let mut value = None;

    for field in &message.field {
        let (is_key, is_value) = (field.has_key_role(), field.has_value_role());
        if is_key && is_value {
            return Err(GenerateError::ConflictingRoles {
                message: qualified.to_string(),
                field: field.name().to_string(),
            });
        }
        let (slot, role) = if is_key {
            (&mut key, Role::Key)
        } else if is_value {
            (&mut value, Role::Value)
        } else {
            continue;
        };
        if slot.replace(field).is_some() {
            return Err(GenerateError::DuplicateRole {
                message: qualified.to_string(),
                role: role.to_string(),
            });
        }
    }

    match (key, value) {
        (Some(key), Some(value)) => Ok(Some(TableRoles { key, value })),
        (None, None) => Ok(None),
        _ => Err(GenerateError::IncompleteRolePairing {
            message: qualified.to_string(),
        }),
    }
}

/// Table entries found in one file, keyed by fully-qualified name.
#[derive(Debug, Default)]
pub struct FileRoles<'a> {
    entries: HashMap<String, TableRoles<'a>>,
    order: Vec<String>,
}

impl<'a> FileRoles<'a> {
    /// Roles of the declaration named `qualified`, if it is a table entry.
    pub fn get(&self, qualified: &str) -> Option<TableRoles<'a>> {
        self.entries.get(qualified).copied()
    }

    /// Fully-qualified names of table entries, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// A file with no table entries produces no artifacts.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Classify every declaration of `file`, nested ones included.
///
/// Any violation anywhere in the file aborts with an error.
pub fn verify_file(file: &FileDescriptorProto) -> GenerateResult<FileRoles<'_>> {
    let mut roles = FileRoles::default();
    let scope = naming::package_scope(file.package());
    for message in &file.message_type {
        verify_message(&scope, message, &mut roles)?;
    }
    Ok(roles)
}

fn verify_message<'a>(
    scope: &str,
    message: &'a DescriptorProto,
    roles: &mut FileRoles<'a>,
) -> GenerateResult<()> {
    let qualified = format!("{scope}.{}", message.name());
    for nested in &message.nested_type {
        verify_message(&qualified, nested, roles)?;
    }
    if let Some(entry) = classify_as(&qualified, message)? {
        roles.order.push(qualified.clone());
        roles.entries.insert(qualified, entry);
    }
    Ok(())
}
