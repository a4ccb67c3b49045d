//! Schema index: fully-qualified type name to declaration.
//!
//! Keys use the same form as `FieldDescriptorProto.type_name`, a leading dot
//! followed by the package and the enclosing chain, e.g. `.game.cfg.Item.Stat`.
//! The index borrows from the request it was built from and is read-only once
//! every file of the batch has been registered.

use crate::descriptor::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};
use crate::naming;
use std::collections::HashMap;

/// Implicit key/value pair of a `map<K, V>` entry type.
#[derive(Debug, Clone, Copy)]
pub struct MapEntryShape<'a> {
    pub key: &'a FieldDescriptorProto,
    pub value: &'a FieldDescriptorProto,
}

impl<'a> MapEntryShape<'a> {
    /// Structural predicate: marked `map_entry` and declares exactly two fields.
    pub fn detect(message: &'a DescriptorProto) -> Option<Self> {
        if !message.is_map_entry() {
            return None;
        }
        match message.field.as_slice() {
            [key, value] => Some(Self { key, value }),
            _ => None,
        }
    }
}

/// Run-scoped mapping from fully-qualified name to message declaration.
#[derive(Debug, Default)]
pub struct SchemaIndex<'a> {
    messages: HashMap<String, &'a DescriptorProto>,
    record_names: HashMap<String, String>,
    map_entries: HashMap<String, MapEntryShape<'a>>,
}

impl<'a> SchemaIndex<'a> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a whole batch of files.
    pub fn from_files(files: impl IntoIterator<Item = &'a FileDescriptorProto>) -> Self {
        let mut index = Self::new();
        for file in files {
            index.register(file);
        }
        index
    }

    /// Add every top-level and nested declaration of `file`.
    ///
    /// Re-registering a name replaces the previous declaration.
    pub fn register(&mut self, file: &'a FileDescriptorProto) {
        let package_scope = naming::package_scope(file.package());
        for message in &file.message_type {
            self.register_message(&package_scope, &package_scope, message);
        }
    }

    fn register_message(&mut self, package_scope: &str, scope: &str, message: &'a DescriptorProto) {
        let name = format!("{scope}.{}", message.name());
        for nested in &message.nested_type {
            self.register_message(package_scope, &name, nested);
        }
        if let Some(shape) = MapEntryShape::detect(message) {
            self.map_entries.insert(name.clone(), shape);
        }
        let record = naming::record_type_name(naming::local_name(package_scope, &name));
        self.record_names.insert(name.clone(), record);
        self.messages.insert(name, message);
    }

    /// Look up a declaration by fully-qualified name.
    ///
    /// Misses are not errors here; a primitive field's empty type reference is
    /// expected to miss.
    pub fn resolve(&self, name: &str) -> Option<&'a DescriptorProto> {
        self.messages.get(name).copied()
    }

    /// Flattened record type emitted for `name`, e.g. `Item_Stat` for
    /// `.game.Item.Stat`.
    pub fn record_name(&self, name: &str) -> Option<&str> {
        self.record_names.get(name).map(String::as_str)
    }

    /// The associative shape of `name`, if the declaration is a map entry.
    pub fn map_entry(&self, name: &str) -> Option<MapEntryShape<'a>> {
        self.map_entries.get(name).copied()
    }

    /// Number of indexed declarations
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the index holds no declarations
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over indexed names in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }
}
