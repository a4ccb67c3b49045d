//! Registry of generated tables.
//!
//! One [`TableRegistry`] is produced per generation run. It mirrors the
//! `mmdata::HelperFuncRegister` statements written into the scaffolding
//! artifacts, so tooling can enumerate tables without compiling them.

use crate::error::{GenerateError, GenerateResult};
use crate::naming;
use serde::Serialize;
use std::collections::HashMap;

/// One generated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRegistration {
    /// Registered name, the fully-qualified `<package>.<Outer>.<Message>`
    /// without leading dot.
    pub table_name: String,

    /// Generated table container, `<Record>Table`.
    pub table_type: String,

    /// Generated record type, the enclosing chain joined with `_`.
    pub record_type: String,

    /// Generated build/diagnostic helper, `<Record>TableHelper`.
    pub helper_type: String,

    /// Package of the source file, possibly empty.
    pub package: String,

    /// Proto path the table was generated from.
    pub source_file: String,

    /// Schema fingerprint returned by `GetHash()`.
    pub fingerprint: u64,
}

impl TableRegistration {
    /// Registration for the declaration `local_name` (`Item`, or `Outer.Row`
    /// when nested) in `source_file` under `package`.
    pub fn new(package: &str, local_name: &str, source_file: &str, fingerprint: u64) -> Self {
        let record = naming::record_type_name(local_name);
        Self {
            table_name: naming::package_qualified(package, local_name),
            table_type: naming::table_type_name(&record),
            helper_type: naming::helper_type_name(&record),
            record_type: record,
            package: package.to_string(),
            source_file: source_file.to_string(),
            fingerprint,
        }
    }

    /// Manifest line, the package-qualified table container type.
    pub fn manifest_line(&self) -> String {
        naming::package_qualified(&self.package, &self.table_type)
    }
}

/// Tables generated by one run, in registration order.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct TableRegistry {
    entries: Vec<TableRegistration>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table. Each name may be registered once per run.
    pub fn register(&mut self, entry: TableRegistration) -> GenerateResult<()> {
        if self.by_name.contains_key(&entry.table_name) {
            return Err(GenerateError::DuplicateTable {
                name: entry.table_name,
            });
        }
        self.by_name
            .insert(entry.table_name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Look up a registration by its fully-qualified name.
    pub fn get(&self, table_name: &str) -> Option<&TableRegistration> {
        self.by_name.get(table_name).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableRegistration> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Manifest lines for the tables generated from `source_file`.
    pub fn manifest_for(&self, source_file: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.source_file == source_file)
            .map(TableRegistration::manifest_line)
            .collect()
    }
}

impl<'r> IntoIterator for &'r TableRegistry {
    type Item = &'r TableRegistration;
    type IntoIter = std::slice::Iter<'r, TableRegistration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
