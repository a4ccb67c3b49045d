//! Naming conventions for generated declarations and artifacts.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `game.cfg` | [`package_scope`] | `.game.cfg` |
//! | `.game.cfg.Item` | [`short_type_name`] | `Item` |
//! | `.game.cfg.Kind` | [`scoped_type_name`] | `::game::cfg::Kind` |
//! | `.game.cfg.Item.Stat` in `game.cfg` | [`local_name`] | `Item.Stat` |
//! | `Item.Stat` | [`record_type_name`] | `Item_Stat` |
//! | `cfg/item.proto` | [`include_guard`] | `ITEM_PROTO_HPP_` |
//! | `Item` | [`table_type_name`] | `ItemTable` |

/// Leading-dot scope of a package, as used in `type_name` references.
///
/// The empty package has an empty scope, so top-level names become `.Name`.
///
/// # Examples
///
/// ```
/// use mmdata_codegen::naming::package_scope;
///
/// assert_eq!(package_scope("game.cfg"), ".game.cfg");
/// assert_eq!(package_scope(""), "");
/// ```
pub fn package_scope(package: &str) -> String {
    if package.is_empty() {
        String::new()
    } else {
        format!(".{package}")
    }
}

/// Last segment of a dotted type reference.
///
/// # Examples
///
/// ```
/// use mmdata_codegen::naming::short_type_name;
///
/// assert_eq!(short_type_name(".game.cfg.Item"), "Item");
/// assert_eq!(short_type_name("Item"), "Item");
/// ```
pub fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

/// A dotted type reference in C++ scope syntax, anchored at the global scope.
pub fn scoped_type_name(type_name: &str) -> String {
    type_name
        .trim_start_matches('.')
        .split('.')
        .filter(|s| !s.is_empty())
        .fold(String::new(), |mut acc, segment| {
            acc.push_str("::");
            acc.push_str(segment);
            acc
        })
}

/// Enclosing chain and name of a declaration, relative to its package.
///
/// # Examples
///
/// ```
/// use mmdata_codegen::naming::local_name;
///
/// assert_eq!(local_name(".game.cfg", ".game.cfg.Item.Stat"), "Item.Stat");
/// assert_eq!(local_name("", ".Item"), "Item");
/// ```
pub fn local_name<'n>(package_scope: &str, qualified: &'n str) -> &'n str {
    qualified
        .strip_prefix(package_scope)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(qualified)
}

/// Record type emitted for a declaration, flattened into the package namespace.
///
/// Nested declarations join their enclosing chain with `_`, the same as
/// protoc's own C++ output, so `A.Row` and `B.Row` stay distinct.
pub fn record_type_name(local_name: &str) -> String {
    local_name.replace('.', "_")
}

/// Package segments, outermost first. Empty for the empty package.
pub fn namespace_segments(package: &str) -> Vec<&str> {
    package.split('.').filter(|s| !s.is_empty()).collect()
}

/// Include guard macro for a header generated from `proto_path`.
///
/// Only the file name takes part, so `a/item.proto` and `b/item.proto`
/// share a guard, the same as their generated basenames would.
pub fn include_guard(proto_path: &str, header_suffix: &str) -> String {
    let base = proto_path.rsplit('/').next().unwrap_or(proto_path);
    let mut guard = format!("{base}{header_suffix}").to_uppercase();
    guard = guard.replace(['.', '/', '-', ' '], "_");
    guard.push('_');
    guard
}

/// Generated table container name for a table-entry message.
pub fn table_type_name(message: &str) -> String {
    format!("{message}Table")
}

/// Base typedef the table container derives from.
pub fn table_parent_name(message: &str) -> String {
    format!("{message}TableParent")
}

/// Build/diagnostic helper bound to a table container.
pub fn helper_type_name(message: &str) -> String {
    format!("{message}TableHelper")
}

/// Name of the static registration object in the source artifact.
pub fn registration_instance_name(message: &str) -> String {
    format!("{message}_instance")
}

/// Package-qualified name, without leading dot.
///
/// # Examples
///
/// ```
/// use mmdata_codegen::naming::package_qualified;
///
/// assert_eq!(package_qualified("game.cfg", "ItemTable"), "game.cfg.ItemTable");
/// assert_eq!(package_qualified("", "ItemTable"), "ItemTable");
/// ```
pub fn package_qualified(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
