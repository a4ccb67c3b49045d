//! Declarations artifact: records, key support and table containers.

use super::{BANNER, CodeWriter, include_line};
use crate::config::GeneratorConfig;
use crate::descriptor::{Cardinality, DescriptorProto, FieldDescriptorProto, WireType};
use crate::error::{GenerateError, GenerateResult};
use crate::naming;
use crate::roles::{Role, TableRoles};
use crate::schema::SchemaIndex;
use crate::types::{self, TypeResolver};
use std::collections::HashSet;

/// Banner, include guard and includes.
pub(super) fn write_prologue(w: &mut CodeWriter, proto_path: &str, config: &GeneratorConfig) {
    let guard = naming::include_guard(proto_path, &config.header_suffix);
    w.line(BANNER);
    w.line(format!("// source: {proto_path}"));
    w.blank();
    w.line(format!("#ifndef {guard}"));
    w.line(format!("#define {guard}"));
    for entry in &config.header_includes {
        w.line(include_line(entry));
    }
    w.blank();
}

pub(super) fn write_epilogue(w: &mut CodeWriter, proto_path: &str, config: &GeneratorConfig) {
    let guard = naming::include_guard(proto_path, &config.header_suffix);
    w.line(format!("#endif /* {guard} */"));
}

/// `hash_value` and `operator==` for a message-typed key.
///
/// Primitive and buffer keys use the container's built-in hashing, so
/// nothing is written for them. A key type already in `emitted` is skipped;
/// the functions are defined once per header.
pub(super) fn write_key_support(
    w: &mut CodeWriter,
    index: &SchemaIndex<'_>,
    resolver: &TypeResolver<'_, '_>,
    key: &FieldDescriptorProto,
    emitted: &mut HashSet<String>,
) -> GenerateResult<()> {
    if Cardinality::of(key) != Cardinality::Singular || WireType::of(key)? != WireType::Message {
        return Ok(());
    }
    let declaration =
        index
            .resolve(key.type_name())
            .ok_or_else(|| GenerateError::UnresolvedType {
                type_name: key.type_name().to_string(),
            })?;
    let key_type = resolver.scalar_type(key)?;
    if !emitted.insert(key_type.clone()) {
        return Ok(());
    }

    w.try_block(
        format!("inline std::size_t hash_value(const {key_type}& v)"),
        "}",
        |w| {
            w.line("std::size_t hash = 0;");
            for field in &declaration.field {
                let ty = resolver.emitted_type(field)?;
                w.line(format!("hash ^= boost::hash_value<{ty}>(v.{});", field.name()));
            }
            w.line("return hash;");
            Ok(())
        },
    )?;

    w.block(
        format!("inline bool operator==(const {key_type}& a, const {key_type}& b)"),
        "}",
        |w| {
            for field in &declaration.field {
                let name = field.name();
                w.line(format!("if(!(a.{name} == b.{name})) return false;"));
            }
            w.line("return true;");
        },
    );
    Ok(())
}

/// Record struct and its stream operator.
///
/// Table entries also get the forward-declared table type, the
/// `key_type`/`value_type`/`table_type` typedefs and key/value accessors.
pub(super) fn write_record(
    w: &mut CodeWriter,
    resolver: &TypeResolver<'_, '_>,
    name: &str,
    message: &DescriptorProto,
    roles: Option<TableRoles<'_>>,
) -> GenerateResult<()> {
    let table_type = naming::table_type_name(name);

    if roles.is_some() {
        w.line(format!("struct {table_type};"));
    }

    w.try_block(format!("struct {name}"), "};", |w| {
        if let Some(roles) = roles {
            w.line(format!("typedef {} key_type;", resolver.emitted_type(roles.key)?));
            w.line(format!("typedef {} value_type;", resolver.emitted_type(roles.value)?));
            w.line(format!("typedef {table_type} table_type;"));
        }

        for field in &message.field {
            let ty = match roles.and_then(|r| r.role_of(field)) {
                Some(Role::Key) => "key_type".to_string(),
                Some(Role::Value) => "value_type".to_string(),
                None => resolver.emitted_type(field)?.to_string(),
            };
            w.line(format!("{ty} {};", field.name()));
        }

        let names: Vec<&str> = message.field.iter().map(|f| f.name()).collect();
        w.blank();
        w.line(format!("KCFG_DEFINE_FIELDS({})", names.join(",")));

        let mut initializers = Vec::new();
        for field in &message.field {
            if types::is_composite(field)? {
                initializers.push(format!("{}(alloc)", field.name()));
            } else if let Some(zero) = types::default_value(field)? {
                initializers.push(format!("{}({zero})", field.name()));
            }
        }
        let init_list = if initializers.is_empty() {
            String::new()
        } else {
            format!(":{}", initializers.join(","))
        };
        w.blank();
        w.line(format!("{name}(const mmdata::CharAllocator& alloc){init_list}"));
        w.line("{}");

        if let Some(roles) = roles {
            w.blank();
            w.line(format!(
                "const key_type& GetKey() const {{ return {}; }}",
                roles.key.name()
            ));
            w.line(format!(
                "const value_type& GetValue() const {{ return {}; }}",
                roles.value.name()
            ));
        }
        Ok(())
    })?;
    w.blank();

    w.block(
        format!("inline std::ostream& operator<<(std::ostream& os, const {name}& v)"),
        "}",
        |w| {
            w.line(format!("os<<\"[{name}:\";"));
            for (i, field) in message.field.iter().enumerate() {
                let sep = if i > 0 { "," } else { "" };
                let field = field.name();
                w.line(format!("os<<\"{sep}{field}=\"<< v.{field};"));
            }
            w.line("os<<\"]\";");
            w.line("return os;");
        },
    );
    w.blank();
    Ok(())
}

/// Table container over the entry's key and value, stamped with `fingerprint`.
pub(super) fn write_table(
    w: &mut CodeWriter,
    resolver: &TypeResolver<'_, '_>,
    name: &str,
    roles: TableRoles<'_>,
    fingerprint: u64,
) -> GenerateResult<()> {
    let table_type = naming::table_type_name(name);
    let parent = naming::table_parent_name(name);
    let key = resolver.emitted_type(roles.key)?.to_string();
    let value = resolver.emitted_type(roles.value)?.to_string();

    w.line(format!(
        "typedef {} {parent};",
        types::associative_type(&key, &value)
    ));
    w.blank();
    w.block(format!("struct {table_type}:public {parent}"), "};", |w| {
        w.line(format!(
            "{table_type}(const mmdata::CharAllocator& alloc):{parent}(alloc)"
        ));
        w.line("{");
        w.line("}");
        w.blank();
        w.line(format!(
            "static uint64_t GetHash() {{ return {fingerprint}UL;}}"
        ));
    });
    w.blank();
    Ok(())
}
