//! Scaffolding artifact: build/diagnostic helpers and their registration.

use super::{BANNER, CodeWriter, include_line};
use crate::config::GeneratorConfig;
use crate::error::GenerateResult;
use crate::naming;
use crate::registry::TableRegistration;
use crate::roles::TableRoles;
use crate::types;

pub(super) fn write_prologue(
    w: &mut CodeWriter,
    proto_path: &str,
    header_name: &str,
    config: &GeneratorConfig,
) {
    w.line(BANNER);
    w.line(format!("// source: {proto_path}"));
    w.blank();
    w.line("#include <iostream>");
    w.line(include_line(header_name));
    w.blank();
    for entry in &config.source_includes {
        w.line(include_line(entry));
    }
    w.blank();
}

/// `<M>TableHelper` with `Build` and `TestMemory`, then its registration.
pub(super) fn write_helper(
    w: &mut CodeWriter,
    roles: TableRoles<'_>,
    entry: &TableRegistration,
) -> GenerateResult<()> {
    let record = &entry.record_type;
    let table_type = &entry.table_type;
    let helper = &entry.helper_type;
    let composite_key = types::is_composite(roles.key)?;

    w.block(format!("struct {helper}"), "};", |w| {
        w.block(
            "static int64_t Build(mmdata::DataImageBuildOptions& options, uint64_t& hash, std::string& err)",
            "}",
            |w| {
                w.line(format!("hash = {table_type}::GetHash();"));
                w.line("mmdata::DataImageBuilder builder;");
                w.line(format!("int64_t ret = builder.Build<{record}>(options);"));
                w.line("err = builder.err;");
                w.line("return ret;");
            },
        );
        w.blank();

        w.block(
            "static int TestMemory(const void* mem, const std::string& json_key)",
            "}",
            |w| {
                w.line("rapidjson::Document d;");
                w.line("d.Parse<0>(json_key.c_str());");
                w.line("if(d.HasParseError()){");
                w.indent();
                w.line("std::cout<<\"Invalid json key:\"<<json_key<<std::endl;");
                w.line("return -1;");
                w.dedent();
                w.line("}");
                w.line(format!("typedef {record}::table_type RootTable;"));
                w.line("mmdata::MMData buf;");
                w.line("const RootTable* root = buf.LoadRootReadObject<RootTable>(mem);");
                w.line("if (NULL == root) return -1;");
                if composite_key {
                    w.line("mmdata::CharAllocator alloc;");
                    w.line(format!("{record}::key_type key(alloc);"));
                } else {
                    w.line(format!("{record}::key_type key;"));
                }
                w.line("kcfg::Parse(d, \"\", key);");
                w.line("RootTable::const_iterator found = root->find(key);");
                w.line("if(found != root->end()){");
                w.indent();
                w.line(
                    "std::cout << \"Found entry \"<< found->first << \"->\" << found->second << std::endl;",
                );
                w.line("return 0;");
                w.dedent();
                w.line("}");
                w.line(
                    "std::cout << \"No entry found for json_key:\"<< json_key << \" key:\"<< key << std::endl;",
                );
                w.line("return -1;");
            },
        );
    });
    w.blank();

    w.line(format!(
        "static mmdata::HelperFuncRegister {}(\"{}\", {helper}::Build, {helper}::TestMemory, {table_type}::GetHash());",
        naming::registration_instance_name(record),
        entry.table_name,
    ));
    w.blank();
    Ok(())
}
