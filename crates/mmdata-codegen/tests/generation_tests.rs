//! End-to-end tests: plugin request in, generated artifacts out.

#![allow(non_snake_case)]

use mmdata_codegen::descriptor::{
    DescriptorProto, FieldDescriptorProto, FieldOptions, FileDescriptorProto, MessageOptions,
    WireType,
};
use mmdata_codegen::{CodeGeneratorRequest, GenerateError, Generator, GeneratorConfig};
use prost::Message;

fn field(name: &str, ty: WireType) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        label: Some(1),
        r#type: Some(ty.as_i32()),
        ..Default::default()
    }
}

fn typed(name: &str, ty: WireType, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.into()),
        ..field(name, ty)
    }
}

fn key(mut f: FieldDescriptorProto) -> FieldDescriptorProto {
    f.options.get_or_insert_with(FieldOptions::default).key = Some(true);
    f
}

fn value(mut f: FieldDescriptorProto) -> FieldDescriptorProto {
    f.options.get_or_insert_with(FieldOptions::default).value = Some(true);
    f
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.into()),
        field: fields,
        ..Default::default()
    }
}

fn proto(name: &str, package: &str, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.into()),
        package: Some(package.into()),
        message_type: messages,
        syntax: Some("proto3".into()),
        ..Default::default()
    }
}

fn request(files: Vec<FileDescriptorProto>) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: files.iter().map(|f| f.name().to_string()).collect(),
        proto_file: files,
        ..Default::default()
    }
}

fn content<'o>(output: &'o mmdata_codegen::GenerationOutput, name: &str) -> &'o str {
    output
        .files
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("no artifact named {name}"))
}

// =============================================================================
// Scenarios
// =============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn generate___string_key_entry___one_table_no_custom_hash() {
        let req = request(vec![proto(
            "m.proto",
            "p",
            vec![message(
                "M",
                vec![
                    key(field("k", WireType::String)),
                    value(field("v", WireType::Int64)),
                ],
            )],
        )]);

        let output = Generator::default().generate(&req).unwrap();

        assert_eq!(output.registry.len(), 1);
        assert_eq!(content(&output, "m.proto.desc"), "p.MTable");
        assert!(!content(&output, "m.proto.hpp").contains("hash_value"));
        assert!(content(&output, "m.proto.cpp").contains("M_instance(\"p.M\""));
    }

    #[test]
    fn generate___int32_pair___primitive_keyed_table() {
        let req = request(vec![proto(
            "pair.proto",
            "p",
            vec![message(
                "Pair",
                vec![
                    key(field("x", WireType::Int32)),
                    value(field("y", WireType::Int32)),
                ],
            )],
        )]);

        let output = Generator::default().generate(&req).unwrap();
        let header = content(&output, "pair.proto.hpp");

        assert!(header.contains("typedef mmdata::SHMHashMap<int32_t, int32_t>::Type PairTableParent;"));
        assert!(!header.contains("hash_value"));
        assert!(!header.contains("operator=="));
    }

    #[test]
    fn generate___same_named_nested_tables___registered_by_qualified_name() {
        let row = || {
            message(
                "Row",
                vec![key(field("k", WireType::Int32)), value(field("v", WireType::Int32))],
            )
        };
        let mut a = message("A", vec![]);
        a.nested_type.push(row());
        let mut b = message("B", vec![]);
        b.nested_type.push(row());
        let req = request(vec![proto("rows.proto", "p", vec![a, b])]);

        let output = Generator::default().generate(&req).unwrap();

        assert!(output.registry.get("p.A.Row").is_some());
        assert!(output.registry.get("p.B.Row").is_some());
        assert!(output.registry.get("p.Row").is_none());
        assert_eq!(content(&output, "rows.proto.desc"), "p.A_RowTable\np.B_RowTable");
        let header = content(&output, "rows.proto.hpp");
        assert!(header.contains("struct A_Row\n"));
        assert!(header.contains("struct B_Row\n"));
    }

    #[test]
    fn generate___no_annotations___no_artifacts() {
        let req = request(vec![proto(
            "plain.proto",
            "p",
            vec![
                message("A", vec![field("x", WireType::Int32)]),
                message("B", vec![typed("a", WireType::Message, ".p.A")]),
            ],
        )]);

        let output = Generator::default().generate(&req).unwrap();

        assert!(output.files.is_empty());
        assert!(Generator::default().generate_response(&req).error.is_none());
    }

    #[test]
    fn generate___key_without_value___incomplete_pairing() {
        let req = request(vec![proto(
            "e.proto",
            "p",
            vec![message(
                "Entry",
                vec![key(field("name", WireType::String)), field("count", WireType::Int64)],
            )],
        )]);

        let err = Generator::default().generate(&req).unwrap_err();

        assert!(matches!(err, GenerateError::IncompleteRolePairing { .. }));
        assert_eq!(err.error_code(), 2);
    }

    #[test]
    fn generate___group_field___unsupported_type() {
        let req = request(vec![proto(
            "g.proto",
            "p",
            vec![message(
                "M",
                vec![
                    key(field("k", WireType::Int32)),
                    value(field("v", WireType::Int32)),
                    FieldDescriptorProto {
                        name: Some("legacy".into()),
                        label: Some(1),
                        r#type: Some(10),
                        ..Default::default()
                    },
                ],
            )],
        )]);

        let err = Generator::default().generate(&req).unwrap_err();

        assert!(matches!(err, GenerateError::UnsupportedType { type_id: 10, .. }));
    }
}

// =============================================================================
// Fingerprint stability
// =============================================================================

mod fingerprints {
    use super::*;

    fn schema(stat_fields: &[&str]) -> CodeGeneratorRequest {
        let stat = message(
            "Stat",
            stat_fields.iter().map(|n| field(n, WireType::Int32)).collect(),
        );
        let item = message(
            "Item",
            vec![
                key(field("id", WireType::Int64)),
                value(typed("stat", WireType::Message, ".game.Stat")),
            ],
        );
        request(vec![proto("item.proto", "game", vec![stat, item])])
    }

    fn fingerprint(req: &CodeGeneratorRequest) -> u64 {
        Generator::default()
            .generate(req)
            .unwrap()
            .registry
            .get("game.Item")
            .unwrap()
            .fingerprint
    }

    #[test]
    fn fingerprint___identical_schema___identical_value() {
        assert_eq!(fingerprint(&schema(&["hp", "mp"])), fingerprint(&schema(&["hp", "mp"])));
    }

    #[test]
    fn fingerprint___referenced_field_renamed___changes() {
        assert_ne!(fingerprint(&schema(&["hp", "mp"])), fingerprint(&schema(&["hp", "sp"])));
    }

    #[test]
    fn fingerprint___referenced_fields_reordered___changes() {
        assert_ne!(fingerprint(&schema(&["hp", "mp"])), fingerprint(&schema(&["mp", "hp"])));
    }

    #[test]
    fn fingerprint___referenced_field_added___changes() {
        assert_ne!(fingerprint(&schema(&["hp"])), fingerprint(&schema(&["hp", "mp"])));
    }

    #[test]
    fn fingerprint___embedded_in_header() {
        let req = schema(&["hp"]);
        let output = Generator::default().generate(&req).unwrap();
        let value = output.registry.get("game.Item").unwrap().fingerprint;

        assert!(content(&output, "item.proto.hpp").contains(&format!("return {value}UL;")));
    }

    fn chain(leaf_field: &str) -> CodeGeneratorRequest {
        let leaf = message("Leaf", vec![field(leaf_field, WireType::Int32)]);
        let stat = message("Stat", vec![typed("leaf", WireType::Message, ".game.Leaf")]);
        let item = message(
            "Item",
            vec![
                key(field("id", WireType::Int64)),
                value(typed("stat", WireType::Message, ".game.Stat")),
            ],
        );
        request(vec![proto("item.proto", "game", vec![leaf, stat, item])])
    }

    #[test]
    fn fingerprint___field_renamed_two_references_away___changes() {
        assert_ne!(fingerprint(&chain("x")), fingerprint(&chain("y")));
    }

    fn nested_stat(stat_field: &str) -> CodeGeneratorRequest {
        let mut item = message(
            "Item",
            vec![
                key(field("id", WireType::Int64)),
                value(typed("stat", WireType::Message, ".game.Item.Stat")),
            ],
        );
        item.nested_type
            .push(message("Stat", vec![field(stat_field, WireType::Int32)]));
        request(vec![proto("item.proto", "game", vec![item])])
    }

    #[test]
    fn fingerprint___nested_referenced_type_renamed_field___changes() {
        assert_ne!(
            fingerprint(&nested_stat("hp")),
            fingerprint(&nested_stat("health"))
        );
    }

    #[test]
    fn fingerprint___reserved_range_on_decoded_request___changes() {
        let plain = schema(&["hp"]);
        let mut reserved = schema(&["hp"]);
        reserved.proto_file[0].message_type[0]
            .reserved_range
            .push(mmdata_codegen::descriptor::descriptor_proto::ReservedRange {
                start: Some(5),
                end: Some(6),
            });
        let decoded = CodeGeneratorRequest::decode(reserved.encode_to_vec().as_slice()).unwrap();

        assert_eq!(decoded, reserved);
        assert_ne!(fingerprint(&plain), fingerprint(&decoded));
    }

    #[test]
    fn fingerprint___mutually_recursive_records___reference_cycle() {
        let req = request(vec![proto(
            "c.proto",
            "p",
            vec![
                message("A", vec![typed("b", WireType::Message, ".p.B")]),
                message("B", vec![typed("a", WireType::Message, ".p.A")]),
                message(
                    "T",
                    vec![
                        key(field("id", WireType::Int32)),
                        value(typed("a", WireType::Message, ".p.A")),
                    ],
                ),
            ],
        )]);

        let err = Generator::default().generate(&req).unwrap_err();

        assert!(matches!(err, GenerateError::ReferenceCycle { .. }));
    }
}

// =============================================================================
// Idempotence and plugin wire format
// =============================================================================

mod plugin {
    use super::*;
    use mmdata_codegen::CodeGeneratorResponse;

    fn map_schema() -> CodeGeneratorRequest {
        let entry = DescriptorProto {
            options: Some(MessageOptions {
                map_entry: Some(true),
                ..Default::default()
            }),
            ..message(
                "AttrsEntry",
                vec![field("key", WireType::String), field("value", WireType::Int32)],
            )
        };
        let mut item = message(
            "Item",
            vec![
                key(field("id", WireType::Uint32)),
                value(field("name", WireType::String)),
                FieldDescriptorProto {
                    label: Some(3),
                    ..typed("attrs", WireType::Message, ".cfg.Item.AttrsEntry")
                },
            ],
        );
        item.nested_type.push(entry);
        request(vec![proto("cfg/item.proto", "cfg", vec![item])])
    }

    #[test]
    fn generate___twice___byte_identical_artifacts() {
        let req = map_schema();

        let first = Generator::default().generate(&req).unwrap();
        let second = Generator::default().generate(&req).unwrap();

        assert_eq!(first.files, second.files);
    }

    #[test]
    fn generate___map_field___associative_member_and_guard() {
        let output = Generator::default().generate(&map_schema()).unwrap();
        let header = content(&output, "cfg/item.proto.hpp");

        assert!(header.contains("#ifndef ITEM_PROTO_HPP_"));
        assert!(header.contains("mmdata::SHMHashMap<mmdata::SHMString, int32_t>::Type attrs;"));
        assert!(header.contains("Item(const mmdata::CharAllocator& alloc):id(0),name(alloc),attrs(alloc)"));
    }

    #[test]
    fn run_plugin___encoded_request___encoded_response() {
        let bytes = Generator::default()
            .run_plugin(&map_schema().encode_to_vec())
            .unwrap();

        let response = CodeGeneratorResponse::decode(bytes.as_slice()).unwrap();
        let names: Vec<_> = response.file.iter().filter_map(|f| f.name.as_deref()).collect();

        assert_eq!(
            names,
            vec!["cfg/item.proto.hpp", "cfg/item.proto.cpp", "cfg/item.proto.desc"]
        );
    }

    #[test]
    fn generate___parameter_config___applied() {
        let config = GeneratorConfig::from_parameter(Some("indent=2,source_suffix=.cc")).unwrap();

        let output = Generator::new(config).generate(&map_schema()).unwrap();

        assert!(content(&output, "cfg/item.proto.cc").contains("\n  struct ItemTableHelper\n"));
    }
}
