//! Schemas shared by unit tests.

use mmdata_codegen::descriptor::{
    DescriptorProto, FieldDescriptorProto, FieldOptions, FileDescriptorProto, WireType,
};
use mmdata_codegen::{CodeGeneratorRequest, FileDescriptorSet};

pub fn field(name: &str, ty: WireType) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        label: Some(1),
        r#type: Some(ty.as_i32()),
        ..Default::default()
    }
}

pub fn role(mut field: FieldDescriptorProto, key: bool) -> FieldDescriptorProto {
    let options = field.options.get_or_insert_with(FieldOptions::default);
    if key {
        options.key = Some(true);
    } else {
        options.value = Some(true);
    }
    field
}

/// `package p; message M { string k [(Key)]; int64 v [(Value)]; }`
pub fn table_file(name: &str, message: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.into()),
        package: Some("p".into()),
        message_type: vec![DescriptorProto {
            name: Some(message.into()),
            field: vec![
                role(field("k", WireType::String), true),
                role(field("v", WireType::Int64), false),
            ],
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn plain_file(name: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.into()),
        package: Some("p".into()),
        message_type: vec![DescriptorProto {
            name: Some("Plain".into()),
            field: vec![field("x", WireType::Int32)],
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn descriptor_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![table_file("a.proto", "A"), plain_file("plain.proto"), table_file("dir/b.proto", "B")],
    }
}

pub fn request(files: Vec<FileDescriptorProto>, generate: &[&str], parameter: Option<&str>) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: generate.iter().map(|s| s.to_string()).collect(),
        parameter: parameter.map(String::from),
        proto_file: files,
        ..Default::default()
    }
}
