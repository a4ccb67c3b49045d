//! Descriptor builders shared by unit tests.

use crate::descriptor::{
    DescriptorProto, FieldDescriptorProto, FieldOptions, FileDescriptorProto, MessageOptions,
    WireType,
};

pub fn field(name: &str, ty: WireType) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        label: Some(1),
        r#type: Some(ty.as_i32()),
        ..Default::default()
    }
}

pub fn message_field(name: &str, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.into()),
        ..field(name, WireType::Message)
    }
}

pub fn enum_field(name: &str, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.into()),
        ..field(name, WireType::Enum)
    }
}

pub fn repeated(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.label = Some(3);
    field
}

pub fn key(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.options.get_or_insert_with(FieldOptions::default).key = Some(true);
    field
}

pub fn value(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.options.get_or_insert_with(FieldOptions::default).value = Some(true);
    field
}

pub fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.into()),
        field: fields,
        ..Default::default()
    }
}

pub fn nest(mut outer: DescriptorProto, inner: DescriptorProto) -> DescriptorProto {
    outer.nested_type.push(inner);
    outer
}

pub fn map_entry(name: &str, key: FieldDescriptorProto, value: FieldDescriptorProto) -> DescriptorProto {
    DescriptorProto {
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..message(name, vec![key, value])
    }
}

pub fn file(name: &str, package: &str, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.into()),
        package: Some(package.into()),
        message_type: messages,
        syntax: Some("proto3".into()),
        ..Default::default()
    }
}
