#![allow(non_snake_case)]

use super::*;
use crate::test_fixtures::*;

#[test]
fn respond___valid_request___files_and_zero_status() {
    let req = request(vec![table_file("a.proto", "M")], &["a.proto"], None);

    let (response, code) = respond(&req.encode_to_vec(), Some("off"));

    assert_eq!(code, 0);
    assert!(response.error.is_none());
    let names: Vec<_> = response.file.iter().filter_map(|f| f.name.as_deref()).collect();
    assert_eq!(names, vec!["a.proto.hpp", "a.proto.cpp", "a.proto.desc"]);
}

#[test]
fn respond___parameter_string___configures_generator() {
    let req = request(
        vec![table_file("a.proto", "M")],
        &["a.proto"],
        Some("header_suffix=.h,source_suffix=.cc"),
    );

    let (response, _) = respond(&req.encode_to_vec(), Some("off"));

    assert_eq!(response.file[0].name.as_deref(), Some("a.proto.h"));
    assert_eq!(response.file[1].name.as_deref(), Some("a.proto.cc"));
}

#[test]
fn respond___empty_request___error_response_with_code() {
    let req = request(vec![table_file("a.proto", "M")], &[], None);

    let (response, code) = respond(&req.encode_to_vec(), Some("off"));

    assert_eq!(code, 4);
    assert_eq!(response.error.as_deref(), Some("no files to generate"));
    assert!(response.file.is_empty());
}

#[test]
fn respond___bad_parameter___config_error() {
    let req = request(vec![table_file("a.proto", "M")], &["a.proto"], Some("colour=blue"));

    let (response, code) = respond(&req.encode_to_vec(), Some("off"));

    assert_eq!(code, 9);
    assert!(response.error.is_some());
}

#[test]
fn respond___undecodable_input___decode_error() {
    let (response, code) = respond(&[0x0a, 0xff], Some("off"));

    assert_eq!(code, 8);
    assert!(response.error.unwrap().starts_with("decode error"));
}

#[test]
fn respond___file_without_tables___success_without_files() {
    let req = request(vec![plain_file("plain.proto")], &["plain.proto"], None);

    let (response, code) = respond(&req.encode_to_vec(), Some("off"));

    assert_eq!(code, 0);
    assert!(response.file.is_empty());
}
