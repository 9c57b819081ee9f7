//! Parsing integration tests
//!
//! Covers the line rule, batch abort on malformed input, platform-suffix
//! collapsing, encoding fallback and file loading.

use std::io::Write;

use proptree::parse::{ParseError, Parser};
use proptree::{Map, parse};

use crate::helpers::assert_key_order;

// ===== LINE RULE =====

#[test]
fn test_parse_lines_basic() {
    let map = parse::parse_lines([
        "yun.vid.0=0x2341",
        "yun.pid.0=0x0041",
        "yun.upload.tool=avrdude",
        "yun.upload.speed=57600",
    ])
    .expect("parse");

    assert_eq!(map.len(), 4);
    assert_eq!(map.get("yun.upload.speed"), Some("57600"));
    assert_key_order(
        &map,
        &["yun.vid.0", "yun.pid.0", "yun.upload.tool", "yun.upload.speed"],
    );
}

#[test]
fn test_parse_lines_skips_comments_and_blanks() {
    let map = parse::parse_lines([
        "",
        "# a comment",
        "   ",
        "key=value",
        "  # indented comment",
    ])
    .expect("parse");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("key"), Some("value"));
}

#[test]
fn test_parse_lines_trims_key_and_value_and_keeps_inner_equals() {
    let map = parse::parse_lines(["  key  =  value = 1  "]).expect("parse");

    assert_eq!(map.get("key"), Some("value = 1"));
}

#[test]
fn test_parse_lines_duplicate_key_overwrites_and_advances() {
    let map = parse::parse_lines(["k1=a", "k2=b", "k1=c"]).expect("parse");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("k1"), Some("c"));
    assert_key_order(&map, &["k2", "k1"]);
}

#[test]
fn test_parse_lines_malformed_line_aborts_batch() {
    let err = parse::parse_lines(["yun.vid.0=0x2341", "yun.pid.1", "yun.upload.tool=avrdude"])
        .expect_err("line 1 has no '='");

    assert_eq!(err, ParseError::MalformedLine { line: 1 });
    assert!(err.is_malformed_line());
    assert_eq!(err.line(), Some(1));
}

// ===== PLATFORM SUFFIX =====

#[test]
fn test_platform_suffix_collapses_matching_keys() {
    let parser = Parser::new().with_platform_suffix("macosx");
    let map = parser
        .parse_lines([
            "which.os.macosx=is macosx",
            "which.os.windows=is windows",
        ])
        .expect("parse");

    assert_eq!(map.get("which.os"), Some("is macosx"));
    assert_eq!(map.get("which.os.windows"), Some("is windows"));
    assert!(!map.contains_key("which.os.macosx"));
}

#[test]
fn test_platform_suffix_defaults_to_current_platform() {
    let parser = Parser::new();
    let expected = match std::env::consts::OS {
        "macos" => "macosx".to_string(),
        os => os.to_string(),
    };
    assert_eq!(parser.platform_suffix(), expected);

    let line = format!("which.os.{}=found", parser.platform_suffix());
    let map = parser.parse_lines([line]).expect("parse");
    assert_eq!(map.get("which.os"), Some("found"));
}

// ===== BYTES AND ENCODINGS =====

#[test]
fn test_parse_bytes_normalizes_line_endings() {
    let map = parse::parse_bytes(b"k1=a\r\nk2=b\rk3=c\n").expect("parse");

    assert_eq!(map.len(), 3);
    assert_key_order(&map, &["k1", "k2", "k3"]);
}

#[test]
fn test_parse_bytes_falls_back_to_latin1() {
    // "maintainer=Aáa" in ISO-8859-1: 0xE1 is not valid UTF-8
    let map = parse::parse_bytes(b"maintainer=A\xE1a").expect("parse");

    assert_eq!(map.get("maintainer"), Some("Aáa"));
}

#[test]
fn test_parse_bytes_accepts_utf8() {
    let map = parse::parse_bytes("maintainer=Aáa".as_bytes()).expect("parse");

    assert_eq!(map.get("maintainer"), Some("Aáa"));
}

// ===== FILES =====

#[test]
fn test_load_reads_a_properties_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "# device definitions").expect("write");
    writeln!(file, "uno.name=Device Uno").expect("write");
    writeln!(file, "uno.upload.speed=115200").expect("write");
    file.flush().expect("flush");

    let map = parse::load(file.path()).expect("load");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("uno.name"), Some("Device Uno"));
    assert_eq!(map.get("uno.upload.speed"), Some("115200"));
}

#[test]
fn test_load_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = parse::load(dir.path().join("nope.properties")).expect_err("missing file");

    assert!(err.is_io_error());
    assert_eq!(err.module(), "io");
}

#[test]
fn test_load_malformed_file_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "valid=line").expect("write");
    writeln!(file, "broken line").expect("write");
    file.flush().expect("flush");

    let err = parse::load(file.path()).expect_err("malformed file");
    assert!(err.is_malformed_line());
    assert_eq!(err.module(), "parse");
}

#[test]
fn test_safe_load_missing_file_yields_empty_map() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let map = parse::safe_load(dir.path().join("nope.properties")).expect("safe load");

    assert!(map.is_empty());
    assert_eq!(map, Map::new());
}
