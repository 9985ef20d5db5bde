#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn opening_is_deferred_until_bind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let handle = StreamHandle::new(&path);
    assert!(!path.exists());
    assert_eq!(handle.mode(), None);

    handle.bind(Mode::Write).unwrap();
    assert!(path.exists());
    assert_eq!(handle.mode(), Some(Mode::Write));
}

#[test]
fn write_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");

    let out = StreamHandle::new(&path);
    out.bind(Mode::Write).unwrap();
    out.write_str("first\nsecond\r\nthird").unwrap();
    out.close().unwrap();

    let input = StreamHandle::new(&path);
    input.bind(Mode::Read).unwrap();
    assert_eq!(input.read_line().unwrap().as_deref(), Some("first"));
    assert_eq!(input.read_line().unwrap().as_deref(), Some("second"));
    assert_eq!(input.read_line().unwrap().as_deref(), Some("third"));
    assert_eq!(input.read_line().unwrap(), None);
}

#[test]
fn append_keeps_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    fs::write(&path, "a\n").unwrap();

    let handle = StreamHandle::new(&path);
    handle.bind(Mode::Append).unwrap();
    handle.write_str("b\n").unwrap();
    handle.close().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
}

#[test]
fn rebinding_in_the_same_mode_is_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let handle = StreamHandle::new(dir.path().join("x"));
    handle.bind(Mode::Write).unwrap();
    handle.write_str("one").unwrap();
    handle.bind(Mode::Write).unwrap();
    handle.write_str(" two").unwrap();
    handle.close().unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("x")).unwrap(), "one two");
}

#[test]
fn rebinding_in_another_mode_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let handle = StreamHandle::new(dir.path().join("x"));
    handle.bind(Mode::Write).unwrap();
    assert!(matches!(
        handle.bind(Mode::Read),
        Err(StreamError::ModeConflict {
            bound: Mode::Write,
            requested: Mode::Read
        })
    ));
}

#[test]
fn missing_file_fails_to_open_for_reading() {
    let dir = tempfile::tempdir().unwrap();
    let handle = StreamHandle::new(dir.path().join("missing"));
    assert!(matches!(handle.bind(Mode::Read), Err(StreamError::Open(_))));
}

#[test]
fn clones_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let handle = StreamHandle::new(dir.path().join("x"));
    let clone = handle.clone();
    handle.bind(Mode::Append).unwrap();
    assert_eq!(clone.mode(), Some(Mode::Append));
    assert!(clone.same_stream(&handle));
    assert!(!StreamHandle::new(dir.path().join("x")).same_stream(&handle));
}

#[test]
fn closed_handle_rejects_writes() {
    let dir = tempfile::tempdir().unwrap();
    let handle = StreamHandle::new(dir.path().join("x"));
    handle.bind(Mode::Write).unwrap();
    handle.close().unwrap();
    assert!(handle.write_str("late").is_err());
}

#[test]
fn line_input_pops_in_order() {
    let input = Input::lines("one\ntwo\n");
    assert_eq!(input.read_line().unwrap().as_deref(), Some("one"));
    assert_eq!(input.read_line().unwrap().as_deref(), Some("two"));
    assert_eq!(input.read_line().unwrap(), None);
    assert_eq!(input.source_name(), "<stdin>");
}

#[test]
fn stream_input_reports_its_path() {
    let handle = StreamHandle::new("names.txt");
    let input = Input::Stream(handle.clone());
    assert_eq!(input.source_name(), "names.txt");
    assert!(input.is_stream(&handle));
    assert!(!Input::Stdin.is_stream(&handle));
}
