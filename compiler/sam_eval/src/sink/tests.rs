#![allow(clippy::unwrap_used)]

use super::*;
use crate::streams::Mode;
use pretty_assertions::assert_eq;

#[test]
fn buffer_captures_lines_and_fragments() {
    let (sink, buffer) = Sink::buffer();
    sink.write_str("a").unwrap();
    sink.write_line("b").unwrap();
    sink.write_line("").unwrap();
    assert_eq!(buffer.contents(), "ab\n\n");
}

#[test]
fn buffer_clones_share_text() {
    let (sink, buffer) = Sink::buffer();
    let copy = sink.clone();
    copy.write_str("shared").unwrap();
    assert_eq!(buffer.take(), "shared");
    assert_eq!(buffer.contents(), "");
}

#[test]
fn silent_discards() {
    Sink::Silent.write_line("nothing").unwrap();
    Sink::Silent.flush().unwrap();
}

#[test]
fn stream_sink_writes_through_the_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let handle = StreamHandle::new(&path);
    handle.bind(Mode::Write).unwrap();

    let sink = Sink::Stream(handle.clone());
    sink.write_line("hello").unwrap();
    sink.flush().unwrap();
    assert!(sink.is_stream(&handle));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
}

#[test]
fn unbound_stream_sink_fails() {
    let sink = Sink::Stream(StreamHandle::new("never-opened"));
    assert!(sink.write_str("x").is_err());
}
