#![allow(clippy::unwrap_used)]

use super::*;
use crate::testing::Gate;
use pretty_assertions::assert_eq;
use std::io::Cursor;

#[test]
fn reads_lines_in_order() {
    let reader = LineReader::spawn(Cursor::new("one\r\ntwo\n")).unwrap();
    assert_eq!(reader.read_line().unwrap().as_deref(), Some("one"));
    assert_eq!(reader.read_line().unwrap().as_deref(), Some("two"));
    assert_eq!(reader.read_line().unwrap(), None);
}

#[test]
fn interrupt_stops_a_blocked_read() {
    let (sender, source) = Gate::open();
    let reader = LineReader::spawn(source).unwrap();
    let interrupt = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&interrupt);
    let signaller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        flag.store(true, Ordering::SeqCst);
    });
    let err = reader.read_line_until(&interrupt).unwrap_err();
    signaller.join().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    assert!(interrupt.load(Ordering::SeqCst));

    // The abandoned request delivers its line to the next read.
    interrupt.store(false, Ordering::SeqCst);
    sender.send(b"late\n".to_vec()).unwrap();
    assert_eq!(
        reader.read_line_until(&interrupt).unwrap().as_deref(),
        Some("late")
    );
}

#[test]
fn clones_share_the_source() {
    let reader = LineReader::spawn(Cursor::new("a\nb\n")).unwrap();
    let other = reader.clone();
    assert_eq!(reader.read_line().unwrap().as_deref(), Some("a"));
    assert_eq!(other.read_line().unwrap().as_deref(), Some("b"));
}
