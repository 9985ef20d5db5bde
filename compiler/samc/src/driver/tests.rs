#![allow(clippy::unwrap_used)]

use std::ops::ControlFlow;

use pretty_assertions::assert_eq;
use sam_eval::{Input, InterpreterBuilder, SharedBuffer, Sink};

use super::*;

fn driver() -> (Driver, SharedBuffer, SharedBuffer) {
    let (output_sink, output) = Sink::buffer();
    let (console_sink, console) = Sink::buffer();
    let interp = InterpreterBuilder::new()
        .input(Input::lines(""))
        .output(output_sink)
        .console(console_sink)
        .build();
    (Driver::new(interp), output, console)
}

#[test]
fn numbered_lines() {
    assert_eq!(split_numbered("10 PRINT x"), Some((10, "PRINT x")));
    assert_eq!(split_numbered("0\t\tREM"), Some((0, "REM")));
    assert_eq!(split_numbered("7  "), Some((7, "")));
    assert_eq!(split_numbered("7 "), None);
    assert_eq!(split_numbered("10"), None);
    assert_eq!(split_numbered("10PRINT"), None);
    assert_eq!(split_numbered("PRINT 10"), None);
    assert_eq!(split_numbered(" 10 PRINT"), None);
}

#[test]
fn numbered_lines_are_stored_not_run() {
    let (mut driver, output, _) = driver();
    assert_eq!(driver.feed_line("10 PRINT \"hi\"\r\n"), ControlFlow::Continue(()));
    assert_eq!(output.contents(), "");
    assert_eq!(driver.interpreter().program().get(10), Some("PRINT \"hi\""));

    assert_eq!(driver.feed_line("RUN\n"), ControlFlow::Continue(()));
    assert_eq!(output.contents(), "hi\n");
}

#[test]
fn later_definitions_replace_earlier_ones() {
    let (mut driver, output, _) = driver();
    let status = driver.run_source("10 PRINT a\n10 PRINT b\nRUN\n");
    assert_eq!(status, 0);
    assert_eq!(output.contents(), "b\n");
}

#[test]
fn blank_lines_are_ignored() {
    let (mut driver, _, console) = driver();
    assert_eq!(driver.feed_line("\n"), ControlFlow::Continue(()));
    assert_eq!(driver.feed_line("   \r\n"), ControlFlow::Continue(()));
    assert_eq!(console.contents(), "");
}

#[test]
fn unhandled_condition_stops_the_input() {
    let (mut driver, output, console) = driver();
    let status = driver.run_source("PRINT #nope\nPRINT \"unreached\"\n");
    assert_eq!(status, 1);
    assert_eq!(output.contents(), "");
    assert_eq!(
        console.contents(),
        "REFERENCE TO UNDEFINED VARIABLE ON LINE -1 [UNDEFINED]\n"
    );
}

#[test]
fn fatal_outcome_writes_a_crash_dump() {
    let dir = tempfile::tempdir().unwrap();
    let (driver, _, console) = driver();
    let mut driver = driver.crash_dir(dir.path());
    let missing = dir.path().join("nowhere").join("in.txt");
    let source = format!(
        "SPR $s kept\nOPEN data AS {}\nSOURCE data\nPRINT unreached\n",
        missing.display()
    );

    let status = driver.run_source(&source);
    assert_eq!(status, EXIT_FATAL);

    let message = console.contents();
    let file = message
        .strip_prefix("FATAL INTERPRETER ERROR - DETAILS IN ")
        .and_then(|rest| rest.strip_suffix('\n'))
        .unwrap();
    let log = fs::read_to_string(file).unwrap();
    assert!(log.ends_with("DATA DUMP:\n$s:kept\nOPEN data\n"), "{log}");
}

#[test]
fn missing_program_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (driver, _, console) = driver();
    let mut driver = driver.crash_dir(dir.path());
    let status = driver.run_file(&dir.path().join("absent.bas"));
    assert_eq!(status, EXIT_FATAL);
    assert!(console
        .contents()
        .starts_with("FATAL INTERPRETER ERROR - DETAILS IN "));
}
