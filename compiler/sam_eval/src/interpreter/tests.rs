#![allow(clippy::unwrap_used)]

use std::sync::atomic::Ordering;

use super::*;
use crate::testing::{raised, Harness};
use pretty_assertions::assert_eq;

#[test]
fn keywords_are_split_from_arguments() {
    assert_eq!(split_statement("PRINT  hi"), Some(("PRINT", "hi")));
    assert_eq!(split_statement("CLEAR"), Some(("CLEAR", "")));
    assert_eq!(split_statement("LET#x BE 1"), Some(("LET", "#x BE 1")));
    assert_eq!(split_statement("\"quoted\""), None);
    assert_eq!(Keyword::from_word("FORK"), Some(Keyword::Fork));
    assert_eq!(Keyword::from_word("print"), None);
}

#[test]
fn blank_statements_do_nothing() {
    let mut h = Harness::new();
    h.exec("").unwrap();
    h.exec("   ").unwrap();
    h.exec("REM anything at all $undefined").unwrap();
    assert_eq!(h.take_output(), "");
}

#[test]
fn unknown_keywords_are_syntax_errors() {
    let mut h = Harness::new();
    for statement in ["GOSUB 10", "print \"x\"", " PRINT x", "#x"] {
        let condition = raised(h.exec(statement)).unwrap();
        assert_eq!(condition.name, ConditionName::SyntaxError, "{statement}");
    }
}

#[test]
fn interrupt_raises_ctrlc_once() {
    let mut h = Harness::new();
    h.interp.interrupt.store(true, Ordering::SeqCst);
    let condition = raised(h.exec("PRINT x")).unwrap();
    assert_eq!(condition.name, ConditionName::CtrlC);
    h.exec("PRINT y").unwrap();
    assert_eq!(h.take_output(), "y\n");
}

#[test]
fn unhandled_ctrlc_exits_silently() {
    let mut h = Harness::new();
    h.interp.interrupt.store(true, Ordering::SeqCst);
    let outcome = h.interp.execute_outermost("PRINT x");
    assert!(matches!(outcome, Outcome::Exit(0)));
    assert_eq!(h.console.contents(), "");
}

#[test]
fn pending_interrupt_at_the_prompt() {
    let mut h = Harness::new();
    assert!(matches!(h.interp.take_interrupt(), Outcome::Continue));

    h.interp.execute_outermost("ON CTRLC PRINT \"stopped\"");
    h.interp.interrupt().store(true, Ordering::SeqCst);
    assert!(matches!(h.interp.take_interrupt(), Outcome::Continue));
    assert_eq!(h.take_output(), "stopped\n");
    assert!(!h.interp.interrupt().load(Ordering::SeqCst));

    let mut h = Harness::new();
    h.interp.interrupt().store(true, Ordering::SeqCst);
    assert!(matches!(h.interp.take_interrupt(), Outcome::Exit(0)));
}

#[test]
fn handled_condition_continues() {
    let mut h = Harness::new();
    assert!(matches!(
        h.interp.execute_outermost("ON UNDEFINED PRINT \"caught\""),
        Outcome::Continue
    ));
    let outcome = h.interp.execute_outermost("PRINT #missing");
    assert!(matches!(outcome, Outcome::Continue));
    assert_eq!(h.take_output(), "caught\n");

    let outcome = h.interp.execute_outermost("PRINT \"next\"");
    assert!(matches!(outcome, Outcome::Continue));
    assert_eq!(h.take_output(), "next\n");
}

#[test]
fn builtin_diagnostics_go_to_the_console() {
    let mut h = Harness::new();
    let outcome = h.interp.execute_outermost("PRINT #missing");
    assert!(matches!(outcome, Outcome::Exit(1)));
    assert_eq!(
        h.console.take(),
        "REFERENCE TO UNDEFINED VARIABLE ON LINE -1 [UNDEFINED]\n"
    );
    assert_eq!(h.take_output(), "");

    h.program(&[(5, "LIST 5:3")]);
    let outcome = h.interp.execute_outermost("RUN");
    assert!(matches!(outcome, Outcome::Exit(1)));
    assert_eq!(
        h.console.take(),
        "INVALID LIST STATEMENT INTERVAL ON LINE 5 [LISTERROR]\n"
    );
}

#[test]
fn eof_diagnostic_names_the_source() {
    let mut h = Harness::new();
    let outcome = h.interp.execute_outermost("READ $x");
    assert!(matches!(outcome, Outcome::Exit(1)));
    assert_eq!(
        h.console.contents(),
        "UNHANDLED END OF FILE ON LINE -1 FROM FILE <stdin> [EOF]\n"
    );
}

#[test]
fn failing_handler_is_not_rehandled() {
    let mut h = Harness::new();
    h.interp.execute_outermost("ON OOPS PRINT #missing");
    h.interp.execute_outermost("ON UNDEFINED PRINT \"never\"");
    let outcome = h.interp.execute_outermost("FIRE OOPS");
    assert!(matches!(outcome, Outcome::Exit(1)));
    assert_eq!(h.console.contents(), "UNHANDLED UNDEFINED ON LINE -1\n");
    assert_eq!(h.take_output(), "");
}

#[test]
fn handler_can_exit() {
    let mut h = Harness::new();
    h.interp.execute_outermost("ON OOPS EXIT 4");
    assert!(matches!(
        h.interp.execute_outermost("FIRE OOPS"),
        Outcome::Exit(4)
    ));
}

#[test]
fn exit_status_passes_through() {
    let mut h = Harness::new();
    assert!(matches!(
        h.interp.execute_outermost("EXIT 12"),
        Outcome::Exit(12)
    ));
}

#[test]
fn fatal_errors_carry_a_dump() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("in.txt");
    let mut h = Harness::new();
    h.exec("LET #n BE 1").unwrap();
    h.exec(&format!("OPEN data AS {}", path.display())).unwrap();
    let Outcome::Fatal(report) = h.interp.execute_outermost("SOURCE data") else {
        panic!("expected a fatal outcome");
    };
    assert!(matches!(report.error, RuntimeError::Open { .. }));
    assert_eq!(report.dump, "#n:1\nOPEN data\n");
}

#[test]
fn define_line_does_not_disturb_clones() {
    let mut interp = Interpreter::new();
    interp.define_line(10, "PRINT a");
    let snapshot = interp.clone();
    interp.define_line(20, "PRINT b");
    assert_eq!(snapshot.program().range(0, None).count(), 1);
    assert_eq!(interp.program().range(0, None).count(), 2);
}
