#![allow(clippy::unwrap_used, clippy::float_cmp)]

use super::*;
use crate::testing::{raised, Harness};
use pretty_assertions::assert_eq;
use sam_diagnostic::ConditionName;

#[test]
fn run_executes_lines_in_order_and_skips_gaps() {
    let mut h = Harness::new();
    h.program(&[(20, "PRINT \"b\""), (10, "PRINT \"a\""), (40, "PRINT \"c\"")]);
    h.exec("RUN").unwrap();
    assert_eq!(h.take_output(), "a\nb\nc\n");
}

#[test]
fn run_on_an_empty_program_does_nothing() {
    let mut h = Harness::new();
    h.exec("RUN").unwrap();
    assert_eq!(h.take_output(), "");
}

#[test]
fn goto_redirects_the_run_loop() {
    let mut h = Harness::new();
    h.program(&[
        (1, "PRINT \"one\""),
        (2, "GOTO 4"),
        (3, "PRINT \"skipped\""),
        (4, "PRINT \"four\""),
    ]);
    h.exec("RUN").unwrap();
    assert_eq!(h.take_output(), "one\nfour\n");
}

#[test]
fn goto_sets_cursor_to_line_before_target() {
    let mut h = Harness::new();
    let mut cursor = Cursor::at(7);
    h.interp.exec_goto(" 12 ", &mut cursor).unwrap();
    assert_eq!(cursor.line(), 11);
}

#[test]
fn goto_rejects_bad_targets() {
    let mut h = Harness::new();
    for target in ["GOTO x", "GOTO 1.5", "GOTO -3", "GOTO"] {
        let condition = raised(h.exec(target)).unwrap();
        assert_eq!(condition.name, ConditionName::SyntaxError, "{target}");
    }
}

#[test]
fn goto_inside_while_redirects_the_enclosing_run() {
    let mut h = Harness::new();
    // FORK both moves the parent cursor and sets $CHILD, which ends the loop.
    h.program(&[
        (0, "SPR $(CHILD) none"),
        (1, "WHILE ($(CHILD) == none) FORK 100 5 $CHILD"),
        (2, "PRINT \"not reached\""),
        (5, "PRINT \"jumped\""),
    ]);
    h.exec("RUN").unwrap();
    h.interp.branches().join_all();
    assert_eq!(h.take_output(), "jumped\n");
}

#[test]
fn nested_statements_share_the_cursor() {
    let mut h = Harness::new();
    h.exec("LET ?t BE TRUE").unwrap();
    let mut cursor = Cursor::at(1);
    h.interp
        .dispatch("IF (1 = 1) IF ?t GOTO 9", &mut cursor)
        .unwrap();
    assert_eq!(cursor.line(), 8);

    h.interp.dispatch("FOR 2 GOTO 4", &mut cursor).unwrap();
    assert_eq!(cursor.line(), 3);
}

#[test]
fn list_prints_stored_lines() {
    let mut h = Harness::new();
    h.program(&[(1, "REM a"), (3, "REM b"), (7, "REM c")]);

    h.exec("LIST").unwrap();
    assert_eq!(h.take_output(), "1 REM a\n3 REM b\n7 REM c\n");

    h.exec("LIST 3").unwrap();
    assert_eq!(h.take_output(), "3 REM b\n7 REM c\n");

    h.exec("LIST 1:7").unwrap();
    assert_eq!(h.take_output(), "1 REM a\n3 REM b\n");

    h.exec("LIST 2 : 2").unwrap();
    assert_eq!(h.take_output(), "");
}

#[test]
fn list_interval_errors() {
    let mut h = Harness::new();
    let condition = raised(h.exec("LIST 5:3")).unwrap();
    assert_eq!(condition.name, ConditionName::ListError);

    let condition = raised(h.exec("LIST a:b")).unwrap();
    assert_eq!(condition.name, ConditionName::SyntaxError);
}

#[test]
fn if_runs_statement_when_guard_holds() {
    let mut h = Harness::new();
    h.exec("IF (3 > 2) PRINT \"X\"").unwrap();
    assert_eq!(h.take_output(), "X\n");

    h.exec("IF NOT(3 > 2) PRINT \"X\"").unwrap();
    assert_eq!(h.take_output(), "");
}

#[test]
fn if_text_equality_uses_interpolated_text() {
    let mut h = Harness::new();
    h.exec("SPR $a hello").unwrap();
    h.exec("IF ($a == \"hello\") PRINT \"same\"").unwrap();
    h.exec("IF ($a == hell) PRINT \"prefix\"").unwrap();
    assert_eq!(h.take_output(), "same\n");
}

#[test]
fn if_numeric_operators() {
    let mut h = Harness::new();
    h.exec("LET #x BE 4").unwrap();
    for (guard, expected) in [
        ("(#x = 4)", "y"),
        ("(#x >= 4)", "y"),
        ("(#x <= 3)", ""),
        ("(#x < 5)", "y"),
        ("(#x > 2 * 2)", ""),
        ("(SQRT(#x) = 2)", "y"),
    ] {
        h.exec(&format!("IF {guard} WRITE y")).unwrap();
        assert_eq!(h.take_output(), expected, "{guard}");
    }
}

#[test]
fn if_flag_guards() {
    let mut h = Harness::new();
    h.exec("LET ?on BE TRUE").unwrap();
    h.exec("IF ?on WRITE a").unwrap();
    h.exec("IF NOT ?on WRITE b").unwrap();
    assert_eq!(h.take_output(), "a");

    let condition = raised(h.exec("IF ?missing WRITE c")).unwrap();
    assert_eq!(condition.name, ConditionName::Undefined);
}

#[test]
fn malformed_if_is_a_syntax_error() {
    let mut h = Harness::new();
    let condition = raised(h.exec("IF 3 > 2 PRINT x")).unwrap();
    assert_eq!(condition.name, ConditionName::SyntaxError);
}

#[test]
fn while_reevaluates_its_guard() {
    let mut h = Harness::new();
    h.exec("LET #i BE 0").unwrap();
    h.exec("WHILE (#i < 3) LET #i BE #i + 1").unwrap();
    assert_eq!(h.interp.env().get_num("i"), Some(3.0));
}

#[test]
fn while_propagates_body_failures() {
    let mut h = Harness::new();
    h.exec("LET ?go BE TRUE").unwrap();
    let condition = raised(h.exec("WHILE ?go FIRE STOP")).unwrap();
    assert_eq!(condition.name, ConditionName::User("STOP".into()));
}

#[test]
fn for_counts_and_leaves_new_variable_at_last_value() {
    let mut h = Harness::new();
    h.exec("FOR #i 0, 5 WRITE #i").unwrap();
    assert_eq!(h.take_output(), "01234");
    assert_eq!(h.interp.env().get_num("i"), Some(4.0));
}

#[test]
fn for_restores_existing_variable() {
    let mut h = Harness::new();
    h.exec("LET #i BE 42").unwrap();
    h.exec("FOR #i 0, 5 WRITE #i").unwrap();
    assert_eq!(h.take_output(), "01234");
    assert_eq!(h.interp.env().get_num("i"), Some(42.0));
}

#[test]
fn for_defaults_start_to_zero_and_needs_no_variable() {
    let mut h = Harness::new();
    h.exec("FOR 3 WRITE x").unwrap();
    assert_eq!(h.take_output(), "xxx");

    h.exec("LET #n BE 2").unwrap();
    h.exec("FOR #k #n, #n+2 WRITE #k").unwrap();
    assert_eq!(h.take_output(), "23");
}

#[test]
fn for_body_may_contain_commas() {
    let mut h = Harness::new();
    h.exec("FOR #i 2 PRINT \"a, b\"").unwrap();
    assert_eq!(h.take_output(), "a, b\na, b\n");
}

#[test]
fn for_range_too_wide_to_count_is_a_syntax_error() {
    let mut h = Harness::new();
    let condition = raised(h.exec("FOR #i 0,10**300 WRITE x")).unwrap();
    assert_eq!(condition.name, ConditionName::SyntaxError);
    let condition = raised(h.exec("FOR 2**53 WRITE x")).unwrap();
    assert_eq!(condition.name, ConditionName::SyntaxError);
    assert_eq!(h.take_output(), "");
    assert_eq!(h.interp.env().get_num("i"), None);
}

#[test]
fn for_terminates_where_adding_one_rounds_away() {
    let mut h = Harness::new();
    h.exec("FOR 2**53, 2**53+2 WRITE x").unwrap();
    assert_eq!(h.take_output(), "xx");
}

#[test]
fn for_without_statement_gap_is_a_syntax_error() {
    let mut h = Harness::new();
    let condition = raised(h.exec("FOR 3")).unwrap();
    assert_eq!(condition.name, ConditionName::SyntaxError);
}

#[test]
fn exit_unwinds_with_status() {
    let mut h = Harness::new();
    assert!(matches!(h.exec("EXIT 3"), Err(Signal::Exit(3))));

    h.exec("LET #c BE 7").unwrap();
    assert!(matches!(h.exec("EXIT #c"), Err(Signal::Exit(7))));

    let condition = raised(h.exec("EXIT soon")).unwrap();
    assert_eq!(condition.name, ConditionName::SyntaxError);
}

#[test]
fn bounds_splitting() {
    assert_eq!(
        split_for_bounds("0, 5 PRINT x"),
        Some((Some("0"), " 5", "PRINT x"))
    );
    assert_eq!(split_for_bounds("5 PRINT x"), Some((None, "5", "PRINT x")));
    assert_eq!(split_for_bounds("3 "), Some((None, "3", "")));
    assert_eq!(split_for_bounds("3"), None);
}
