use super::*;
use pretty_assertions::assert_eq;

fn program() -> ProgramStore {
    let mut program = ProgramStore::new();
    program.define(10, "PRINT \"ten\"");
    program.define(2, "PRINT \"two\"");
    program.define(5, "REM five");
    program
}

#[test]
fn lookup_and_end() {
    let program = program();
    assert_eq!(program.get(2), Some("PRINT \"two\""));
    assert_eq!(program.get(3), None);
    assert_eq!(program.end(), 11);
    assert_eq!(ProgramStore::new().end(), 0);
    assert!(ProgramStore::new().is_empty());
}

#[test]
fn redefinition_overwrites() {
    let mut program = program();
    program.define(5, "REM again");
    assert_eq!(program.get(5), Some("REM again"));
}

#[test]
fn next_line_skips_gaps() {
    let program = program();
    assert_eq!(program.next_line(0), Some((2, "PRINT \"two\"")));
    assert_eq!(program.next_line(3), Some((5, "REM five")));
    assert_eq!(program.next_line(5), Some((5, "REM five")));
    assert_eq!(program.next_line(11), None);
}

#[test]
fn ranges_are_half_open() {
    let program = program();
    let numbers: Vec<usize> = program.range(0, None).map(|(n, _)| n).collect();
    assert_eq!(numbers, vec![2, 5, 10]);

    let numbers: Vec<usize> = program.range(3, Some(10)).map(|(n, _)| n).collect();
    assert_eq!(numbers, vec![5]);

    assert_eq!(program.range(5, Some(5)).count(), 0);
}
