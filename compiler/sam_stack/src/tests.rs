use super::*;

#[test]
fn nested_clauses_do_not_overflow() {
    // One frame per nested IF clause in a pathological line.
    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    assert_eq!(nest(200_000), 200_000);
}

#[test]
fn passes_through_results() {
    let ok: Result<u8, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(ok, Ok(7));

    let err: Result<u8, &str> = ensure_sufficient_stack(|| Err("raised"));
    assert_eq!(err, Err("raised"));
}
