//! Sandboxed numeric expressions for `LET`, `IF`, `WHILE`, `FOR` and the
//! terminal statements.
//!
//! Expression text usually comes out of interpolation and may therefore
//! contain user data. The grammar is closed: numbers, arithmetic and
//! comparison operators, parentheses, and the six functions in
//! [`Builtin`]. Nothing else parses, so there is no way to name a variable,
//! assign, or call into the host.
//!
//! ```text
//! expr       := comparison
//! comparison := additive (("<" | ">" | "<=" | ">=" | "==" | "!=") additive)*
//! additive   := term (("+" | "-") term)*
//! term       := unary (("*" | "/" | "//" | "%") unary)*
//! unary      := ("-" | "+") unary | power
//! power      := primary ("**" unary)?
//! primary    := NUMBER | IDENT "(" args ")" | "(" expr ")"
//! ```

mod ast;
mod error;
mod eval;
mod function;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{ExprError, ExprErrorKind, ExprResult};
pub use function::Builtin;
pub use lexer::{lex, Token, TokenKind};
pub use parser::parse;

use rand::Rng;

/// Parse and evaluate `source` using the thread-local random generator.
pub fn evaluate(source: &str) -> ExprResult {
    evaluate_with_rng(source, &mut rand::thread_rng())
}

/// Parse and evaluate `source`, drawing `RAND` values from `rng`.
pub fn evaluate_with_rng<R: Rng + ?Sized>(source: &str, rng: &mut R) -> ExprResult {
    tracing::trace!(source, "evaluating expression");
    let expr = parse(source)?;
    eval::eval(&expr, rng)
}
