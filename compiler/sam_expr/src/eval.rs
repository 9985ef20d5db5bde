//! Tree evaluation over `f64`.

use rand::Rng;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::{ExprError, ExprErrorKind, ExprResult};

/// Left-leaning operator chains are not bounded by the parser's nesting
/// limit, so the walk grows the stack as it goes.
pub(crate) fn eval<R: Rng + ?Sized>(expr: &Expr, rng: &mut R) -> ExprResult {
    sam_stack::ensure_sufficient_stack(|| eval_node(expr, rng))
}

fn eval_node<R: Rng + ?Sized>(expr: &Expr, rng: &mut R) -> ExprResult {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Unary(op, operand) => {
            let value = eval(operand, rng)?;
            Ok(match op {
                UnaryOp::Neg => -value,
                UnaryOp::Plus => value,
            })
        }
        Expr::Binary { op, left, right } => {
            let left = eval(left, rng)?;
            let right = eval(right, rng)?;
            evaluate_binary(*op, left, right)
        }
        Expr::Call { function, args } => {
            let values = args
                .iter()
                .map(|arg| eval(arg, rng))
                .collect::<Result<Vec<_>, _>>()?;
            function.apply(&values, rng)
        }
    }
}

/// Apply a binary operator. Comparisons produce `1` or `0`.
#[allow(clippy::float_cmp, reason = "language equality is exact")]
pub(crate) fn evaluate_binary(op: BinaryOp, left: f64, right: f64) -> ExprResult {
    let truth = |b: bool| if b { 1.0 } else { 0.0 };
    let value = match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => {
            check_divisor(right)?;
            left / right
        }
        BinaryOp::FloorDiv => {
            check_divisor(right)?;
            (left / right).floor()
        }
        // Result takes the sign of the divisor.
        BinaryOp::Mod => {
            check_divisor(right)?;
            left - right * (left / right).floor()
        }
        BinaryOp::Pow => left.powf(right),
        BinaryOp::Lt => truth(left < right),
        BinaryOp::Gt => truth(left > right),
        BinaryOp::LtEq => truth(left <= right),
        BinaryOp::GtEq => truth(left >= right),
        BinaryOp::Eq => truth(left == right),
        BinaryOp::NotEq => truth(left != right),
    };
    Ok(value)
}

fn check_divisor(divisor: f64) -> Result<(), ExprError> {
    if divisor == 0.0 {
        Err(ExprError::new(ExprErrorKind::DivisionByZero))
    } else {
        Ok(())
    }
}
