//! Parsed expression tree.

use std::mem;

use crate::Builtin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Unary(UnaryOp, Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        function: Builtin,
        args: Vec<Expr>,
    },
}

/// Children are moved onto a worklist so a long operator chain does not
/// drop recursively.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr, &mut pending);
        }
    }
}

fn detach_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    let leaf = || Expr::Number(0.0);
    match expr {
        Expr::Number(_) => {}
        Expr::Unary(_, operand) => pending.push(mem::replace(&mut **operand, leaf())),
        Expr::Binary { left, right, .. } => {
            pending.push(mem::replace(&mut **left, leaf()));
            pending.push(mem::replace(&mut **right, leaf()));
        }
        Expr::Call { args, .. } => pending.append(args),
    }
}
