//! The fixed function allowlist.

use rand::Rng;

use crate::{ExprError, ExprErrorKind, ExprResult};

/// A callable function. There is deliberately no way to add to this list at
/// runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    Sqrt,
    Cos,
    Sin,
    Tan,
    Pow,
    /// `RAND(stop)` or `RAND(start, stop)`: random integer in `[start, stop)`.
    Rand,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SQRT" => Some(Builtin::Sqrt),
            "COS" => Some(Builtin::Cos),
            "SIN" => Some(Builtin::Sin),
            "TAN" => Some(Builtin::Tan),
            "POW" => Some(Builtin::Pow),
            "RAND" => Some(Builtin::Rand),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Sqrt => "SQRT",
            Builtin::Cos => "COS",
            Builtin::Sin => "SIN",
            Builtin::Tan => "TAN",
            Builtin::Pow => "POW",
            Builtin::Rand => "RAND",
        }
    }

    pub fn apply<R: Rng + ?Sized>(self, args: &[f64], rng: &mut R) -> ExprResult {
        match (self, args) {
            (Builtin::Sqrt, &[x]) => Ok(x.sqrt()),
            (Builtin::Cos, &[x]) => Ok(x.cos()),
            (Builtin::Sin, &[x]) => Ok(x.sin()),
            (Builtin::Tan, &[x]) => Ok(x.tan()),
            (Builtin::Pow, &[base, exp]) => Ok(base.powf(exp)),
            (Builtin::Rand, &[stop]) => rand_range(0.0, stop, rng),
            (Builtin::Rand, &[start, stop]) => rand_range(start, stop, rng),
            (Builtin::Sqrt | Builtin::Cos | Builtin::Sin | Builtin::Tan, _) => {
                Err(self.arity_error("1", args.len()))
            }
            (Builtin::Pow, _) => Err(self.arity_error("2", args.len())),
            (Builtin::Rand, _) => Err(self.arity_error("1 or 2", args.len())),
        }
    }

    fn arity_error(self, expected: &'static str, got: usize) -> ExprError {
        ExprError::new(ExprErrorKind::ArityMismatch {
            function: self.name(),
            expected,
            got,
        })
    }
}

fn rand_range<R: Rng + ?Sized>(start: f64, stop: f64, rng: &mut R) -> ExprResult {
    let (lo, hi) = (start.trunc() as i64, stop.trunc() as i64);
    if lo >= hi {
        return Err(ExprError::new(ExprErrorKind::EmptyRange { start, stop }));
    }
    Ok(rng.gen_range(lo..hi) as f64)
}
