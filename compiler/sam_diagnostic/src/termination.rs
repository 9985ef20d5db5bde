//! Terminating actions for conditions nobody handled.

use crate::{Condition, ConditionName};

/// Exit status for a clean termination (interrupts, unknown conditions).
pub const EXIT_OK: i32 = 0;

/// Exit status after an unhandled built-in condition.
pub const EXIT_UNHANDLED: i32 = 1;

/// Exit status after an internal interpreter failure.
pub const EXIT_FATAL: i32 = -1;

/// Process termination requested by an unhandled condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Termination {
    /// Diagnostic line for the console, if the action prints one.
    pub message: Option<String>,
    pub status: i32,
}

impl Termination {
    fn with_message(message: String, status: i32) -> Self {
        Termination {
            message: Some(message),
            status,
        }
    }

    fn silent(status: i32) -> Self {
        Termination {
            message: None,
            status,
        }
    }
}

/// The fixed action of a built-in condition, or `None` for user conditions.
pub fn builtin_termination(condition: &Condition) -> Option<Termination> {
    let line = condition.line;
    let termination = match &condition.name {
        ConditionName::SyntaxError => Termination::with_message(
            format!("SYNTAX ERROR ON LINE {line} [SYNTAXERROR]"),
            EXIT_UNHANDLED,
        ),
        ConditionName::Eof => {
            let source = condition.source.as_deref().unwrap_or("<stdin>");
            Termination::with_message(
                format!("UNHANDLED END OF FILE ON LINE {line} FROM FILE {source} [EOF]"),
                EXIT_UNHANDLED,
            )
        }
        ConditionName::NoMatch => Termination::with_message(
            format!("COULD NOT EXPLODE STRING ON LINE {line} [NOMATCH]"),
            EXIT_UNHANDLED,
        ),
        ConditionName::ListError => Termination::with_message(
            format!("INVALID LIST STATEMENT INTERVAL ON LINE {line} [LISTERROR]"),
            EXIT_UNHANDLED,
        ),
        ConditionName::Undefined => Termination::with_message(
            format!("REFERENCE TO UNDEFINED VARIABLE ON LINE {line} [UNDEFINED]"),
            EXIT_UNHANDLED,
        ),
        ConditionName::CtrlC => Termination::silent(EXIT_OK),
        ConditionName::Fail => Termination::with_message(
            format!("COMMAND ON LINE {line} EXITED WITH NON-ZERO STATUS CODE [FAIL]"),
            EXIT_UNHANDLED,
        ),
        ConditionName::User(_) => return None,
    };
    Some(termination)
}

/// Fallback for a condition with neither a handler nor a built-in action.
pub fn unhandled(condition: &Condition) -> Termination {
    Termination::with_message(unhandled_message(condition), EXIT_OK)
}

/// A user handler itself failed; handlers are never re-handled.
pub fn handler_failed(condition: &Condition) -> Termination {
    Termination::with_message(unhandled_message(condition), EXIT_UNHANDLED)
}

fn unhandled_message(condition: &Condition) -> String {
    format!("UNHANDLED {} ON LINE {}", condition.name, condition.line)
}
