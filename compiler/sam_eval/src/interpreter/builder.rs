//! `InterpreterBuilder` for creating interpreters with custom I/O.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::branch::BranchRegistry;
use crate::environment::Environment;
use crate::program::ProgramStore;
use crate::sink::Sink;
use crate::streams::Input;

/// Builder for [`Interpreter`].
///
/// Defaults: standard input, standard output for both the program and the
/// console, a private interrupt flag and an empty branch registry.
#[derive(Default)]
pub struct InterpreterBuilder {
    input: Option<Input>,
    output: Option<Sink>,
    console: Option<Sink>,
    interrupt: Option<Arc<AtomicBool>>,
    branches: Option<BranchRegistry>,
    env: Option<Environment>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The input `READ` uses and `SOURCE STDIN` restores.
    #[must_use]
    pub fn input(mut self, input: Input) -> Self {
        self.input = Some(input);
        self
    }

    /// The output statements write to and `OUTPUT STDOUT` restores.
    #[must_use]
    pub fn output(mut self, output: Sink) -> Self {
        self.output = Some(output);
        self
    }

    /// Where diagnostics for unhandled conditions go.
    #[must_use]
    pub fn console(mut self, console: Sink) -> Self {
        self.console = Some(console);
        self
    }

    /// Flag set by the host's interrupt handler.
    #[must_use]
    pub fn interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    #[must_use]
    pub fn branches(mut self, branches: BranchRegistry) -> Self {
        self.branches = Some(branches);
        self
    }

    /// Start from existing variable bindings.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Interpreter {
        let input = self.input.unwrap_or(Input::Stdin);
        let output = self.output.unwrap_or(Sink::Stdout);
        Interpreter {
            program: Arc::new(ProgramStore::new()),
            env: self.env.unwrap_or_default(),
            handlers: FxHashMap::default(),
            default_input: input.clone(),
            input,
            default_output: output.clone(),
            output,
            console: self.console.unwrap_or(Sink::Stdout),
            interrupt: self.interrupt.unwrap_or_default(),
            branches: self.branches.unwrap_or_default(),
        }
    }
}
