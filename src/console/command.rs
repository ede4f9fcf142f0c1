use thiserror::Error;

use crate::console::output::Output;

/// Errors produced while resolving or running a command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command \"{0}\" is not defined.")]
    UnknownCommand(String),
    #[error("Command '{name}' failed: {message}")]
    Failed { name: String, message: String },
}

/// A named console command.
///
/// Implementations carry their own business logic in [`Command::run`] and
/// write user-visible text to the provided [`Output`] rather than stdout, so
/// the caller decides whether the text reaches the terminal or a capture
/// buffer.
pub trait Command {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Execute the command body.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Failed` when the body cannot complete.
    fn run(&self, args: &[String], output: &mut dyn Output) -> Result<(), CommandError>;
}
