use log::debug;

use crate::console::command::{Command, CommandError};
use crate::console::output::Output;

/// The host application's command table.
///
/// Commands are looked up by name in registration order; the first
/// registration of a name wins.
#[derive(Default)]
pub struct Console {
    commands: Vec<Box<dyn Command>>,
}

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .map(AsRef::as_ref)
    }

    /// Resolve a command by name and execute its body with the given
    /// arguments and output target.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnknownCommand` if no command with that name is
    /// registered, or the body's own error if it fails.
    pub fn run(
        &self,
        name: &str,
        args: &[String],
        output: &mut dyn Output,
    ) -> Result<(), CommandError> {
        let command = self
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        debug!("Running command {name}");
        command.run(args, output)
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::output::BufferedOutput;

    struct Echo;

    impl Command for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn run(&self, args: &[String], output: &mut dyn Output) -> Result<(), CommandError> {
            output.write(&args.join(" "));
            Ok(())
        }
    }

    #[test]
    fn test_run_resolves_by_name() {
        let mut console = Console::new();
        console.register(Box::new(Echo));

        let mut output = BufferedOutput::new();
        console
            .run("echo", &["hello".to_string(), "world".to_string()], &mut output)
            .unwrap();
        assert_eq!(output.fetch(), "hello world");
    }

    #[test]
    fn test_run_unknown_command() {
        let console = Console::new();
        let mut output = BufferedOutput::new();
        let result = console.run("missing", &[], &mut output);
        match result.unwrap_err() {
            CommandError::UnknownCommand(name) => assert_eq!(name, "missing"),
            other => panic!("Expected UnknownCommand, got: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_command_message() {
        let err = CommandError::UnknownCommand("nope".to_string());
        assert_eq!(err.to_string(), "Command \"nope\" is not defined.");
    }
}
