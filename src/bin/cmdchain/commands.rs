//! Demo commands shipped with the cmdchain binary.

use cmdchain::console::app::Console;
use cmdchain::console::command::{Command, CommandError};
use cmdchain::console::output::Output;

/// Prints a greeting from Foo.
struct FooHello;

impl Command for FooHello {
    fn name(&self) -> &str {
        "foo:hello"
    }

    fn description(&self) -> &str {
        "Prints a greeting from Foo"
    }

    fn run(&self, _args: &[String], output: &mut dyn Output) -> Result<(), CommandError> {
        output.write("Hello from Foo!");
        Ok(())
    }
}

/// Prints a greeting from Bar.
struct BarHi;

impl Command for BarHi {
    fn name(&self) -> &str {
        "bar:hi"
    }

    fn description(&self) -> &str {
        "Prints a greeting from Bar"
    }

    fn run(&self, _args: &[String], output: &mut dyn Output) -> Result<(), CommandError> {
        output.write("Hi from Bar!");
        Ok(())
    }
}

pub fn register_all(console: &mut Console) {
    console.register(Box::new(FooHello));
    console.register(Box::new(BarHi));
}
