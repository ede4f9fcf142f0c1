//! The two-phase command execution lifecycle.
//!
//! Every invocation passes through two notification points: [`PreRun`] fires
//! immediately before a resolved command would execute, [`PostRun`] fires
//! immediately after its execution phase finishes. A [`CommandListener`]
//! observes both and can suppress the normal execution of a pending command
//! via [`PreRun::disable`]; the post notification fires regardless, so a
//! listener that took over execution still gets its completion hook.

use crate::console::app::Console;
use crate::console::command::CommandError;
use crate::console::output::Output;

/// Notification fired before a resolved command executes.
pub struct PreRun<'a> {
    pub console: &'a Console,
    pub command: &'a str,
    pub args: &'a [String],
    pub output: &'a mut dyn Output,
    disabled: bool,
}

impl<'a> PreRun<'a> {
    #[must_use]
    pub fn new(
        console: &'a Console,
        command: &'a str,
        args: &'a [String],
        output: &'a mut dyn Output,
    ) -> Self {
        PreRun {
            console,
            command,
            args,
            output,
            disabled: false,
        }
    }

    /// Suppress normal execution of the pending command. The invocation is
    /// considered already handled by the listener that called this.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Notification fired after a command's execution phase finishes.
pub struct PostRun<'a> {
    pub console: &'a Console,
    pub command: &'a str,
    pub output: &'a mut dyn Output,
}

impl<'a> PostRun<'a> {
    #[must_use]
    pub fn new(console: &'a Console, command: &'a str, output: &'a mut dyn Output) -> Self {
        PostRun {
            console,
            command,
            output,
        }
    }
}

/// Observer of the command lifecycle.
pub trait CommandListener {
    fn before_command(&mut self, event: &mut PreRun<'_>);
    fn after_command(&mut self, event: &mut PostRun<'_>);
}

/// Drive one top-level command through the full lifecycle.
///
/// Fires every listener's pre hook, runs the command unless a listener
/// disabled it, then fires every listener's post hook.
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if the name does not resolve, or
/// the command body's own error. A disabled command yields `Ok(())`.
pub fn dispatch(
    console: &Console,
    listeners: &mut [&mut dyn CommandListener],
    command: &str,
    args: &[String],
    output: &mut dyn Output,
) -> Result<(), CommandError> {
    let disabled = {
        let mut event = PreRun::new(console, command, args, &mut *output);
        for listener in listeners.iter_mut() {
            listener.before_command(&mut event);
        }
        event.is_disabled()
    };

    let result = if disabled {
        Ok(())
    } else {
        console.run(command, args, &mut *output)
    };

    let mut event = PostRun::new(console, command, &mut *output);
    for listener in listeners.iter_mut() {
        listener.after_command(&mut event);
    }

    result
}
