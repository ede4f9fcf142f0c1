//! Chain interception around the command lifecycle.
//!
//! The dispatcher sits on both lifecycle notification points. Before a
//! command executes it either rejects it (a member invoked directly), takes
//! it over (a master, whose own body the dispatcher runs against a capture
//! buffer), or stays out of the way. After a command finishes it drives the
//! configured chain members in order, relaying each member's captured output
//! to the real output stream.

use log::{info, warn};

use crate::chain::registry::ChainRegistry;
use crate::console::app::Console;
use crate::console::command::CommandError;
use crate::console::lifecycle::{CommandListener, PostRun, PreRun};
use crate::console::output::BufferedOutput;

/// Written to the real output when driving a chain fails partway.
const CHAIN_FAILURE_MESSAGE: &str = "Command chain members could not be loaded properly";

/// Outcome of driving a single chain member.
#[derive(Debug)]
pub struct MemberRun {
    pub name: String,
    pub outcome: Result<(), CommandError>,
}

/// Structured record of the most recent chain run.
///
/// `completed` is false when a member (or the master's own captured run)
/// failed; `runs` then ends with the failing member, and members after it
/// were never attempted.
#[derive(Debug)]
pub struct ChainReport {
    pub master: String,
    pub runs: Vec<MemberRun>,
    pub completed: bool,
}

/// Lifecycle listener implementing the chain semantics.
pub struct ChainDispatcher {
    registry: ChainRegistry,
    chain_executed: bool,
    rehearsal_failed: Option<String>,
    last_report: Option<ChainReport>,
}

impl ChainDispatcher {
    #[must_use]
    pub fn new(registry: ChainRegistry) -> Self {
        ChainDispatcher {
            registry,
            chain_executed: false,
            rehearsal_failed: None,
            last_report: None,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// True only immediately after a post notification in which the chain
    /// members actually all ran.
    #[must_use]
    pub fn chain_executed(&self) -> bool {
        self.chain_executed
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&ChainReport> {
        self.last_report.as_ref()
    }

    fn run_members(&self, event: &mut PostRun<'_>) -> ChainReport {
        let mut runs = Vec::new();
        let mut completed = true;

        for member in self.registry.members(event.command) {
            match capture_run(event.console, member, &[]) {
                Ok(text) => {
                    event.output.write(&text);
                    info!("{text}");
                    runs.push(MemberRun {
                        name: member.clone(),
                        outcome: Ok(()),
                    });
                }
                Err(err) => {
                    warn!(
                        "{member} failed while running as a member of the {} chain: {err}",
                        event.command
                    );
                    runs.push(MemberRun {
                        name: member.clone(),
                        outcome: Err(err),
                    });
                    completed = false;
                    break;
                }
            }
        }

        ChainReport {
            master: event.command.to_string(),
            runs,
            completed,
        }
    }
}

/// Run a command against a fresh capture buffer and drain it.
///
/// The buffer lives only for this one run, so text from an earlier or failed
/// run can never leak into the next relay.
fn capture_run(console: &Console, name: &str, args: &[String]) -> Result<String, CommandError> {
    let mut sink = BufferedOutput::new();
    console.run(name, args, &mut sink)?;
    Ok(sink.fetch())
}

impl CommandListener for ChainDispatcher {
    fn before_command(&mut self, event: &mut PreRun<'_>) {
        if let Some(master) = self.registry.master_of(event.command) {
            event.output.writeln(&format!(
                "Error: {} command is a member of {master} command chain and cannot be executed on its own.",
                event.command
            ));
            event.disable();
            return;
        }

        if !self.registry.is_master(event.command) {
            return;
        }

        info!(
            "{} is a master command of a command chain that has registered member commands",
            event.command
        );
        for member in self.registry.members(event.command) {
            info!("{member} registered as a member of {} command chain", event.command);
        }

        info!("Executing {} command itself first:", event.command);
        match capture_run(event.console, event.command, event.args) {
            Ok(text) => {
                event.output.write(&text);
                info!("{text}");
            }
            Err(err) => {
                warn!("{} failed while executing its own body: {err}", event.command);
                event.output.writeln(CHAIN_FAILURE_MESSAGE);
                self.rehearsal_failed = Some(event.command.to_string());
            }
        }
        event.disable();
    }

    fn after_command(&mut self, event: &mut PostRun<'_>) {
        self.chain_executed = false;
        let rehearsal_failed = self
            .rehearsal_failed
            .take()
            .is_some_and(|master| master == event.command);

        if !self.registry.has_members(event.command) {
            return;
        }

        if rehearsal_failed {
            // The master's own run already failed; its members stay untouched.
            self.last_report = Some(ChainReport {
                master: event.command.to_string(),
                runs: Vec::new(),
                completed: false,
            });
            info!("Execution of {} chain completed.", event.command);
            return;
        }

        info!("Executing {} chain members:", event.command);
        let report = self.run_members(event);
        if report.completed {
            self.chain_executed = true;
        } else {
            event.output.writeln(CHAIN_FAILURE_MESSAGE);
        }
        info!("Execution of {} chain completed.", event.command);
        self.last_report = Some(report);
    }
}
