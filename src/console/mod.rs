//! The host console application: commands, output targets, and the
//! command-execution lifecycle.
//!
//! Commands are registered on a [`app::Console`] and addressed by name. Every
//! invocation runs through [`lifecycle::dispatch`], which notifies registered
//! listeners immediately before and immediately after the command's execution
//! phase. Listeners can suppress the normal execution of a pending command,
//! which is how the chain engine takes over master and member invocations.

pub mod app;
pub mod command;
pub mod lifecycle;
pub mod output;
