//! The command chain engine.
//!
//! A chain ties a master command to an ordered list of member commands.
//! Invoking the master runs its own body first and then every member in
//! declaration order, with all output stitched into a single stream.
//! Invoking a member directly is rejected with an explanatory message.
//!
//! [`registry::ChainRegistry`] holds the static master→members mapping built
//! once from configuration. [`dispatcher::ChainDispatcher`] consumes its
//! queries at the two lifecycle notification points to decide whether an
//! invocation is rejected, taken over, or passed through.

pub mod dispatcher;
pub mod registry;
