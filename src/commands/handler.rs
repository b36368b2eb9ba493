//! Menu command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation for modular menu handling

use anyhow::Result;

use super::context::CommandContext;
use super::prompt::Prompter;

/// Trait for menu command handlers
///
/// Each handler processes one or more menu commands. Handlers are registered
/// with a CommandRegistry and dispatched by command name.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// impl MenuCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     fn handle(
///         &self,
///         name: &str,
///         ctx: &mut CommandContext,
///         prompter: &mut dyn Prompter,
///     ) -> Result<String> {
///         Ok("pong\n".to_string())
///     }
/// }
/// ```
pub trait MenuCommandHandler {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command and return the text to show the user
    ///
    /// # Arguments
    ///
    /// * `name` - The command being run, one of `command_names()`
    /// * `ctx` - Session, storage and configuration
    /// * `prompter` - Source of any further user input
    fn handle(
        &self,
        name: &str,
        ctx: &mut CommandContext,
        prompter: &mut dyn Prompter,
    ) -> Result<String>;
}
