//! Command dispatch core for the Prompt console.
//!
//! The console is a registry-based dispatch system. Commands implement the
//! `ConsoleCommand` trait and are registered under a namespaced key. The
//! dispatcher tokenizes input lines, resolves the command name (with
//! namespace inference and "did you mean" suggestions), binds flags, runs
//! the handler, and shapes the result into a uniform response envelope.

mod binder;
mod command;
mod dispatcher;
mod flag;
mod help;
mod registry;
mod resolver;

/// Typed flag values bound from a raw token list.
pub use binder::{BoundArguments, is_flag, tokenize};
/// The handler contract consumed by the dispatcher.
pub use command::{ConsoleCommand, ValidationState};
/// Dispatch orchestration and the response shapes it produces.
pub use dispatcher::{DispatchResponse, Dispatcher};
/// Declarative flag schema attached to each command.
pub use flag::{FlagDescriptor, FlagKind};
/// Help models rendered for `HELP` requests.
pub use help::{CommandHelp, HelpOption};
/// Command descriptors and the registry that owns them.
pub use registry::{CommandDescriptor, CommandRegistry, CommandSummary, HandlerFactory};
/// Name resolution outcomes.
pub use resolver::{Resolution, resolve};
