//! User administration commands for the Prompt console.
//!
//! Commands implement the engine's `ConsoleCommand` trait and talk to the
//! portal's user data through the [`UserStore`] collaborator. An in-memory
//! store is provided for tests and the demo console.

mod commands;
mod store;

/// Register all user commands (list-users, get-user, purge-user) into a registry.
pub use commands::register_user_commands;
/// User data collaborator trait.
pub use store::UserStore;
/// One user row as surfaced by the commands.
pub use store::UserRecord;
/// In-memory user store for tests and the demo console.
pub use store::MemoryUserStore;
