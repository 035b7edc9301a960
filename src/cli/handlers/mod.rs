//! Command handlers, one per subcommand.

pub mod migrate;
pub mod serve;
pub mod users;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
pub use users::UserCommandHandler;
