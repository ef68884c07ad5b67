//! Command abstractions.

use uuid::Uuid;

use crate::ids::UserId;

/// Trait implemented by every player action handed to an engine.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The player issuing the command.
    fn user_id(&self) -> UserId;
}
