//! Post-completion actions for database transactions.
//!
//! Application code registers actions from inside a transaction; they run
//! only once the transaction has finished, selected by its outcome
//! (committed, rolled back, unknown, or always). The transaction manager is
//! a collaborator reached through [`TransactionScope`]; a PostgreSQL
//! implementation is provided by [`PostgresUnitOfWork`].

pub mod action;
pub mod config;
pub mod error;
pub mod executor;
pub mod handler;
pub mod hook;
pub mod logging;
pub mod outcome;
pub mod registry;
pub mod synchronization;
pub mod unit_of_work;

pub use action::{Action, ActionResult};
pub use config::HandlerConfig;
pub use error::{ActionError, ConfigError, TransactionError, TransactionResult};
pub use executor::Executor;
pub use handler::PostActionHandler;
pub use hook::PostActionSynchronization;
pub use outcome::{Outcome, STATUS_COMMITTED, STATUS_ROLLED_BACK, STATUS_UNKNOWN};
pub use registry::ActionRegistry;
pub use synchronization::{
    CompletionObservers, ScopeId, TransactionScope, TransactionSynchronization, HIGHEST_PRECEDENCE, LOWEST_PRECEDENCE,
};
pub use unit_of_work::{PostgresUnitOfWork, PostgresUnitOfWorkSession, UnitOfWork, UnitOfWorkSession};
