//! Directory gateway for the dirops toolset.
//!
//! All directory reads and mutations are delegated to an external
//! directory-management shell invoked as a subprocess. This crate builds
//! one typed command per logical operation, enforces a timeout, and
//! normalizes the subprocess output into records or a typed failure.
//!
//! Untrusted values (search terms, account ids, credentials, new
//! passwords) are never interpolated into the script body; they are handed
//! to a fixed script through process environment variables.

mod error;
mod model;
mod output;
mod shell;
mod traits;

pub use error::GatewayError;
pub use model::{ActionOutcome, DirectoryRecord, DisableOutcome};
pub use output::PsOutput;
pub use shell::{GatewayConfig, PsGateway};
pub use traits::DirectoryGateway;
