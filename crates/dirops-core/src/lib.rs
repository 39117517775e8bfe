//! Shared types for the dirops toolset.
//!
//! This crate holds the pieces every dirops variant (HTTP service, console
//! tools) needs: the bulk search-input parser, the merged user result model,
//! and credential profiles injected at process start.

mod credentials;
mod error;
mod input;
mod user_result;

pub use credentials::{load_profiles, Credential, CredentialProfile};
pub use error::CoreError;
pub use input::{parse_search_input, ParsedInput, SearchLine};
pub use user_result::{ResultStatus, UserResult};
