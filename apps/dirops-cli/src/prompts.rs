//! Interactive prompts for values not given on the command line.

use dialoguer::{Confirm, Input, Password};

use dirops_core::Credential;

use crate::error::CliResult;

/// Prompt for the domain controller address unless already provided.
pub fn server(given: Option<String>) -> CliResult<String> {
    match given {
        Some(server) => Ok(server),
        None => Ok(Input::new()
            .with_prompt("Domain controller")
            .interact_text()?),
    }
}

/// Prompt for the operator credential; the password is never echoed.
pub fn credential(username: Option<String>) -> CliResult<Credential> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Domain username (DOMAIN\\user)")
            .interact_text()?,
    };
    let password = Password::new().with_prompt("Domain password").interact()?;
    Ok(Credential::new(username, password))
}

/// Yes/no confirmation, defaulting to no.
pub fn confirm(message: &str) -> CliResult<bool> {
    Ok(Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?)
}

/// Prompt for comma-separated search terms, e.g. `Garcia, Neil, Santos`.
/// Each term is searched independently.
pub fn search_terms() -> CliResult<String> {
    Ok(Input::new()
        .with_prompt("Search terms (comma-separated)")
        .interact_text()?)
}
