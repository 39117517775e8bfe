//! Bulk account disable command.

use clap::Args;
use dialoguer::Input;

use dirops_audit::{AuditStore, NewDisabledAccount};
use dirops_gateway::{DirectoryGateway, DirectoryRecord};

use crate::error::{CliError, CliResult};
use crate::output::{parse_comma_list, print_header, print_info, print_key_value, print_success, print_warning};
use crate::prompts;

/// Arguments for the disable command.
#[derive(Args)]
pub struct DisableArgs {
    /// Domain controller address (prompted when omitted)
    #[arg(long)]
    pub server: Option<String>,

    /// Domain username (prompted when omitted; password is always prompted)
    #[arg(long)]
    pub username: Option<String>,

    /// Comma-separated account ids to disable (prompted when omitted)
    #[arg(long)]
    pub accounts: Option<String>,

    /// Ticket number authorizing the batch (prompted when omitted)
    #[arg(long)]
    pub ticket: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Execute the disable command: look the accounts up, show what will be
/// disabled, confirm, disable, and audit when a database is configured.
pub async fn execute(args: DisableArgs) -> CliResult<()> {
    let server = prompts::server(args.server)?;
    let credential = prompts::credential(args.username)?;

    let accounts = match args.accounts {
        Some(raw) => parse_comma_list(&raw),
        None => {
            let raw: String = Input::new()
                .with_prompt("Accounts to disable (comma-separated)")
                .interact_text()?;
            parse_comma_list(&raw)
        }
    };
    if accounts.is_empty() {
        return Err(CliError::Validation("No accounts provided".to_string()));
    }

    let ticket = match args.ticket {
        Some(ticket) => ticket,
        None => Input::new().with_prompt("Ticket number").interact_text()?,
    };
    if ticket.trim().is_empty() {
        return Err(CliError::Validation("Ticket number is required".to_string()));
    }

    let gateway = super::gateway();

    // Look each account up first so the operator confirms against real
    // directory records, not typos.
    print_header("Accounts to disable");
    let mut matched: Vec<DirectoryRecord> = Vec::new();
    for account in &accounts {
        match gateway.search(account, &server, &credential).await {
            Ok(records) => {
                let record = records
                    .into_iter()
                    .find(|r| r.sam_account_name.as_deref() == Some(account.as_str()));
                match record {
                    Some(record) => {
                        print_key_value(
                            account,
                            record.name.as_deref().unwrap_or("N/A"),
                        );
                        matched.push(record);
                    }
                    None => print_warning(&format!("'{account}' not found in the directory")),
                }
            }
            Err(err) => print_warning(&format!("Lookup failed for '{account}': {err}")),
        }
    }

    if matched.is_empty() {
        return Err(CliError::Validation(
            "None of the given accounts were found".to_string(),
        ));
    }

    println!();
    if !args.yes
        && !prompts::confirm(&format!(
            "Disable {} account(s) under ticket {ticket}?",
            matched.len()
        ))?
    {
        return Err(CliError::Aborted);
    }

    let targets: Vec<String> = matched
        .iter()
        .filter_map(|r| r.sam_account_name.clone())
        .collect();
    let outcomes = gateway.bulk_disable(&targets, &server, &credential).await?;

    let mut succeeded = Vec::new();
    for outcome in &outcomes {
        if outcome.success {
            print_success(&format!("{} disabled", outcome.account));
            succeeded.push(outcome.account.clone());
        } else {
            print_warning(&format!(
                "{} failed: {}",
                outcome.account,
                outcome.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    // Audit only when a database is configured for this shell session.
    if let Ok(url) = std::env::var("DIROPS_DATABASE_URL") {
        let rows: Vec<NewDisabledAccount> = matched
            .iter()
            .filter(|r| {
                r.sam_account_name
                    .as_deref()
                    .is_some_and(|sam| succeeded.iter().any(|s| s == sam))
            })
            .map(|r| NewDisabledAccount {
                eid: None,
                program: None,
                name: r.name.clone().unwrap_or_else(|| "N/A".to_string()),
                sam_account_name: r.sam_account_name.clone().unwrap_or_default(),
                user_principal_name: r.user_principal_name.clone(),
            })
            .collect();
        if !rows.is_empty() {
            let store = AuditStore::connect(&url).await?;
            store.migrate().await?;
            let written = store
                .record_disabled_accounts(&ticket, &credential.username, &rows)
                .await?;
            print_info(&format!("{written} audit record(s) written"));
        }
    } else {
        print_info("DIROPS_DATABASE_URL not set; skipping audit records");
    }

    let failed = outcomes.iter().filter(|o| !o.success).count();
    println!();
    print_success(&format!(
        "{} disabled, {} failed (ticket {ticket})",
        succeeded.len(),
        failed
    ));
    Ok(())
}
