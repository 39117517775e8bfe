//! Bulk user search command.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use dirops_core::{parse_search_input, SearchLine};
use dirops_gateway::DirectoryGateway;

use crate::error::{CliError, CliResult};
use crate::output::{
    parse_comma_list, print_failure, print_header, print_key_value, print_success, print_warning,
    render_table, truncate,
};
use crate::prompts;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Domain controller address (prompted when omitted)
    #[arg(long)]
    pub server: Option<String>,

    /// Domain username (prompted when omitted; password is always prompted)
    #[arg(long)]
    pub username: Option<String>,

    /// Read `tag, term[, tag, tag]` lines from a file instead of prompting
    /// for comma-separated terms
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Turn a prompted `name1, name2, ...` answer into one search per term.
fn terms_to_lines(raw: &str) -> Vec<SearchLine> {
    parse_comma_list(raw)
        .into_iter()
        .map(|term| SearchLine {
            tag1: None,
            term,
            tag2: None,
            tag3: None,
        })
        .collect()
}

/// Execute the search command.
pub async fn execute(args: SearchArgs) -> CliResult<()> {
    let server = prompts::server(args.server)?;
    let credential = prompts::credential(args.username)?;

    // Interactive input is a single comma-separated term list, searched one
    // term at a time; the tagged multi-line layout is file-input only.
    let lines = match &args.input_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let parsed = parse_search_input(&raw);
            for error in &parsed.errors {
                print_warning(error);
            }
            parsed.lines
        }
        None => terms_to_lines(&prompts::search_terms()?),
    };
    if lines.is_empty() {
        return Err(CliError::Validation(
            "No search terms provided".to_string(),
        ));
    }

    let gateway = super::gateway();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut json_out = Vec::new();
    let mut failures = 0usize;

    print_header("Directory Search");
    for line in &lines {
        match gateway.search(&line.term, &server, &credential).await {
            Ok(records) if records.is_empty() => {
                print_warning(&format!("No users found for '{}'", line.term));
            }
            Ok(records) => {
                for record in records {
                    let name = record.name.clone().unwrap_or_else(|| "N/A".to_string());
                    let account = record
                        .sam_account_name
                        .clone()
                        .unwrap_or_else(|| line.term.clone());
                    let upn = record
                        .user_principal_name
                        .clone()
                        .unwrap_or_else(|| "N/A".to_string());

                    if !args.json {
                        print_key_value(&account, &name);
                    }
                    rows.push(vec![
                        truncate(&account, 20),
                        truncate(&name, 30),
                        truncate(&upn, 35),
                        if record.enabled { "no" } else { "YES" }.to_string(),
                        if record.locked_out { "YES" } else { "no" }.to_string(),
                        line.tag1.clone().unwrap_or_default(),
                    ]);
                    json_out.push(json!({
                        "Name": name,
                        "SamAccountName": account,
                        "UserPrincipalName": upn,
                        "DistinguishedName": record.distinguished_name,
                        "IsDisabled": !record.enabled,
                        "IsLocked": record.locked_out,
                        "CustomField1": line.tag1,
                        "CustomField4": line.term,
                    }));
                }
            }
            Err(err) => {
                failures += 1;
                print_failure(&format!("Search failed for '{}': {err}", line.term));
            }
        }
    }

    if !args.json && !rows.is_empty() {
        println!();
        print!(
            "{}",
            render_table(
                &["Account", "Name", "UPN", "Disabled", "Locked", "Tag"],
                &rows
            )
        );
    }

    // The JSON array always goes to stdout last, so the output can be piped
    // straight into the disable flow or other tooling.
    println!();
    println!("{}", serde_json::to_string_pretty(&json_out)?);

    println!();
    print_success(&format!(
        "{} result(s) from {} term(s), {} failed",
        rows.len(),
        lines.len(),
        failures
    ));
    Ok(())
}
