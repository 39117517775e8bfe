//! Subprocess implementation of [`DirectoryGateway`].
//!
//! Each operation spawns the directory-management shell with a fixed,
//! compile-time script and hands every request value to it through process
//! environment variables. Search terms are additionally single-quote
//! escaped inside the script before being used in a directory filter, and
//! passwords cross the boundary base64(UTF-16LE)-encoded so no character in
//! them can ever be interpreted by the shell.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use dirops_core::Credential;

use crate::error::GatewayError;
use crate::model::{ActionOutcome, DirectoryRecord, DisableOutcome};
use crate::output::PsOutput;
use crate::traits::DirectoryGateway;

const SEARCH_SCRIPT: &str = r#"
$AdminPassword = [System.Text.Encoding]::Unicode.GetString([System.Convert]::FromBase64String($env:DIROPS_PASSWORD_B64))
$SecurePassword = ConvertTo-SecureString $AdminPassword -AsPlainText -Force
$Credential = New-Object System.Management.Automation.PSCredential($env:DIROPS_USERNAME, $SecurePassword)
$Term = $env:DIROPS_TERM.Replace("'", "''")
try {
    Get-ADUser -Filter "Name -like '*$Term*' -or sAMAccountName -like '*$Term*'" -Server $env:DIROPS_SERVER -Credential $Credential `
        -Properties Enabled, DistinguishedName, UserPrincipalName, SamAccountName, LockedOut |
    Select-Object Name, SamAccountName, UserPrincipalName, DistinguishedName, Enabled, LockedOut |
    ConvertTo-Json -Compress
} catch {
    Write-Error $_.Exception.Message
    exit 1
}
"#;

const BULK_DISABLE_SCRIPT: &str = r#"
$AdminPassword = [System.Text.Encoding]::Unicode.GetString([System.Convert]::FromBase64String($env:DIROPS_PASSWORD_B64))
$SecurePassword = ConvertTo-SecureString $AdminPassword -AsPlainText -Force
$Credential = New-Object System.Management.Automation.PSCredential($env:DIROPS_USERNAME, $SecurePassword)
$Accounts = $env:DIROPS_ACCOUNTS -split "`n"
$Results = @()
foreach ($Account in $Accounts) {
    try {
        Disable-ADAccount -Identity $Account -Server $env:DIROPS_SERVER -Credential $Credential -ErrorAction Stop
        $Results += [PSCustomObject]@{ account = $Account; success = $true; error = $null }
    } catch {
        $Results += [PSCustomObject]@{ account = $Account; success = $false; error = $_.Exception.Message }
    }
}
$Results | ConvertTo-Json -Compress
"#;

const UNLOCK_SCRIPT: &str = r#"
$AdminPassword = [System.Text.Encoding]::Unicode.GetString([System.Convert]::FromBase64String($env:DIROPS_PASSWORD_B64))
$SecurePassword = ConvertTo-SecureString $AdminPassword -AsPlainText -Force
$Credential = New-Object System.Management.Automation.PSCredential($env:DIROPS_USERNAME, $SecurePassword)
try {
    Unlock-ADAccount -Identity $env:DIROPS_ACCOUNT -Server $env:DIROPS_SERVER -Credential $Credential -ErrorAction Stop
    Write-Output "SUCCESS"
} catch {
    Write-Error $_.Exception.Message
    exit 1
}
"#;

const RESET_PASSWORD_SCRIPT: &str = r#"
$AdminPassword = [System.Text.Encoding]::Unicode.GetString([System.Convert]::FromBase64String($env:DIROPS_PASSWORD_B64))
$SecurePassword = ConvertTo-SecureString $AdminPassword -AsPlainText -Force
$Credential = New-Object System.Management.Automation.PSCredential($env:DIROPS_USERNAME, $SecurePassword)
$NewPasswordPlain = [System.Text.Encoding]::Unicode.GetString([System.Convert]::FromBase64String($env:DIROPS_NEW_PASSWORD_B64))
$NewPassword = ConvertTo-SecureString $NewPasswordPlain -AsPlainText -Force
try {
    Set-ADAccountPassword -Identity $env:DIROPS_ACCOUNT -NewPassword $NewPassword -Server $env:DIROPS_SERVER -Credential $Credential -Reset -ErrorAction Stop
    if ($env:DIROPS_TEMPORARY -eq 'true') {
        Set-ADUser -Identity $env:DIROPS_ACCOUNT -ChangePasswordAtLogon $true -Server $env:DIROPS_SERVER -Credential $Credential -ErrorAction Stop
    } else {
        Set-ADUser -Identity $env:DIROPS_ACCOUNT -ChangePasswordAtLogon $false -Server $env:DIROPS_SERVER -Credential $Credential -ErrorAction Stop
    }
    Write-Output "SUCCESS"
} catch {
    Write-Error $_.Exception.Message
    exit 1
}
"#;

/// Gateway tuning knobs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Shell binary to invoke.
    pub shell: String,
    /// Timeout for search, unlock and password reset.
    pub action_timeout: Duration,
    /// Timeout for bulk disable, which touches many accounts per call.
    pub bulk_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            shell: "powershell.exe".to_string(),
            action_timeout: Duration::from_secs(30),
            bulk_timeout: Duration::from_secs(60),
        }
    }
}

/// [`DirectoryGateway`] implementation backed by the directory shell.
pub struct PsGateway {
    config: GatewayConfig,
}

impl PsGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// Run one fixed script with the given environment, enforcing `limit`.
    ///
    /// On expiry the child is killed and the call abandoned. Returns the
    /// raw stdout of a zero-exit run.
    async fn run(
        &self,
        script: &'static str,
        env: Vec<(&'static str, String)>,
        limit: Duration,
    ) -> Result<String, GatewayError> {
        let mut command = Command::new(&self.config.shell);
        command
            .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command", script])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for (key, value) in env {
            command.env(key, value);
        }

        let child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GatewayError::Unavailable
            } else {
                GatewayError::Failed(e.to_string())
            }
        })?;

        let output = match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(GatewayError::Failed(e.to_string())),
            Err(_) => {
                warn!(seconds = limit.as_secs(), "directory command abandoned on timeout");
                return Err(GatewayError::Timeout {
                    seconds: limit.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GatewayError::from_stderr(&stderr));
        }

        debug!(bytes = output.stdout.len(), "directory command completed");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Common environment for every operation: server address and credential.
/// The password travels base64(UTF-16LE)-encoded.
fn base_env(server: &str, credential: &Credential) -> Vec<(&'static str, String)> {
    vec![
        ("DIROPS_SERVER", server.to_string()),
        ("DIROPS_USERNAME", credential.username.clone()),
        ("DIROPS_PASSWORD_B64", b64_utf16le(&credential.password)),
    ]
}

fn b64_utf16le(value: &str) -> String {
    let bytes: Vec<u8> = value.encode_utf16().flat_map(u16::to_le_bytes).collect();
    BASE64.encode(bytes)
}

#[async_trait]
impl DirectoryGateway for PsGateway {
    #[instrument(skip(self, credential), fields(server = %server))]
    async fn search(
        &self,
        term: &str,
        server: &str,
        credential: &Credential,
    ) -> Result<Vec<DirectoryRecord>, GatewayError> {
        let mut env = base_env(server, credential);
        env.push(("DIROPS_TERM", term.to_string()));

        let stdout = self
            .run(SEARCH_SCRIPT, env, self.config.action_timeout)
            .await?;
        let records = PsOutput::<DirectoryRecord>::parse(&stdout)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?
            .into_vec();
        debug!(term, matches = records.len(), "directory search completed");
        Ok(records)
    }

    #[instrument(skip(self, credential), fields(server = %server, accounts = accounts.len()))]
    async fn bulk_disable(
        &self,
        accounts: &[String],
        server: &str,
        credential: &Credential,
    ) -> Result<Vec<DisableOutcome>, GatewayError> {
        let mut env = base_env(server, credential);
        env.push(("DIROPS_ACCOUNTS", accounts.join("\n")));

        let stdout = self
            .run(BULK_DISABLE_SCRIPT, env, self.config.bulk_timeout)
            .await?;
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::MalformedResponse(
                "no output from bulk disable command".to_string(),
            ));
        }
        PsOutput::<DisableOutcome>::parse(trimmed)
            .map(PsOutput::into_vec)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }

    #[instrument(skip(self, credential), fields(server = %server))]
    async fn unlock(
        &self,
        account: &str,
        server: &str,
        credential: &Credential,
    ) -> Result<ActionOutcome, GatewayError> {
        let mut env = base_env(server, credential);
        env.push(("DIROPS_ACCOUNT", account.to_string()));

        match self.run(UNLOCK_SCRIPT, env, self.config.action_timeout).await {
            Ok(_) => Ok(ActionOutcome::ok(format!(
                "User {account} unlocked successfully"
            ))),
            Err(GatewayError::Timeout { .. }) => {
                Ok(ActionOutcome::failed("Unlock operation timed out"))
            }
            Err(e) => Ok(ActionOutcome::failed(format!("Failed to unlock user: {e}"))),
        }
    }

    #[instrument(skip(self, new_password, credential), fields(server = %server, temporary))]
    async fn reset_password(
        &self,
        account: &str,
        new_password: &str,
        temporary: bool,
        server: &str,
        credential: &Credential,
    ) -> Result<ActionOutcome, GatewayError> {
        let mut env = base_env(server, credential);
        env.push(("DIROPS_ACCOUNT", account.to_string()));
        env.push(("DIROPS_NEW_PASSWORD_B64", b64_utf16le(new_password)));
        env.push((
            "DIROPS_TEMPORARY",
            if temporary { "true" } else { "false" }.to_string(),
        ));

        match self
            .run(RESET_PASSWORD_SCRIPT, env, self.config.action_timeout)
            .await
        {
            Ok(_) => {
                let kind = if temporary {
                    "temporary (must change at next logon)"
                } else {
                    "permanent"
                };
                Ok(ActionOutcome::ok(format!(
                    "Password reset successfully for {account} ({kind})"
                )))
            }
            Err(GatewayError::Timeout { .. }) => {
                Ok(ActionOutcome::failed("Password reset operation timed out"))
            }
            Err(e) => Ok(ActionOutcome::failed(format!(
                "Failed to reset password: {e}"
            ))),
        }
    }
}
