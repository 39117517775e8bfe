//! End-to-end router tests with a scripted directory gateway.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use dirops_api::{ops_router, OpsState};
use dirops_audit::AuditStore;
use dirops_core::{Credential, CredentialProfile};
use dirops_gateway::{
    ActionOutcome, DirectoryGateway, DirectoryRecord, DisableOutcome, GatewayError,
};

struct ScriptedGateway {
    searches: HashMap<String, Vec<DirectoryRecord>>,
}

impl ScriptedGateway {
    fn with_user(term: &str, name: &str, sam: &str) -> Self {
        let record = serde_json::from_value(json!({
            "Name": name,
            "SamAccountName": sam,
            "UserPrincipalName": format!("{sam}@corp.example"),
            "DistinguishedName": format!("CN={name}"),
            "Enabled": true,
            "LockedOut": false,
        }))
        .unwrap();
        let mut searches = HashMap::new();
        searches.insert(term.to_string(), vec![record]);
        Self { searches }
    }

    fn empty() -> Self {
        Self {
            searches: HashMap::new(),
        }
    }
}

#[async_trait]
impl DirectoryGateway for ScriptedGateway {
    async fn search(
        &self,
        term: &str,
        _server: &str,
        _credential: &Credential,
    ) -> Result<Vec<DirectoryRecord>, GatewayError> {
        Ok(self.searches.get(term).cloned().unwrap_or_default())
    }

    async fn bulk_disable(
        &self,
        accounts: &[String],
        _server: &str,
        _credential: &Credential,
    ) -> Result<Vec<DisableOutcome>, GatewayError> {
        Ok(accounts
            .iter()
            .map(|account| DisableOutcome {
                account: account.clone(),
                success: true,
                error: None,
            })
            .collect())
    }

    async fn unlock(
        &self,
        account: &str,
        _server: &str,
        _credential: &Credential,
    ) -> Result<ActionOutcome, GatewayError> {
        Ok(ActionOutcome::ok(format!(
            "User {account} unlocked successfully"
        )))
    }

    async fn reset_password(
        &self,
        account: &str,
        _new_password: &str,
        _temporary: bool,
        _server: &str,
        _credential: &Credential,
    ) -> Result<ActionOutcome, GatewayError> {
        Ok(ActionOutcome::ok(format!(
            "Password reset successfully for {account}"
        )))
    }
}

async fn test_app(gateway: ScriptedGateway, profiles: Vec<CredentialProfile>) -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let audit = AuditStore::new(pool);
    audit.migrate().await.unwrap();
    ops_router(OpsState::new(Arc::new(gateway), audit, profiles))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn base_request() -> Value {
    json!({
        "serverAddress": "dc01.corp.example",
        "username": "CORP\\helpdesk",
        "password": "pw"
    })
}

#[tokio::test]
async fn search_users_returns_merged_results() {
    let app = test_app(
        ScriptedGateway::with_user("jsmith", "John Smith", "jsmith"),
        vec![],
    )
    .await;

    let mut body = base_request();
    body["rawInput"] = json!("EID1, jsmith, Finance\nEID2, ghost");
    let (status, json) = post_json(&app, "/api/search-users", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["totalUsers"], 2);
    assert_eq!(json["users"][0]["Name"], "John Smith");
    assert_eq!(json["users"][0]["CustomField1"], "EID1");
    assert_eq!(json["users"][1]["Name"], "USER NOT FOUND");
    assert_eq!(json["users"][1]["status"], "not_found");
    assert!(json["errors"][0].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn search_users_rejects_empty_credentials() {
    let app = test_app(
        ScriptedGateway::with_user("jsmith", "John Smith", "jsmith"),
        vec![],
    )
    .await;

    let body = json!({
        "serverAddress": "",
        "username": "",
        "password": "",
        "rawInput": "EID1, jsmith"
    });
    let (status, json) = post_json(&app, "/api/search-users", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("Missing required credentials"));
}

#[tokio::test]
async fn search_users_rejects_empty_input() {
    let app = test_app(ScriptedGateway::empty(), vec![]).await;

    let mut body = base_request();
    body["rawInput"] = json!("   ");
    let (status, json) = post_json(&app, "/api/search-users", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("No search input"));
}

#[tokio::test]
async fn bulk_disable_then_disabled_accounts_shows_audit_rows() {
    let app = test_app(ScriptedGateway::empty(), vec![]).await;

    let mut body = base_request();
    body["userAccounts"] = json!(["jsmith"]);
    body["ticketNumber"] = json!("TICKET-42");
    body["userDetails"] = json!([{
        "Name": "John Smith",
        "SamAccountName": "jsmith",
        "UserPrincipalName": "jsmith@corp.example",
        "DistinguishedName": "CN=John Smith",
        "IsDisabled": false,
        "IsLocked": false,
        "CustomField1": "EID1",
        "CustomField3": "Finance"
    }]);
    let (status, json) = post_json(&app, "/api/bulk-disable-users", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["succeeded"], 1);
    assert_eq!(json["ticket_number"], "TICKET-42");

    let (status, json) = get_json(&app, "/api/disabled-accounts?ticket=TICKET-42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["records"][0]["sam_account_name"], "jsmith");
    assert_eq!(json["records"][0]["eid"], "EID1");
    assert_eq!(json["records"][0]["program"], "Finance");
}

#[tokio::test]
async fn bulk_disable_without_ticket_is_400() {
    let app = test_app(ScriptedGateway::empty(), vec![]).await;

    let mut body = base_request();
    body["userAccounts"] = json!(["jsmith"]);
    body["ticketNumber"] = json!("");
    let (status, _) = post_json(&app, "/api/bulk-disable-users", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unlock_writes_a_database_record() {
    let app = test_app(ScriptedGateway::empty(), vec![]).await;

    let mut body = base_request();
    body["samAccountName"] = json!("jsmith");
    body["reference"] = json!("INC-7");
    let (status, json) = post_json(&app, "/api/unlock-user", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, json) = get_json(&app, "/api/database-records?action_type=UNLOCK_ACCOUNT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["records"][0]["reference"], "INC-7");
    assert_eq!(json["records"][0]["domain_user"], "CORP\\helpdesk");
}

#[tokio::test]
async fn reset_password_audit_omits_the_password() {
    let app = test_app(ScriptedGateway::empty(), vec![]).await;

    let mut body = base_request();
    body["samAccountName"] = json!("jsmith");
    body["newPassword"] = json!("Sup3r!Secret");
    body["isTemporary"] = json!(true);
    body["reference"] = json!("INC-8");
    let (status, json) = post_json(&app, "/api/reset-password", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (_, json) = get_json(&app, "/api/database-records").await;
    let record = &json["records"][0];
    assert_eq!(record["additional_details"]["password_type"], "temporary");
    assert_eq!(record["additional_details"]["change_at_logon"], true);
    assert!(!json.to_string().contains("Sup3r!Secret"));
}

#[tokio::test]
async fn credentials_endpoint_lists_startup_profiles() {
    let profile: CredentialProfile = serde_json::from_value(json!({
        "Program": "Corp Domain",
        "DomainControllerIP": "dc01.corp.example",
        "DomainUsername": "CORP\\helpdesk",
        "DomainPassword": "pw"
    }))
    .unwrap();
    let app = test_app(ScriptedGateway::empty(), vec![profile]).await;

    let (status, json) = get_json(&app, "/api/credentials").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["credentials"][0]["Program"], "Corp Domain");
}
