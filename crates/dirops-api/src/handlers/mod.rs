//! HTTP handlers for the directory operations API.

pub mod bulk_disable;
pub mod credentials;
pub mod records;
pub mod reset_password;
pub mod search;
pub mod unlock;
