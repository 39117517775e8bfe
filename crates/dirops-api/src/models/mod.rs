//! Request and response DTOs for the directory operations API.

mod requests;
mod responses;

pub use requests::{
    BulkDisableRequest, DisabledQuery, RecordsQuery, ResetPasswordRequest, SearchUsersRequest,
    UnlockUserRequest,
};
pub use responses::{
    ActionRecord, ActionResponse, BulkDisableResponse, DisableResult, DisabledRecord,
    DisabledRecordsResponse, RecordsResponse, SearchUsersResponse,
};
