//! Domain primitives, ports, and services.
//!
//! Purpose: define the user directory and follow graph independently of HTTP
//! and SQL. Inbound adapters drive the services through the traits in
//! [`ports`]; outbound adapters implement the repository traits.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User and its validated attributes, plus the draft and patch types that
//!   feed validation.
//! - FollowEdge / FollowSets / UserProfile: directed graph model.
//! - ImageUpload: validated avatar bytes.
//! - UserDirectoryService / FollowGraphService: driving port implementations.

pub mod error;
pub mod follow;
pub mod follow_graph_service;
pub mod image;
pub mod ports;
mod repository_errors;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::follow::{
    FollowConfirmation, FollowEdge, FollowEdgeError, FollowSets, UserProfile, UserSummary,
};
pub use self::follow_graph_service::FollowGraphService;
pub use self::image::{ImageContentType, ImageUpload, ImageValidationError, MAX_IMAGE_BYTES};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DOB_FORMAT, DisplayName, EmailAddress, ImageUrl, NewUser, PhoneNumber, User, UserDraft,
    UserField, UserId, UserPatch, UserPatchDraft, UserValidationError, UserValidationErrors,
    parse_dob,
};
pub use self::user_directory_service::UserDirectoryService;
