//! Service layer
//!
//! Each operation takes a `Session` supplied by the caller and performs one
//! data operation inside it. Reads borrow the session; writes consume it and
//! commit on success. Any failure returns before the commit, so the dropped
//! session rolls back.
//!
//! - `user_service`: the user operations and their acknowledgments
//! - `error`: failures surfaced to the transport layer

pub mod error;
pub mod user_service;

pub use error::{ServiceError, ServiceResult};
pub use user_service::{Acknowledgment, UserService};
