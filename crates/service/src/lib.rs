//! Service layer for the users API.
//! - `storage` holds the generic JSON document store (file access lives only there).
//! - `users` holds the domain, the repository seam and the business service.

pub mod errors;
pub mod storage;
pub mod users;
