//! Users module: domain, id generation, repository seam, JSON-file store and service.
//!
//! Handlers only ever talk to [`UserService`]; persistence is reachable solely
//! through the [`repository::UserRepository`] trait.

pub mod domain;
pub mod id;
pub mod repository;
pub mod service;
pub mod store;

pub use domain::{User, UserInput, UserPatch};
pub use service::UserService;
pub use store::JsonUserStore;
