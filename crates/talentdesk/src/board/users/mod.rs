//! User directory: roles, accounts, and the admin CRUD surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{NewUserAccount, UserAccount, UserId, UserRole};
pub use repository::UserRepository;
pub use router::directory_router;
pub use service::{DirectoryError, UserDirectoryService};
