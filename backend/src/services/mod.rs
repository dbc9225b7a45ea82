//! Business logic services
//!
//! Services own the rules; they reach persistence only through the
//! injected store handle.

pub mod ownership;
pub mod resume;
pub mod user;

pub use ownership::OwnershipGuard;
pub use resume::ResumeService;
pub use user::UserService;
