//! Resume Manager Shared Library
//!
//! Wire types, domain enums, the error taxonomy, and pure input validation
//! used by the backend and by API clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{ResumeSort, ResumeStatus, SortDirection, SortField};
pub use types::*;
