//! Full page handlers
//!
//! Pages compose components into complete HTML documents using the shared
//! base template.

pub mod home;
pub mod movie;
pub mod not_found;

// Re-export page handlers
pub use home::{SearchParams, home_page};
pub use movie::movie_page;
pub use not_found::not_found_page;
