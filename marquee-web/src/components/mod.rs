//! Reusable HTML components for the HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments used both in full pages and
//! as HTMX partial responses.

pub mod detail;
pub mod layout;
pub mod movie;
pub mod trending;

// Re-export main component functions
pub use detail::{ImageBases, movie_detail};
pub use layout::{button_link, card, escape_html, hero_header, nav_bar, section_header};
pub use movie::{movie_card, movie_grid, results_section};
pub use trending::trending_list;
