//! Neighborhood filters: line art and emboss.
//!
//! Both families compare each pixel against one neighbour and turn the
//! difference into an output channel:
//!
//! - **Line art** sums the absolute differences to the left and upper
//!   neighbours and scales them by an intensity factor, producing bright
//!   edges on black.
//! - **Emboss** adds the signed difference to a "light" neighbour, scaled
//!   by a power factor, to a flat bias color, producing relief shading.
//!
//! Each filter has a gray variant that compares luma values instead of
//! individual channels.

mod emboss;
mod line_art;

pub use emboss::{emboss, gray_emboss, light_offset};
pub use line_art::{gray_line_art, line_art};
