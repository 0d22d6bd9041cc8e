pub mod geometry;

pub use geometry::{LinkRect, PageSize};
