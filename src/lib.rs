#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod location;
mod r#type;

pub use error::{GeoKdSetError, Result};
pub use location::{Dimension, Location, Region};
pub use r#type::CoordNum;
