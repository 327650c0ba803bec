//! Circle-packing chart of European countries grouped by region.
//!
//! The pipeline runs [`data`] → [`hierarchy`] → [`pack`] → [`render`], with
//! [`pipeline`] tying one pass together and [`selection`] holding the country
//! picked by a click.

pub mod config;
pub mod data;
pub mod hierarchy;
pub mod pack;
pub mod pipeline;
pub mod render;
pub mod selection;
pub mod util;
pub mod wrap;
