pub mod duration;
pub mod fuzzy;

pub use duration::*;
