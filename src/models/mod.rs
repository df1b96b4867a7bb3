// Core data models for podtrack
// Raw API records on one side, the normalized pod -> outcome -> task tree on the other

pub mod field;
pub mod task;
pub mod outcome;
pub mod pod;
pub mod session;

pub use field::*;
pub use task::*;
pub use outcome::*;
pub use pod::*;
pub use session::*;
