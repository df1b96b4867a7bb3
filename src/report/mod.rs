// Read-only reports over a normalized snapshot

pub mod starred;
pub mod progress;
pub mod access;

pub use starred::*;
pub use progress::*;
pub use access::*;
