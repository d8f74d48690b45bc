//! The operations the app exposes, grouped by what they act on. These are
//! the UI-free equivalents of what the original view controllers did.

pub mod albums;
pub mod map;
pub mod photos;
pub mod pins;
