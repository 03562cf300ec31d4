//! Common types used across the application.

pub mod id;
pub mod reference;

pub use id::*;
pub use reference::{EntityRef, HasId};
