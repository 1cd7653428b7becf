//! Common types, traits, and error definitions for the planner
//!
//! This module provides the foundational building blocks shared by the
//! planning pipeline and the collaborators plugged into it.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
