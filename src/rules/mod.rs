//! Rule implementations for steplint.
//!
//! This module contains pure functions that check for binding issues.
//! Each function takes only the specific inputs it needs (not a full
//! context) and returns a specific issue type.
//!
//! ## Module Structure
//!
//! - `unused`: Bindings and binding functions never matched by any step
//! - `banned`: Banned phrases inside declared binding patterns
//! - `invalid`: Binding patterns that are not valid regexes
//! - `duplicate`: The same step text declared twice on one function

pub mod banned;
pub mod duplicate;
pub mod invalid;
pub mod unused;
