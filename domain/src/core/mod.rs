//! Core domain primitives

pub mod error;
pub mod slug;
