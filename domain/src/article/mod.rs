//! Article domain module

pub mod entities;

pub use entities::{Article, ArticleUpdate};
