//! External model providers

pub mod openai;

pub use openai::OpenAiGateway;
