//! Application use cases

pub mod generate_perspectives;

pub use generate_perspectives::{
    GenerateBatchError, GenerateBatchInput, GeneratePerspectivesUseCase,
};
