//! Production AI service implementations.

mod openai;

pub use openai::OpenAi;
