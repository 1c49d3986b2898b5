mod client;
mod error;
mod ollama;
#[cfg(feature = "test-util")]
mod scripted;

pub use client::*;
pub use error::*;
pub use ollama::*;
#[cfg(feature = "test-util")]
pub use scripted::*;
