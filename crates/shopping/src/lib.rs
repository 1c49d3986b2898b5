mod error;
mod export;
mod file;

pub use error::*;
pub use export::*;
pub use file::*;
