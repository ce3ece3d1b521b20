pub mod address;
pub mod config;
pub mod entities;
pub mod errors;
pub mod validation;

pub use address::*;
pub use config::*;
pub use entities::*;
pub use errors::*;
