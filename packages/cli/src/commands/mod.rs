pub mod attributes;
pub mod generate;
pub mod init;

pub use attributes::{attributes, AttributesArgs};
pub use generate::{generate, GenerateArgs};
pub use init::{init, InitArgs};
