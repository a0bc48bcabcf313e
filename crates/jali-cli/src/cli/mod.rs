//! CLI command implementations.
//!
//! - `generate` - Generate one jali from flags
//! - `recipe` - Generate a jali described by a YAML recipe
//! - `request` - Replay UI messages against a document
//! - `tiles` - List tile families

pub mod common;
pub mod error;
pub mod generate;
pub mod recipe;
pub mod request;
pub mod tiles;

pub use error::CliError;
pub use generate::{GenerateArgs, cmd_generate};
pub use recipe::{cmd_recipe, print_example};
pub use request::{RequestArgs, cmd_request};
pub use tiles::cmd_tiles;
