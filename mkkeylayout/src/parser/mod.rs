pub mod ast;
pub mod config;
pub mod encoding;

pub use ast::*;
pub use config::parse_config;
pub use encoding::{parse_base_rows, parse_mapping_rows};
