pub mod lexer;
pub mod token;

pub use lexer::*;
pub use token::*;
