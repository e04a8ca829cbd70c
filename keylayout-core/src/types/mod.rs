pub mod errors;
pub mod modifiers;
pub mod rows;

pub use errors::*;
pub use modifiers::*;
pub use rows::*;
