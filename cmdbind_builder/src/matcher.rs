mod assign;
mod classify;
mod lexer;
mod model;

pub use assign::*;
pub use classify::*;
pub use lexer::*;
pub use model::*;
