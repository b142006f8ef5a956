pub mod expr;
pub mod span;
pub mod stmt;
pub mod string;
pub mod token;
