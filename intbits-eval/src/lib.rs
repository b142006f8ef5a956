pub mod env;
pub mod error;
pub mod interp;
pub mod value;
