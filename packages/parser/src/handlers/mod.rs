pub mod page;
pub mod parse;
