pub mod generate;
pub mod words;
