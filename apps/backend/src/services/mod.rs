pub mod generator;
pub mod word_file;
