pub mod db;
pub mod extractor;
