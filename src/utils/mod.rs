pub mod extractors;
pub mod ids;
