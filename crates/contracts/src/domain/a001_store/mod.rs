pub mod aggregate;
pub mod reward;
pub mod scoring;
