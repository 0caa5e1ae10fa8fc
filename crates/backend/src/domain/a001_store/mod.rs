pub mod directory;
pub mod repository;
pub mod service;
