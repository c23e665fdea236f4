pub mod memory_repository;
pub mod review_repository;
