pub mod render_service;
pub mod review_service;
