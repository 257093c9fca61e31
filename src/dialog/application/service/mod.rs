pub mod autodetect_service;
pub mod field_update_service;
pub mod submit_service;
pub mod validation_service;
