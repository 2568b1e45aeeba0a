//! Repositorios
//!
//! Acceso a las colecciones de alat y servis a través del almacenamiento
//! inyectado.

pub mod service_repository;
pub mod tool_repository;

pub use service_repository::ServiceRepository;
pub use tool_repository::ToolRepository;
