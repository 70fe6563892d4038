pub mod error;
pub mod repo;
pub mod service;

pub use error::DomainError;
pub use repo::TodoRepository;
pub use service::{Service, ServiceConfig};
