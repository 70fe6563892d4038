pub mod error;
pub mod ports;
pub mod repo;
pub mod service;

pub use error::DomainError;
pub use ports::{PasswordHasher, TokenIssuer};
pub use repo::UserRepository;
pub use service::{Service, ServiceConfig};
