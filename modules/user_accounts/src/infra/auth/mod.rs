pub mod bcrypt_hasher;
pub mod token;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use token::OpaqueTokenIssuer;
