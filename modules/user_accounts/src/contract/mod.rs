pub mod model;

pub use model::{Credentials, NewUser, Session, User, UserPatch};
