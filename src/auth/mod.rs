//! Authentication: the repository boundary, its error taxonomy, and the
//! auth screen store.

mod component;
mod error;
mod memory;
mod model;
mod repository;
pub mod store;

pub use component::AuthComponent;
pub use error::AuthError;
pub use memory::InMemoryAuthRepository;
pub use model::{Credentials, User};
pub(crate) use model::unix_now;
pub use repository::{AuthRepository, SessionUpdate};
