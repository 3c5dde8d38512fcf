mod error;
mod session;
mod settings;
mod storage;
mod store;

pub use bookshelf_api::endpoints::accounts::{Signup, UserProfile};
pub use error::AuthError;
pub use session::{Session, SessionContext};
pub use settings::Settings;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{LoginOutcome, ProfileRefresh, SessionStore};
