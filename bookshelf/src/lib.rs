mod app;
pub mod logging;
pub mod router;

pub use app::{App, ProfileView};

// Always expose testing module (integration tests need it)
pub mod testing;
