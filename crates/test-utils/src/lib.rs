pub mod builders;
pub mod fake_backend;

pub use builders::SettingsBuilder;
pub use fake_backend::{BackendEvent, FakeProcessBackend};
