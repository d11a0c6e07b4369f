//! Infrastructure for the wisdom journey: file locations, persistence and
//! the Gemini content provider.

pub mod config_service;
pub mod content_cache;
pub mod gemini_provider;
pub mod paths;
pub mod progress_store;
pub mod secret_service;
pub mod storage;

pub use config_service::ConfigService;
pub use content_cache::{CONTENT_SCHEMA_VERSION, ContentCache};
pub use gemini_provider::GeminiProvider;
pub use paths::{PathError, WisdomPaths};
pub use progress_store::{ProgressStore, USER_STATE_KEY};
pub use secret_service::SecretService;
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
