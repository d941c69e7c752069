// Shared helpers: storage, validation, i18n, CSV

pub mod constants;
pub mod csv;
pub mod i18n;
pub mod storage;
pub mod validation;

pub use constants::*;
pub use i18n::t;
pub use storage::{load_json, save_json, KeyValueStorage, MemoryStorage, StorageError};
pub use validation::{FieldError, FormField};
