// ============================================================================
// CREATION RESULT STORE - One-shot hand-off to the "students created" screen
// ============================================================================

use std::rc::Rc;

use crate::models::StudentCreationResult;
use crate::utils::constants::STORAGE_KEY_STUDENT_CREATION;
use crate::utils::storage::{load_json, save_json, KeyValueStorage, StorageError};

#[derive(Clone)]
pub struct CreationResultStore {
    storage: Rc<dyn KeyValueStorage>,
}

impl CreationResultStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn save(&self, result: &StudentCreationResult) -> Result<(), StorageError> {
        save_json(self.storage.as_ref(), STORAGE_KEY_STUDENT_CREATION, result)
    }

    /// Reads and discards. A second call returns `None`.
    pub fn take(&self) -> Option<StudentCreationResult> {
        let result = load_json(self.storage.as_ref(), STORAGE_KEY_STUDENT_CREATION);
        if let Err(e) = self.storage.remove(STORAGE_KEY_STUDENT_CREATION) {
            log::warn!("⚠️ [CREATION] Could not discard result: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreatedStudent;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn result_is_readable_once() {
        let store = CreationResultStore::new(Rc::new(MemoryStorage::new()));
        let result = StudentCreationResult {
            class_title: Some("Grade 3".to_string()),
            students: vec![CreatedStudent {
                full_name: "Bob".to_string(),
                username: "bob42".to_string(),
                password: "p4ss".to_string(),
            }],
            file_url: Some("/media/created.csv".to_string()),
        };

        store.save(&result).unwrap();
        assert_eq!(store.take(), Some(result));
        assert_eq!(store.take(), None);
    }
}
