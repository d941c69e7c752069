// ============================================================================
// STUDENT STAGING - Draft rows for batch student creation
// ============================================================================
// Manual rows, "+N rows" and CSV import all share one cap.
// ============================================================================

use thiserror::Error;

use crate::config::ImportConfig;
use crate::models::DraftStudentRow;
use crate::utils::csv::first_column;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Please add at least one student name.")]
    EmptyBatch,
    #[error("A class can be staged with at most {0} students")]
    LimitReached(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudentStaging {
    rows: Vec<DraftStudentRow>,
    max_rows: usize,
    bulk_rows: usize,
}

impl StudentStaging {
    /// Starts with a single empty row
    pub fn new(limits: &ImportConfig) -> Self {
        Self {
            rows: vec![DraftStudentRow::default()],
            max_rows: limits.max_rows,
            bulk_rows: limits.bulk_rows,
        }
    }

    pub fn rows(&self) -> &[DraftStudentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.max_rows
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn add_row(&mut self) -> Result<(), ImportError> {
        if self.is_full() {
            return Err(ImportError::LimitReached(self.max_rows));
        }
        self.rows.push(DraftStudentRow::default());
        Ok(())
    }

    /// Adds `bulk_rows` empty rows, truncated at the cap. Returns how many were added.
    pub fn add_bulk_rows(&mut self) -> usize {
        let room = self.max_rows.saturating_sub(self.rows.len());
        let added = self.bulk_rows.min(room);
        self.rows
            .extend(std::iter::repeat_with(DraftStudentRow::default).take(added));
        added
    }

    /// Appends the first column of every CSV line, truncated at the cap.
    /// Returns how many rows were added.
    pub fn import_csv(&mut self, text: &str) -> usize {
        let names = first_column(text);
        let room = self.max_rows.saturating_sub(self.rows.len());
        let added = names.len().min(room);
        if added < names.len() {
            log::warn!(
                "⚠️ [STAGING] CSV has {} names, only {} fit",
                names.len(),
                added
            );
        }
        self.rows
            .extend(names.into_iter().take(added).map(DraftStudentRow::new));
        added
    }

    pub fn set_name(&mut self, index: usize, name: &str) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Removing the last row leaves one empty row behind
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        if self.rows.is_empty() {
            self.rows.push(DraftStudentRow::default());
        }
        true
    }

    /// Trimmed, non-blank names in row order
    pub fn submission_batch(&self) -> Result<Vec<String>, ImportError> {
        let names: Vec<String> = self
            .rows
            .iter()
            .filter(|row| !row.is_blank())
            .map(|row| row.name.trim().to_string())
            .collect();
        if names.is_empty() {
            return Err(ImportError::EmptyBatch);
        }
        Ok(names)
    }

    pub fn reset(&mut self) {
        self.rows = vec![DraftStudentRow::default()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staging() -> StudentStaging {
        StudentStaging::new(&ImportConfig::default())
    }

    fn staging_with(n: usize) -> StudentStaging {
        let mut s = staging();
        while s.len() < n {
            s.add_row().unwrap();
        }
        s
    }

    #[test]
    fn starts_with_one_empty_row() {
        let s = staging();
        assert_eq!(s.len(), 1);
        assert!(s.rows()[0].is_blank());
    }

    #[test]
    fn bulk_add_truncates_at_cap() {
        for n in [1, 50, 94, 95, 96, 99, 100] {
            let mut s = staging_with(n);
            s.add_bulk_rows();
            assert_eq!(s.len(), (n + 5).min(100), "starting from {}", n);
        }
    }

    #[test]
    fn csv_import_truncates_at_cap() {
        for (n, k) in [(1, 3), (90, 20), (100, 1), (10, 0)] {
            let mut s = staging_with(n);
            let csv: String = (0..k).map(|i| format!("Student {},extra\n", i)).collect();
            s.import_csv(&csv);
            assert_eq!(s.len(), (n + k).min(100), "n={} k={}", n, k);
        }
    }

    #[test]
    fn single_add_stops_at_cap() {
        let mut s = staging_with(100);
        assert_eq!(s.add_row(), Err(ImportError::LimitReached(100)));
        assert_eq!(s.len(), 100);
    }

    #[test]
    fn submission_drops_blank_names() {
        let mut s = staging();
        s.set_name(0, "Bob");
        for name in ["", "  ", "Carol"] {
            s.add_row().unwrap();
            let last = s.len() - 1;
            s.set_name(last, name);
        }
        assert_eq!(
            s.submission_batch().unwrap(),
            vec!["Bob".to_string(), "Carol".to_string()]
        );
    }

    #[test]
    fn submitted_names_are_trimmed() {
        let mut s = staging();
        s.set_name(0, "  Bob Rai ");
        s.add_row().unwrap();
        s.set_name(1, "\tCarol");
        assert_eq!(
            s.submission_batch().unwrap(),
            vec!["Bob Rai".to_string(), "Carol".to_string()]
        );
    }

    #[test]
    fn all_blank_batch_is_rejected() {
        let mut s = staging();
        s.add_row().unwrap();
        s.set_name(1, "   ");
        let err = s.submission_batch().unwrap_err();
        assert_eq!(err, ImportError::EmptyBatch);
        assert_eq!(err.to_string(), "Please add at least one student name.");
    }

    #[test]
    fn csv_rows_append_after_existing_rows() {
        let mut s = staging();
        s.set_name(0, "Asha");
        let added = s.import_csv("\u{feff}\"Rai, Bikash\",5\nSita\n\n");
        assert_eq!(added, 2);
        let names: Vec<_> = s.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "Rai, Bikash", "Sita"]);
    }

    #[test]
    fn removing_last_row_keeps_an_empty_one() {
        let mut s = staging();
        s.set_name(0, "Bob");
        assert!(s.remove_row(0));
        assert_eq!(s.len(), 1);
        assert!(s.rows()[0].is_blank());
        assert!(!s.remove_row(3));
    }
}
