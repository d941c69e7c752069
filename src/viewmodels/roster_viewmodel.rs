// ============================================================================
// ROSTER VIEWMODEL - Search, sort and multi-select over a class roster
// ============================================================================
// Pure: no I/O. The class view feeds it the fetched list.
// ============================================================================

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::models::StudentRecord;

thread_local! {
    /// Root collation order, the one browsers use for `localeCompare`
    static COLLATOR: Option<Collator> = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            log::warn!("⚠️ [ROSTER] Collator unavailable, sorting by case-folded text: {:?}", e);
            None
        }
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterViewModel {
    students: Vec<StudentRecord>,
    search: String,
    direction: SortDirection,
    /// Usernames, in the order they were ticked
    selected: Vec<String>,
}

impl RosterViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the roster. Selections of students no longer listed are dropped.
    pub fn set_students(&mut self, students: Vec<StudentRecord>) {
        self.selected
            .retain(|username| students.iter().any(|s| &s.username == username));
        self.students = students;
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    /// Filtered then sorted rows, as displayed
    pub fn visible(&self) -> Vec<StudentRecord> {
        let mut rows = filter_students(&self.students, &self.search);
        sort_students(&mut rows, self.direction);
        rows
    }

    pub fn toggle_selected(&mut self, username: &str) {
        if let Some(pos) = self.selected.iter().position(|u| u == username) {
            self.selected.remove(pos);
        } else if self.students.iter().any(|s| s.username == username) {
            self.selected.push(username.to_string());
        }
    }

    pub fn is_selected(&self, username: &str) -> bool {
        self.selected.iter().any(|u| u == username)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

/// Case-insensitive substring match on the full name. The term is used as
/// typed; only an empty term shows everyone.
pub fn filter_students(students: &[StudentRecord], term: &str) -> Vec<StudentRecord> {
    let needle = term.to_lowercase();
    students
        .iter()
        .filter(|s| needle.is_empty() || s.full_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn sort_students(students: &mut [StudentRecord], direction: SortDirection) {
    students.sort_by(|a, b| {
        let order = locale_cmp(&a.full_name, &b.full_name).then_with(|| a.username.cmp(&b.username));
        match direction {
            SortDirection::Ascending => order,
            SortDirection::Descending => order.reverse(),
        }
    });
}

/// Collation order (accents sort next to their base letter), with a
/// byte-wise tie-break so the order is total
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new("carol Singh", "u3"),
            StudentRecord::new("Bob Rai", "u2"),
            StudentRecord::new("Alice Thapa", "u1"),
            StudentRecord::new("Caroline Shah", "u4"),
        ]
    }

    fn names(rows: &[StudentRecord]) -> Vec<&str> {
        rows.iter().map(|s| s.full_name.as_str()).collect()
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let rows = filter_students(&roster(), "CAROL");
        assert_eq!(names(&rows), vec!["carol Singh", "Caroline Shah"]);

        let all = filter_students(&roster(), "");
        assert_eq!(all.len(), 4);

        for row in filter_students(&roster(), "a") {
            assert!(row.full_name.to_lowercase().contains('a'));
        }
        assert!(filter_students(&roster(), "zzz").is_empty());
    }

    #[test]
    fn sort_ignores_case_and_reverses() {
        let mut vm = RosterViewModel::new();
        vm.set_students(roster());
        assert_eq!(
            names(&vm.visible()),
            vec!["Alice Thapa", "Bob Rai", "carol Singh", "Caroline Shah"]
        );

        vm.toggle_direction();
        assert_eq!(
            names(&vm.visible()),
            vec!["Caroline Shah", "carol Singh", "Bob Rai", "Alice Thapa"]
        );
    }

    #[test]
    fn filter_keeps_spaces_in_the_term() {
        let students = vec![
            StudentRecord::new("Bobby", "u1"),
            StudentRecord::new("Bob Rai", "u2"),
        ];
        assert_eq!(names(&filter_students(&students, "b ")), vec!["Bob Rai"]);
        assert_eq!(names(&filter_students(&students, " ")), vec!["Bob Rai"]);
        assert_eq!(filter_students(&students, "").len(), 2);
    }

    #[test]
    fn locale_cmp_is_total() {
        assert_ne!(locale_cmp("bob", "Bob"), Ordering::Equal);
        assert_eq!(locale_cmp("bob", "Bob"), locale_cmp("Bob", "bob").reverse());
        assert_eq!(locale_cmp("Bob", "Bob"), Ordering::Equal);
        assert_eq!(locale_cmp("alice", "Bob"), Ordering::Less);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        assert_eq!(locale_cmp("Émile", "Zoe"), Ordering::Less);
        assert_eq!(locale_cmp("Émile", "Emma"), Ordering::Less);

        let mut students = vec![
            StudentRecord::new("Zoe", "u1"),
            StudentRecord::new("Émile", "u2"),
            StudentRecord::new("Anil", "u3"),
        ];
        sort_students(&mut students, SortDirection::Ascending);
        assert_eq!(names(&students), vec!["Anil", "Émile", "Zoe"]);

        sort_students(&mut students, SortDirection::Descending);
        assert_eq!(names(&students), vec!["Zoe", "Émile", "Anil"]);
    }

    #[test]
    fn equal_names_fall_back_to_username() {
        let mut students = vec![
            StudentRecord::new("Asha", "u9"),
            StudentRecord::new("Asha", "u2"),
        ];
        sort_students(&mut students, SortDirection::Ascending);
        assert_eq!(students[0].username, "u2");
    }

    #[test]
    fn search_then_sort_combine() {
        let mut vm = RosterViewModel::new();
        vm.set_students(roster());
        vm.set_search("ar");
        vm.set_direction(SortDirection::Descending);
        assert_eq!(names(&vm.visible()), vec!["Caroline Shah", "carol Singh"]);
    }

    #[test]
    fn selection_toggles_and_is_pruned_on_refetch() {
        let mut vm = RosterViewModel::new();
        vm.set_students(roster());

        vm.toggle_selected("u1");
        vm.toggle_selected("u2");
        vm.toggle_selected("ghost");
        assert_eq!(vm.selected(), ["u1".to_string(), "u2".to_string()]);

        vm.toggle_selected("u1");
        assert!(!vm.is_selected("u1"));
        assert!(vm.has_selection());

        vm.set_students(vec![StudentRecord::new("Alice Thapa", "u1")]);
        assert!(!vm.has_selection());
    }
}
