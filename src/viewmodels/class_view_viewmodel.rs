// ============================================================================
// CLASS VIEW VIEWMODEL - One classroom: detail, title edit, roster actions
// ============================================================================
// Bulk remove refetches detail + roster. "Add to another class" goes through
// an explicit TransferDraft held here until the teacher confirms.
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::app::Route;
use crate::models::{ClassDetail, ClassSummary, StudentBatchRequest, StudentRecord};
use crate::services::{ClassroomService, HttpTransport};
use crate::state::{ReactiveState, RequestHandle};
use crate::utils::validation::FormField;
use crate::viewmodels::forms::{ClassTitleForm, FormState};
use crate::viewmodels::roster_viewmodel::RosterViewModel;

/// Students picked for "add to another class", waiting for a target
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransferDraft {
    pub source_code: String,
    pub usernames: Vec<String>,
    pub target_code: Option<String>,
}

pub struct ClassViewModel<T> {
    service: ClassroomService<T>,
    code: ReactiveState<Option<String>>,
    pub detail: RequestHandle<ClassDetail>,
    pub students: RequestHandle<Vec<StudentRecord>>,
    pub update_title: RequestHandle<Value>,
    pub remove: RequestHandle<Value>,
    pub transfer: RequestHandle<Value>,
    pub class_options: RequestHandle<Vec<ClassSummary>>,
    pub roster: ReactiveState<RosterViewModel>,
    pub title_form: ReactiveState<FormState<ClassTitleForm>>,
    pub editing_title: ReactiveState<bool>,
    pub transfer_draft: ReactiveState<Option<TransferDraft>>,
}

impl<T> Clone for ClassViewModel<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            code: self.code.clone(),
            detail: self.detail.clone(),
            students: self.students.clone(),
            update_title: self.update_title.clone(),
            remove: self.remove.clone(),
            transfer: self.transfer.clone(),
            class_options: self.class_options.clone(),
            roster: self.roster.clone(),
            title_form: self.title_form.clone(),
            editing_title: self.editing_title.clone(),
            transfer_draft: self.transfer_draft.clone(),
        }
    }
}

impl<T: HttpTransport> ClassViewModel<T> {
    pub fn new(service: ClassroomService<T>) -> Self {
        Self {
            service,
            code: ReactiveState::new(None),
            detail: RequestHandle::new("class_detail"),
            students: RequestHandle::new("list_students"),
            update_title: RequestHandle::new("update_class"),
            remove: RequestHandle::new("remove_students"),
            transfer: RequestHandle::new("add_students"),
            class_options: RequestHandle::new("class_picker"),
            roster: ReactiveState::new(RosterViewModel::new()),
            title_form: ReactiveState::new(FormState::new()),
            editing_title: ReactiveState::new(false),
            transfer_draft: ReactiveState::new(None),
        }
    }

    pub fn code(&self) -> Option<String> {
        self.code.snapshot()
    }

    pub async fn enter(&self, code: &str) -> Option<Route> {
        self.leave();
        self.code.set(Some(code.to_string()));
        self.refresh().await
    }

    /// Everything this screen dispatched is dropped if it lands later
    pub fn leave(&self) {
        self.detail.reset();
        self.students.reset();
        self.update_title.reset();
        self.remove.reset();
        self.transfer.reset();
        self.class_options.reset();
        self.roster.set(RosterViewModel::new());
        self.title_form.update(|form| form.reset());
        self.editing_title.set(false);
        self.transfer_draft.set(None);
        self.code.set(None);
    }

    /// Detail, then roster. A rejected token stops here and heads to login.
    pub async fn refresh(&self) -> Option<Route> {
        let code = self.code()?;
        let detail = self.detail.run(self.service.class_details(&code)).await?;
        if matches!(&detail, Err(e) if e.is_unauthorized()) {
            return Some(Route::Login);
        }
        if let Ok(envelope) = self.students.run(self.service.list_students(&code)).await? {
            let students = envelope.data.unwrap_or_default();
            self.roster.update(|roster| roster.set_students(students));
        }
        None
    }

    // ------------------------------------------------------------------
    // Title edit
    // ------------------------------------------------------------------

    pub fn start_edit_title(&self) {
        let current = self
            .detail
            .data()
            .map(|d| d.title)
            .unwrap_or_default();
        self.title_form.update(|form| {
            form.reset();
            form.prefill(FormField::ClassTitle, &current);
        });
        self.editing_title.set(true);
    }

    pub fn cancel_edit_title(&self) {
        self.editing_title.set(false);
        self.title_form.update(|form| form.reset());
    }

    pub async fn submit_title(&self) -> Option<Route> {
        let code = self.code()?;
        let title = self.title_form.update(|form| {
            form.begin_submit()
                .then(|| form.values.title.trim().to_string())
        })?;

        let outcome = self
            .update_title
            .run(self.service.update_title(&code, &title))
            .await?;
        match outcome {
            Ok(envelope) if envelope.success => {
                self.title_form.update(|form| form.finish_submit(None));
                self.editing_title.set(false);
                self.detail.run(self.service.class_details(&code)).await?;
            }
            Ok(envelope) => self.title_form.update(|form| form.finish_submit(envelope.message)),
            Err(error) => self
                .title_form
                .update(|form| form.finish_submit(Some(error.message()))),
        }
        None
    }

    // ------------------------------------------------------------------
    // Bulk actions
    // ------------------------------------------------------------------

    /// Removes the selected students, then refetches detail and roster
    pub async fn remove_selected(&self) -> Option<Route> {
        let code = self.code()?;
        let usernames = self.roster.with(|r| r.selected().to_vec());
        if usernames.is_empty() || self.remove.is_loading() {
            return None;
        }

        let request = StudentBatchRequest {
            class_code: code,
            students: usernames,
        };
        let outcome = self.remove.run(self.service.remove_students(&request)).await?;
        if matches!(&outcome, Ok(envelope) if envelope.success) {
            self.roster.update(|r| r.clear_selection());
            return self.refresh().await;
        }
        None
    }

    /// Snapshots the selection into a draft and loads the class picker
    pub async fn open_transfer(&self) -> Option<Route> {
        let source_code = self.code()?;
        let usernames = self.roster.with(|r| r.selected().to_vec());
        if usernames.is_empty() {
            return None;
        }
        self.transfer.reset();
        self.transfer_draft.set(Some(TransferDraft {
            source_code,
            usernames,
            target_code: None,
        }));
        self.class_options.run(self.service.list_classes()).await?;
        None
    }

    /// Classes the students can be added to (the current one excluded)
    pub fn transfer_options(&self) -> Vec<ClassSummary> {
        let current = self.code();
        self.class_options
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter(|c| Some(&c.code) != current.as_ref())
            .collect()
    }

    pub fn choose_transfer_target(&self, code: &str) {
        self.transfer_draft.update(|draft| {
            if let Some(draft) = draft {
                draft.target_code = Some(code.to_string());
            }
        });
    }

    pub async fn confirm_transfer(&self) -> Option<Route> {
        let draft = self.transfer_draft.snapshot()?;
        let target = draft.target_code.clone()?;
        if self.transfer.is_loading() {
            return None;
        }

        let request = StudentBatchRequest {
            class_code: target,
            students: draft.usernames,
        };
        let outcome = self.transfer.run(self.service.add_students(&request)).await?;
        if matches!(&outcome, Ok(envelope) if envelope.success) {
            self.roster.update(|r| r.clear_selection());
            self.transfer_draft.set(None);
        }
        None
    }

    pub fn cancel_transfer(&self) {
        self.transfer_draft.set(None);
        self.transfer.reset();
    }
}
