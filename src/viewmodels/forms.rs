// ============================================================================
// FORMS - Per-field validation state shared by every form screen
// ============================================================================

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::state::ReactiveState;
use crate::utils::validation::{validate_confirmation, validate_field, FieldError, FormField};

/// Values behind one form
pub trait FormModel: Clone + Default {
    const FIELDS: &'static [FormField];

    fn value(&self, field: FormField) -> &str;

    fn value_mut(&mut self, field: FormField) -> Option<&mut String>;

    fn validate(&self, field: FormField) -> Result<(), FieldError> {
        match field {
            FormField::ConfirmPassword => {
                validate_confirmation(self.value(FormField::Password), self.value(field))
            }
            _ => validate_field(field, self.value(field)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState<M> {
    pub values: M,
    errors: BTreeMap<FormField, FieldError>,
    touched: BTreeSet<FormField>,
    submitting: bool,
    status: Option<String>,
}

impl<M: FormModel> FormState<M> {
    pub fn new() -> Self {
        Self {
            values: M::default(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            submitting: false,
            status: None,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.value(field)
    }

    /// Input event: store and re-check the field
    pub fn change(&mut self, field: FormField, value: &str) {
        let Some(slot) = self.values.value_mut(field) else {
            log::warn!("⚠️ [FORM] {:?} is not part of this form", field);
            return;
        };
        *slot = value.to_string();
        self.touched.insert(field);
        self.revalidate(field);
        // The confirmation depends on the password
        if field == FormField::Password && self.touched.contains(&FormField::ConfirmPassword) {
            self.revalidate(FormField::ConfirmPassword);
        }
    }

    pub fn blur(&mut self, field: FormField) {
        if M::FIELDS.contains(&field) {
            self.touched.insert(field);
            self.revalidate(field);
        }
    }

    /// Sets a value without marking the field touched (prefill)
    pub fn prefill(&mut self, field: FormField, value: &str) {
        if let Some(slot) = self.values.value_mut(field) {
            *slot = value.to_string();
        }
    }

    /// Checks every field and shows every error
    pub fn validate(&mut self) -> bool {
        for field in M::FIELDS {
            self.touched.insert(*field);
            self.revalidate(*field);
        }
        self.errors.is_empty()
    }

    pub fn error(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Error text once the user has interacted with the field
    pub fn visible_error(&self, field: FormField) -> Option<String> {
        if self.touched.contains(&field) {
            self.errors.get(&field).map(ToString::to_string)
        } else {
            None
        }
    }

    /// Server-side rejection pinned to one field
    pub fn set_field_error(&mut self, field: FormField, message: impl Into<String>) {
        self.touched.insert(field);
        self.errors.insert(field, FieldError::Rejected(message.into()));
    }

    /// Submit button state
    pub fn can_submit(&self) -> bool {
        !self.submitting && M::FIELDS.iter().all(|f| self.values.validate(*f).is_ok())
    }

    /// Gate before dispatch. False while a submit is running or any field fails.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting || !self.validate() {
            return false;
        }
        self.submitting = true;
        self.status = None;
        true
    }

    pub fn finish_submit(&mut self, status: Option<String>) {
        self.submitting = false;
        self.status = status;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Form-level message (server error or confirmation)
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn revalidate(&mut self, field: FormField) {
        match self.values.validate(field) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(e) => {
                self.errors.insert(field, e);
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username_or_email: String,
    pub password: String,
}

impl FormModel for LoginForm {
    const FIELDS: &'static [FormField] = &[FormField::Username, FormField::Password];

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username_or_email,
            FormField::Password => &self.password,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Username => Some(&mut self.username_or_email),
            FormField::Password => Some(&mut self.password),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormModel for SignupForm {
    const FIELDS: &'static [FormField] = &[
        FormField::FullName,
        FormField::Email,
        FormField::Password,
        FormField::ConfirmPassword,
    ];

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::FullName => Some(&mut self.full_name),
            FormField::Email => Some(&mut self.email),
            FormField::Password => Some(&mut self.password),
            FormField::ConfirmPassword => Some(&mut self.confirm_password),
            _ => None,
        }
    }
}

/// Forgot password / resend confirmation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmailForm {
    pub email: String,
}

impl FormModel for EmailForm {
    const FIELDS: &'static [FormField] = &[FormField::Email];

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.email,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Email => Some(&mut self.email),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl FormModel for ResetPasswordForm {
    const FIELDS: &'static [FormField] = &[FormField::Password, FormField::ConfirmPassword];

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Password => Some(&mut self.password),
            FormField::ConfirmPassword => Some(&mut self.confirm_password),
            _ => None,
        }
    }
}

/// Create class and edit title
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassTitleForm {
    pub title: String,
}

impl FormModel for ClassTitleForm {
    const FIELDS: &'static [FormField] = &[FormField::ClassTitle];

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::ClassTitle => &self.title,
            _ => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::ClassTitle => Some(&mut self.title),
            _ => None,
        }
    }
}

/// What a form screen renders, keyed by field name
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FormView {
    pub values: BTreeMap<&'static str, String>,
    /// Only errors of fields the user has touched
    pub errors: BTreeMap<&'static str, String>,
    pub status: Option<String>,
    pub submitting: bool,
    pub can_submit: bool,
}

impl<M: FormModel> FormState<M> {
    pub fn view(&self) -> FormView {
        FormView {
            values: M::FIELDS
                .iter()
                .map(|f| (f.name(), self.value(*f).to_string()))
                .collect(),
            errors: M::FIELDS
                .iter()
                .filter_map(|f| self.visible_error(*f).map(|e| (f.name(), e)))
                .collect(),
            status: self.status.clone(),
            submitting: self.submitting,
            can_submit: self.can_submit(),
        }
    }
}

/// Input events for a form without knowing its model
pub trait FormHandle {
    fn change(&self, field: FormField, value: &str);
    fn blur(&self, field: FormField);
    fn view(&self) -> FormView;
}

impl<M: FormModel> FormHandle for ReactiveState<FormState<M>> {
    fn change(&self, field: FormField, value: &str) {
        self.update(|form| form.change(field, value));
    }

    fn blur(&self, field: FormField) {
        self.update(|form| form.blur(field));
    }

    fn view(&self) -> FormView {
        self.with(FormState::view)
    }
}
