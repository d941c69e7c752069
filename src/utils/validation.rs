// ============================================================================
// VALIDATION - Field rules shared by every form
// ============================================================================

use thiserror::Error;

/// Characters rejected in every free-text field
pub const RESTRICTED_CHARACTERS: [char; 8] = ['<', '>', '\'', '"', '%', ';', '|', '&'];

/// Every input the account and classroom forms expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FullName,
    Email,
    Username,
    Password,
    ConfirmPassword,
    ClassTitle,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "Fullname",
            FormField::Email => "Email",
            FormField::Username => "Username or email",
            FormField::Password => "Password",
            FormField::ConfirmPassword => "Confirm password",
            FormField::ClassTitle => "Class name",
        }
    }

    /// Name the host page uses for the input
    pub fn name(&self) -> &'static str {
        match self {
            FormField::FullName => "full_name",
            FormField::Email => "email",
            FormField::Username => "username",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirm_password",
            FormField::ClassTitle => "class_title",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full_name" => Some(FormField::FullName),
            "email" => Some(FormField::Email),
            "username" => Some(FormField::Username),
            "password" => Some(FormField::Password),
            "confirm_password" => Some(FormField::ConfirmPassword),
            "class_title" => Some(FormField::ClassTitle),
            _ => None,
        }
    }

    /// Credential-style fields are single tokens; names and titles are not
    pub fn allows_whitespace(&self) -> bool {
        matches!(self, FormField::FullName | FormField::ClassTitle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} contains restricted characters")]
    RestrictedCharacters(&'static str),
    #[error("Passwords must match")]
    PasswordMismatch,
    /// Message handed back by the backend for this field
    #[error("{0}")]
    Rejected(String),
}

pub fn contains_restricted(value: &str, allow_whitespace: bool) -> bool {
    value
        .chars()
        .any(|c| RESTRICTED_CHARACTERS.contains(&c) || (!allow_whitespace && c.is_whitespace()))
}

pub fn validate_field(field: FormField, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required(field.label()));
    }
    if contains_restricted(value, field.allows_whitespace()) {
        return Err(FieldError::RestrictedCharacters(field.label()));
    }
    Ok(())
}

/// Confirm-password rule: field rules first, then equality with the password
pub fn validate_confirmation(password: &str, confirm: &str) -> Result<(), FieldError> {
    validate_field(FormField::ConfirmPassword, confirm)?;
    if password != confirm {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_restricted_character_is_rejected() {
        for c in RESTRICTED_CHARACTERS {
            let value = format!("abc{}def", c);
            for field in [
                FormField::FullName,
                FormField::Email,
                FormField::Username,
                FormField::Password,
                FormField::ClassTitle,
            ] {
                assert_eq!(
                    validate_field(field, &value),
                    Err(FieldError::RestrictedCharacters(field.label())),
                    "{:?} accepted {:?}",
                    field,
                    value
                );
            }
        }
    }

    #[test]
    fn restricted_message_names_the_field() {
        let err = validate_field(FormField::Password, "pa;ss").unwrap_err();
        assert_eq!(err.to_string(), "Password contains restricted characters");
    }

    #[test]
    fn blank_values_are_required() {
        assert_eq!(
            validate_field(FormField::Email, ""),
            Err(FieldError::Required("Email"))
        );
        assert_eq!(
            validate_field(FormField::FullName, "   "),
            Err(FieldError::Required("Fullname"))
        );
        assert_eq!(
            FieldError::Required("Email").to_string(),
            "Email is required"
        );
    }

    #[test]
    fn whitespace_only_allowed_in_names_and_titles() {
        assert!(validate_field(FormField::FullName, "Asha Gurung").is_ok());
        assert!(validate_field(FormField::ClassTitle, "Science for Grade 1").is_ok());
        assert!(validate_field(FormField::Username, "asha gurung").is_err());
        assert!(validate_field(FormField::Password, "Secret 1").is_err());
    }

    #[test]
    fn confirmation_requires_equal_values() {
        assert_eq!(
            validate_confirmation("Secret1", "Secret2"),
            Err(FieldError::PasswordMismatch)
        );
        assert_eq!(
            FieldError::PasswordMismatch.to_string(),
            "Passwords must match"
        );
        assert!(validate_confirmation("Secret1", "Secret1").is_ok());
    }

    #[test]
    fn confirmation_still_applies_character_rule() {
        assert_eq!(
            validate_confirmation("a|b", "a|b"),
            Err(FieldError::RestrictedCharacters("Confirm password"))
        );
    }

    #[test]
    fn field_names_round_trip() {
        for field in [
            FormField::FullName,
            FormField::Email,
            FormField::Username,
            FormField::Password,
            FormField::ConfirmPassword,
            FormField::ClassTitle,
        ] {
            assert_eq!(FormField::from_name(field.name()), Some(field));
        }
        assert_eq!(FormField::from_name("nickname"), None);
    }
}
