use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern");
    static ref USERNAME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*$").expect("username pattern");
    static ref NO_WHITESPACE: Regex = Regex::new(r"^\S+$").expect("password pattern");
    static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").expect("uppercase pattern");
    static ref DIGIT: Regex = Regex::new(r"[0-9]").expect("digit pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Username,
    Password,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Email, Field::Username, Field::Password];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Username => "Username",
            Field::Password => "Password",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Field::Email => Field::Username,
            Field::Username => Field::Password,
            Field::Password => Field::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Field::Email => Field::Password,
            Field::Username => Field::Email,
            Field::Password => Field::Username,
        }
    }

    fn required_message(&self) -> &'static str {
        match self {
            Field::Email => "Email is required",
            Field::Username => "Username is required",
            Field::Password => "Password is required",
        }
    }

    fn pattern_message(&self) -> &'static str {
        match self {
            Field::Email => "Please enter a valid email address",
            Field::Username => {
                "Username must contain only English characters and numbers, and cannot start with a number"
            }
            Field::Password => {
                "Password must contain at least 1 uppercase letter, 1 number, and no spaces"
            }
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Field::Email => EMAIL.is_match(value),
            Field::Username => USERNAME.is_match(value),
            Field::Password => {
                NO_WHITESPACE.is_match(value) && UPPERCASE.is_match(value) && DIGIT.is_match(value)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    Pattern,
}

pub fn validate(field: Field, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !field.matches(value) {
        return Err(FieldError::Pattern);
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
struct FieldState {
    value: String,
    touched: bool,
}

/// A successfully validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(Registration),
    Rejected,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    email: FieldState,
    username: FieldState,
    password: FieldState,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Email => &self.email,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Email => &mut self.email,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.field(field).value
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.field_mut(field).value = value.into();
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.field_mut(field).value.push(c);
    }

    pub fn pop_char(&mut self, field: Field) {
        self.field_mut(field).value.pop();
    }

    /// Marks a field as visited so its errors start showing.
    pub fn touch(&mut self, field: Field) {
        self.field_mut(field).touched = true;
    }

    pub fn is_touched(&self) -> bool {
        Field::ALL.iter().any(|f| self.field(*f).touched)
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL
            .iter()
            .all(|f| validate(*f, self.value(*f)).is_ok())
    }

    /// The message to show under a field, once it has been touched.
    pub fn error_message(&self, field: Field) -> Option<&'static str> {
        let state = self.field(field);
        if !state.touched {
            return None;
        }
        match validate(field, &state.value) {
            Ok(()) => None,
            Err(FieldError::Required) => Some(field.required_message()),
            Err(FieldError::Pattern) => Some(field.pattern_message()),
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.is_valid() {
            for field in Field::ALL {
                self.touch(field);
            }
            return SubmitOutcome::Rejected;
        }

        let registration = Registration {
            email: self.email.value.clone(),
            username: self.username.value.clone(),
            password: self.password.value.clone(),
        };
        self.reset();
        SubmitOutcome::Accepted(registration)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(email: &str, username: &str, password: &str) -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_value(Field::Email, email);
        form.set_value(Field::Username, username);
        form.set_value(Field::Password, password);
        form
    }

    #[test]
    fn test_email_validation() {
        assert_eq!(validate(Field::Email, "user@example.com"), Ok(()));
        assert_eq!(validate(Field::Email, "first.last+tag@mail.co.uk"), Ok(()));
        assert_eq!(validate(Field::Email, "user.example.com"), Err(FieldError::Pattern));
        assert_eq!(validate(Field::Email, "user@example"), Err(FieldError::Pattern));
        assert_eq!(validate(Field::Email, ""), Err(FieldError::Required));
    }

    #[test]
    fn test_username_validation() {
        assert_eq!(validate(Field::Username, "alice42"), Ok(()));
        assert_eq!(validate(Field::Username, "42alice"), Err(FieldError::Pattern));
        assert_eq!(validate(Field::Username, "alice_42"), Err(FieldError::Pattern));
        assert_eq!(validate(Field::Username, "ålice"), Err(FieldError::Pattern));
    }

    #[test]
    fn test_password_validation() {
        assert_eq!(validate(Field::Password, "Secret123"), Ok(()));
        assert_eq!(validate(Field::Password, "secret123"), Err(FieldError::Pattern));
        assert_eq!(validate(Field::Password, "SecretABC"), Err(FieldError::Pattern));
        assert_eq!(validate(Field::Password, "Secret 123"), Err(FieldError::Pattern));
        assert_eq!(validate(Field::Password, ""), Err(FieldError::Required));
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = RegistrationForm::new();
        assert_eq!(form.error_message(Field::Email), None);

        form.touch(Field::Email);

        assert_eq!(form.error_message(Field::Email), Some("Email is required"));
        assert_eq!(form.error_message(Field::Username), None);
    }

    #[test]
    fn test_invalid_submit_marks_all_fields_touched() {
        let mut form = filled("no-at-sign", "1user", "password");

        assert_eq!(form.submit(), SubmitOutcome::Rejected);

        assert_eq!(
            form.error_message(Field::Email),
            Some("Please enter a valid email address")
        );
        assert!(form.error_message(Field::Username).is_some());
        assert!(form.error_message(Field::Password).is_some());
        assert_eq!(form.value(Field::Email), "no-at-sign");
    }

    #[test]
    fn test_valid_submit_resets_form() {
        let mut form = filled("user@example.com", "alice", "Secret123");
        form.touch(Field::Email);

        let outcome = form.submit();

        assert_eq!(
            outcome,
            SubmitOutcome::Accepted(Registration {
                email: "user@example.com".to_string(),
                username: "alice".to_string(),
                password: "Secret123".to_string(),
            })
        );
        assert_eq!(form.value(Field::Email), "");
        assert!(!form.is_touched());
    }

    #[test]
    fn test_editing_values() {
        let mut form = RegistrationForm::new();
        for c in "bobx".chars() {
            form.push_char(Field::Username, c);
        }
        form.pop_char(Field::Username);

        assert_eq!(form.value(Field::Username), "bob");
        assert_eq!(Field::Password.next(), Field::Email);
        assert_eq!(Field::Email.prev(), Field::Password);
    }
}
