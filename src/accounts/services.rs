use lazy_static::lazy_static;
use regex::Regex;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Collects field problems for one request, in field order.
#[derive(Debug, Default)]
pub(crate) struct Validation {
    problems: Vec<String>,
}

impl Validation {
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.is_empty() {
            self.problems
                .push(format!("field {field} is a required field"));
        }
        self
    }

    /// Required and shaped like an email address.
    pub fn email(self, field: &str, value: &str) -> Self {
        let mut this = self.required(field, value);
        if !value.is_empty() && !is_valid_email(value) {
            this.problems
                .push(format!("field {field} is not a valid email"));
        }
        this
    }

    pub fn finish(self) -> Result<(), String> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(self.problems.join(", "))
        }
    }
}
