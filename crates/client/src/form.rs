use std::str::FromStr;

use authors_app::{Author, AuthorInput};
use thiserror::Error;

/// Editable fields of the author form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    First,
    Last,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "first" => Ok(FormField::First),
            "last" => Ok(FormField::Last),
            "email" => Ok(FormField::Email),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Whether a submit creates a new author or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// The single create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorForm {
    /// `None` in create mode, the edited author's id otherwise
    pub id: Option<i64>,
    pub first: String,
    pub last: String,
    pub email: String,
}

impl AuthorForm {
    pub fn mode(&self) -> FormMode {
        match self.id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::First => self.first = value,
            FormField::Last => self.last = value,
            FormField::Email => self.email = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::First => &self.first,
            FormField::Last => &self.last,
            FormField::Email => &self.email,
        }
    }

    /// Copy `author` into the form and switch to edit mode.
    pub fn load(&mut self, author: &Author) {
        self.id = Some(author.id);
        self.first = author.first.clone();
        self.last = author.last.clone();
        self.email = author.email.clone();
    }

    /// Empty every field and return to create mode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_input(&self) -> AuthorInput {
        AuthorInput::new(&*self.first, &*self.last, &*self.email)
    }
}
