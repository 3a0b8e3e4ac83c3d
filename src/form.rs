use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormKind {
  Login,
  NewStory,
  Signup,
}

pub(crate) struct Field {
  pub(crate) label: &'static str,
  pub(crate) secret: bool,
  pub(crate) value: String,
}

impl Field {
  fn plain(label: &'static str) -> Self {
    Self {
      label,
      secret: false,
      value: String::new(),
    }
  }

  fn secret(label: &'static str) -> Self {
    Self {
      label,
      secret: true,
      value: String::new(),
    }
  }

  pub(crate) fn shown(&self) -> String {
    if self.secret {
      mask(&self.value)
    } else {
      self.value.clone()
    }
  }
}

/// Modal input for logging in, signing up, or posting a story.
pub(crate) struct Form {
  pub(crate) fields: Vec<Field>,
  pub(crate) focused: usize,
  pub(crate) kind: FormKind,
  pub(crate) message_backup: String,
}

impl Form {
  pub(crate) fn focus_next(&mut self) {
    self.focused = (self.focused + 1) % self.fields.len().max(1);
  }

  pub(crate) fn focus_previous(&mut self) {
    let count = self.fields.len().max(1);
    self.focused = (self.focused + count - 1) % count;
  }

  pub(crate) fn new(kind: FormKind, message_backup: String) -> Self {
    let fields = match kind {
      FormKind::Login => vec![Field::plain("Username"), Field::secret("Password")],
      FormKind::NewStory => vec![
        Field::plain("Title"),
        Field::plain("Author"),
        Field::plain("URL"),
      ],
      FormKind::Signup => vec![
        Field::plain("Name"),
        Field::plain("Username"),
        Field::secret("Password"),
      ],
    };

    Self {
      fields,
      focused: 0,
      kind,
      message_backup,
    }
  }

  pub(crate) fn pop(&mut self) {
    if let Some(field) = self.fields.get_mut(self.focused) {
      field.value.pop();
    }
  }

  pub(crate) fn push(&mut self, ch: char) {
    if let Some(field) = self.fields.get_mut(self.focused) {
      field.value.push(ch);
    }
  }

  pub(crate) fn title(&self) -> &'static str {
    match self.kind {
      FormKind::Login => "Log in",
      FormKind::NewStory => "Submit a story",
      FormKind::Signup => "Sign up",
    }
  }

  /// Field values in display order, or `None` while any field is blank.
  /// Passwords are taken verbatim; everything else is trimmed.
  pub(crate) fn values(&self) -> Option<Vec<String>> {
    self
      .fields
      .iter()
      .map(|field| {
        let value = if field.secret {
          field.value.clone()
        } else {
          field.value.trim().to_string()
        };

        (!value.is_empty()).then_some(value)
      })
      .collect()
  }
}
