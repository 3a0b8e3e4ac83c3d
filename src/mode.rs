use super::*;

pub(crate) enum Mode {
  Form(Form),
  List,
}

impl Mode {
  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Action {
    let modifiers = key.modifiers;

    match self {
      Mode::List => match key.code {
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
          Action::PageDown
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
          Action::PageUp
        }
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Left | KeyCode::Char('h') => Action::SwitchTabLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::SwitchTabRight,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Home => Action::SelectFirst,
        KeyCode::End => Action::SelectLast,
        KeyCode::Char('o' | 'O') => Action::OpenCurrentInBrowser,
        KeyCode::Char('f') => Action::ToggleFavorite,
        KeyCode::Char('d') => Action::DeleteStory,
        KeyCode::Char('n') => Action::StartForm(FormKind::NewStory),
        KeyCode::Char('L') => Action::StartForm(FormKind::Login),
        KeyCode::Char('S') => Action::StartForm(FormKind::Signup),
        KeyCode::Char('X') => Action::Logout,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
      },
      Mode::Form(form) => match key.code {
        KeyCode::Esc => Action::CancelForm,
        KeyCode::Enter => Action::SubmitForm,
        KeyCode::Tab | KeyCode::Down => {
          form.focus_next();
          Action::None
        }
        KeyCode::BackTab | KeyCode::Up => {
          form.focus_previous();
          Action::None
        }
        KeyCode::Backspace => {
          form.pop();
          Action::None
        }
        KeyCode::Char(ch) => {
          if modifiers.contains(KeyModifiers::CONTROL)
            || modifiers.contains(KeyModifiers::ALT)
            || modifiers.contains(KeyModifiers::SUPER)
          {
            return Action::None;
          }

          form.push(ch);

          Action::None
        }
        _ => Action::None,
      },
    }
  }
}
