use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  CancelForm,
  DeleteStory,
  HideHelp,
  Logout,
  None,
  OpenCurrentInBrowser,
  PageDown,
  PageUp,
  Quit,
  Refresh,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  StartForm(FormKind),
  SubmitForm,
  SwitchTabLeft,
  SwitchTabRight,
  ToggleFavorite,
}
