use super::*;

/// Who is signed in. `Busy` means the user is owned by an in-flight effect,
/// `signed_in` records whether one existed before it started.
enum Account {
  Busy { signed_in: bool },
  SignedIn(User),
  SignedOut,
}

pub(crate) struct State {
  account: Account,
  active_tab: usize,
  credentials: CredentialStore,
  favorite_ids: HashSet<StoryId>,
  help: HelpView,
  list_height: usize,
  message: String,
  mode: Mode,
  pending_effects: Vec<Effect>,
  stories: Option<StoryList>,
  transient_message: Option<TransientMessage>,
  views: [ListView<ListEntry>; 3],
}

impl State {
  pub(crate) fn account_label(&self) -> String {
    match &self.account {
      Account::Busy { .. } => "working...".into(),
      Account::SignedIn(user) => format!(
        "{} (since {})",
        user.username(),
        user.created_at.format("%Y-%m-%d")
      ),
      Account::SignedOut => "signed out".into(),
    }
  }

  pub(crate) fn active_tab(&self) -> Tab {
    Tab::ALL[self.active_tab % Tab::ALL.len()]
  }

  pub(crate) fn active_view(&self) -> &ListView<ListEntry> {
    &self.views[self.active_tab().index()]
  }

  fn active_view_mut(&mut self) -> &mut ListView<ListEntry> {
    let index = self.active_tab().index();
    &mut self.views[index]
  }

  fn cancel_form(&mut self) {
    if let Mode::Form(form) = mem::replace(&mut self.mode, Mode::List) {
      self.message = form.message_backup;
    }
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  fn current_entry(&self) -> Option<&ListEntry> {
    self.active_view().selected_item()
  }

  fn delete_story(&mut self) {
    let Some(entry) = self.current_entry() else {
      return;
    };

    let (story_id, title) = (entry.id.clone(), entry.title.clone());

    let Some((stories, user)) = self.take_models() else {
      return;
    };

    self.message = format!("Deleting \"{}\"...", truncate(&title, 40));

    self.pending_effects.push(Effect::RemoveStory {
      stories,
      story_id,
      user,
    });
  }

  pub(crate) fn dispatch(&mut self, action: Action) -> Result<Dispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match action {
      Action::Quit => {
        should_exit = true;
      }
      Action::ShowHelp => self.help.show(&mut self.message),
      Action::HideHelp => self.help.hide(&mut self.message),
      Action::StartForm(kind) => self.start_form(kind),
      Action::CancelForm => self.cancel_form(),
      Action::SubmitForm => self.submit_form(),
      Action::SwitchTabLeft => self.switch_tab(Tab::ALL.len() - 1),
      Action::SwitchTabRight => self.switch_tab(1),
      Action::SelectNext => self.select_next(),
      Action::SelectPrevious => self.select_previous(),
      Action::SelectFirst => self.select_index(0),
      Action::SelectLast => self.select_index(usize::MAX),
      Action::PageDown => self.page_down(),
      Action::PageUp => self.page_up(),
      Action::OpenCurrentInBrowser => self.open_current_in_browser(),
      Action::ToggleFavorite => self.toggle_favorite(),
      Action::DeleteStory => self.delete_story(),
      Action::Refresh => self.refresh(),
      Action::Logout => self.logout()?,
      Action::None => {}
    }

    Ok(Dispatch {
      effects: mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  fn entries(stories: &StoryList, favorites: &HashSet<StoryId>) -> Vec<ListEntry> {
    stories
      .stories()
      .iter()
      .map(|story| ListEntry::new(story, favorites.contains(&story.story_id)))
      .collect()
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::FavoriteToggled {
        result,
        title,
        user,
      } => {
        self.account = Account::SignedIn(user);

        let title = truncate(&title, 40);

        self.notify(match result {
          Ok(Favorite::Added) => format!("Added \"{title}\" to favorites"),
          Ok(Favorite::Removed) => {
            format!("Removed \"{title}\" from favorites")
          }
          Err(error) => format!("Could not update favorite: {error}"),
        });
      }
      Event::SignedIn { previous, result } => match result {
        Ok(user) => {
          let saved = self.credentials.save(user.session());

          let greeting = format!("Signed in as {}", user.username());

          self.account = Account::SignedIn(user);

          match saved {
            Ok(()) => self.notify(greeting),
            Err(error) => {
              warn!(%error, "could not save credentials");
              self.notify(format!(
                "{greeting}, but the session was not saved: {error}"
              ));
            }
          }
        }
        Err(error) => {
          self.account = previous.map_or(Account::SignedOut, Account::SignedIn);
          self.notify(format!("Could not sign in: {error}"));
        }
      },
      Event::StoriesFetched { previous, result } => match result {
        Ok(stories) => {
          let count = stories.len();
          self.stories = Some(stories);
          self.notify(format!("Loaded {count} stories"));
        }
        Err(error) => {
          self.stories = Some(previous);
          self.notify(format!("Could not refresh stories: {error}"));
        }
      },
      Event::StoryAdded {
        result,
        stories,
        mut user,
      } => {
        match result {
          Ok(story) => {
            self.notify(format!("Posted \"{}\"", truncate(&story.title, 40)));
            user.record_own_story(story);
          }
          Err(error) => self.notify(format!("Could not post story: {error}")),
        }

        self.stories = Some(stories);
        self.account = Account::SignedIn(user);
      }
      Event::StoryRemoved {
        result,
        stories,
        story_id,
        mut user,
      } => {
        match result {
          Ok(_) => {
            user.forget_story(&story_id);
            self.notify("Story deleted".into());
          }
          Err(error) => {
            self.notify(format!("Could not delete story: {error}"));
          }
        }

        self.stories = Some(stories);
        self.account = Account::SignedIn(user);
      }
    }

    self.rebuild_views();
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn is_signed_in(&self) -> bool {
    matches!(
      self.account,
      Account::SignedIn(_) | Account::Busy { signed_in: true }
    )
  }

  fn logout(&mut self) -> Result {
    match self.account {
      Account::Busy { .. } => self.notify(BUSY_STATUS.into()),
      Account::SignedOut => self.notify("Already signed out".into()),
      Account::SignedIn(_) => {
        self.credentials.clear()?;
        self.account = Account::SignedOut;
        self.rebuild_views();
        self.notify("Logged out".into());
      }
    }

    Ok(())
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode(&self) -> &Mode {
    &self.mode
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  pub(crate) fn new(
    stories: StoryList,
    user: Option<User>,
    credentials: CredentialStore,
  ) -> Self {
    let mut state = Self {
      account: user.map_or(Account::SignedOut, Account::SignedIn),
      active_tab: 0,
      credentials,
      favorite_ids: HashSet::new(),
      help: HelpView::new(),
      list_height: 0,
      message: LIST_STATUS.into(),
      mode: Mode::List,
      pending_effects: Vec::new(),
      stories: Some(stories),
      transient_message: None,
      views: Default::default(),
    };

    state.rebuild_views();

    state
  }

  fn notify(&mut self, message: String) {
    if !self.help.is_visible() {
      self.set_transient_message(message);
    }
  }

  fn open_current_in_browser(&mut self) {
    if let Some(entry) = self.current_entry() {
      self.pending_effects.push(Effect::OpenUrl {
        url: entry.url.clone(),
      });
    }
  }

  fn page_down(&mut self) {
    let current = self.active_view().selected_raw();
    self.select_index(current.saturating_add(self.page_jump()));
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  fn page_up(&mut self) {
    let current = self.active_view().selected_raw();
    self.select_index(current.saturating_sub(self.page_jump()));
  }

  /// Re-renders every tab whose backing collection is currently at hand.
  fn rebuild_views(&mut self) {
    match &self.account {
      Account::SignedIn(user) => {
        self.favorite_ids = user
          .favorites
          .stories()
          .iter()
          .map(|story| story.story_id.clone())
          .collect();

        self.views[Tab::Favorites.index()]
          .replace(Self::entries(&user.favorites, &self.favorite_ids));

        self.views[Tab::Mine.index()]
          .replace(Self::entries(&user.own_stories, &self.favorite_ids));
      }
      Account::SignedOut => {
        self.favorite_ids.clear();
        self.views[Tab::Favorites.index()].replace(Vec::new());
        self.views[Tab::Mine.index()].replace(Vec::new());
      }
      Account::Busy { .. } => {}
    }

    if let Some(stories) = &self.stories {
      self.views[Tab::Stories.index()]
        .replace(Self::entries(stories, &self.favorite_ids));
    }
  }

  fn refresh(&mut self) {
    let Some(previous) = self.stories.take() else {
      self.notify(BUSY_STATUS.into());
      return;
    };

    self.message = LOADING_STORIES_STATUS.into();

    self.pending_effects.push(Effect::FetchStories { previous });
  }

  fn select_index(&mut self, target: usize) {
    self.active_view_mut().set_selected(target);
  }

  fn select_next(&mut self) {
    let current = self.active_view().selected_raw();
    self.select_index(current.saturating_add(1));
  }

  fn select_previous(&mut self) {
    let current = self.active_view().selected_raw();
    self.select_index(current.saturating_sub(1));
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), original));

    self.message = message;
  }

  pub(crate) fn set_view_offset(&mut self, offset: usize) {
    self.active_view_mut().set_offset(offset);
  }

  fn start_form(&mut self, kind: FormKind) {
    match (kind, &self.account) {
      (_, Account::Busy { .. }) => {
        self.notify(BUSY_STATUS.into());
        return;
      }
      (FormKind::NewStory, Account::SignedOut) => {
        self.notify(SIGNED_OUT_STATUS.into());
        return;
      }
      _ => {}
    }

    let backup = mem::replace(&mut self.message, FORM_STATUS.into());

    self.transient_message = None;

    self.mode = Mode::Form(Form::new(kind, backup));
  }

  fn submit_form(&mut self) {
    let Mode::Form(form) = &self.mode else {
      return;
    };

    let Some(values) = form.values() else {
      self.message = "Every field is required".into();
      return;
    };

    let kind = form.kind;

    let effect = match (kind, values.as_slice()) {
      (FormKind::Login, [username, password]) => {
        let Some(previous) = self.take_account() else {
          return;
        };

        Effect::Login {
          password: password.clone(),
          previous,
          username: username.clone(),
        }
      }
      (FormKind::Signup, [name, username, password]) => {
        let Some(previous) = self.take_account() else {
          return;
        };

        Effect::Signup {
          name: name.clone(),
          password: password.clone(),
          previous,
          username: username.clone(),
        }
      }
      (FormKind::NewStory, [title, author, url]) => {
        if !Url::parse(url)
          .is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
        {
          self.message = "Story URL must start with http:// or https://".into();
          return;
        }

        let draft = NewStory {
          author: author.clone(),
          title: title.clone(),
          url: url.clone(),
        };

        let Some((stories, user)) = self.take_models() else {
          return;
        };

        Effect::AddStory {
          draft,
          stories,
          user,
        }
      }
      _ => return,
    };

    let message = match kind {
      FormKind::Login => "Logging in...",
      FormKind::NewStory => "Posting story...",
      FormKind::Signup => "Signing up...",
    };

    self.mode = Mode::List;
    self.message = message.into();
    self.pending_effects.push(effect);
  }

  fn switch_tab(&mut self, step: usize) {
    self.active_tab = (self.active_tab + step) % Tab::ALL.len();
  }

  /// Hands the current user, if any, to a sign-in request so a failure can
  /// put it back. `None` while another request already holds the account.
  fn take_account(&mut self) -> Option<Option<User>> {
    match mem::replace(&mut self.account, Account::Busy { signed_in: false }) {
      Account::Busy { signed_in } => {
        self.account = Account::Busy { signed_in };
        self.message = BUSY_STATUS.into();
        None
      }
      Account::SignedIn(user) => {
        self.account = Account::Busy { signed_in: true };
        Some(Some(user))
      }
      Account::SignedOut => Some(None),
    }
  }

  /// Borrows the story list and the user for an operation that needs both,
  /// leaving everything in place if either is unavailable.
  fn take_models(&mut self) -> Option<(StoryList, User)> {
    match (
      self.stories.take(),
      mem::replace(&mut self.account, Account::Busy { signed_in: true }),
    ) {
      (Some(stories), Account::SignedIn(user)) => Some((stories, user)),
      (stories, account) => {
        let message = if matches!(account, Account::SignedOut) {
          SIGNED_OUT_STATUS
        } else {
          BUSY_STATUS
        };

        self.stories = stories;
        self.account = account;
        self.message = message.into();

        None
      }
    }
  }

  fn toggle_favorite(&mut self) {
    let Some(id) = self.current_entry().map(|entry| entry.id.clone()) else {
      return;
    };

    let user = match mem::replace(
      &mut self.account,
      Account::Busy { signed_in: true },
    ) {
      Account::SignedIn(user) => user,
      other => {
        let message = if matches!(other, Account::SignedOut) {
          SIGNED_OUT_STATUS
        } else {
          BUSY_STATUS
        };

        self.account = other;
        self.notify(message.into());

        return;
      }
    };

    let story = self
      .stories
      .as_ref()
      .and_then(|stories| stories.get(&id))
      .or_else(|| user.favorites.get(&id))
      .or_else(|| user.own_stories.get(&id))
      .cloned();

    let Some(story) = story else {
      self.account = Account::SignedIn(user);
      self.notify(STORY_GONE_STATUS.into());
      return;
    };

    self.message = format!("Updating \"{}\"...", truncate(&story.title, 40));

    self
      .pending_effects
      .push(Effect::ToggleFavorite { story, user });
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.original().to_string();
        self.transient_message = None;
      }
    }
  }
}
