use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(usize::from(layout[1].height));

    let header = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Min(0), Constraint::Length(32)])
      .split(layout[0]);

    let active_tab = self.state.active_tab();

    let tab_titles: Vec<Line> = Tab::ALL
      .iter()
      .map(|tab| Line::from(tab.label().to_uppercase()))
      .collect();

    let tabs_widget = Tabs::new(tab_titles)
      .select(active_tab.index())
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .divider(Span::raw(" "));

    frame.render_widget(tabs_widget, header[0]);

    let account = Paragraph::new(self.state.account_label())
      .style(Style::default().fg(Color::DarkGray))
      .alignment(Alignment::Right);

    frame.render_widget(account, header[1]);

    let view = self.state.active_view();

    let list_items: Vec<ListItem> = if view.is_empty() {
      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(active_tab.empty_text(self.state.is_signed_in())),
      ]))]
    } else {
      view.items().iter().map(Self::story_list_item).collect()
    };

    let mut list_state = ListState::default()
      .with_selected(view.selected_index())
      .with_offset(view.offset());

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.set_view_offset(list_state.offset());

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    if let Mode::Form(form) = self.state.mode() {
      Self::draw_form(frame, form);
    }

    self.state.help().draw(frame);
  }

  fn draw_form(frame: &mut Frame, form: &Form) {
    let mut lines = Vec::new();

    for (index, field) in form.fields.iter().enumerate() {
      let focused = index == form.focused;

      let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::DarkGray)
      };

      lines.push(Line::from(Span::styled(field.label, label_style)));

      let mut value = vec![Span::raw("> "), Span::raw(field.shown())];

      if focused {
        value.push(Span::styled("_", Style::default().fg(Color::Cyan)));
      }

      lines.push(Line::from(value));
    }

    let area = centered_rect(
      frame.area(),
      60,
      saturating_usize_to_u16(lines.len().saturating_add(2)),
    );

    frame.render_widget(Clear, area);

    let widget = Paragraph::new(lines)
      .block(Block::default().title(form.title()).borders(Borders::ALL));

    frame.render_widget(widget, area);
  }

  fn execute_effect(&mut self, effect: Effect) {
    let client = self.client.clone();

    match effect {
      Effect::AddStory {
        draft,
        mut stories,
        user,
      } => self.spawn(async move {
        let result = stories.add_story(&client, user.session(), &draft).await;
        Event::StoryAdded {
          result,
          stories,
          user,
        }
      }),
      Effect::FetchStories { previous } => self.spawn(async move {
        Event::StoriesFetched {
          previous,
          result: StoryList::fetch(&client).await,
        }
      }),
      Effect::Login {
        password,
        previous,
        username,
      } => self.spawn(async move {
        Event::SignedIn {
          previous,
          result: User::login(&client, &username, &password).await,
        }
      }),
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
      Effect::RemoveStory {
        mut stories,
        story_id,
        user,
      } => self.spawn(async move {
        let result = stories
          .remove_story(&client, Some(user.session()), &story_id)
          .await;
        Event::StoryRemoved {
          result,
          stories,
          story_id,
          user,
        }
      }),
      Effect::Signup {
        name,
        password,
        previous,
        username,
      } => self.spawn(async move {
        Event::SignedIn {
          previous,
          result: User::signup(&client, &username, &password, &name).await,
        }
      }),
      Effect::ToggleFavorite { story, mut user } => self.spawn(async move {
        let result = user.toggle_favorite(&client, &story).await;
        Event::FavoriteToggled {
          result,
          title: story.title,
          user,
        }
      }),
    }
  }

  pub(crate) fn new(
    client: Client,
    stories: StoryList,
    user: Option<User>,
    credentials: CredentialStore,
  ) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state: State::new(stories, user, credentials),
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let action = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else {
        self.state.mode_mut().handle_key(key)
      };

      match self.state.dispatch(action) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }
        }
        Err(error) => {
          self.state.clear_pending_effects();
          self.state.set_transient_message(format!("error: {error}"));
        }
      }
    }

    Ok(())
  }

  fn spawn<F>(&self, task: F)
  where
    F: Future<Output = Event> + Send + 'static,
  {
    let sender = self.event_tx.clone();

    self.handle.spawn(async move {
      let _ = sender.send(task.await);
    });
  }

  fn story_list_item(entry: &ListEntry) -> ListItem<'static> {
    let mut title = vec![Span::raw(BASE_INDENT)];

    if entry.favorite {
      title.push(Span::styled("★ ", Style::default().fg(Color::Yellow)));
    }

    title.push(Span::styled(
      entry.title.clone(),
      Style::default().fg(Color::White),
    ));

    ListItem::new(vec![
      Line::from(title),
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(entry.byline.clone(), Style::default().fg(Color::Gray)),
      ]),
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(entry.detail.clone(), Style::default().fg(Color::DarkGray)),
      ]),
      Line::from(Span::raw(BASE_INDENT)),
    ])
  }
}
