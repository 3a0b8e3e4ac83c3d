use {
  action::Action,
  anyhow::{Context, anyhow, ensure},
  app::App,
  chrono::{DateTime, Utc},
  client::Client,
  config::Config,
  credentials::CredentialStore,
  crossterm::{
    event as crossterm_event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  dispatch::Dispatch,
  effect::Effect,
  error::ApiError,
  event::Event,
  form::{Form, FormKind},
  help_view::HelpView,
  list_entry::ListEntry,
  list_view::ListView,
  mode::Mode,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
  },
  reqwest::{Response, StatusCode},
  response::{
    AuthResponse, ErrorResponse, MessageResponse, StoriesResponse,
    StoryResponse, UserProfile, UserResponse,
  },
  serde::{Deserialize, Serialize, de::DeserializeOwned},
  serde_json::json,
  session::Session,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::HashSet,
    env,
    fmt::{self, Display},
    fs,
    io::{self, IsTerminal, Stdout},
    mem,
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  story::{NewStory, Story, StoryId},
  story_list::StoryList,
  tab::Tab,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  transient_message::TransientMessage,
  url::Url,
  user::{Favorite, User},
  utils::{centered_rect, mask, saturating_usize_to_u16, truncate},
};

mod action;
mod app;
mod client;
mod config;
mod credentials;
mod dispatch;
mod effect;
mod error;
mod event;
mod form;
mod help_view;
mod list_entry;
mod list_view;
mod mode;
mod response;
mod session;
mod state;
mod story;
mod story_list;
mod tab;
#[cfg(test)]
mod test_server;
mod transient_message;
mod user;
mod utils;

const LIST_STATUS: &str = "↑/k up • ↓/j down • ←/h →/l tabs • f favorite • d delete • n new • o open • ? help";

const FORM_STATUS: &str = "tab next field • shift+tab previous • enter submit • esc cancel";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const BUSY_STATUS: &str = "Still working on the previous request";
const LOADING_STORIES_STATUS: &str = "Loading stories...";
const SIGNED_OUT_STATUS: &str = "Log in (L) or sign up (S) first";
const STORY_GONE_STATUS: &str = "That story is no longer available";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ← / h   previous tab
  → / l   next tab
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first story
  end     jump to last story

Stories:
  o       open the selected story in your browser
  f       add or remove the selected story from favorites
  d       delete the selected story (only your own)
  n       submit a new story
  r       reload all stories

Account:
  L       log in
  S       sign up
  X       log out

Forms:
  tab     next field
  enter   submit
  esc     cancel

  q       quit snooze
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_logging(path: &Path) -> Result {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let file = fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow!("could not initialize logging: {error}"))
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let config = Config::from_env()?;

  initialize_logging(&config.log_path)?;

  info!(api_url = %config.api_url, "starting");

  let client =
    Client::new(config.api_url.clone()).context("could not build http client")?;

  let stories = StoryList::fetch(&client)
    .await
    .context("could not load stories")?;

  let credentials = CredentialStore::new(config.credentials_path);

  let user = match credentials.load().context("could not load credentials")? {
    Some(session) => User::restore_session(&client, &session).await,
    None => None,
  };

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, stories, user, credentials);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
