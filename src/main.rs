use {
  anyhow::Context,
  app::App,
  chrono::{DateTime, Utc},
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::Comment,
  comment_node::CommentNode,
  comment_tree::CommentTree,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  detail_view::DetailView,
  effect::Effect,
  event::Event,
  feed::Feed,
  futures::stream::{self, StreamExt},
  help_view::HelpView,
  history::History,
  item::Item,
  mode::Mode,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
  },
  refresh_timer::RefreshTimer,
  route::Route,
  serde::Deserialize,
  state::State,
  status_line::StatusLine,
  std::{
    backtrace::BacktraceStatus,
    collections::{HashMap, VecDeque},
    env,
    io::{self, IsTerminal, Stdout},
    process,
    time::{Duration, Instant},
  },
  stories_view::StoriesView,
  story::Story,
  story_entry::StoryEntry,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  user::User,
  user_view::UserView,
  utils::{
    format_comments, format_date, format_points, html_to_text, relative_time,
    strip_tags, truncate, wrap_text,
  },
};

mod app;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod comment_node;
mod comment_tree;
mod detail_view;
mod effect;
mod event;
mod feed;
mod help_view;
mod history;
mod item;
mod mode;
mod refresh_timer;
mod route;
mod state;
mod status_line;
mod stories_view;
mod story;
mod story_entry;
mod user;
mod user_view;
mod utils;

const COMMENTS_PER_BATCH: usize = 5;
const MAX_INITIAL_DEPTH: usize = 2;
const MAX_STORIES: usize = 500;
const REFRESH_INTERVAL: Duration = Duration::from_secs(60);
const STORIES_PER_PAGE: usize = 10;

const STORIES_STATUS: &str = "↑/k up • ↓/j down • ←/→ feeds • enter comments • o open link • u profile • q quit • ? help";

const DETAIL_STATUS: &str = "↑/k up • ↓/j down • ←/h collapse • →/l expand • enter toggle • u profile • o open link • esc back";

const PROFILE_STATUS: &str = "↑/k ↓/j scroll • esc back • q quit • ? help";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_STORIES_STATUS: &str = "Loading stories...";
const LOADING_MORE_STORIES_STATUS: &str = "Loading more stories...";
const LOADING_STORY_STATUS: &str = "Loading story...";
const LOADING_COMMENTS_STATUS: &str = "Loading comments...";
const LOADING_PROFILE_STATUS: &str = "Loading profile...";

const LOADING_MORE_COMMENTS_TEXT: &str = "Loading more comments...";
const END_OF_LIST_TEXT: &str = "No more stories.";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ← / h   previous feed (story list)
  → / l   next feed (story list)
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first item
  end     jump to last item
  esc     go back (quit from the story list)
  f       go forward

Actions:
  enter   open the selected story's comments
  o       open the selected link in your browser
  u       open the author's profile
  q       quit kiosk
  ?       toggle this help
  scroll  keep going past the end to load more stories

Comments:
  ← / h   collapse or go to parent
  → / l   expand or load deferred replies
  enter   toggle collapse or load deferred replies
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

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
  let client = Client::default();

  let initial = env::args()
    .nth(1)
    .map_or(Route::Stories(Feed::Top), |path| Route::parse(&path));

  let mut terminal =
    initialize_terminal().context("could not initialize terminal")?;

  let mut app = App::new(client, initial);

  app.run(&mut terminal)?;

  restore_terminal(&mut terminal)
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
