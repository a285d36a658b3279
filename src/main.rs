mod action;
mod app;
mod config;
mod event;
mod fs;
mod history;
mod logging;
mod opener;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
  EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::action::Action;
use crate::app::App;
use crate::event::{ClickTracker, Event, EventLoop, map_key, map_mouse};

fn main() -> Result<()> {
  let mut show_help = false;
  let mut show_version = false;
  let mut show_init = false;

  for arg in std::env::args().skip(1) {
    match arg.as_str() {
      "--help" | "-h" => show_help = true,
      "--version" | "-V" => show_version = true,
      "--init" => show_init = true,
      _ => {
        eprintln!("dex: unknown argument '{arg}'");
        std::process::exit(1);
      }
    }
  }

  if show_help {
    println!(concat!(
      "dex - terminal file manager\n",
      "\n",
      "Usage: dex [options]\n",
      "\n",
      "Options:\n",
      "  --init           Write the default config to ~/.config/dex/\n",
      "  -h, --help       Print this help message\n",
      "  -V, --version    Print version\n",
      "\n",
      "Opens the current directory. Set DEX_LOG to control log verbosity.",
    ));
    return Ok(());
  }

  if show_version {
    println!("dex {}", env!("CARGO_PKG_VERSION"));
    return Ok(());
  }

  if show_init {
    return init_config();
  }

  logging::init();
  let (config, config_errors) = config::Config::load();

  // Restore the terminal before the panic message prints
  let original_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let _ = restore_terminal();
    original_hook(info);
  }));

  let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let start = std::fs::canonicalize(&start).unwrap_or(start);

  setup_terminal()?;
  let backend = CrosstermBackend::new(io::stdout());
  let mut terminal = Terminal::new(backend)?;

  let mut app = App::new(start);
  if !config_errors.is_empty() {
    tracing::warn!(count = config_errors.len(), "config errors");
    app.show_errors(config_errors);
  }

  let events = EventLoop::new(Duration::from_millis(config.tick_rate_ms));
  let double_click = Duration::from_millis(config.double_click_ms);
  let mut clicks = ClickTracker::default();

  loop {
    terminal.draw(|frame| ui::draw(frame, &mut app, &config))?;

    let action = match events.next()? {
      Event::Key(key) => map_key(key, app.input_mode, &config),
      Event::Mouse(mouse) if app.input_mode == event::InputMode::Normal => map_mouse(
        mouse,
        app.listing_rows,
        app.scroll_offset,
        app.entries.len(),
        &mut clicks,
        double_click,
      ),
      Event::Mouse(_) => Action::None,
      Event::Resize(w, h) => Action::Resize(w, h),
      Event::Tick => Action::Tick,
    };
    app.update(action)?;

    if app.should_quit {
      break;
    }
  }

  restore_terminal()?;
  tracing::info!("exit");
  Ok(())
}

fn init_config() -> Result<()> {
  let config_path = match config::Config::config_path() {
    Ok(p) => p,
    Err(e) => {
      eprintln!("dex: {e}");
      std::process::exit(1);
    }
  };

  if config_path.exists() {
    eprint!("{} already exists. Overwrite? [y/N] ", config_path.display());
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).unwrap_or(0);
    if !answer.trim().eq_ignore_ascii_case("y") {
      return Ok(());
    }
  }

  match config::Config::dump_default_config(&config_path) {
    Ok(()) => println!("{}", config_path.display()),
    Err(e) => {
      eprintln!("dex: {e}");
      std::process::exit(1);
    }
  }
  Ok(())
}

fn setup_terminal() -> Result<()> {
  enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
  Ok(())
}

fn restore_terminal() -> Result<()> {
  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
  Ok(())
}
