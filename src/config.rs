use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::action::Action;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
  pub code: KeyCode,
  pub modifiers: KeyModifiers,
}

impl KeyBinding {
  pub fn display_key(&self) -> String {
    let key_name = match self.code {
      KeyCode::Char(' ') => "Space".to_string(),
      KeyCode::Char(c) => c.to_string(),
      KeyCode::Enter => "Enter".to_string(),
      KeyCode::Esc => "Esc".to_string(),
      KeyCode::Backspace => "Backspace".to_string(),
      KeyCode::Delete => "Delete".to_string(),
      KeyCode::Tab => "Tab".to_string(),
      KeyCode::Home => "Home".to_string(),
      KeyCode::End => "End".to_string(),
      KeyCode::PageUp => "PageUp".to_string(),
      KeyCode::PageDown => "PageDown".to_string(),
      KeyCode::Up => "Up".to_string(),
      KeyCode::Down => "Down".to_string(),
      KeyCode::Left => "Left".to_string(),
      KeyCode::Right => "Right".to_string(),
      KeyCode::F(n) => format!("F{n}"),
      _ => format!("{:?}", self.code),
    };

    if self.modifiers.contains(KeyModifiers::CONTROL) {
      format!("Ctrl+{key_name}")
    } else if self.modifiers.contains(KeyModifiers::ALT) {
      format!("Alt+{key_name}")
    } else if self.modifiers.contains(KeyModifiers::SHIFT) {
      format!("Shift+{key_name}")
    } else {
      key_name
    }
  }
}

pub struct Config {
  pub tick_rate_ms: u64,
  pub double_click_ms: u64,
  pub theme: Theme,
  pub normal_keys: HashMap<KeyBinding, Action>,
}

#[derive(Deserialize, Default)]
struct TomlConfig {
  general: Option<GeneralConfig>,
  keys: Option<KeysConfig>,
}

#[derive(Deserialize, Default)]
struct GeneralConfig {
  tick_rate_ms: Option<u64>,
  double_click_ms: Option<u64>,
  theme: Option<String>,
}

#[derive(Deserialize, Default)]
struct KeysConfig {
  normal: Option<HashMap<String, String>>,
}

pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
  if s.is_empty() {
    return None;
  }

  // A lone "+" is the plus key, not a separator
  if s == "+" {
    return Some(KeyBinding { code: KeyCode::Char('+'), modifiers: KeyModifiers::NONE });
  }

  let parts: Vec<&str> = s.split('+').collect();

  if parts.len() == 1 {
    let key = parts[0];
    if let Some(code) = named_key(key) {
      return Some(KeyBinding { code, modifiers: KeyModifiers::NONE });
    }
    let mut chars = key.chars();
    return match (chars.next(), chars.next()) {
      (Some(c), None) => Some(KeyBinding { code: KeyCode::Char(c), modifiers: KeyModifiers::NONE }),
      _ => None,
    };
  }

  if parts.len() == 2 {
    let modifier_str = parts[0].to_lowercase();
    let key_str = parts[1];

    let modifiers = match modifier_str.as_str() {
      "ctrl" => KeyModifiers::CONTROL,
      "alt" => KeyModifiers::ALT,
      "shift" => {
        let mut chars = key_str.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
          // Shifted letters arrive as their uppercase char
          let upper = c.to_uppercase().next().unwrap_or(c);
          return Some(KeyBinding { code: KeyCode::Char(upper), modifiers: KeyModifiers::NONE });
        }
        return named_key(key_str).map(|code| KeyBinding { code, modifiers: KeyModifiers::SHIFT });
      }
      _ => return None,
    };

    if let Some(code) = named_key(key_str) {
      return Some(KeyBinding { code, modifiers });
    }
    let mut chars = key_str.chars();
    return match (chars.next(), chars.next()) {
      (Some(c), None) => Some(KeyBinding { code: KeyCode::Char(c), modifiers }),
      _ => None,
    };
  }

  None
}

fn named_key(s: &str) -> Option<KeyCode> {
  match s.to_lowercase().as_str() {
    "enter" => Some(KeyCode::Enter),
    "space" => Some(KeyCode::Char(' ')),
    "esc" => Some(KeyCode::Esc),
    "up" => Some(KeyCode::Up),
    "down" => Some(KeyCode::Down),
    "left" => Some(KeyCode::Left),
    "right" => Some(KeyCode::Right),
    "backspace" => Some(KeyCode::Backspace),
    "delete" => Some(KeyCode::Delete),
    "tab" => Some(KeyCode::Tab),
    "home" => Some(KeyCode::Home),
    "end" => Some(KeyCode::End),
    "pageup" => Some(KeyCode::PageUp),
    "pagedown" => Some(KeyCode::PageDown),
    s if s.starts_with('f') && s.len() > 1 => {
      s[1..].parse::<u8>().ok().filter(|&n| (1..=24).contains(&n)).map(KeyCode::F)
    }
    _ => None,
  }
}

pub fn normalize_key_event(key: KeyEvent) -> KeyBinding {
  let mut modifiers = key.modifiers;
  if let KeyCode::Char(c) = key.code
    && !c.is_ascii_lowercase()
    && !c.is_ascii_digit()
  {
    // Terminals disagree on whether SHIFT accompanies "J", "?" or "~"
    modifiers -= KeyModifiers::SHIFT;
  }
  KeyBinding { code: key.code, modifiers }
}

impl Default for Config {
  fn default() -> Self {
    let mut config = Config::empty();
    let mut errors = Vec::new();
    config.apply_toml_str(Config::default_toml(), &mut errors);
    config
  }
}

impl Config {
  fn empty() -> Self {
    Config {
      tick_rate_ms: 100,
      double_click_ms: 400,
      theme: Theme::default(),
      normal_keys: HashMap::new(),
    }
  }

  fn apply_toml_str(&mut self, s: &str, errors: &mut Vec<String>) {
    let toml_config: TomlConfig = match toml::from_str(s) {
      Ok(c) => c,
      Err(e) => {
        errors.push(format!("failed to parse config.toml: {e}"));
        return;
      }
    };

    if let Some(general) = toml_config.general {
      if let Some(tick) = general.tick_rate_ms {
        self.tick_rate_ms = tick.max(10);
      }
      if let Some(ms) = general.double_click_ms {
        self.double_click_ms = ms;
      }
      if let Some(name) = general.theme {
        match Theme::from_name(&name) {
          Some(theme) => self.theme = theme,
          None => errors.push(format!(
            "unknown theme {name:?} (available: {})",
            Theme::available_themes().join(", ")
          )),
        }
      }
    }

    if let Some(keys) = toml_config.keys
      && let Some(normal) = keys.normal
    {
      self.normal_keys.clear();
      for (key_str, action_str) in &normal {
        let Some(kb) = parse_key_binding(key_str) else {
          errors.push(format!("invalid key binding: {key_str:?}"));
          continue;
        };
        let Some(action) = Action::from_name(action_str) else {
          errors.push(format!("invalid action: {action_str:?}"));
          continue;
        };
        self.normal_keys.insert(kb, action);
      }
    }
  }

  pub fn default_toml() -> &'static str {
    r#"[general]
tick_rate_ms = 100      # event loop tick rate in ms
double_click_ms = 400   # max gap between clicks of a double click
theme = "dark"          # dark | light

[keys.normal]
j = "move_down"
k = "move_up"
down = "move_down"
up = "move_up"
g = "go_to_top"
home = "go_to_top"
"shift+g" = "go_to_bottom"
end = "go_to_bottom"
enter = "open"
l = "open"
right = "open"
h = "go_up"
left = "go_up"
backspace = "go_up"
"alt+left" = "history_back"
"shift+h" = "history_back"
"alt+right" = "history_forward"
"shift+l" = "history_forward"
"~" = "go_home"
f5 = "refresh"
"ctrl+r" = "refresh"
":" = "path_edit"
"ctrl+l" = "path_edit"
y = "copy_file"
"ctrl+c" = "copy_file"
x = "cut_file"
"ctrl+x" = "cut_file"
p = "paste"
"ctrl+v" = "paste"
d = "delete_file"
delete = "delete_file"
r = "rename_start"
f2 = "rename_start"
m = "context_menu"
"?" = "toggle_help"
q = "quit"
esc = "quit"
"#
  }

  pub fn reverse_lookup(&self) -> HashMap<Action, Vec<String>> {
    let mut map: HashMap<Action, Vec<String>> = HashMap::new();
    for (kb, action) in &self.normal_keys {
      map.entry(action.clone()).or_default().push(kb.display_key());
    }
    // Sort keys for deterministic display
    for keys in map.values_mut() {
      keys.sort();
    }
    map
  }

  pub fn config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
      .map(|d| d.join("dex").join("config.toml"))
      .ok_or_else(|| "could not determine config directory".to_string())
  }

  pub fn dump_default_config(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    std::fs::write(path, Self::default_toml())
      .map_err(|e| format!("failed to write {}: {e}", path.display()))?;

    Ok(())
  }

  /// Loads the user's config file, falling back to defaults. Problems are
  /// returned for display rather than aborting start-up.
  pub fn load() -> (Config, Vec<String>) {
    let content = Self::config_path()
      .ok()
      .and_then(|p| std::fs::read_to_string(p).ok());

    match content {
      Some(s) => Self::load_from_str(&s),
      None => (Config::default(), Vec::new()),
    }
  }

  /// Defaults overlaid with the TOML in `s`, plus every problem found on the
  /// way. Bad entries are skipped, never fatal.
  pub fn load_from_str(s: &str) -> (Config, Vec<String>) {
    let mut errors = Vec::new();
    let mut config = Config::default();
    config.apply_toml_str(s, &mut errors);
    (config, errors)
  }
}
