use ratatui::style::Color;

/// Colors for every part of the screen. `dark` and `light` are tuned for
/// the matching terminal background.
#[derive(Debug, Clone)]
pub struct Theme {
  pub accent: Color,
  pub text: Color,
  pub text_dim: Color,
  pub text_muted: Color,
  pub border: Color,
  pub directory: Color,
  pub file: Color,
  pub symlink: Color,
  pub bg_selected: Color,
  pub fg_selected: Color,
  pub bg_overlay: Color,
  pub bg_bar: Color,
  pub error: Color,
  pub warning: Color,
  pub info: Color,
}

impl Theme {
  pub fn dark() -> Self {
    Self {
      accent: Color::Rgb(94, 196, 182),     // teal
      text: Color::Rgb(222, 216, 204),      // parchment
      text_dim: Color::Rgb(112, 108, 100),
      text_muted: Color::Rgb(150, 144, 134),
      border: Color::Rgb(72, 78, 82),
      directory: Color::Rgb(233, 178, 92),  // amber
      file: Color::Rgb(222, 216, 204),
      symlink: Color::Rgb(176, 148, 226),   // lavender
      bg_selected: Color::Rgb(46, 92, 88),
      fg_selected: Color::Rgb(244, 240, 230),
      bg_overlay: Color::Rgb(30, 34, 38),
      bg_bar: Color::Rgb(38, 43, 48),
      error: Color::Rgb(226, 104, 92),
      warning: Color::Rgb(233, 178, 92),
      info: Color::Rgb(140, 200, 120),
    }
  }

  pub fn light() -> Self {
    Self {
      accent: Color::Rgb(20, 122, 112),
      text: Color::Rgb(44, 40, 36),
      text_dim: Color::Rgb(140, 134, 124),
      text_muted: Color::Rgb(110, 104, 96),
      border: Color::Rgb(196, 190, 178),
      directory: Color::Rgb(168, 92, 12),
      file: Color::Rgb(44, 40, 36),
      symlink: Color::Rgb(112, 72, 168),
      bg_selected: Color::Rgb(198, 232, 226),
      fg_selected: Color::Rgb(18, 52, 48),
      bg_overlay: Color::Rgb(250, 246, 238),
      bg_bar: Color::Rgb(236, 230, 218),
      error: Color::Rgb(180, 44, 34),
      warning: Color::Rgb(168, 92, 12),
      info: Color::Rgb(50, 120, 40),
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "dark" => Some(Self::dark()),
      "light" => Some(Self::light()),
      _ => None,
    }
  }

  pub fn available_themes() -> &'static [&'static str] {
    &["dark", "light"]
  }
}

impl Default for Theme {
  fn default() -> Self {
    Self::dark()
  }
}
