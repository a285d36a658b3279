use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::App;
use crate::event::PromptKind;
use crate::theme::Theme;
use crate::ui::prompt::input_spans;

/// Back / forward / up indicators followed by the path bar. While a go-to-path
/// prompt is open the path bar shows the text being edited.
pub fn render_toolbar(app: &App, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let button = |label: &'static str, enabled: bool| {
    let style = if enabled {
      Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(theme.text_dim)
    };
    Span::styled(label, style)
  };

  let mut spans = vec![
    button(" ← ", app.history.can_go_back()),
    button("→ ", app.history.can_go_forward()),
    button("↑ ", app.current_dir().parent().is_some()),
    Span::styled("│ ", Style::default().fg(theme.border)),
  ];

  if app.prompt_kind == Some(PromptKind::GoToPath) {
    spans.extend(input_spans(
      &app.prompt_input,
      app.prompt_cursor,
      Style::default().fg(theme.text),
    ));
  } else {
    spans.push(Span::styled(
      app.current_dir().to_string_lossy().to_string(),
      Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ));
  }

  let visited = app.history.entries().len();
  if visited > 1 {
    spans.push(Span::styled(
      format!("  [{}/{visited}]", app.history.cursor() + 1),
      Style::default().fg(theme.text_muted),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_bar));
  paragraph.render(area, buf);
}
