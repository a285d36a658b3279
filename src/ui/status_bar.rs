use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::{App, ClipboardOp};
use crate::event::{InputMode, PromptKind};
use crate::theme::Theme;

pub fn render_status_bar(app: &App, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let muted = Style::default().fg(theme.text_dim);

  let line = match (app.input_mode, app.prompt_kind) {
    (InputMode::Prompt, Some(PromptKind::GoToPath)) => Line::from(Span::styled(
      " Go to path: [Enter] confirm  [Esc] cancel",
      muted,
    )),
    (InputMode::Prompt, Some(PromptKind::Rename)) => Line::from(Span::styled(
      " Rename: [Enter] confirm  [Esc] cancel",
      muted,
    )),
    (InputMode::Prompt, Some(PromptKind::ConfirmDelete)) => Line::from(vec![Span::styled(
      format!(
        " Delete {}? (y/N)",
        app.prompt_target.as_deref().unwrap_or("")
      ),
      Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
    )]),
    _ => {
      if let Some(ref msg) = app.status_message {
        Line::from(Span::styled(format!(" {msg}"), Style::default().fg(theme.info)))
      } else if let Some(entry) = app.selected_entry() {
        let mut spans = vec![Span::styled(
          format!(" {}", entry.name),
          Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )];
        if entry.is_symlink {
          spans.push(Span::styled(" | link", Style::default().fg(theme.symlink)));
        }
        if !entry.is_dir() {
          spans.push(Span::styled(format!(" | {}", entry.size_label()), muted));
        }
        let modified = entry.modified_label();
        if !modified.is_empty() {
          spans.push(Span::styled(format!(" | {modified}"), muted));
        }
        spans.push(Span::styled(
          format!(" {}/{} ", app.cursor + 1, app.entries.len()),
          muted,
        ));
        if let Some(clip) = &app.clipboard {
          let verb = match clip.op {
            ClipboardOp::Copy => "copied",
            ClipboardOp::Cut => "cut",
          };
          let name = clip
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
          spans.push(Span::styled(format!("[{verb}: {name}]"), Style::default().fg(theme.accent)));
        }
        Line::from(spans)
      } else {
        Line::from(Span::styled(" Empty directory", muted))
      }
    }
  };

  let paragraph = Paragraph::new(line).style(Style::default().bg(theme.bg_bar));
  paragraph.render(area, buf);
}
