#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  Quit,
  MoveUp,
  MoveDown,
  GoToTop,
  GoToBottom,
  Open,
  GoUp,
  HistoryBack,
  HistoryForward,
  GoHome,
  Refresh,
  PathEditStart,
  CopyFile,
  CutFile,
  Paste,
  DeleteFile,
  RenameStart,
  ContextMenuOpen,
  ToggleHelp,
  PromptInput(char),
  PromptBackspace,
  PromptDelete,
  PromptLeft,
  PromptRight,
  PromptHome,
  PromptEnd,
  PromptConfirm,
  PromptCancel,
  MenuUp,
  MenuDown,
  MenuSelect,
  MenuClose,
  ErrorClose,
  SelectRow(usize),
  OpenRow(usize),
  ContextMenuAt { row: usize, x: u16, y: u16 },
  Resize(u16, u16),
  Tick,
  None,
}

impl Action {
  /// Resolves a bindable action from its config-file name.
  pub fn from_name(name: &str) -> Option<Action> {
    match name {
      "quit" => Some(Action::Quit),
      "move_up" => Some(Action::MoveUp),
      "move_down" => Some(Action::MoveDown),
      "go_to_top" => Some(Action::GoToTop),
      "go_to_bottom" => Some(Action::GoToBottom),
      "open" => Some(Action::Open),
      "go_up" => Some(Action::GoUp),
      "history_back" => Some(Action::HistoryBack),
      "history_forward" => Some(Action::HistoryForward),
      "go_home" => Some(Action::GoHome),
      "refresh" => Some(Action::Refresh),
      "path_edit" => Some(Action::PathEditStart),
      "copy_file" => Some(Action::CopyFile),
      "cut_file" => Some(Action::CutFile),
      "paste" => Some(Action::Paste),
      "delete_file" => Some(Action::DeleteFile),
      "rename_start" => Some(Action::RenameStart),
      "context_menu" => Some(Action::ContextMenuOpen),
      "toggle_help" => Some(Action::ToggleHelp),
      "none" => Some(Action::None),
      _ => None,
    }
  }
}
