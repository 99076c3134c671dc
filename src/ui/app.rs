use tracing::error;

use crate::controller::{Action, Controller, HistoryEntry, Outcome};
use crate::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Ledger,
    History,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ledger => write!(f, "Ledger"),
            Self::History => write!(f, "Transaction History"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Which form field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Amount,
    Description,
}

impl Focus {
    pub(crate) fn toggle(self) -> Self {
        match self {
            Self::Amount => Self::Description,
            Self::Description => Self::Amount,
        }
    }
}

/// Action waiting on a y/N answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    ClearDatabase,
}

/// Blocking message box; any key dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dialog {
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) is_error: bool,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) focus: Focus,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) dialog: Option<Dialog>,

    // History
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) history_index: usize,
    pub(crate) history_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_title: String,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Ledger,
            input_mode: InputMode::Normal,
            focus: Focus::Amount,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            dialog: None,

            history: Vec::new(),
            history_index: 0,
            history_scroll: 0,

            pending_action: None,
            confirm_title: String::new(),
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Run one action through the controller and fold the result into UI state.
    /// Failures become dialogs; they never end the session.
    pub(crate) fn apply(&mut self, controller: &mut Controller, action: Action) {
        match controller.dispatch(action) {
            Ok(outcome) => self.show_outcome(controller, outcome),
            Err(err) => self.show_error(&err),
        }
    }

    fn show_outcome(&mut self, controller: &Controller, outcome: Outcome) {
        match outcome {
            Outcome::Recorded { id, kind, amount } => {
                self.focus = Focus::Amount;
                self.set_status(format!(
                    "Added {kind} #{id}: {}",
                    controller.currency().format(amount)
                ));
            }
            Outcome::Ignored => {}
            Outcome::History(entries) => {
                self.history = entries;
                self.history_index = 0;
                self.history_scroll = 0;
                self.screen = Screen::History;
                self.input_mode = InputMode::Normal;
            }
            Outcome::InputsCleared => {
                self.focus = Focus::Amount;
                self.set_status("Inputs cleared");
            }
            Outcome::CurrencyChanged(currency) => {
                self.set_status(format!("Currency: {currency}"));
            }
            Outcome::ConfirmClearDatabase { title, prompt } => {
                self.pending_action = Some(PendingAction::ClearDatabase);
                self.confirm_title = title.to_string();
                self.confirm_message = prompt.to_string();
                self.input_mode = InputMode::Confirm;
            }
            Outcome::DatabaseCleared { removed, notice } => {
                self.history.clear();
                self.set_status(format!("Removed {removed} transactions"));
                self.dialog = Some(Dialog {
                    title: "Success".into(),
                    message: notice.to_string(),
                    is_error: false,
                });
            }
        }
    }

    fn show_error(&mut self, err: &ActionError) {
        if let ActionError::Storage(e) = err {
            error!(error = %e, "action failed");
        }
        self.dialog = Some(Dialog {
            title: err.title().to_string(),
            message: err.to_string(),
            is_error: true,
        });
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
