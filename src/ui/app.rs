use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::query::{self, CategoryBreakdown, Summary, TypeFilter, ViewConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Dashboard
    pub(crate) summary: Summary,
    pub(crate) breakdown: CategoryBreakdown,
    pub(crate) income_count: usize,
    pub(crate) expense_count: usize,

    // Transactions
    pub(crate) type_filter: TypeFilter,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) transaction_count: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,

            summary: Summary::default(),
            breakdown: CategoryBreakdown::NoData,
            income_count: 0,
            expense_count: 0,

            type_filter: TypeFilter::All,
            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,
            transaction_count: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn view_config(&self) -> ViewConfig {
        ViewConfig::new(self.type_filter, self.search_input.clone())
    }

    /// Recompute every derived view from the ledger's current contents.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        let all = ledger.list();
        self.summary = query::summarize(all);
        self.breakdown = query::category_breakdown(all);
        self.income_count = all.iter().filter(|t| t.is_income()).count();
        self.expense_count = all.iter().filter(|t| t.is_expense()).count();
        self.transaction_count = all.len();
        self.refresh_transactions(ledger);
    }

    pub(crate) fn refresh_transactions(&mut self, ledger: &Ledger) {
        self.transactions = query::filter_and_sort(ledger.list(), &self.view_config());
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    /// Jump back to the top of the list, e.g. after the filter changes.
    pub(crate) fn reset_cursor(&mut self) {
        self.transaction_index = 0;
        self.transaction_scroll = 0;
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    /// Ask for a y/N confirmation before deleting the highlighted row.
    pub(crate) fn confirm_delete_selected(&mut self) {
        let Some(txn) = self.selected_transaction() else {
            self.set_status("No transaction selected");
            return;
        };
        let id = txn.id;
        let description = txn.description.clone();
        self.confirm_message = format!("Delete '{description}'?");
        self.pending_action = Some(PendingAction::DeleteTransaction { id, description });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
