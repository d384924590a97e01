//! Explicit application state for the board and the actions that change it.

use std::rc::Rc;

use yew::Reducible;

use crate::message::{MessageSlot, UiMessage};
use crate::model::Catalog;

/// What the activity list area shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Listing {
    #[default]
    Loading,
    Failed,
    Loaded(Catalog),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    /// Selected activity name. Empty while the placeholder is selected.
    pub activity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub listing: Listing,
    /// Selectable activity names. Only replaced by a successful load.
    pub options: Vec<String>,
    pub form: SignupForm,
    pub message: MessageSlot,
    applied_ticket: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    CatalogLoaded { ticket: u64, catalog: Catalog },
    CatalogFailed { ticket: u64 },
    EditEmail(String),
    SelectActivity(String),
    ResetForm,
    ShowMessage { generation: u64, message: UiMessage },
    HideMessage { generation: u64 },
}

impl BoardState {
    /// Applies `action`, returning `false` when it was ignored.
    pub fn apply(&mut self, action: BoardAction) -> bool {
        match action {
            BoardAction::CatalogLoaded { ticket, catalog } => {
                if !self.accept_ticket(ticket) {
                    return false;
                }
                self.options = catalog.names().map(str::to_string).collect();
                self.listing = Listing::Loaded(catalog);
            }
            BoardAction::CatalogFailed { ticket } => {
                if !self.accept_ticket(ticket) {
                    return false;
                }
                self.listing = Listing::Failed;
            }
            BoardAction::EditEmail(email) => self.form.email = email,
            BoardAction::SelectActivity(activity) => self.form.activity = activity,
            BoardAction::ResetForm => self.form = SignupForm::default(),
            BoardAction::ShowMessage {
                generation,
                message,
            } => self.message.show(generation, message),
            BoardAction::HideMessage { generation } => return self.message.hide(generation),
        }
        true
    }

    // Last-issued load wins: anything older than what is on screen is dropped.
    fn accept_ticket(&mut self, ticket: u64) -> bool {
        if ticket <= self.applied_ticket {
            return false;
        }
        self.applied_ticket = ticket;
        true
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.listing {
            Listing::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

/// Hands out catalog load tickets and message generations.
///
/// Lives outside the reducer so a handler knows its number before the
/// request or timer it belongs to is started.
#[derive(Debug, Default)]
pub struct Sequencer {
    ticket: u64,
    generation: u64,
}

impl Sequencer {
    pub fn next_ticket(&mut self) -> u64 {
        self.ticket += 1;
        self.ticket
    }

    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
