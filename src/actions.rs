//! What a finished user action means for the board.
//!
//! The async functions here only talk to the service and decide the
//! outcome. [`Settled::followup`] turns that outcome into reducer actions;
//! the component dispatches them, starts the hide timer and logs.

use crate::error::{self, ServiceError};
use crate::message::UiMessage;
use crate::model::{Catalog, ServiceReply};
use crate::service::ActivityService;
use crate::state::BoardAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Signup,
    Unregister,
}

impl Mutation {
    /// Shown when the request failed before the server could explain why.
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Signup => error::SIGNUP_FAILED,
            Self::Unregister => error::UNREGISTER_FAILED,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Signup => "signing up",
            Self::Unregister => "unregistering",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub message: UiMessage,
    pub reset_form: bool,
    pub reload: bool,
    /// Developer-facing detail for the console.
    pub diagnostic: Option<String>,
}

/// State changes a settled action makes, in the order they are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Followup {
    pub actions: Vec<BoardAction>,
    /// Generation of the message being shown, for its hide timer.
    pub generation: u64,
    pub reload: bool,
}

impl Settled {
    pub fn followup(self, generation: u64) -> Followup {
        let mut actions = Vec::with_capacity(2);
        if self.reset_form {
            actions.push(BoardAction::ResetForm);
        }
        actions.push(BoardAction::ShowMessage {
            generation,
            message: self.message,
        });
        Followup {
            actions,
            generation,
            reload: self.reload,
        }
    }
}

pub fn settle(mutation: Mutation, result: Result<ServiceReply, ServiceError>) -> Settled {
    match result {
        Ok(reply) => Settled {
            message: UiMessage::success(reply.message.unwrap_or_default()),
            reset_form: mutation == Mutation::Signup,
            reload: true,
            diagnostic: None,
        },
        Err(e) => {
            let text = match &e {
                ServiceError::Status { detail, .. } => detail
                    .clone()
                    .unwrap_or_else(|| error::GENERIC_ERROR.to_string()),
                ServiceError::Transport(_) | ServiceError::Decode(_) => {
                    mutation.fallback().to_string()
                }
            };
            Settled {
                message: UiMessage::error(text),
                reset_form: false,
                reload: false,
                diagnostic: Some(format!("Error {}: {e}", mutation.label())),
            }
        }
    }
}

pub async fn load_activities<S: ActivityService>(service: &S) -> Result<Catalog, ServiceError> {
    service.fetch_catalog().await
}

pub async fn register_signup<S: ActivityService>(
    service: &S,
    activity: &str,
    email: &str,
) -> Settled {
    settle(Mutation::Signup, service.signup(activity, email).await)
}

pub async fn unregister_participant<S: ActivityService>(
    service: &S,
    activity: &str,
    email: &str,
) -> Settled {
    settle(Mutation::Unregister, service.unregister(activity, email).await)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;
    use crate::message::MessageKind;
    use crate::model::Activity;
    use crate::state::{BoardState, Sequencer};
    use crate::view;

    /// Applies the server's signup rules to an in-memory catalog.
    struct FakeService {
        catalog: RefCell<Catalog>,
        offline: Cell<bool>,
    }

    impl FakeService {
        fn new() -> Self {
            let chess = Activity {
                name: "Chess Club".into(),
                description: "Learn strategies and compete in chess tournaments".into(),
                schedule: "Fridays, 3:30 PM - 5:00 PM".into(),
                max_participants: 2,
                participants: vec!["a@example.com".into()],
                instructor: Some("Coach James".into()),
            };
            let gym = Activity {
                name: "Gym Class".into(),
                description: "Physical education and sports activities".into(),
                schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM".into(),
                max_participants: 30,
                participants: vec![],
                instructor: None,
            };
            Self {
                catalog: RefCell::new([chess, gym].into_iter().collect()),
                offline: Cell::new(false),
            }
        }

        fn rejected(status: u16, detail: &str) -> ServiceError {
            ServiceError::Status {
                status,
                detail: Some(detail.into()),
            }
        }

        fn check_online(&self) -> Result<(), ServiceError> {
            if self.offline.get() {
                return Err(ServiceError::Transport("Failed to fetch".into()));
            }
            Ok(())
        }
    }

    impl ActivityService for FakeService {
        async fn fetch_catalog(&self) -> Result<Catalog, ServiceError> {
            self.check_online()?;
            Ok(self.catalog.borrow().clone())
        }

        async fn signup(&self, activity: &str, email: &str) -> Result<ServiceReply, ServiceError> {
            self.check_online()?;
            let mut catalog = self.catalog.borrow_mut();
            let entry = catalog
                .get_mut(activity)
                .ok_or_else(|| Self::rejected(404, "Activity not found"))?;
            if entry.participants.iter().any(|p| p == email) {
                return Err(Self::rejected(400, "Student already signed up for this activity"));
            }
            if entry.spots_left() == 0 {
                return Err(Self::rejected(400, "Activity is full"));
            }
            entry.participants.push(email.to_string());
            Ok(ServiceReply {
                message: Some(format!("Signed up {email} for {activity}")),
                detail: None,
            })
        }

        async fn unregister(
            &self,
            activity: &str,
            email: &str,
        ) -> Result<ServiceReply, ServiceError> {
            self.check_online()?;
            let mut catalog = self.catalog.borrow_mut();
            let entry = catalog
                .get_mut(activity)
                .ok_or_else(|| Self::rejected(404, "Activity not found"))?;
            let before = entry.participants.len();
            entry.participants.retain(|p| p != email);
            if entry.participants.len() == before {
                return Err(Self::rejected(
                    400,
                    "Student is not signed up for this activity",
                ));
            }
            Ok(ServiceReply {
                message: Some(format!("Unregistered {email} from {activity}")),
                detail: None,
            })
        }
    }

    /// Drives `BoardState` the way the component does, minus the DOM.
    struct Harness {
        service: FakeService,
        state: BoardState,
        seq: Sequencer,
        reloads: usize,
    }

    impl Harness {
        fn new() -> Self {
            let mut harness = Self {
                service: FakeService::new(),
                state: BoardState::default(),
                seq: Sequencer::default(),
                reloads: 0,
            };
            harness.load();
            harness
        }

        fn load(&mut self) {
            let ticket = self.seq.next_ticket();
            let action = match block_on(load_activities(&self.service)) {
                Ok(catalog) => BoardAction::CatalogLoaded { ticket, catalog },
                Err(_) => BoardAction::CatalogFailed { ticket },
            };
            self.state.apply(action);
        }

        fn settle(&mut self, settled: Settled) {
            let followup = settled.followup(self.seq.next_generation());
            for action in followup.actions {
                self.state.apply(action);
            }
            if followup.reload {
                self.reloads += 1;
                self.load();
            }
        }

        fn submit(&mut self, activity: &str, email: &str) {
            self.state.apply(BoardAction::SelectActivity(activity.into()));
            self.state.apply(BoardAction::EditEmail(email.into()));
            let form = self.state.form.clone();
            let settled = block_on(register_signup(&self.service, &form.activity, &form.email));
            self.settle(settled);
        }

        fn delete(&mut self, activity: &str, email: &str) {
            let settled = block_on(unregister_participant(&self.service, activity, email));
            self.settle(settled);
        }

        fn shown(&self) -> &UiMessage {
            self.state.message.current().unwrap()
        }
    }

    #[test]
    fn signup_success_clears_form_and_reloads_once() {
        let mut h = Harness::new();
        h.submit("Gym Class", "new@example.com");

        assert_eq!(h.shown().kind, MessageKind::Success);
        assert_eq!(h.shown().text, "Signed up new@example.com for Gym Class");
        assert!(h.state.message.is_visible());
        assert_eq!(h.state.form.email, "");
        assert_eq!(h.state.form.activity, "");
        assert_eq!(h.reloads, 1);

        let gym = h.state.catalog().unwrap().get("Gym Class").unwrap();
        assert_eq!(gym.participants, ["new@example.com"]);
        assert_eq!(gym.spots_left(), 29);
    }

    #[test]
    fn signup_rejection_shows_detail_and_keeps_form() {
        let mut h = Harness::new();
        h.submit("Chess Club", "b@example.com");
        h.submit("Chess Club", "c@example.com");

        assert_eq!(h.shown().kind, MessageKind::Error);
        assert_eq!(h.shown().text, "Activity is full");
        assert_eq!(h.state.form.email, "c@example.com");
        assert_eq!(h.state.form.activity, "Chess Club");
        assert_eq!(h.reloads, 1);
    }

    #[test]
    fn duplicate_signup_is_rejected_by_server() {
        let mut h = Harness::new();
        h.submit("Chess Club", "a@example.com");
        assert_eq!(h.shown().text, "Student already signed up for this activity");
        assert_eq!(h.reloads, 0);
    }

    #[test]
    fn unregister_removes_participant_after_reload() {
        let mut h = Harness::new();
        let before = view::card_views(h.state.catalog().unwrap());
        assert_eq!(before[0].participants.len(), 1);

        h.delete("Chess Club", "a@example.com");

        assert_eq!(h.shown().kind, MessageKind::Success);
        assert_eq!(h.shown().text, "Unregistered a@example.com from Chess Club");
        let after = view::card_views(h.state.catalog().unwrap());
        let chess = after.iter().find(|c| c.name == "Chess Club").unwrap();
        assert!(chess.participants.iter().all(|p| p.email != "a@example.com"));
        assert_eq!(chess.spots_left, 2);
    }

    #[test]
    fn unregister_failure_does_not_reload() {
        let mut h = Harness::new();
        h.delete("Chess Club", "nobody@example.com");
        assert_eq!(h.shown().kind, MessageKind::Error);
        assert_eq!(h.shown().text, "Student is not signed up for this activity");
        assert_eq!(h.reloads, 0);
    }

    #[test]
    fn offline_mutations_use_action_fallbacks() {
        let mut h = Harness::new();
        h.service.offline.set(true);

        h.submit("Gym Class", "x@example.com");
        assert_eq!(h.shown().text, "Failed to sign up. Please try again.");
        assert_eq!(h.state.form.email, "x@example.com");

        h.delete("Chess Club", "a@example.com");
        assert_eq!(h.shown().text, "Failed to unregister. Please try again.");
        assert_eq!(h.reloads, 0);
    }

    #[test]
    fn failed_reload_keeps_previous_options() {
        let mut h = Harness::new();
        h.service.offline.set(true);
        h.load();
        assert_eq!(h.state.listing, crate::state::Listing::Failed);
        assert_eq!(h.state.options, ["Chess Club", "Gym Class"]);
    }

    #[test]
    fn signup_success_resets_before_showing_and_reloads() {
        let settled = settle(
            Mutation::Signup,
            Ok(ServiceReply {
                message: Some("Signed up".into()),
                detail: None,
            }),
        );
        let followup = settled.followup(4);
        assert_eq!(
            followup.actions,
            [
                BoardAction::ResetForm,
                BoardAction::ShowMessage {
                    generation: 4,
                    message: UiMessage::success("Signed up"),
                },
            ]
        );
        assert_eq!(followup.generation, 4);
        assert!(followup.reload);
    }

    #[test]
    fn rejected_signup_only_shows_message() {
        let settled = settle(
            Mutation::Signup,
            Err(ServiceError::Status {
                status: 400,
                detail: Some("Activity is full".into()),
            }),
        );
        let followup = settled.followup(1);
        assert_eq!(
            followup.actions,
            [BoardAction::ShowMessage {
                generation: 1,
                message: UiMessage::error("Activity is full"),
            }]
        );
        assert!(!followup.reload);
    }

    #[test]
    fn unregister_success_reloads_without_reset() {
        let settled = settle(
            Mutation::Unregister,
            Ok(ServiceReply {
                message: Some("Unregistered".into()),
                detail: None,
            }),
        );
        let followup = settled.followup(2);
        assert!(!followup.actions.contains(&BoardAction::ResetForm));
        assert_eq!(followup.actions.len(), 1);
        assert!(followup.reload);
    }

    #[test]
    fn settle_status_without_detail_uses_generic_text() {
        let settled = settle(
            Mutation::Unregister,
            Err(ServiceError::Status {
                status: 500,
                detail: None,
            }),
        );
        assert_eq!(settled.message, UiMessage::error("An error occurred"));
        assert_eq!(
            settled.diagnostic.as_deref(),
            Some("Error unregistering: HTTP 500: no detail")
        );
    }

    #[test]
    fn settle_unreadable_success_uses_fallback() {
        let settled = settle(Mutation::Signup, Err(ServiceError::Decode("EOF".into())));
        assert_eq!(settled.message.text, "Failed to sign up. Please try again.");
        assert!(!settled.reload);
        assert!(!settled.reset_form);
    }

    #[test]
    fn unregister_success_keeps_form() {
        let settled = settle(
            Mutation::Unregister,
            Ok(ServiceReply {
                message: Some("done".into()),
                detail: None,
            }),
        );
        assert!(settled.reload);
        assert!(!settled.reset_form);
        assert!(settled.diagnostic.is_none());
    }
}
