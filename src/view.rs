//! Rendering as a pure function of [`BoardState`].
//!
//! The `*_view` helpers build plain data that tests can inspect. The
//! `render_*` functions turn that data into Yew markup.

use yew::prelude::*;

use crate::error::LOAD_FAILED;
use crate::message::MessageSlot;
use crate::model::{Activity, Catalog};
use crate::state::{BoardState, Listing};

pub const LOADING: &str = "Loading activities...";
pub const PLACEHOLDER: &str = "-- Select an activity --";

/// A delete control's target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCardView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub instructor: Option<String>,
    pub spots_left: u32,
    pub participants: Vec<ParticipantRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Failed,
    Cards(Vec<ActivityCardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn card_view(activity: &Activity) -> ActivityCardView {
    ActivityCardView {
        name: activity.name.clone(),
        description: activity.description.clone(),
        schedule: activity.schedule.clone(),
        instructor: activity.instructor.clone(),
        spots_left: activity.spots_left(),
        participants: activity
            .participants
            .iter()
            .map(|email| ParticipantRow {
                activity: activity.name.clone(),
                email: email.clone(),
            })
            .collect(),
    }
}

pub fn card_views(catalog: &Catalog) -> Vec<ActivityCardView> {
    catalog.iter().map(card_view).collect()
}

pub fn list_view(state: &BoardState) -> ListView {
    match &state.listing {
        Listing::Loading => ListView::Loading,
        Listing::Failed => ListView::Failed,
        Listing::Loaded(catalog) => ListView::Cards(card_views(catalog)),
    }
}

/// Placeholder first, then one option per activity in catalog order.
pub fn select_options(state: &BoardState) -> Vec<SelectOption> {
    let selected = state.form.activity.as_str();
    let placeholder = SelectOption {
        value: String::new(),
        label: PLACEHOLDER.to_string(),
        selected: selected.is_empty(),
    };
    std::iter::once(placeholder)
        .chain(state.options.iter().map(|name| SelectOption {
            value: name.clone(),
            label: name.clone(),
            selected: name == selected,
        }))
        .collect()
}

pub fn render_card(card: &ActivityCardView, on_delete: &Callback<ParticipantRow>) -> Html {
    html! {
        <div class="activity-card" key={card.name.clone()}>
            <h4>{ card.name.clone() }</h4>
            <p>{ card.description.clone() }</p>
            <p><strong>{ "Schedule:" }</strong>{ format!(" {}", card.schedule) }</p>
            if let Some(instructor) = &card.instructor {
                <p><strong>{ "Instructor:" }</strong>{ format!(" {instructor}") }</p>
            }
            <p><strong>{ "Availability:" }</strong>{ format!(" {} spots left", card.spots_left) }</p>
            if !card.participants.is_empty() {
                <div class="participants-section">
                    <p><strong>{ "Participants:" }</strong></p>
                    <div class="participants-list">
                        { for card.participants.iter().map(|row| render_participant(row, on_delete)) }
                    </div>
                </div>
            }
        </div>
    }
}

fn render_participant(row: &ParticipantRow, on_delete: &Callback<ParticipantRow>) -> Html {
    let onclick = {
        let row = row.clone();
        on_delete.reform(move |_: MouseEvent| row.clone())
    };
    html! {
        <div class="participant-item">
            <span>{ row.email.clone() }</span>
            <button
                class="delete-btn"
                type="button"
                title="Unregister"
                data-activity={row.activity.clone()}
                data-email={row.email.clone()}
                {onclick}
            >
                { "×" }
            </button>
        </div>
    }
}

pub fn render_list(list: &ListView, on_delete: &Callback<ParticipantRow>) -> Html {
    match list {
        ListView::Loading => html! { <p>{ LOADING }</p> },
        ListView::Failed => html! { <p>{ LOAD_FAILED }</p> },
        ListView::Cards(cards) => html! {
            <>{ for cards.iter().map(|card| render_card(card, on_delete)) }</>
        },
    }
}

pub fn render_options(options: &[SelectOption]) -> Html {
    html! {
        <>
            { for options.iter().map(|o| html! {
                <option value={o.value.clone()} selected={o.selected}>{ o.label.clone() }</option>
            }) }
        </>
    }
}

pub fn render_message(slot: &MessageSlot) -> Html {
    let (kind, text) = match slot.current() {
        Some(m) => (Some(m.kind.class()), m.text.clone()),
        None => (None, String::new()),
    };
    let hidden = (!slot.is_visible()).then_some("hidden");
    html! {
        <div id="message" class={classes!(kind, hidden)}>{ text }</div>
    }
}
