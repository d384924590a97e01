use gloo::console;
use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::actions::{load_activities, register_signup, unregister_participant, Settled};
use crate::config::BoardConfig;
use crate::service::HttpActivityService;
use crate::state::{BoardAction, BoardState, Sequencer};
use crate::view::{self, ParticipantRow};

#[derive(Properties, Clone, PartialEq)]
pub struct BoardProps {
    #[prop_or_default]
    pub config: BoardConfig,
}

#[function_component(ActivityBoard)]
pub fn activity_board(props: &BoardProps) -> Html {
    let state = use_reducer(BoardState::default);
    let sequencer = use_mut_ref(Sequencer::default);
    // Only the newest hide timer is kept; replacing it cancels the old one.
    let hide_timer = use_mut_ref(|| None::<Timeout>);
    let service = HttpActivityService::new(&props.config.api_base);

    let load = {
        let dispatcher = state.dispatcher();
        let sequencer = sequencer.clone();
        let service = service.clone();
        Callback::from(move |()| {
            let ticket = sequencer.borrow_mut().next_ticket();
            let dispatcher = dispatcher.clone();
            let service = service.clone();
            spawn_local(async move {
                match load_activities(&service).await {
                    Ok(catalog) => {
                        console::debug!(format!("load #{ticket}: {} activities", catalog.len()));
                        dispatcher.dispatch(BoardAction::CatalogLoaded { ticket, catalog });
                    }
                    Err(e) => {
                        console::error!(format!("Error fetching activities: {e}"));
                        dispatcher.dispatch(BoardAction::CatalogFailed { ticket });
                    }
                }
            });
        })
    };

    let hide_later = {
        let dispatcher = state.dispatcher();
        let timeout_ms = props.config.message_timeout_ms;
        Callback::from(move |generation: u64| {
            let hide = dispatcher.clone();
            let timer = Timeout::new(timeout_ms, move || {
                hide.dispatch(BoardAction::HideMessage { generation });
            });
            *hide_timer.borrow_mut() = Some(timer);
        })
    };

    let apply_settled = {
        let dispatcher = state.dispatcher();
        let load = load.clone();
        Callback::from(move |settled: Settled| {
            match &settled.diagnostic {
                Some(diagnostic) => console::error!(diagnostic.clone()),
                None => console::log!(settled.message.text.clone()),
            }
            let generation = sequencer.borrow_mut().next_generation();
            let followup = settled.followup(generation);
            for action in followup.actions {
                dispatcher.dispatch(action);
            }
            hide_later.emit(followup.generation);
            if followup.reload {
                load.emit(());
            }
        })
    };

    // Load once on mount
    {
        let load = load.clone();
        use_effect_with((), move |_| {
            load.emit(());
            || ()
        });
    }

    let on_submit = {
        let form = state.form.clone();
        let service = service.clone();
        let apply_settled = apply_settled.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = form.clone();
            let service = service.clone();
            let apply_settled = apply_settled.clone();
            spawn_local(async move {
                let settled = register_signup(&service, &form.activity, &form.email).await;
                apply_settled.emit(settled);
            });
        })
    };

    let on_delete = {
        let service = service.clone();
        Callback::from(move |row: ParticipantRow| {
            let service = service.clone();
            let apply_settled = apply_settled.clone();
            spawn_local(async move {
                let settled = unregister_participant(&service, &row.activity, &row.email).await;
                apply_settled.emit(settled);
            });
        })
    };

    let on_email = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let v = e.target_unchecked_into::<HtmlInputElement>().value();
            dispatcher.dispatch(BoardAction::EditEmail(v));
        })
    };

    let on_activity = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: Event| {
            let v = e.target_unchecked_into::<HtmlSelectElement>().value();
            dispatcher.dispatch(BoardAction::SelectActivity(v));
        })
    };

    html! {
        <main class="activity-board">
            <section id="activities-container">
                <h3>{ "Available Activities" }</h3>
                <div id="activities-list">
                    { view::render_list(&view::list_view(&state), &on_delete) }
                </div>
            </section>

            <section id="signup-container">
                <h3>{ "Sign Up for an Activity" }</h3>
                <form id="signup-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{ "Student Email:" }</label>
                        <input
                            type="email"
                            id="email"
                            required=true
                            placeholder="your-email@mergington.edu"
                            value={state.form.email.clone()}
                            oninput={on_email}
                        />
                    </div>
                    <div class="form-group">
                        <label for="activity">{ "Select Activity:" }</label>
                        <select id="activity" required=true onchange={on_activity}>
                            { view::render_options(&view::select_options(&state)) }
                        </select>
                    </div>
                    <button type="submit">{ "Sign Up" }</button>
                </form>
                { view::render_message(&state.message) }
            </section>
        </main>
    }
}
