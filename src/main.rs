//! Main module for the Fastest Typer application using Yew.
//! Wires the game reducer, timers, and view components.

use fastest_typer::{now_ms, GameAction, GameState, Player};
use gloo_timers::callback::{Interval, Timeout};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod utils;

use components::{
    render_countdown, render_summary, ConfettiLayer, DurationField, InstructionsModal,
    PlayerButton,
};
use config::TICK_INTERVAL_MS;
use hooks::use_validated_input;
use utils::validate_duration;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Schedule the confetti hide for `deadline_ms`, cancelling any pending hide
/// by replacing (and so dropping) the previous timeout.
fn reschedule_confetti_hide(
    slot: &Rc<RefCell<Option<Timeout>>>,
    game: &UseReducerHandle<GameState>,
    deadline_ms: f64,
) {
    let delay_ms = (deadline_ms - now_ms()).max(0.0).ceil() as u32;
    let game = game.clone();
    let pending = Timeout::new(delay_ms, move || {
        game.dispatch(GameAction::ExpireConfetti(deadline_ms));
    });
    *slot.borrow_mut() = Some(pending);
}

// ──────────────────────────────────────────────────────────────────────────────

/// Game controller: owns the round state and every side effect tied to it.
#[function_component(Main)]
fn main_component() -> Html {
    let game = use_reducer(GameState::default);
    // Pending confetti hide; dropping the handle cancels it
    let confetti_timer = use_mut_ref(|| None::<Timeout>);

    let duration_input = {
        let game = game.clone();
        let parse: Rc<dyn Fn(&str) -> Result<u32, String>> = Rc::new(validate_duration);
        use_validated_input(
            game.duration_secs(),
            parse,
            Callback::from(move |secs: u32| game.dispatch(GameAction::SetDuration(secs))),
        )
    };

    // Round timer: lives exactly as long as the round is running
    {
        let game = game.clone();
        use_effect_with(game.is_running(), move |&running| {
            let interval = running.then(|| {
                log::debug!("Starting {} ms round timer", TICK_INTERVAL_MS);
                Interval::new(TICK_INTERVAL_MS, move || {
                    game.dispatch(GameAction::Tick(now_ms()));
                })
            });
            move || drop(interval)
        });
    }

    // Confetti hide timer: cancel-then-reschedule whenever the deadline moves
    {
        let game = game.clone();
        let slot = confetti_timer.clone();
        use_effect_with(game.confetti_deadline_ms(), move |&deadline| {
            if let Some(deadline) = deadline {
                reschedule_confetti_hide(&slot, &game, deadline);
            }
            || ()
        });
    }

    let onpress = {
        let game = game.clone();
        Callback::from(move |player: Player| {
            game.dispatch(GameAction::Press {
                player,
                now_ms: now_ms(),
            });
        })
    };

    let toggle_instructions = {
        let game = game.clone();
        Callback::from(move |_: ()| game.dispatch(GameAction::ToggleInstructions))
    };

    let on_reset = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| game.dispatch(GameAction::Reset))
    };

    let running = game.is_running();
    let enabled = game.buttons_enabled();

    html! {
        <div class="App">
            <h1>{ "Fastest Presser App" }</h1>
            <DurationField input={duration_input} />

            <div class="button-container">
                { Player::ALL.iter().map(|&player| html! {
                    <PlayerButton
                        key={player.to_string()}
                        {player}
                        {running}
                        {enabled}
                        onpress={onpress.clone()}
                    />
                }).collect::<Html>() }
                <button onclick={toggle_instructions.reform(|_: MouseEvent| ())}>{ "Learn" }</button>
                if game.instructions_visible() {
                    <InstructionsModal on_close={toggle_instructions.clone()} />
                }
            </div>

            if game.confetti_visible() {
                <ConfettiLayer key={game.confetti_bursts().to_string()} />
            }

            if running {
                { render_countdown(game.remaining_secs()) }
            }

            if let Some(outcome) = game.outcome() {
                { render_summary(game.score(), outcome, on_reset) }
            }
        </div>
    }
}

/// Root component.
#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: installs logging and the panic hook, then renders the App.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    yew::Renderer::<App>::new().render();
}
