//! Pure Yew view components for the Fastest Typer UI.
//!
//! This module contains stateless components that render based on props;
//! all game state lives in the controller in `main.rs`.

use crate::config::{CONFETTI_PIECES, MIN_DURATION_SECS};
use crate::hooks::ValidatedInput;
use crate::utils::viewport_width;
use fastest_typer::{
    button_label, confetti::generate_pieces, format_player_time, format_time_left, Outcome,
    Player, Score,
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InstructionsModalProps {
    pub on_close: Callback<()>,
}

/// Static rules overlay with a single close control.
#[function_component(InstructionsModal)]
pub fn instructions_modal(props: &InstructionsModalProps) -> Html {
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="modal">
            <div class="modal-content">
                <span class="close" onclick={on_close}>{ "\u{00d7}" }</span>
                <h2>{ "Fastest Typer Game Instructions" }</h2>
                <p>
                    <strong>{ "Objective:" }</strong>
                    { " Type as fast as you can within the set time limit." }
                </p>
                <p>
                    <strong>{ "Game Setup:" }</strong>
                    { " Enter the desired game duration (in seconds) and click \"Start.\"" }
                </p>
                <p>
                    <strong>{ "Gameplay:" }</strong>
                    { " Start typing when the game begins. The player with the fastest typing speed wins." }
                </p>
                <p>
                    <strong>{ "Winning Criteria:" }</strong>
                    { " The player with the shortest elapsed time (fastest typing speed) wins." }
                </p>
                <p>
                    <strong>{ "Reset:" }</strong>
                    { " Click \"Reset\" to start a new round." }
                </p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PlayerButtonProps {
    pub player: Player,
    pub running: bool,
    pub enabled: bool,
    pub onpress: Callback<Player>,
}

/// Start/stop button for one player. The label and class follow the round phase.
#[function_component(PlayerButton)]
pub fn player_button(props: &PlayerButtonProps) -> Html {
    let player = props.player;
    let onclick = props.onpress.reform(move |_: MouseEvent| player);
    let class = props
        .running
        .then(|| format!("player{}-playing", player.number()));

    html! {
        <button {onclick} disabled={!props.enabled} class={classes!(class)}>
            { button_label(player, props.running) }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct DurationFieldProps {
    pub input: ValidatedInput,
}

#[function_component(DurationField)]
pub fn duration_field(props: &DurationFieldProps) -> Html {
    let input = &props.input;

    html! {
        <div class="duration-container">
            <label for="duration">{ "Game Duration (seconds):" }</label>
            <input
                type="number"
                id="duration"
                min={MIN_DURATION_SECS.to_string()}
                value={input.text.clone()}
                class={if input.error.is_some() { "invalid" } else { "" }}
                oninput={input.on_text_input.clone()}
            />
            if let Some(ref err) = input.error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}

/// Live countdown shown while a round runs.
pub fn render_countdown(remaining_secs: f64) -> Html {
    html! {
        <p class="timer">{ format_time_left(remaining_secs) }</p>
    }
}

/// Renders both recorded times, the winner line and the reset button.
pub fn render_summary(score: Score, outcome: Outcome, on_reset: Callback<MouseEvent>) -> Html {
    html! {
        <div class="summary">
            { Player::ALL.iter().map(|&player| {
                html! { <p>{ format_player_time(player, score.shown_secs(player)) }</p> }
            }).collect::<Html>() }
            <p class="outcome">{ outcome.to_string() }</p>
            <button onclick={on_reset}>{ "Reset" }</button>
        </div>
    }
}

/// Full-screen confetti shower. Pieces are generated once per mount; the
/// parent keys it on the burst count so each trigger remounts it.
#[function_component(ConfettiLayer)]
pub fn confetti_layer() -> Html {
    let pieces = use_memo((), |_| {
        generate_pieces(&mut rand::rng(), CONFETTI_PIECES, viewport_width())
    });

    html! {
        <div class="confetti" aria-hidden="true">
            { pieces.iter().map(|piece| {
                html! { <span class="confetti-piece" style={piece.style()}></span> }
            }).collect::<Html>() }
        </div>
    }
}
