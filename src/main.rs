//! Main module for the bracket draw widget using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use bracket_draw::{
    apply, audio::BlipPlayer, defaults::SLOT_COUNT, now_ms, DrawEvent, DrawState, Effect, Player,
};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod config;
mod scheduler;

use components::{render_board, render_player_list};
use config::{BACKGROUND_VIDEO_SRC, BRACKET_IMAGE_SRC, INITIAL_PLAYERS};
use scheduler::TimerPool;

/// Everything a scheduled callback needs to keep driving the state machine.
#[derive(Clone)]
struct DrawSession {
    state: Rc<RefCell<DrawState>>,
    timers: TimerPool,
    audio: Rc<BlipPlayer>,
    /// Bumped after every dispatch to trigger a re-render.
    version: UseStateHandle<u64>,
}

/// Apply one event and perform the effects it requests.
fn dispatch(session: &DrawSession, event: DrawEvent) {
    let effects = {
        let mut state = session.state.borrow_mut();
        apply(&mut state, event, &mut rand::rng())
    };
    run_effects(session, effects);
    session.version.set(session.version.wrapping_add(1));
}

fn run_effects(session: &DrawSession, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::ScheduleTick { delay_ms } => {
                let s = session.clone();
                session.timers.schedule(delay_ms, move || {
                    dispatch(&s, DrawEvent::Tick { now_ms: now_ms() });
                });
            }
            Effect::PlayBlip => session.audio.play(),
            Effect::ScheduleSettle { slot, delay_ms } => {
                let s = session.clone();
                session.timers.schedule(delay_ms, move || {
                    dispatch(&s, DrawEvent::PlacementSettled { slot });
                });
            }
            Effect::SchedulePlaceLast { delay_ms } => {
                let s = session.clone();
                session.timers.schedule(delay_ms, move || {
                    dispatch(&s, DrawEvent::LastPlayerDue);
                });
            }
            Effect::CancelAll => session.timers.clear(),
        }
    }
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let version = use_state(|| 0u64);
    let state = use_mut_ref(|| {
        let players = INITIAL_PLAYERS.iter().copied().map(Player::new).collect();
        DrawState::new(players, SLOT_COUNT).expect("initial player list matches the board size")
    });
    let timers = use_mut_ref(TimerPool::default);
    let audio = use_mut_ref(|| Rc::new(BlipPlayer::new()));

    let session = DrawSession {
        state: state.clone(),
        timers: timers.borrow().clone(),
        audio: Rc::clone(&audio.borrow()),
        version: version.clone(),
    };

    // Mount: evaluate the force-last guard once. Teardown: cancel every
    // pending callback and release the audio device.
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            dispatch(&session, DrawEvent::SessionStarted);
            move || {
                debug!("Tearing down with {} pending timers", session.timers.pending());
                session.timers.clear();
                session.audio.close();
            }
        });
    }

    // Render from a snapshot so the borrow never outlives this pass.
    let snapshot = session.state.borrow().clone();
    // Reading the counter ties re-renders to dispatches.
    let _ = *version;

    let on_draw = {
        let session = session.clone();
        Callback::from(move |_| dispatch(&session, DrawEvent::DrawRequested { now_ms: now_ms() }))
    };
    let on_shuffle = {
        let session = session.clone();
        Callback::from(move |_| dispatch(&session, DrawEvent::ShuffleRequested))
    };
    let on_reset = {
        let session = session.clone();
        Callback::from(move |_| dispatch(&session, DrawEvent::ResetRequested))
    };

    html! {
        <div class="stage">
            { render_board(&snapshot) }

            <div class="side-panel">
                <h3>{ "Players" }</h3>
                { render_player_list(&snapshot) }

                if !snapshot.is_complete() {
                    <div class="controls">
                        <button onclick={on_draw} disabled={!snapshot.can_draw()}>
                            { "Draw next player" }
                        </button>
                        <button onclick={on_shuffle} disabled={!snapshot.can_shuffle()}>
                            { "Shuffle players" }
                        </button>
                    </div>
                } else {
                    <button class="reset" onclick={on_reset}>
                        { "Reset draw" }
                    </button>
                }
            </div>

            <img class="bracket-grid" src={BRACKET_IMAGE_SRC} alt="" />
            <video class="background" autoplay=true loop=true muted=true src={BACKGROUND_VIDEO_SRC}></video>
        </div>
    }
}

/// Entry point: installs the panic hook and starts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
