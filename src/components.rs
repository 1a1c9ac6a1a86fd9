//! Pure Yew view helpers for the draw widget.
//!
//! Stateless functions that render deterministically from a state snapshot,
//! keeping the stateful component small.

use bracket_draw::DrawState;
use yew::prelude::*;

/// Render the four bracket slots.
///
/// Slot styling follows the state machine: the pulsing highlight during the
/// reveal animation, the one-shot emphasis right after a placement, and a
/// spinner on the sole empty slot while the final placement is pending.
pub fn render_board(state: &DrawState) -> Html {
    html! {
        <div class="board">
            { state.slots.iter().enumerate().map(|(idx, slot)| {
                let mut classes = classes!("slot");
                if state.highlighted == Some(idx) {
                    classes.push("highlighted");
                }
                match slot {
                    Some(occupant) => {
                        if occupant.just_placed {
                            classes.push("just-placed");
                        }
                        html! {
                            <div key={idx} class={classes}>{ &occupant.name }</div>
                        }
                    }
                    None if state.waiting_for_last => {
                        classes.push("waiting");
                        html! {
                            <div key={idx} class={classes}>
                                <div class="spinner"></div>
                            </div>
                        }
                    }
                    None => html! { <div key={idx} class={classes}></div> },
                }
            }).collect::<Html>() }
        </div>
    }
}

/// Render the ordered player list, marking the next player to be drawn.
pub fn render_player_list(state: &DrawState) -> Html {
    html! {
        <div class="player-list">
            { state.players.iter().enumerate().map(|(idx, player)| {
                let class = if idx == state.current_index {
                    "player current"
                } else {
                    "player"
                };
                html! { <div key={idx} class={class}>{ &player.name }</div> }
            }).collect::<Html>() }
        </div>
    }
}
