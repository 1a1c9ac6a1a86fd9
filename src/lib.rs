//! Core logic for the bracket player-draw widget.
//!
//! Everything here is platform-neutral: the state machine never touches the
//! DOM, timers, or audio. Each operation is a transition
//! `(state, event) -> state'` that returns a list of [`Effect`]s for the
//! driver to perform (schedule a tick, play a blip, cancel timers).

use log::{debug, info, warn};
use rand::seq::{IndexedRandom, SliceRandom};
use std::fmt;

/// Fixed draw parameters shared by core and driver.
pub mod defaults {
    /// Number of board positions. Must equal the player count.
    pub const SLOT_COUNT: usize = 4;
    /// Total length of one randomized reveal animation.
    pub const ANIMATION_DURATION_MS: f64 = 5000.0;
    /// Highlight cadence at the start of an animation.
    pub const TICK_INTERVAL_MIN_MS: f64 = 50.0;
    /// How much the cadence stretches by the end of an animation.
    pub const TICK_INTERVAL_SPAN_MS: f64 = 450.0;
    /// Pause before the final player is placed deterministically.
    pub const LAST_PLAYER_DELAY_MS: u32 = 1000;
    /// How long a freshly placed name keeps its emphasis styling.
    pub const JUST_PLACED_DELAY_MS: u32 = 1000;
}

use defaults::*;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Occupant of a filled slot. `just_placed` drives the one-shot visual
/// emphasis and is cleared by [`DrawEvent::PlacementSettled`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotOccupant {
    pub name: String,
    pub just_placed: bool,
}

pub type Slot = Option<SlotOccupant>;

// Board construction errors. Anything rejected after construction is a
// logged no-op, never an error.
#[derive(Debug)]
pub enum BoardError {
    NoPlayers,
    PlayerSlotMismatch { players: usize, slots: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::NoPlayers => write!(f, "Player list is empty"),
            BoardError::PlayerSlotMismatch { players, slots } => write!(
                f,
                "Player count {} does not match slot count {}",
                players, slots
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// Events accepted by [`apply`]. Timing is injected (`now_ms`) so the core
/// stays deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawEvent {
    /// Widget mounted; evaluates the force-last guard once.
    SessionStarted,
    /// User pressed the draw button.
    DrawRequested { now_ms: f64 },
    /// One highlight tick of the running reveal animation.
    Tick { now_ms: f64 },
    /// The force-last delay elapsed.
    LastPlayerDue,
    /// The post-placement display delay elapsed for `slot`.
    PlacementSettled { slot: usize },
    /// User pressed the shuffle button.
    ShuffleRequested,
    /// User pressed the reset button.
    ResetRequested,
}

/// Side effects requested by a transition, performed by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScheduleTick { delay_ms: u32 },
    PlayBlip,
    ScheduleSettle { slot: usize, delay_ms: u32 },
    SchedulePlaceLast { delay_ms: u32 },
    CancelAll,
}

/// Full state of one draw session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawState {
    /// Draw order; index `current_index` is the next player to be drawn.
    pub players: Vec<Player>,
    pub slots: Vec<Slot>,
    pub current_index: usize,
    pub animating: bool,
    /// Slot pulsing during the reveal animation; never a placement.
    pub highlighted: Option<usize>,
    pub waiting_for_last: bool,
    anim_started_at: Option<f64>,
}

impl DrawState {
    /// Build a fresh board. Fails fast when the player count and slot count
    /// differ, since both the random draw and the force-last path assume
    /// they are equal.
    pub fn new(players: Vec<Player>, slot_count: usize) -> Result<Self, BoardError> {
        if players.is_empty() {
            return Err(BoardError::NoPlayers);
        }
        if players.len() != slot_count {
            return Err(BoardError::PlayerSlotMismatch {
                players: players.len(),
                slots: slot_count,
            });
        }
        Ok(Self {
            players,
            slots: vec![None; slot_count],
            current_index: 0,
            animating: false,
            highlighted: None,
            waiting_for_last: false,
            anim_started_at: None,
        })
    }

    /// Indices of currently empty slots.
    pub fn empty_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// A draw is allowed while at least two players remain undrawn and
    /// nothing else is in flight. The last player is never drawn manually.
    pub fn can_draw(&self) -> bool {
        self.current_index + 1 < self.players.len() && !self.animating && !self.waiting_for_last
    }

    /// Shuffling is allowed only before the first draw.
    pub fn can_shuffle(&self) -> bool {
        self.current_index == 0 && !self.animating && !self.waiting_for_last
    }

    pub fn is_complete(&self) -> bool {
        self.current_index == self.players.len()
    }

    fn place(&mut self, slot: usize) {
        let name = self.players[self.current_index].name.clone();
        info!("Placing '{}' into slot {}", name, slot);
        self.slots[slot] = Some(SlotOccupant {
            name,
            just_placed: true,
        });
        self.current_index += 1;
    }

    // Guard for the automatic final placement, evaluated after every commit
    // and once at session start.
    fn arm_force_last(&mut self, effects: &mut Vec<Effect>) {
        if !self.waiting_for_last && self.current_index + 1 == self.players.len() {
            debug!("One player left, arming forced placement");
            self.waiting_for_last = true;
            effects.push(Effect::SchedulePlaceLast {
                delay_ms: LAST_PLAYER_DELAY_MS,
            });
        }
    }
}

/// Inter-tick interval for the reveal animation: starts near 50 ms and
/// stretches linearly toward 500 ms as elapsed time approaches the total
/// duration, producing the slowing-down effect.
pub fn tick_interval_ms(elapsed_ms: f64) -> u32 {
    let progress = (elapsed_ms / ANIMATION_DURATION_MS).clamp(0.0, 1.0);
    (TICK_INTERVAL_MIN_MS + TICK_INTERVAL_SPAN_MS * progress).round() as u32
}

/// Apply one event to the state, returning the side effects to perform.
///
/// Events whose preconditions do not hold (a draw while animating, a stale
/// tick after reset, a shuffle after the first draw) are no-ops: the state
/// is untouched and no effects are returned.
pub fn apply(state: &mut DrawState, event: DrawEvent, rng: &mut impl rand::Rng) -> Vec<Effect> {
    let mut effects = Vec::new();

    match event {
        DrawEvent::SessionStarted => {
            state.arm_force_last(&mut effects);
        }

        DrawEvent::DrawRequested { now_ms } => {
            if !state.can_draw() {
                debug!(
                    "Draw rejected (index {}/{}, animating: {}, waiting: {})",
                    state.current_index,
                    state.players.len(),
                    state.animating,
                    state.waiting_for_last
                );
                return effects;
            }
            state.animating = true;
            state.anim_started_at = Some(now_ms);
            effects.push(Effect::ScheduleTick { delay_ms: 0 });
        }

        DrawEvent::Tick { now_ms } => {
            if !state.animating {
                debug!("Ignoring tick outside an animation");
                return effects;
            }
            let started = match state.anim_started_at {
                Some(t) => t,
                None => {
                    warn!("Animating without a start timestamp, dropping tick");
                    state.animating = false;
                    return effects;
                }
            };
            let elapsed = now_ms - started;

            if elapsed < ANIMATION_DURATION_MS {
                // Suspense pulse only; nothing is placed yet.
                match state.empty_slots().choose(rng) {
                    Some(&slot) => {
                        state.highlighted = Some(slot);
                        effects.push(Effect::PlayBlip);
                        effects.push(Effect::ScheduleTick {
                            delay_ms: tick_interval_ms(elapsed),
                        });
                    }
                    None => {
                        warn!("No empty slot left to highlight, aborting animation");
                        state.animating = false;
                        state.anim_started_at = None;
                    }
                }
            } else {
                // Duration reached: the last highlighted slot takes the draw.
                let slot = state
                    .highlighted
                    .or_else(|| state.empty_slots().choose(rng).copied());
                state.highlighted = None;
                state.animating = false;
                state.anim_started_at = None;
                match slot {
                    Some(slot) => {
                        state.place(slot);
                        effects.push(Effect::ScheduleSettle {
                            slot,
                            delay_ms: JUST_PLACED_DELAY_MS,
                        });
                        state.arm_force_last(&mut effects);
                    }
                    None => warn!("Animation finished with a full board, nothing to place"),
                }
            }
        }

        DrawEvent::LastPlayerDue => {
            if !state.waiting_for_last {
                debug!("Ignoring stale forced-placement callback");
                return effects;
            }
            state.waiting_for_last = false;
            match state.slots.iter().position(|slot| slot.is_none()) {
                Some(slot) => {
                    state.place(slot);
                    effects.push(Effect::ScheduleSettle {
                        slot,
                        delay_ms: JUST_PLACED_DELAY_MS,
                    });
                }
                None => warn!("Forced placement fired with no empty slot"),
            }
        }

        DrawEvent::PlacementSettled { slot } => {
            if let Some(Some(occupant)) = state.slots.get_mut(slot) {
                occupant.just_placed = false;
            }
        }

        DrawEvent::ShuffleRequested => {
            if !state.can_shuffle() {
                debug!("Shuffle rejected after the first draw");
                return effects;
            }
            state.players.shuffle(rng);
            info!(
                "Shuffled draw order: {:?}",
                state.players.iter().map(|p| &p.name).collect::<Vec<_>>()
            );
        }

        DrawEvent::ResetRequested => {
            info!("Resetting board");
            for slot in &mut state.slots {
                *slot = None;
            }
            state.current_index = 0;
            state.animating = false;
            state.highlighted = None;
            state.waiting_for_last = false;
            state.anim_started_at = None;
            effects.push(Effect::CancelAll);
        }
    }

    effects
}

/// Millisecond wall-clock reading for elapsed-time measurement.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

pub mod audio;
