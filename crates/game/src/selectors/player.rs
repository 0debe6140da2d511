use crate::state::{DeathCause, GameState, InventorySlot, PlayerStats, Segment};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPosition {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

pub fn position(state: &GameState) -> PlayerPosition {
    PlayerPosition {
        x: state.player.x,
        y: state.player.y,
        angle: state.player.angle,
    }
}

pub fn is_alive(state: &GameState) -> bool {
    state.player.alive
}

pub fn is_boosting(state: &GameState) -> bool {
    state.player.boosting
}

pub fn length(state: &GameState) -> u32 {
    state.player.length
}

pub fn segments(state: &GameState) -> &[Segment] {
    &state.player.segments
}

pub fn death_cause(state: &GameState) -> Option<DeathCause> {
    state.player.death_cause
}

pub fn lives(state: &GameState) -> u32 {
    state.player.lives
}

pub fn inventory(state: &GameState) -> &[InventorySlot] {
    &state.player.inventory
}

pub fn total_elements(state: &GameState) -> u32 {
    state.player.inventory.iter().map(|slot| slot.count).sum()
}

pub fn stats(state: &GameState) -> PlayerStats {
    state.player.stats
}
