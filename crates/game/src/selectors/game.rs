use crate::state::{AiSnake, Element, GameMode, GameState, GameStatus, SessionStats};

pub fn status(state: &GameState) -> GameStatus {
    state.game.status
}

pub fn mode(state: &GameState) -> GameMode {
    state.game.mode
}

pub fn score(state: &GameState) -> u32 {
    state.game.score
}

pub fn high_score(state: &GameState) -> u32 {
    state.game.high_score
}

// Zero until a run has finished.
pub fn final_score(state: &GameState) -> u32 {
    state.game.final_score
}

pub fn elements(state: &GameState) -> &[Element] {
    &state.game.elements
}

pub fn element_count(state: &GameState) -> usize {
    state.game.elements.len()
}

pub fn ai_snakes(state: &GameState) -> &[AiSnake] {
    &state.game.ai_snakes
}

pub fn ai_snake_count(state: &GameState) -> usize {
    state.game.ai_snakes.len()
}

pub fn stats(state: &GameState) -> SessionStats {
    state.game.stats
}
