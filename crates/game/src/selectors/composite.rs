use crate::state::{GameState, GameStatus};

use super::player::PlayerPosition;
use super::{game, player};

pub const BOOST_MIN_LENGTH: u32 = 5;

// Active spans a pause; menus and the game-over screen do not count.
pub fn is_game_active(state: &GameState) -> bool {
    matches!(
        game::status(state),
        GameStatus::Playing | GameStatus::Paused
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerInfo {
    pub position: PlayerPosition,
    pub length: u32,
    pub lives: u32,
    pub alive: bool,
    pub boosting: bool,
}

pub fn player_info(state: &GameState) -> PlayerInfo {
    PlayerInfo {
        position: player::position(state),
        length: player::length(state),
        lives: player::lives(state),
        alive: player::is_alive(state),
        boosting: player::is_boosting(state),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub high_score: u32,
    pub player_length: u32,
    pub elements_collected: u32,
    pub ai_snakes: usize,
}

pub fn game_summary(state: &GameState) -> GameSummary {
    GameSummary {
        score: game::score(state),
        high_score: game::high_score(state),
        player_length: player::length(state),
        elements_collected: game::stats(state).elements_collected,
        ai_snakes: game::ai_snake_count(state),
    }
}

// Stricter than is_game_active: a paused session cannot start a boost.
pub fn can_boost(state: &GameState) -> bool {
    player::is_alive(state)
        && !player::is_boosting(state)
        && game::status(state) == GameStatus::Playing
        && player::length(state) > BOOST_MIN_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::state::{AiSnake, DeathCause};

    fn mid_run_state() -> GameState {
        let mut state = GameState::default();
        state.game.status = GameStatus::Playing;
        state.player.alive = true;
        state.player.length = 6;
        state
    }

    #[test]
    fn boost_opens_only_above_the_length_threshold() {
        let mut state = mid_run_state();

        state.player.length = 4;
        assert!(!can_boost(&state));

        state.player.length = BOOST_MIN_LENGTH;
        assert!(!can_boost(&state));

        state.player.length = 6;
        assert!(can_boost(&state));
    }

    #[test]
    fn boost_is_refused_while_already_boosting() {
        let mut state = mid_run_state();
        state.player.boosting = true;
        assert!(!can_boost(&state));
    }

    #[test]
    fn boost_is_refused_after_death() {
        let mut state = mid_run_state();
        state.player.kill(DeathCause::SelfCollision);
        assert!(!can_boost(&state));
    }

    #[test]
    fn boost_is_refused_outside_live_play() {
        let mut state = mid_run_state();

        state.game.status = GameStatus::Paused;
        assert!(!can_boost(&state));

        state.game.status = GameStatus::Menu;
        assert!(!can_boost(&state));
    }

    #[test]
    fn active_game_spans_playing_and_paused() {
        let mut state = GameState::default();
        assert!(!is_game_active(&state));

        state.game.status = GameStatus::Playing;
        assert!(is_game_active(&state));

        state.game.status = GameStatus::Paused;
        assert!(is_game_active(&state));

        state.game.status = GameStatus::GameOver;
        assert!(!is_game_active(&state));
    }

    #[test]
    fn player_info_bundles_pose_and_vitals() {
        let mut state = mid_run_state();
        state.player.x = 3.0;
        state.player.lives = 2;

        let info = player_info(&state);

        assert_eq!(info.position.x, 3.0);
        assert_eq!(info.length, 6);
        assert_eq!(info.lives, 2);
        assert!(info.alive);
        assert!(!info.boosting);
    }

    #[test]
    fn game_summary_is_one_detached_hud_read() {
        let mut state = mid_run_state();
        state.game.add_score(75);
        state.game.stats.elements_collected = 4;
        state.game.ai_snakes.push(AiSnake {
            id: 1,
            length: 8,
            score: 20,
            x: 0.0,
            y: 0.0,
        });

        let summary = game_summary(&state);
        state.game.add_score(25);

        assert_eq!(summary.score, 75);
        assert_eq!(summary.high_score, 75);
        assert_eq!(summary.player_length, 6);
        assert_eq!(summary.elements_collected, 4);
        assert_eq!(summary.ai_snakes, 1);
        assert_eq!(game_summary(&state).score, 100);
    }
}
