use std::thread;
use std::time::Duration;

use tracing::debug;

use snake_engine::LoopHandle;
use snake_game::selectors::{composite, game, player, ui};
use snake_game::state::{
    AiSnake, Element, ElementId, GameMode, GameState, GameStatus, ModalKind, NoticeKind, Segment,
    STARTING_LENGTH,
};

const PLAYER_SPEED: f32 = 180.0;
const BOOST_SPEED_FACTOR: f32 = 1.8;
const TURN_RATE: f32 = 0.6;
const ELEMENT_SPAWN_PERIOD: f64 = 1.5;
const ELEMENT_PICKUP_PERIOD: f64 = 2.0;
const ELEMENT_KINDS: u32 = 8;
const SPAWN_RING_SLOTS: u64 = 8;
const SPAWN_RING_RADIUS: f32 = 240.0;
const AI_DRIFT_SPEED: f32 = 40.0;
const AI_DEFEAT_AT: f64 = 4.0;
const BOOST_OPENS_AT: f64 = 5.0;
const BOOST_CLOSES_AT: f64 = 6.5;
const PICKUP_SCORE: u32 = 10;
const NOTIFICATION_TTL: f32 = 4.0;
const HUD_LOG_EVERY: u64 = 120;

// Scripted events fire at fixed play-time marks, independent of frame cadence.
pub(crate) struct DemoSession {
    state: GameState,
    handle: LoopHandle,
    run_seconds: f64,
    slow_tick: Option<Duration>,
    next_spawn_at: f64,
    next_pickup_at: f64,
    next_element_id: u64,
    next_element_kind: u32,
    defeated_ai: bool,
    frames_rendered: u64,
}

impl DemoSession {
    pub(crate) fn new(initial: GameState, run_seconds: f64, slow_tick: Option<Duration>) -> Self {
        let mut state = initial;
        begin_run(&mut state);
        Self {
            state,
            handle: LoopHandle::default(),
            run_seconds,
            slow_tick,
            next_spawn_at: ELEMENT_SPAWN_PERIOD,
            next_pickup_at: ELEMENT_PICKUP_PERIOD,
            next_element_id: 0,
            next_element_kind: 0,
            defeated_ai: false,
            frames_rendered: 0,
        }
    }

    // The loop must be built with a clone of this same handle.
    pub(crate) fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    pub(crate) fn update(&mut self, dt_seconds: f64) {
        if let Some(delay) = self.slow_tick {
            // Explicit debug perturbation to force the catch-up path.
            thread::sleep(delay);
        }
        if game::status(&self.state) != GameStatus::Playing {
            return;
        }

        self.advance_player(dt_seconds);
        self.advance_ai(dt_seconds);

        self.state.game.stats.play_time_seconds += dt_seconds;
        let play_time = self.state.game.stats.play_time_seconds;

        while play_time >= self.next_spawn_at {
            self.spawn_element();
            self.next_spawn_at += ELEMENT_SPAWN_PERIOD;
        }
        while play_time >= self.next_pickup_at {
            self.pick_up_element();
            self.next_pickup_at += ELEMENT_PICKUP_PERIOD;
        }
        if !self.defeated_ai && play_time >= AI_DEFEAT_AT {
            self.defeated_ai = true;
            self.defeat_ai();
        }

        self.apply_boost_policy(play_time);
        self.state.ui.tick_notifications(dt_seconds as f32);

        if play_time >= self.run_seconds {
            self.finish();
        }
    }

    pub(crate) fn render(&mut self, alpha: f64) {
        self.frames_rendered += 1;
        if self.frames_rendered % HUD_LOG_EVERY != 0 {
            return;
        }

        let state = &self.state;
        let summary = composite::game_summary(state);
        let pose = player::position(state);
        debug!(
            frame = self.frames_rendered,
            alpha,
            score = summary.score,
            length = summary.player_length,
            x = pose.x,
            y = pose.y,
            elements = game::element_count(state),
            notices = ui::notifications(state).len(),
            "demo_hud"
        );
    }

    fn advance_player(&mut self, dt_seconds: f64) {
        let dt = dt_seconds as f32;
        let player = &mut self.state.player;
        player.angle = wrap_angle(player.angle + TURN_RATE * dt);
        let factor = if player.boosting {
            BOOST_SPEED_FACTOR
        } else {
            1.0
        };
        let distance = player.speed * factor * dt;
        player.x += player.angle.cos() * distance;
        player.y += player.angle.sin() * distance;
        player.segments.insert(
            0,
            Segment {
                x: player.x,
                y: player.y,
            },
        );
        player.segments.truncate(player.length as usize);
        if player.length > player.stats.best_length {
            player.stats.best_length = player.length;
        }
    }

    fn advance_ai(&mut self, dt_seconds: f64) {
        let dt = dt_seconds as f32;
        for snake in &mut self.state.game.ai_snakes {
            snake.x += AI_DRIFT_SPEED * dt;
        }
    }

    fn spawn_element(&mut self) {
        let id = self.next_element_id;
        self.next_element_id += 1;
        let kind = ElementId(self.next_element_kind);
        self.next_element_kind = (self.next_element_kind + 1) % ELEMENT_KINDS;

        let slot_angle =
            (id % SPAWN_RING_SLOTS) as f32 / SPAWN_RING_SLOTS as f32 * std::f32::consts::TAU;
        self.state.game.elements.push(Element {
            id,
            kind,
            x: slot_angle.cos() * SPAWN_RING_RADIUS,
            y: slot_angle.sin() * SPAWN_RING_RADIUS,
        });
    }

    fn pick_up_element(&mut self) {
        let element = match self.state.game.elements.pop() {
            Some(element) => element,
            None => return,
        };

        self.state.player.collect_element(element.kind);
        self.state.player.length += 1;
        self.state.game.stats.elements_collected += 1;
        self.state.game.add_score(PICKUP_SCORE);
        self.state
            .ui
            .push_notification("element banked", NoticeKind::Discovery, NOTIFICATION_TTL);
        debug!(
            kind = element.kind.0,
            banked = player::total_elements(&self.state),
            "element_banked"
        );
    }

    fn defeat_ai(&mut self) {
        let victim = match self.state.game.ai_snakes.pop() {
            Some(victim) => victim,
            None => return,
        };

        self.state.game.stats.ai_defeated += 1;
        self.state.game.add_score(victim.score);
        self.state.ui.push_notification(
            "rival snake defeated",
            NoticeKind::Achievement,
            NOTIFICATION_TTL,
        );
    }

    fn apply_boost_policy(&mut self, play_time: f64) {
        let in_window = play_time >= BOOST_OPENS_AT && play_time < BOOST_CLOSES_AT;
        if !in_window {
            self.state.player.boosting = false;
        } else if composite::can_boost(&self.state) {
            self.state.player.boosting = true;
        }
    }

    fn finish(&mut self) {
        self.state.game.finish_run();
        self.state.ui.modal = Some(ModalKind::GameOver);
        self.state.ui.modal_visible = true;
        debug!(
            final_score = game::final_score(&self.state),
            best_length = player::stats(&self.state).best_length,
            "session_finished"
        );
        self.handle.request_stop();
    }
}

fn begin_run(state: &mut GameState) {
    state.game.status = GameStatus::Playing;
    state.game.mode = GameMode::Infinite;
    state.ui.menu_visible = false;
    state.player.alive = true;
    state.player.speed = PLAYER_SPEED;
    state.player.length = STARTING_LENGTH;
    state.player.segments = vec![Segment::default(); STARTING_LENGTH as usize];
    state.player.stats.games_played += 1;
    for id in 0..3u64 {
        state.game.ai_snakes.push(AiSnake {
            id,
            length: 6 + id as u32 * 2,
            score: 15 * (id as u32 + 1),
            x: -200.0 + 200.0 * id as f32,
            y: 150.0,
        });
    }
    state
        .ui
        .push_notification("welcome to the pit", NoticeKind::Info, NOTIFICATION_TTL);
}

fn wrap_angle(angle: f32) -> f32 {
    if angle > std::f32::consts::TAU {
        angle - std::f32::consts::TAU
    } else {
        angle
    }
}
