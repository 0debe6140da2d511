mod settings;

pub use settings::{ControlScheme, GraphicsQuality, Settings, SettingsError};

pub const DEFAULT_LIVES: u32 = 3;
pub const STARTING_LENGTH: u32 = 5;

// Plain data owned by whoever drives the session; the loop never sees it.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub game: SessionState,
    pub player: PlayerState,
    pub ui: UiState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Classic,
    Infinite,
    Peaceful,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub id: u64,
    pub kind: ElementId,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiSnake {
    pub id: u64,
    pub length: u32,
    pub score: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionStats {
    pub elements_collected: u32,
    pub ai_defeated: u32,
    pub play_time_seconds: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub status: GameStatus,
    pub mode: GameMode,
    pub score: u32,
    pub high_score: u32,
    pub final_score: u32,
    pub elements: Vec<Element>,
    pub ai_snakes: Vec<AiSnake>,
    pub stats: SessionStats,
}

impl SessionState {
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn finish_run(&mut self) {
        self.final_score = self.score;
        self.status = GameStatus::GameOver;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    SnakeCollision,
    BossAttack,
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventorySlot {
    pub kind: ElementId,
    pub count: u32,
}

// Lifetime tallies, carried across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStats {
    pub games_played: u32,
    pub best_length: u32,
    pub elements_collected: u32,
    pub deaths: u32,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub speed: f32,
    // Earned segment count; `segments` holds the rendered trail.
    pub length: u32,
    pub segments: Vec<Segment>,
    pub alive: bool,
    pub boosting: bool,
    pub death_cause: Option<DeathCause>,
    pub lives: u32,
    pub inventory: Vec<InventorySlot>,
    pub stats: PlayerStats,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            speed: 0.0,
            length: 0,
            segments: Vec::new(),
            alive: false,
            boosting: false,
            death_cause: None,
            lives: DEFAULT_LIVES,
            inventory: Vec::new(),
            stats: PlayerStats::default(),
        }
    }
}

impl PlayerState {
    pub fn collect_element(&mut self, kind: ElementId) {
        match self.inventory.iter_mut().find(|slot| slot.kind == kind) {
            Some(slot) => slot.count += 1,
            None => self.inventory.push(InventorySlot { kind, count: 1 }),
        }
        self.stats.elements_collected += 1;
    }

    pub fn kill(&mut self, cause: DeathCause) {
        self.alive = false;
        self.boosting = false;
        self.death_cause = Some(cause);
        self.lives = self.lives.saturating_sub(1);
        self.stats.deaths += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuScreen {
    #[default]
    Main,
    ModeSelect,
    SkinGallery,
    Leaderboard,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    ConfirmExit,
    GameOver,
    Unlock,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudConfig {
    pub show_score: bool,
    pub show_minimap: bool,
    pub show_boost_meter: bool,
    pub show_fps: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            show_score: true,
            show_minimap: true,
            show_boost_meter: true,
            show_fps: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Discovery,
    Achievement,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub text: String,
    pub kind: NoticeKind,
    pub ttl_seconds: f32,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub current_menu: MenuScreen,
    pub menu_visible: bool,
    pub modal: Option<ModalKind>,
    pub modal_visible: bool,
    pub hud: HudConfig,
    pub settings: Settings,
    pub notifications: Vec<Notification>,
    pub loading: bool,
    pub loading_message: String,
    pub mobile: bool,
    pub screen_width: u32,
    pub screen_height: u32,
    next_notification_id: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_menu: MenuScreen::Main,
            menu_visible: true,
            modal: None,
            modal_visible: false,
            hud: HudConfig::default(),
            settings: Settings::default(),
            notifications: Vec::new(),
            loading: false,
            loading_message: String::new(),
            mobile: false,
            screen_width: 1280,
            screen_height: 720,
            next_notification_id: 0,
        }
    }
}

impl UiState {
    pub fn push_notification(
        &mut self,
        text: impl Into<String>,
        kind: NoticeKind,
        ttl_seconds: f32,
    ) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id,
            text: text.into(),
            kind,
            ttl_seconds,
        });
        id
    }

    pub fn tick_notifications(&mut self, dt_seconds: f32) {
        self.notifications.retain_mut(|notification| {
            notification.ttl_seconds -= dt_seconds;
            notification.ttl_seconds > 0.0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_raises_the_high_water_mark_only_when_passed() {
        let mut session = SessionState {
            high_score: 50,
            ..SessionState::default()
        };

        session.add_score(30);
        assert_eq!(session.score, 30);
        assert_eq!(session.high_score, 50);

        session.add_score(30);
        assert_eq!(session.score, 60);
        assert_eq!(session.high_score, 60);
    }

    #[test]
    fn finishing_a_run_freezes_the_final_score() {
        let mut session = SessionState {
            status: GameStatus::Playing,
            ..SessionState::default()
        };
        session.add_score(120);

        session.finish_run();

        assert_eq!(session.status, GameStatus::GameOver);
        assert_eq!(session.final_score, 120);
    }

    #[test]
    fn repeat_pickups_merge_into_one_inventory_slot() {
        let mut player = PlayerState::default();

        player.collect_element(ElementId(7));
        player.collect_element(ElementId(7));
        player.collect_element(ElementId(2));

        assert_eq!(player.inventory.len(), 2);
        let merged = player
            .inventory
            .iter()
            .find(|slot| slot.kind == ElementId(7))
            .expect("slot for kind 7");
        assert_eq!(merged.count, 2);
        assert_eq!(player.stats.elements_collected, 3);
    }

    #[test]
    fn death_clears_boost_and_spends_a_life() {
        let mut player = PlayerState {
            alive: true,
            boosting: true,
            ..PlayerState::default()
        };

        player.kill(DeathCause::SnakeCollision);

        assert!(!player.alive);
        assert!(!player.boosting);
        assert_eq!(player.death_cause, Some(DeathCause::SnakeCollision));
        assert_eq!(player.lives, DEFAULT_LIVES - 1);
        assert_eq!(player.stats.deaths, 1);
    }

    #[test]
    fn notifications_expire_once_their_ttl_runs_out() {
        let mut ui = UiState::default();
        ui.push_notification("water discovered", NoticeKind::Discovery, 1.0);
        ui.push_notification("combo x3", NoticeKind::Achievement, 3.0);

        ui.tick_notifications(0.5);
        assert_eq!(ui.notifications.len(), 2);

        ui.tick_notifications(0.75);
        assert_eq!(ui.notifications.len(), 1);
        assert_eq!(ui.notifications[0].kind, NoticeKind::Achievement);
    }

    #[test]
    fn notification_ids_increase_monotonically() {
        let mut ui = UiState::default();

        let first = ui.push_notification("a", NoticeKind::Info, 1.0);
        let second = ui.push_notification("b", NoticeKind::Info, 1.0);

        assert!(second > first);
    }
}
