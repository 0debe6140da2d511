use crate::state::{
    ControlScheme, GameState, GraphicsQuality, HudConfig, MenuScreen, ModalKind, Notification,
    Settings,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsSettings {
    pub quality: GraphicsQuality,
    pub particles: bool,
    pub screen_shake: bool,
    pub background_animation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    pub scheme: ControlScheme,
    pub touch_sensitivity: f32,
    pub swap_boost_buttons: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

pub fn current_menu(state: &GameState) -> MenuScreen {
    state.ui.current_menu
}

pub fn is_menu_visible(state: &GameState) -> bool {
    state.ui.menu_visible
}

pub fn current_modal(state: &GameState) -> Option<ModalKind> {
    state.ui.modal
}

pub fn is_modal_visible(state: &GameState) -> bool {
    state.ui.modal_visible
}

pub fn hud(state: &GameState) -> HudConfig {
    state.ui.hud
}

pub fn settings(state: &GameState) -> &Settings {
    &state.ui.settings
}

pub fn audio_settings(state: &GameState) -> AudioSettings {
    let settings = &state.ui.settings;
    AudioSettings {
        master_volume: settings.master_volume,
        sfx_volume: settings.sfx_volume,
        music_volume: settings.music_volume,
        muted: settings.muted,
    }
}

pub fn graphics_settings(state: &GameState) -> GraphicsSettings {
    let settings = &state.ui.settings;
    GraphicsSettings {
        quality: settings.quality,
        particles: settings.particles,
        screen_shake: settings.screen_shake,
        background_animation: settings.background_animation,
    }
}

pub fn control_settings(state: &GameState) -> ControlSettings {
    let settings = &state.ui.settings;
    ControlSettings {
        scheme: settings.scheme,
        touch_sensitivity: settings.touch_sensitivity,
        swap_boost_buttons: settings.swap_boost_buttons,
    }
}

pub fn notifications(state: &GameState) -> &[Notification] {
    &state.ui.notifications
}

pub fn is_loading(state: &GameState) -> bool {
    state.ui.loading
}

pub fn loading_message(state: &GameState) -> &str {
    &state.ui.loading_message
}

pub fn is_mobile(state: &GameState) -> bool {
    state.ui.mobile
}

pub fn screen_size(state: &GameState) -> ScreenSize {
    ScreenSize {
        width: state.ui.screen_width,
        height: state.ui.screen_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::state::NoticeKind;

    #[test]
    fn narrowed_settings_views_copy_their_subset() {
        let mut state = GameState::default();
        state.ui.settings.master_volume = 0.25;
        state.ui.settings.quality = GraphicsQuality::High;
        state.ui.settings.scheme = ControlScheme::Touch;
        state.ui.settings.touch_sensitivity = 1.5;

        let audio = audio_settings(&state);
        let graphics = graphics_settings(&state);
        let controls = control_settings(&state);

        assert_eq!(audio.master_volume, 0.25);
        assert_eq!(graphics.quality, GraphicsQuality::High);
        assert_eq!(controls.scheme, ControlScheme::Touch);
        assert_eq!(controls.touch_sensitivity, 1.5);
    }

    #[test]
    fn narrowed_views_detach_from_later_mutation() {
        let mut state = GameState::default();

        let audio = audio_settings(&state);
        state.ui.settings.muted = true;

        assert!(!audio.muted);
        assert!(audio_settings(&state).muted);
    }

    #[test]
    fn the_full_settings_reference_is_live() {
        let state = GameState::default();
        assert!(std::ptr::eq(settings(&state), &state.ui.settings));
    }

    #[test]
    fn notifications_are_a_live_slice() {
        let mut state = GameState::default();
        state.ui.push_notification("hello", NoticeKind::Info, 2.0);

        assert_eq!(
            notifications(&state).as_ptr(),
            state.ui.notifications.as_ptr()
        );
        assert_eq!(notifications(&state).len(), 1);
    }

    #[test]
    fn chrome_flags_read_through() {
        let mut state = GameState::default();
        state.ui.current_menu = MenuScreen::Leaderboard;
        state.ui.menu_visible = false;
        state.ui.modal = Some(ModalKind::ConfirmExit);
        state.ui.modal_visible = true;
        state.ui.loading = true;
        state.ui.loading_message = String::from("connecting");
        state.ui.mobile = true;
        state.ui.screen_width = 390;
        state.ui.screen_height = 844;

        assert_eq!(current_menu(&state), MenuScreen::Leaderboard);
        assert!(!is_menu_visible(&state));
        assert_eq!(current_modal(&state), Some(ModalKind::ConfirmExit));
        assert!(is_modal_visible(&state));
        assert_eq!(hud(&state), HudConfig::default());
        assert!(is_loading(&state));
        assert_eq!(loading_message(&state), "connecting");
        assert!(is_mobile(&state));
        assert_eq!(
            screen_size(&state),
            ScreenSize {
                width: 390,
                height: 844
            }
        );
    }
}
