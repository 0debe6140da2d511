use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use tracing::{error, info};

use snake_engine::{GameLoop, TimerScheduler};
use snake_game::selectors::{game, ui};
use snake_game::state::SettingsError;

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    if let Err(err) = run_session(app) {
        error!(error = %err, "settings_save_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run_session(app: AppWiring) -> Result<(), SettingsError> {
    let AppWiring {
        config,
        settings_path,
        session,
    } = app;

    let refresh_hz = config.target_fps.round() as u32;
    let handle = session.handle();
    let session = Rc::new(RefCell::new(session));
    let update_session = Rc::clone(&session);
    let render_session = Rc::clone(&session);

    let mut game_loop = GameLoop::with_control(
        TimerScheduler::new(refresh_hz),
        config,
        handle,
        move |dt| update_session.borrow_mut().update(dt),
        move |alpha| render_session.borrow_mut().render(alpha),
    );
    game_loop.run();
    let metrics = game_loop.metrics_handle().snapshot();

    let session = session.borrow();
    let state = session.state();
    ui::settings(state).save(&settings_path)?;
    info!(
        final_score = game::final_score(state),
        play_time_seconds = game::stats(state).play_time_seconds,
        measured_fps = metrics.fps,
        "demo_complete"
    );
    Ok(())
}
