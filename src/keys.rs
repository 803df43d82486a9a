use crate::app::{App, MenuItem};
use crate::state::app_state::PaneFocus;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request: Option<NetworkRequest> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::IceTime),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Dashboard: pane focus and list movement
        (MenuItem::Dashboard, Char('l') | KeyCode::Right, _) => guard.focus_next_pane(),
        (MenuItem::Dashboard, Char('h') | KeyCode::Left, _) => guard.focus_prev_pane(),
        (MenuItem::Dashboard, Char('j') | KeyCode::Down, _) => guard.navigate_down(),
        (MenuItem::Dashboard, Char('k') | KeyCode::Up, _) => guard.navigate_up(),

        // Dashboard: Enter acts on the focused pane
        (MenuItem::Dashboard, KeyCode::Enter, _) => {
            request = match guard.focused_pane() {
                PaneFocus::Teams => guard.select_team(),
                PaneFocus::Players => guard.open_chart(),
                PaneFocus::Games => guard.select_game_toi(),
            };
        }

        // Dashboard: chart shortcut, season and schedule-depth cycles
        (MenuItem::Dashboard, Char('c'), _) => request = guard.open_chart(),
        (MenuItem::Dashboard, Char('s'), _) => request = guard.cycle_season(),
        (MenuItem::Dashboard, Char('g'), _) => request = guard.cycle_game_limit(),

        // Ice-time chart
        (MenuItem::IceTime, Char('j') | KeyCode::Down, _) => guard.state.chart.highlight_down(),
        (MenuItem::IceTime, Char('k') | KeyCode::Up, _) => guard.state.chart.highlight_up(),
        (MenuItem::IceTime, Char('r'), _) => request = guard.reload_chart(),
        (MenuItem::IceTime, KeyCode::Esc, _) => guard.update_tab(MenuItem::Dashboard),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
