use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Help
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // View switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Statistics),
        (_, Char('2'), _) => guard.update_tab(MenuItem::ShotMap),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Heatmap),
        (_, Char('l') | KeyCode::Right, _) => guard.next_tab(),
        (_, Char('h') | KeyCode::Left, _) => guard.prev_tab(),

        // Sidebar and table navigation
        (_, KeyCode::Tab, _) => guard.cycle_focus(),
        (_, Char('j') | KeyCode::Down, _) => guard.cursor_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.cursor_up(),
        (_, KeyCode::Enter, _) => {
            if let Some(request) = guard.commit_selection() {
                drop(guard);
                let _ = network_requests.send(request).await;
                return;
            }
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
