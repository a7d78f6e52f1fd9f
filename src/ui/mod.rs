pub mod config_screen;
pub mod history_screen;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod timer_screen;

use crate::app::AppState;
use crate::domain::Screen;
use config_screen::render_config_screen;
use history_screen::render_history_screen;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_modal;
use ratatui::Frame;
use timer_screen::render_timer_screen;

/// Main render function - draws the current screen and any overlay
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(
        f,
        layout.keybindings_area,
        app.screen,
        app.config.is_configured(),
    );

    match app.screen {
        Screen::Config => render_config_screen(f, app, layout.content_area),
        Screen::Timer => render_timer_screen(f, app, layout.content_area),
        Screen::History => render_history_screen(f, app, layout.content_area),
    }

    if app.modal.is_some() {
        render_modal(f, app, size);
    }
}
