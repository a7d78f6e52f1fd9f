use crate::domain::Screen;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Key hints shown for each screen; Esc on the config screen only goes back once configured
pub fn hints_for(screen: Screen, configured: bool) -> &'static [&'static str] {
    match screen {
        Screen::Config if configured => {
            &["Tab switch field", "Enter save", "Esc back", "Ctrl+C quit"]
        }
        Screen::Config => &["Tab switch field", "Enter save", "Esc quit"],
        Screen::Timer => &["Enter/Space start/stop", "h history", "c settings", "q quit"],
        Screen::History => &[
            "↑/↓ select",
            "c category",
            "d delete",
            "r reload",
            "t timer",
            "q quit",
        ],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, screen: Screen, configured: bool) {
    let spans: Vec<Span> = hints_for(screen, configured)
        .iter()
        .map(|hint| Span::raw(format!(" {}  ", hint)))
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
