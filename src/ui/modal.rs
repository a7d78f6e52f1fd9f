use crate::app::{Alert, AppState, Modal};
use crate::domain::Category;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn render_box(f: &mut Frame, area: Rect, title: Span<'static>, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 2;
    let modal_area = create_modal_area(area, height);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn alert_lines(alert: &Alert) -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::raw(format!("  {}", alert.message)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [any key]", modal_title_style()),
            Span::raw(" OK"),
        ]),
    ]
}

fn picker_lines(selected: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];
    for (idx, category) in Category::all().iter().enumerate() {
        if idx == selected {
            lines.push(Line::styled(format!("  > {}", category.label()), selected_style()));
        } else {
            lines.push(Line::raw(format!("    {}", category.label())));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Enter]", modal_title_style()),
        Span::raw(" Apply  "),
        Span::styled("[Esc]", modal_title_style()),
        Span::raw(" Cancel"),
    ]));
    lines
}

fn confirm_delete_lines() -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::raw("  Delete this break from your history?"),
        Line::raw("  This cannot be undone."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Delete  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ]
}

/// Render the active overlay, if any
pub fn render_modal(f: &mut Frame, app: &AppState, area: Rect) {
    match &app.modal {
        Some(Modal::Alert(alert)) => {
            let style = if alert.title == "Error" {
                error_style()
            } else {
                modal_title_style()
            };
            let title = Span::styled(format!(" {} ", alert.title), style);
            render_box(f, area, title, alert_lines(alert));
        }
        Some(Modal::CategoryPicker { selected, .. }) => render_box(
            f,
            area,
            Span::styled(" Category ", modal_title_style()),
            picker_lines(*selected),
        ),
        Some(Modal::ConfirmDelete { .. }) => render_box(
            f,
            area,
            Span::styled(" Delete Break ", error_style()),
            confirm_delete_lines(),
        ),
        None => {}
    }
}
