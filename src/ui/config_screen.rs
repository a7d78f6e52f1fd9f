use crate::app::{AppState, ConfigForm};
use crate::domain::config::WORKING_DAYS_PER_MONTH;
use crate::domain::{format_currency, Configuration};
use crate::ui::styles::{border_style, hint_style, modal_title_style, money_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field_lines<'a>(label: &'a str, value: &'a str, editing: bool) -> Vec<Line<'a>> {
    let label = if editing {
        format!("{} (editing)", label)
    } else {
        label.to_string()
    };

    vec![
        Line::raw(label),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(value, modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]),
        Line::raw(""),
    ]
}

/// Hourly rate the form would produce, if the current input is valid
fn preview_rate(form: &ConfigForm) -> Option<f64> {
    let config = Configuration::from_input(&form.salary, &form.hours).ok()?;
    config.rates().ok().map(|r| r.hourly)
}

/// Render the salary and workday form
pub fn render_config_screen(f: &mut Frame, app: &AppState, area: Rect) {
    let form = &app.config_form;
    let mut lines = vec![Line::raw("")];

    lines.extend(field_lines("Monthly salary (R$):", &form.salary, form.editing_field == 0));
    lines.extend(field_lines("Hours per day:", &form.hours, form.editing_field == 1));

    if let Some(hourly) = preview_rate(form) {
        lines.push(Line::from(vec![
            Span::raw("Your break hour is worth "),
            Span::styled(format_currency(hourly), money_style()),
        ]));
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled(
        format!(
            "Rates assume {} working days per month.",
            WORKING_DAYS_PER_MONTH
        ),
        hint_style(),
    ));
    lines.push(Line::styled(
        "Use a comma or a dot for cents, e.g. 3500,00",
        hint_style(),
    ));

    let title = if app.config.is_configured() {
        " Settings "
    } else {
        " Welcome to PausePay "
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
