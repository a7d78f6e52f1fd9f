use crate::app::AppState;
use crate::domain::{
    format_currency, format_date_time, format_duration, format_percent, PauseRecord,
};
use crate::report::{daily_summary, monthly_summary, percent_of_workday_rested, Summary};
use crate::ui::layout::split_history;
use crate::ui::styles::{
    border_style, category_style, default_style, hint_style, money_style, selected_style,
    title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

fn summary_line(label: &'static str, summary: &Summary, percent: Option<f64>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(label, title_style()),
        Span::raw(format!(
            "{} in {} breaks  ",
            format_duration(summary.total_seconds),
            summary.count
        )),
        Span::styled(format_currency(summary.total_value), money_style()),
    ];
    if let Some(percent) = percent {
        spans.push(Span::raw(format!("  ({} of your workday)", format_percent(percent))));
    }
    Line::from(spans)
}

/// One history row: start, duration, value and category
pub fn record_line(record: &PauseRecord) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{}  ", format_date_time(&record.start_time))),
        Span::raw(format!("{}  ", format_duration(record.duration_seconds))),
        Span::styled(format!("{:>12}  ", format_currency(record.value_earned)), money_style()),
        Span::styled(format!("[{}]", record.category.label()), category_style()),
    ])
}

/// Render today's and this month's totals above the list of breaks
pub fn render_history_screen(f: &mut Frame, app: &AppState, area: Rect) {
    let (summary_area, list_area) = split_history(area);
    let now = Local::now();

    let today = daily_summary(&app.history, &now);
    let month = monthly_summary(&app.history, &now);
    let percent = app
        .config
        .configuration()
        .and_then(|c| percent_of_workday_rested(today.total_seconds, c.hours_per_day));

    let summaries = Paragraph::new(vec![
        Line::raw(""),
        summary_line("Today:      ", &today, percent),
        summary_line("This month: ", &month, None),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Summary ", title_style())),
    );
    f.render_widget(summaries, summary_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" History ({}) ", app.history.len()),
            title_style(),
        ));

    if app.history.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  No breaks recorded yet. Start one from the timer.", hint_style()),
        ])
        .block(block);
        f.render_widget(empty, list_area);
        return;
    }

    let items: Vec<ListItem> = app
        .history
        .iter()
        .map(|record| ListItem::new(record_line(record)).style(default_style()))
        .collect();

    let list = List::new(items).block(block).highlight_style(selected_style());
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, list_area, &mut state);
}
