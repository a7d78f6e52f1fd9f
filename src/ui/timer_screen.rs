use crate::app::AppState;
use crate::domain::{
    format_currency, format_date_time, format_duration, format_optional_currency, Configuration,
};
use crate::timer::{TimerSnapshot, TimerStatus};
use crate::ui::styles::{
    border_style, clock_style, gauge_style, hint_style, idle_style, money_style, running_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Position of the stopwatch within the current minute, 0-100
pub fn minute_progress(elapsed_seconds: u64) -> u16 {
    ((elapsed_seconds % 60) * 100 / 60) as u16
}

fn status_line(snapshot: &TimerSnapshot) -> Line<'static> {
    match snapshot.status {
        TimerStatus::Running => Line::styled("● On break", running_style()),
        TimerStatus::Idle => Line::styled("○ Working", idle_style()),
    }
}

fn info_lines(config: &Configuration) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Salary: ", title_style()),
            Span::raw(format_currency(config.monthly_salary)),
        ]),
        Line::from(vec![
            Span::styled("Hours per day: ", title_style()),
            Span::raw(config.hours_per_day.to_string()),
        ]),
    ];
    if let Ok(rates) = config.rates() {
        lines.push(Line::from(vec![
            Span::styled("Hourly rate: ", title_style()),
            Span::styled(format_currency(rates.hourly), money_style()),
        ]));
    }
    lines
}

/// Render the break stopwatch
pub fn render_timer_screen(f: &mut Frame, app: &AppState, area: Rect) {
    let snapshot = app.timer.snapshot();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Break Timer ", title_style()));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Earned so far
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Started at
            Constraint::Length(1), // Spacing
            Constraint::Min(3),    // Info box
        ])
        .split(block.inner(area));

    f.render_widget(block, area);

    f.render_widget(
        Paragraph::new(status_line(&snapshot)).alignment(Alignment::Center),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(Line::styled(format_duration(snapshot.elapsed_seconds), clock_style()))
            .alignment(Alignment::Center),
        chunks[2],
    );

    let earned = format_optional_currency(app.rates().map(|r| app.timer.value_so_far(&r)));
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Earned while resting: "),
            Span::styled(earned, money_style()),
        ]))
        .alignment(Alignment::Center),
        chunks[3],
    );

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .percent(minute_progress(snapshot.elapsed_seconds))
        .label("");
    f.render_widget(gauge, chunks[4]);

    let started = match snapshot.started_at {
        Some(start) => Line::styled(format!("Started {}", format_date_time(&start)), hint_style()),
        None => Line::styled("Press Enter to start a break", hint_style()),
    };
    f.render_widget(Paragraph::new(started).alignment(Alignment::Center), chunks[5]);

    if let Some(config) = app.config.configuration() {
        let info = Paragraph::new(info_lines(config)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Your rate ", title_style())),
        );
        f.render_widget(info, chunks[7]);
    }
}
