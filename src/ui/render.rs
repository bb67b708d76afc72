//! Draws the screen from the current `App` state.
//!
//! The presentation state is derived, never stored: loading shows a spinner
//! and suppresses the table, an error replaces the table and hides the
//! filter controls, and everything else renders controls plus the filtered
//! table (zero rows included).

use crate::state::Status;
use crate::ui::app::App;
use crate::ui::columns::{Cell, COLUMNS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell as TableCell, Paragraph, Row, Table},
    Frame,
};

const SPINNER_FRAMES: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Controls
            Constraint::Min(0),    // Table / status body
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    // Header row plus column spacing take two lines off the body.
    app.viewport_rows = chunks[2].height.saturating_sub(2) as usize;

    render_title(f, chunks[0]);

    match app.state.status() {
        Status::Loading => {
            let frame = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
            let line = Line::from(vec![
                Span::styled(frame, Style::default().fg(Color::Cyan)),
                Span::raw(" Loading countries..."),
            ]);
            f.render_widget(Paragraph::new(line), chunks[2]);
        }
        Status::Error => {
            let message = app
                .state
                .last_error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            let line = Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(message, Style::default().fg(Color::Red)),
                Span::raw("  (press r to retry)"),
            ]);
            f.render_widget(Paragraph::new(line), chunks[2]);
        }
        Status::Idle => {
            render_controls(f, chunks[1], app);
            if app.state.has_loaded() {
                render_table(f, chunks[2], app);
            } else {
                let hint = Paragraph::new("No data yet — press r to fetch countries.")
                    .style(Style::default().fg(Color::DarkGray));
                f.render_widget(hint, chunks[2]);
            }
        }
    }

    render_footer(f, chunks[3], app.search_mode);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Span::styled(
        "Countries Info",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, area);
}

fn render_controls(f: &mut Frame, area: Rect, app: &mut App) {
    let shown = app.state.filtered().len();
    let total = app.state.records().len();

    let cursor = if app.search_mode { "▏" } else { "" };
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{}{}", app.state.query(), cursor)),
        Span::raw("  │  "),
        Span::styled("Bucket: ", Style::default().fg(Color::Yellow)),
        Span::raw(app.state.bucket().label()),
        Span::raw("  │  "),
        Span::styled(
            format!("{shown} of {total} shown"),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let countries = app.state.filtered().to_vec();

    let header = Row::new(
        COLUMNS
            .iter()
            .map(|col| TableCell::from(col.header))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows: Vec<Row> = countries
        .iter()
        .skip(app.scroll)
        .map(|country| {
            Row::new(
                COLUMNS
                    .iter()
                    .map(|col| match &col.cell {
                        Cell::Text(accessor) => TableCell::from(accessor(country)),
                        Cell::Image(accessor) => TableCell::from(Span::styled(
                            app.image_display(accessor(country)),
                            Style::default().fg(Color::Magenta),
                        )),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let widths: Vec<Constraint> = COLUMNS
        .iter()
        .map(|col| Constraint::Length(col.width))
        .collect();

    let table = Table::new(rows, widths).header(header).column_spacing(2);
    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, area: Rect, search_mode: bool) {
    let line = if search_mode {
        Line::from(vec![
            Span::styled("typing filters by name ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Enter/Esc]", Style::default().fg(Color::Yellow)),
            Span::raw("done"),
        ])
    } else {
        Line::from(vec![
            Span::styled("[/]", Style::default().fg(Color::Yellow)),
            Span::raw("search "),
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::raw("bucket "),
            Span::styled("[c]", Style::default().fg(Color::Yellow)),
            Span::raw("lear "),
            Span::styled("[r]", Style::default().fg(Color::Yellow)),
            Span::raw("efresh "),
            Span::styled("[↑/↓]", Style::default().fg(Color::Yellow)),
            Span::raw("scroll "),
            Span::styled("[q]", Style::default().fg(Color::Yellow)),
            Span::raw("uit"),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}
