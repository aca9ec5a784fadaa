//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(3), // storage gauge
            Constraint::Length(5), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_storage_gauge(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: scenario name, components, tick progress, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.error.is_some() {
        ("✖", "ABORTED")
    } else if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let header = Line::from(vec![
        Span::styled(
            " BEHS-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.scenario_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {} → {} │ tick {}/{} │ {}ms │ {} {} ",
            app.supply_name(),
            app.load_name(),
            app.ticks_done(),
            app.total_steps,
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Selected attribute of every component over simulated time.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let components: Vec<&'static str> = app
        .last_snapshot()
        .map(|s| app.attribute.series(s).into_iter().map(|(c, _)| c).collect())
        .unwrap_or_default();

    let series: Vec<Vec<(f64, f64)>> = (0..components.len())
        .map(|idx| {
            app.history
                .iter()
                .map(|s| (s.time, app.attribute.series(s)[idx].1))
                .collect()
        })
        .collect();

    let y_bounds = style::auto_bounds_y(&series);
    let x_lo = app.history.front().map_or(0.0, |s| s.time);
    let x_hi = app.history.back().map_or(1.0, |s| s.time).max(x_lo + 1.0);

    let datasets: Vec<Dataset> = components
        .iter()
        .zip(&series)
        .map(|(name, data)| {
            Dataset::default()
                .name(*name)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(style::component_color(name)))
                .data(data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", app.attribute.label()))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("t (s)")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{x_lo:.2}"), format!("{x_hi:.2}")]),
        )
        .y_axis(
            Axis::default()
                .title(app.attribute.label())
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.3}", y_bounds[0]),
                    format!("{:.3}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Storage voltage gauge with the charge status alongside.
fn render_storage_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let fill = app.storage_fill();
    let status = app.storage_status();
    let color = style::status_color(status);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(16)])
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().title(" Storage ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(fill)
        .label(format!("{:.0}%", fill * 100.0));
    frame.render_widget(gauge, chunks[0]);

    let status_widget = Paragraph::new(Line::from(Span::styled(
        status.map_or("", |s| s.as_str()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, chunks[1]);
}

/// Status panel with the latest readings.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if let Some(error) = &app.error {
        vec![Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(style::ERROR_FG),
        ))]
    } else if let Some(s) = app.last_snapshot() {
        vec![
            Line::from(format!(
                "  t={:>7.2}s  supply={:>6.3}V  storage={:>6.3}V  load={:>6.3}V",
                s.time, s.supply_voltage, s.storage_voltage, s.load_voltage,
            )),
            Line::from(format!(
                "  I_storage={:>9.6}A  I_load={:>9.6}A",
                s.storage_current, s.load_current,
            )),
            Line::from(format!(
                "  stored={:>9.6}J  consumed={:.6}J  total={:.6}J",
                s.energy_stored, s.energy_consumed, s.total_energy_consumed,
            )),
        ]
    } else {
        vec![Line::from("  Waiting for first tick...")]
    };

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  v/c/e:Attribute  1/2/3:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
