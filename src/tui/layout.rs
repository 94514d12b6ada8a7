//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph, Wrap};

use super::runtime::{App, Slider};
use super::style;
use crate::sim::clock::Clock;

/// Renders the full TUI frame.
pub fn render<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(40)])
        .split(rows[1]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // metric panels
            Constraint::Min(8),    // chart
            Constraint::Length(6), // recommendations
        ])
        .split(body[1]);

    render_header(frame, app, rows[0]);
    render_controls(frame, app, body[0]);
    render_panels(frame, app, main[0]);
    render_chart(frame, app, main[1]);
    render_recommendations(frame, app, main[2]);
    render_footer(frame, rows[2]);
}

/// Header bar: title and chart seed.
fn render_header<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " HESS ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Home Energy Storage System Dashboard"),
        Span::raw(format!(" │ seed={} ", app.seed)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Sidebar listing the sliders and the EV toggle.
fn render_controls<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let mut lines: Vec<Line> = Slider::ALL
        .iter()
        .map(|&slider| {
            let selected = slider == app.selected;
            let marker = if selected { "▶ " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(style::SELECTED_FG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{marker}{}: {}", slider.label(), app.slider_value(slider)),
                style,
            ))
        })
        .collect();
    lines.push(Line::from(format!(
        "  EV Charging: {}",
        if app.inputs.ev_charging { "on" } else { "off" }
    )));

    let block = Block::default()
        .title(" System Controls ")
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Battery, solar and EV single-value panels.
fn render_panels<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let level = app.inputs.battery_level;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Battery Storage ")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::battery_color(level)))
        .percent(u16::from(level.min(100)))
        .label(format!("Current Charge {level} %"));
    frame.render_widget(gauge, cols[0]);

    let solar = Paragraph::new(vec![
        Line::from("Solar Output"),
        Line::from(Span::styled(
            format!("{:.1} kW", app.inputs.solar_output_kw),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .block(
        Block::default()
            .title(" Solar Generation ")
            .borders(Borders::ALL),
    );
    frame.render_widget(solar, cols[1]);

    let ev = app.inputs.ev_status();
    let ev_panel = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Status: {}", ev.label()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(ev.detail()),
    ])
    .block(Block::default().title(" EV Charging ").borders(Borders::ALL));
    frame.render_widget(ev_panel, cols[2]);
}

/// Solar vs home load trends of the chart series.
fn render_chart<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let block = Block::default()
        .title(" Energy Trends (Demo Simulation) ")
        .borders(Borders::ALL);

    if let Some(err) = &app.error {
        frame.render_widget(Paragraph::new(format!("  {err}")).block(block), area);
        return;
    }

    let solar_data: Vec<(f64, f64)> = app
        .chart
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.solar_kw))
        .collect();
    let load_data: Vec<(f64, f64)> = app
        .chart
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.home_load_kw))
        .collect();

    let y_bounds = style::auto_bounds_y(&solar_data, &load_data);
    let x_hi = (app.chart.len().saturating_sub(1) as f64).max(1.0);

    let x_label_lo = app
        .chart
        .first()
        .map_or_else(String::new, |r| r.timestamp.format("%H:%M").to_string());
    let x_label_hi = app
        .chart
        .last()
        .map_or_else(String::new, |r| r.timestamp.format("%H:%M").to_string());

    let datasets = vec![
        Dataset::default()
            .name("Solar (kW)")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::SOLAR_COLOR))
            .data(&solar_data),
        Dataset::default()
            .name("Home Load (kW)")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::LOAD_COLOR))
            .data(&load_data),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("time")
                .bounds([0.0, x_hi])
                .labels(vec![x_label_lo, x_label_hi]),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Recommendation messages colored by severity.
fn render_recommendations<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let lines: Vec<Line> = app
        .recommendations()
        .iter()
        .map(|rec| {
            Line::from(Span::styled(
                format!("  {}", rec.message()),
                Style::default().fg(style::severity_color(rec.severity())),
            ))
        })
        .collect();

    let block = Block::default()
        .title(" Optimization Recommendations ")
        .borders(Borders::ALL);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Tab/↑↓:Select  ←/→:Adjust  e:EV  r:New day",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
