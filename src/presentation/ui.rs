use std::f64::consts::{FRAC_PI_2, TAU};

use crate::application::{Animation, App, Focus};
use crate::domain::{AlarmTone, Mode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

const RING_SAMPLES: usize = 240;
const RING_RADII: [f64; 3] = [0.82, 0.88, 0.94];

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_timer(f, app, chunks[1]);
    render_controls(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);
}

pub fn mode_color(mode: Mode) -> Color {
    let (r, g, b) = mode.rgb();
    Color::Rgb(r, g, b)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = app.session.state();
    let header = Paragraph::new(format!(
        "tpomo - Terminal Pomodoro | {} | {} | session {}",
        state.mode.label().to_uppercase(),
        if state.running { "running" } else { "stopped" },
        app.driver.indicator().sweeps
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

/// Largest rectangle inside `area` that renders roughly square, given that
/// terminal cells are about twice as tall as they are wide.
fn square_rect(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Points on the ring split into the swept (elapsed) part and the rest.
///
/// The sweep starts at twelve o'clock and runs clockwise.
pub fn ring_points(progress: f64) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let progress = progress.clamp(0.0, 1.0);
    let mut swept = Vec::new();
    let mut remaining = Vec::new();
    for i in 0..RING_SAMPLES {
        let fraction = i as f64 / RING_SAMPLES as f64;
        let angle = FRAC_PI_2 - TAU * fraction;
        let target = if fraction < progress { &mut swept } else { &mut remaining };
        for radius in RING_RADII {
            target.push((radius * angle.cos(), radius * angle.sin()));
        }
    }
    (swept, remaining)
}

fn render_timer(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Timer");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let indicator = app.driver.indicator();
    let color = mode_color(indicator.mode);
    let progress = app.session.progress();
    let (swept, remaining) = ring_points(progress);
    let angle = FRAC_PI_2 - TAU * progress;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &remaining,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &swept,
                color,
            });
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: 0.0,
                x2: 0.75 * angle.cos(),
                y2: 0.75 * angle.sin(),
                color,
            });
        });
    let dial = square_rect(inner);
    f.render_widget(canvas, dial);

    let spinner = match indicator.animation {
        Animation::Playing => indicator.spinner(),
        Animation::Paused => "||",
    };
    let label = Paragraph::new(vec![
        Line::from(app.driver.label().to_string())
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("{} {}", spinner, indicator.mode.label())).style(Style::default().fg(color)),
    ])
    .alignment(Alignment::Center);
    let label_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(2) / 2,
        width: inner.width,
        height: inner.height.min(2),
    };
    f.render_widget(label, label_area);
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    let config = app.session.config();
    let locked = app.session.is_running();
    let line_style = |focus: Focus| {
        if app.focus == focus {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else if locked && focus != Focus::Alarm {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        }
    };

    let tones = AlarmTone::ALL
        .iter()
        .enumerate()
        .map(|(i, tone)| {
            if *tone == app.driver.alarm() {
                format!("[{} {}]", i + 1, tone)
            } else {
                format!(" {} {} ", i + 1, tone)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let lines = vec![
        Line::from(format!("Work   [-] {:>3} [+] min", config.minutes(Mode::Work))).style(line_style(Focus::Work)),
        Line::from(format!("Rest   [-] {:>3} [+] min", config.minutes(Mode::Rest))).style(line_style(Focus::Rest)),
        Line::from(format!("Alarm  {}", tones)).style(line_style(Focus::Alarm)),
    ];

    let controls = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(controls, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.status_message {
        Some(ref status) => (status.clone(), Style::default().fg(Color::Yellow)),
        None => (
            "Space: start/stop | Tab: focus | +/-: adjust | p: preview | q: quit".to_string(),
            Style::default(),
        ),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}
