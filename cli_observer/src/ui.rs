use std::collections::VecDeque;

use nation_client::encode;
use nation_client::format::{self, NewsTone};
use nation_client::ViewStore;
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap};
use ratatui::Frame;

/// Plane the remote service positions agents on.
const MAP_WIDTH: f64 = 800.0;
const MAP_HEIGHT: f64 = 600.0;

const HAPPINESS_COLOR: Color = Color::Rgb(0xFF, 0x40, 0x81);
const TRUST_COLOR: Color = Color::Rgb(0x21, 0x96, 0xF3);
const WEALTH_COLOR: Color = Color::Rgb(0x4C, 0xAF, 0x50);
const BUDGET_COLOR: Color = Color::Rgb(0xFF, 0xD7, 0x00);

pub struct UiState {
    pub logs: VecDeque<String>,
    pub max_logs: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            logs: VecDeque::new(),
            max_logs: 8,
        }
    }
}

impl UiState {
    pub fn push_log<S: Into<String>>(&mut self, line: S) {
        let mut text: String = line.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        if text.is_empty() {
            return;
        }
        self.logs.push_front(text);
        while self.logs.len() > self.max_logs {
            self.logs.pop_back();
        }
    }
}

pub fn draw_ui(frame: &mut Frame, store: &ViewStore, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(6),
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], store);
    draw_metrics(frame, chunks[1], store);
    draw_main(frame, chunks[2], store);
    draw_logs(frame, chunks[3], state);
}

fn draw_header(frame: &mut Frame, area: Rect, store: &ViewStore) {
    let block = Block::default().borders(Borders::ALL).title("Nation Observer");

    let status = if let Some(message) = store.error() {
        Span::styled(message.to_string(), Style::default().fg(Color::Red))
    } else if store.is_loading() {
        Span::styled("loading simulation...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("connected", Style::default().fg(Color::Green))
    };

    let mut spans = vec![status, Span::raw(" | ")];
    if let Some(snapshot) = store.snapshot() {
        spans.push(Span::styled(
            snapshot.nation.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" | tick {}", snapshot.tick)));
    }
    spans.push(Span::raw(" | '.' advance one tick, q to exit"));

    let text = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(block, area);
    frame.render_widget(
        text,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_metrics(frame: &mut Frame, area: Rect, store: &ViewStore) {
    let block = Block::default().borders(Borders::ALL).title("Nation Metrics");
    frame.render_widget(block, area);
    let inner = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });

    let Some(snapshot) = store.snapshot() else {
        frame.render_widget(Paragraph::new("waiting for first snapshot"), inner);
        return;
    };
    let metrics = &snapshot.metrics;

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(inner);

    // The formatter never clamps; the gauge does, so an overflowing
    // happiness just pegs the bar while the label shows the raw value.
    let happiness = Gauge::default()
        .block(Block::default().title("Avg Happiness"))
        .gauge_style(Style::default().fg(HAPPINESS_COLOR))
        .ratio((format::bar_width(metrics.avg_happiness) / 100.0).clamp(0.0, 1.0))
        .label(format::format_percent(metrics.avg_happiness));
    frame.render_widget(happiness, cells[0]);

    let trust = Gauge::default()
        .block(Block::default().title("Avg Trust"))
        .gauge_style(Style::default().fg(TRUST_COLOR))
        .ratio((format::bar_width(metrics.avg_trust) / 100.0).clamp(0.0, 1.0))
        .label(format::format_percent(metrics.avg_trust));
    frame.render_widget(trust, cells[1]);

    let wealth = Paragraph::new(vec![
        Line::from(Span::raw("Avg Wealth")),
        Line::from(Span::styled(
            format::format_currency(metrics.avg_wealth),
            Style::default().fg(WEALTH_COLOR),
        )),
    ]);
    frame.render_widget(wealth, cells[2]);

    let budget = Paragraph::new(vec![
        Line::from(Span::raw("Supreme Leader Budget")),
        Line::from(Span::styled(
            format::format_currency(metrics.sl_budget),
            Style::default().fg(BUDGET_COLOR),
        )),
    ]);
    frame.render_widget(budget, cells[3]);
}

fn draw_main(frame: &mut Frame, area: Rect, store: &ViewStore) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let map_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(4)])
        .split(columns[0]);
    draw_map(frame, map_rows[0], store);
    draw_legend(frame, map_rows[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(7),
        ])
        .split(columns[1]);
    draw_trends(frame, right[0], store);
    draw_news(frame, right[1], store);
    draw_states(frame, right[2], store);
}

/// Terminal cells have no alpha channel; glyph opacity is approximated
/// by dimming the fill color toward black.
fn shade(color: u32, opacity: f64) -> Color {
    let channel = |shift: u32| (((color >> shift) & 0xFF) as f64 * opacity) as u8;
    Color::Rgb(channel(16), channel(8), channel(0))
}

fn draw_map(frame: &mut Frame, area: Rect, store: &ViewStore) {
    let agents = store
        .snapshot()
        .map(|snapshot| snapshot.agents.as_slice())
        .unwrap_or(&[]);

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Agent Map"))
        .x_bounds([0.0, MAP_WIDTH])
        .y_bounds([0.0, MAP_HEIGHT])
        .paint(|ctx| {
            for agent in agents {
                let glyph = encode::glyph(agent);
                // service coordinates grow downward, the canvas upward
                let y = MAP_HEIGHT - agent.y;
                ctx.draw(&Circle {
                    x: agent.x,
                    y,
                    radius: glyph.radius,
                    color: shade(glyph.color, glyph.opacity),
                });
                if let Some(ring) = glyph.ring {
                    ctx.draw(&Circle {
                        x: agent.x,
                        y,
                        radius: ring.radius,
                        color: shade(ring.color, 1.0),
                    });
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_legend(frame: &mut Frame, area: Rect) {
    let dot = |color: u32, label: &str| {
        vec![
            Span::styled("● ", Style::default().fg(shade(color, 1.0))),
            Span::raw(format!("{label}  ")),
        ]
    };

    let mut roles = Vec::new();
    roles.extend(dot(encode::COLOR_LEADER, "State Leader"));
    roles.extend(dot(encode::COLOR_SUPREME_LEADER, "Supreme Leader"));
    roles.extend(dot(encode::COLOR_MEDIA, "Media"));
    roles.extend(dot(encode::COLOR_EXTERNAL, "External Factor"));

    let mut factions = Vec::new();
    factions.extend(dot(encode::COLOR_INDUSTRIALIST, "Industrialist"));
    factions.extend(dot(encode::COLOR_ENVIRONMENTALIST, "Environmentalist"));
    factions.extend(dot(encode::COLOR_TECHNOCRAT, "Technocrat"));
    factions.extend(dot(encode::COLOR_CITIZEN, "Neutral"));

    let block = Block::default().borders(Borders::ALL).title("Legend");
    let paragraph = Paragraph::new(vec![Line::from(roles), Line::from(factions)])
        .wrap(Wrap { trim: true });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_trends(frame: &mut Frame, area: Rect, store: &ViewStore) {
    let history = store.history();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("National Trends");

    if history.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let happiness: Vec<(f64, f64)> = history
        .iter()
        .map(|p| (p.tick as f64, p.avg_happiness))
        .collect();
    let trust: Vec<(f64, f64)> = history
        .iter()
        .map(|p| (p.tick as f64, p.avg_trust))
        .collect();
    let wealth: Vec<(f64, f64)> = history
        .iter()
        .map(|p| (p.tick as f64, p.avg_wealth))
        .collect();

    let first_tick = happiness.first().map(|(x, _)| *x).unwrap_or(0.0);
    let last_tick = happiness.last().map(|(x, _)| *x).unwrap_or(1.0);
    let y_max = history
        .iter()
        .flat_map(|p| [p.avg_happiness, p.avg_trust, p.avg_wealth])
        .fold(100.0_f64, f64::max);

    let datasets = vec![
        Dataset::default()
            .name("Happiness")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(HAPPINESS_COLOR))
            .data(&happiness),
        Dataset::default()
            .name("Trust")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(TRUST_COLOR))
            .data(&trust),
        Dataset::default()
            .name("Wealth")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(WEALTH_COLOR))
            .data(&wealth),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("tick")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([first_tick, last_tick.max(first_tick + 1.0)])
                .labels(vec![
                    Span::raw(format!("{first_tick:.0}")),
                    Span::raw(format!("{last_tick:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{y_max:.0}"))]),
        );
    frame.render_widget(chart, area);
}

fn draw_news(frame: &mut Frame, area: Rect, store: &ViewStore) {
    let block = Block::default().borders(Borders::ALL).title("News Feed");

    let results = store
        .snapshot()
        .map(|snapshot| snapshot.last_election_results.as_slice())
        .unwrap_or(&[]);

    let lines: Vec<Line> = if results.is_empty() {
        vec![Line::from(Span::raw("No recent news."))]
    } else {
        results
            .iter()
            .map(|result| {
                let style = match format::news_tone(result) {
                    NewsTone::Alert => Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                    NewsTone::Social => Style::default().fg(Color::Cyan),
                    NewsTone::Plain => Style::default(),
                };
                Line::from(Span::styled(format::news_line(result), style))
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_states(frame: &mut Frame, area: Rect, store: &ViewStore) {
    let block = Block::default().borders(Borders::ALL).title("States");

    let lines: Vec<Line> = store
        .snapshot()
        .map(|snapshot| {
            snapshot
                .nation
                .states
                .iter()
                .map(|state| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:<18}", state.name),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::raw(format!(" pop {:>6}", state.population)),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_logs(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let lines: Vec<Line> = state
        .logs
        .iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}
