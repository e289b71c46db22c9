//! Play field, info panel and status bar.

use super::common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_status_bar, rgb,
};
use crate::game::{Phase, RenderSnapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SKY: Color = Color::Rgb(20, 40, 70);

/// What occupies one terminal cell of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Sky,
    Pipe,
    PipeLip,
    Coin { special: bool },
    Bird,
}

pub fn render_game(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let layout = create_game_layout(frame, area, " Flappy Bird ", Color::Cyan, 22);

    let lines = play_area_lines(snap, layout.content.width, layout.content.height);
    frame.render_widget(Paragraph::new(lines), layout.content);

    render_status(frame, layout.status_bar, snap);
    render_info_panel(frame, layout.info_panel, snap);

    if snap.session.phase == Phase::GameOver {
        render_crash_overlay(frame, layout.content, snap);
    }
}

/// Rasterize the world onto a `width` x `height` character grid.
fn cell_grid(snap: &RenderSnapshot, width: u16, height: u16) -> Vec<Vec<Cell>> {
    let (w, h) = (width as usize, height as usize);
    let mut grid = vec![vec![Cell::Sky; w]; h];
    if w == 0 || h == 0 {
        return grid;
    }

    let config = snap.config;
    let x_scale = w as f64 / config.field_width;
    let y_scale = h as f64 / config.field_height;
    let to_col = |x: f64| (x * x_scale).floor();
    let to_row = |y: f64| ((y * y_scale).floor() as usize).min(h - 1);

    for pipe in snap.pipes {
        let first = to_col(pipe.x).max(0.0) as usize;
        let last = to_col(pipe.x + config.pipe_width);
        if last < 0.0 {
            continue;
        }
        let last = (last as usize).min(w - 1);
        for (row, cells) in grid.iter_mut().enumerate() {
            let y = (row as f64 + 0.5) / y_scale;
            let cell = if y < pipe.gap_top() || y > pipe.gap_bottom() {
                let lip = (y - pipe.gap_top()).abs() * y_scale < 1.0
                    || (y - pipe.gap_bottom()).abs() * y_scale < 1.0;
                if lip {
                    Cell::PipeLip
                } else {
                    Cell::Pipe
                }
            } else {
                continue;
            };
            for c in cells.iter_mut().take(last + 1).skip(first) {
                *c = cell;
            }
        }
    }

    for coin in snap.coins {
        let col = to_col(coin.x);
        if (0.0..w as f64).contains(&col) {
            grid[to_row(coin.y.max(0.0))][col as usize] = Cell::Coin {
                special: coin.special,
            };
        }
    }

    let bird_col = (to_col(config.bird_x).max(0.0) as usize).min(w - 1);
    grid[to_row(snap.bird.y.max(0.0))][bird_col] = Cell::Bird;

    grid
}

fn play_area_lines(snap: &RenderSnapshot, width: u16, height: u16) -> Vec<Line<'static>> {
    let skin = snap.current_skin;
    let bird_glyph = if snap.bird.velocity < -100.0 {
        "▲"
    } else if snap.bird.velocity > 250.0 {
        "▼"
    } else {
        "►"
    };

    cell_grid(snap, width, height)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    Cell::Sky => Span::styled(" ", Style::default().bg(SKY)),
                    Cell::Pipe => Span::styled("█", Style::default().fg(Color::Rgb(40, 100, 40))),
                    Cell::PipeLip => {
                        Span::styled("█", Style::default().fg(Color::Rgb(60, 140, 60)))
                    }
                    Cell::Coin { special } => Span::styled(
                        "●",
                        Style::default()
                            .fg(if special {
                                Color::Rgb(255, 0, 128)
                            } else {
                                Color::Rgb(255, 215, 0)
                            })
                            .bg(SKY),
                    ),
                    Cell::Bird => Span::styled(
                        bird_glyph,
                        Style::default()
                            .fg(rgb(skin.body))
                            .bg(SKY)
                            .add_modifier(Modifier::BOLD),
                    ),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_status(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    match snap.session.phase {
        Phase::Ready => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            &[("[Space]", "Flap"), ("[S]", "Shop"), ("[Ctrl+C]", "Exit")],
        ),
        Phase::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", snap.session.score),
            Color::Green,
            &[("[Space/Up]", "Flap")],
        ),
        Phase::GameOver => render_status_bar(
            frame,
            area,
            "Game over",
            Color::Red,
            &[("[Space/R]", "Restart"), ("[Q]", "Quit")],
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                snap.session.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", label),
            Span::styled(
                snap.profile.high_score.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Coins: ", label),
            Span::styled(
                snap.profile.saved_coins.to_string(),
                Style::default().fg(Color::Rgb(255, 215, 0)),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Run:   ", label),
            Span::styled(
                format!("+{}", snap.session.coins_earned),
                Style::default().fg(Color::Rgb(255, 215, 0)),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Skin:  ", label),
            Span::styled(
                snap.current_skin.name,
                Style::default().fg(rgb(snap.current_skin.body)),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_crash_overlay(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let session = snap.session;
    let mut lines = vec![
        (
            format!("You passed {} pipes.", session.score),
            Color::White,
        ),
        (
            format!("+{} coins", session.coins_earned),
            Color::Rgb(255, 215, 0),
        ),
    ];
    if session.new_high_score {
        lines.push(("New high score!".to_string(), Color::Cyan));
    }
    if !session.saved {
        lines.push(("(progress could not be saved)".to_string(), Color::DarkGray));
    }

    render_game_over_overlay(
        frame,
        area,
        "CRASH!",
        Color::Red,
        &lines,
        &[("[Space]", "Restart"), ("[Q]", "Quit")],
    );
}
