//! Skin shop overlay.

use super::common::{centered_rect, render_status_bar, rgb};
use crate::game::RenderSnapshot;
use crate::profile::{ShopOutcome, SkinId, SKINS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_shop(frame: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let height = SKINS.len() as u16 + 7;
    let shop_area = centered_rect(area, 44, height);
    frame.render_widget(Clear, shop_area);

    let block = Block::default()
        .title(format!(" Shop - {} coins ", snap.profile.saved_coins))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(255, 215, 0)));
    let inner = block.inner(shop_area);
    frame.render_widget(block, shop_area);

    if inner.height < 3 {
        return;
    }

    let mut lines = Vec::with_capacity(SKINS.len() + 2);
    for (i, skin) in SKINS.iter().enumerate() {
        let id = SkinId::new(skin.id);
        let (tag, color) = if id == snap.profile.current_skin {
            ("equipped".to_string(), Color::Green)
        } else if snap.profile.owns(&id) {
            ("owned".to_string(), Color::Rgb(100, 100, 255))
        } else if skin.price <= snap.profile.saved_coins {
            (format!("{} coins", skin.price), Color::Rgb(255, 215, 0))
        } else {
            (format!("{} coins", skin.price), Color::DarkGray)
        };

        let selected = i == snap.shop.cursor;
        let marker = if selected { "> " } else { "  " };
        let name_style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled("●", Style::default().fg(rgb(skin.body))),
            Span::raw(" "),
            Span::styled(format!("{:<12}", skin.name), name_style),
            Span::styled(tag, Style::default().fg(color)),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(outcome) = &snap.shop.last_outcome {
        let (text, color) = match outcome {
            ShopOutcome::Purchased(id) => (format!("Bought {}!", id), Color::Green),
            ShopOutcome::Equipped(id) => (format!("Equipped {}.", id), Color::Cyan),
            ShopOutcome::Rejected(e) => (e.to_string(), Color::Red),
        };
        lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
    }

    let list_area = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    frame.render_widget(Paragraph::new(lines), list_area);

    let status_area = Rect {
        y: inner.y + inner.height.saturating_sub(2),
        height: inner.height.min(2),
        ..inner
    };
    render_status_bar(
        frame,
        status_area,
        "",
        Color::White,
        &[("[Up/Down]", "Move"), ("[Enter]", "Buy/Equip"), ("[Esc]", "Back")],
    );
}
