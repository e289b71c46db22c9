//! Terminal presentation of the game.
//!
//! Draws a [`RenderSnapshot`] and nothing else; the game never calls into
//! this module.

mod common;
mod game_scene;
mod shop_scene;

use crate::game::RenderSnapshot;
use ratatui::Frame;

/// Draw one frame.
pub fn draw(frame: &mut Frame, snap: &RenderSnapshot) {
    let area = frame.size();
    game_scene::render_game(frame, area, snap);
    if snap.shop.open {
        shop_scene::render_shop(frame, area, snap);
    }
}
