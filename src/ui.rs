#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::board::Board;
use crate::components::{ActivePiece, GameSession, NextPiece};
use crate::game::{COL_COUNT, ROW_COUNT};

// Each grid cell renders as 2x1 terminal characters
const CELL_WIDTH: u16 = 2;

pub fn render(f: &mut Frame, app: &App) {
    let board_width = COL_COUNT as u16 * CELL_WIDTH + 2;
    let board_height = ROW_COUNT as u16 + 2;
    let min_side_width = 20u16;

    if f.area().width < board_width + min_side_width || f.area().height < board_height + 3 {
        let warning = Paragraph::new("Terminal too small!\nPlease resize to continue.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Gridfall"));
        f.render_widget(warning, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_side_width)])
        .split(f.area());

    let board_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(board_height)])
        .split(main_layout[0]);

    let title = Paragraph::new("GRIDFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, board_layout[0]);

    render_board(f, app, board_layout[1]);
    render_side_panel(f, app, main_layout[1]);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let session = app.world.resource::<GameSession>();
    let board = app.world.resource::<Board>();

    // Settled cells
    for x in 0..board.width {
        for y in 0..board.height {
            if let Some(tile) = board.cell(x, y) {
                draw_cell(f, inner, x as u16, y as u16, tile.color());
            }
        }
    }

    // The falling piece, only while a game is in progress
    if session.is_playing() {
        let piece = app.world.resource::<ActivePiece>();
        for (x, y) in piece.blocks() {
            if x >= 0 && y >= 0 {
                draw_cell(f, inner, x as u16, y as u16, piece.tile.color());
            }
        }
    }

    let banner = if session.is_new_game {
        Some(("PRESS ENTER", Color::Green))
    } else if session.is_game_over {
        Some(("GAME OVER", Color::Red))
    } else if session.is_paused {
        Some(("PAUSED", Color::Yellow))
    } else {
        None
    };

    if let Some((text, color)) = banner {
        let overlay = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        let overlay_area = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2,
            width: inner.width,
            height: 1,
        };
        f.render_widget(overlay, overlay_area);
    }
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Score and level
            Constraint::Length(7), // Next piece
            Constraint::Min(8),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, layout[0]);

    let session = app.world.resource::<GameSession>();
    let stats = format!("Score: {}\nLevel: {}", session.score, session.level);
    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, layout[1]);

    render_next_piece(f, app, layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        \u{2190}/\u{2192}: Move\n\
        \u{2191}: Rotate\n\
        \u{2193}: Soft drop\n\
        P: Pause  M: Music\n\
        Enter: Start  Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, layout[3]);
}

fn render_next_piece(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let tile = app.world.resource::<NextPiece>().0;
    for &(dx, dy) in tile.cells(0) {
        let x = dx as u16;
        let y = dy as u16;
        draw_cell(f, inner, x, y, tile.color());
    }
}

fn draw_cell(f: &mut Frame, area: Rect, x: u16, y: u16, color: Color) {
    let cell_x = area.left() + x * CELL_WIDTH;
    let cell_y = area.top() + y;

    if cell_x + 1 < area.right() && cell_y < area.bottom() {
        for dx in 0..CELL_WIDTH {
            if let Some(cell) = f.buffer_mut().cell_mut((cell_x + dx, cell_y)) {
                cell.set_symbol("\u{2588}");
                cell.set_fg(color);
                cell.set_bg(Color::Black);
            }
        }
    }
}

/// Centered rect taking the given percentages of the available area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
