//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Everything on screen is derived
//! from the gallery's card list on every frame; nothing here mutates it.
//!
//! ## For contributors
//!
//! * The layout is a three-row split: the card list, a one-line status bar
//!   and a one-line help bar.
//! * Colours and styles are defined inline.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::gallery::Card;

/// Size of the thumbnail rendition advertised for the selected card.
const THUMB_WIDTH: u32 = 400;
const THUMB_HEIGHT: u32 = 300;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area, help_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_gallery(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
    draw_help_bar(app, frame, help_area);
}

fn card_line(card: &Card) -> Line<'_> {
    let heart = if card.liked {
        Span::styled("♥ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("♡ ", Style::default().fg(Color::DarkGray))
    };

    Line::from(vec![
        heart,
        Span::styled(
            format!("#{:<6}", card.item.id),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(&card.item.author, Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(&card.item.url, Style::default().fg(Color::Cyan)),
    ])
}

/// Render the card list.
fn draw_gallery(app: &mut App, frame: &mut Frame, area: Rect) {
    let gallery = &app.gallery;
    let list_items: Vec<ListItem> = gallery
        .cards()
        .iter()
        .map(|card| ListItem::new(card_line(card)))
        .collect();

    let title = if gallery.is_loading() {
        format!(" Gallery (loading page {}…) ", gallery.cursor())
    } else {
        format!(" Gallery · next page {} ", gallery.cursor())
    };

    let mut block = Block::default().title(title).borders(Borders::ALL);
    if let Some(card) = app.list_state.selected().and_then(|i| gallery.cards().get(i)) {
        block = block.title_bottom(format!(" {} ", card.item.image_url(THUMB_WIDTH, THUMB_HEIGHT)));
    }

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the status bar: last outcome on the left, aggregate on the right.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = app.gallery.status();
    let colour = if status.is_error { Color::Red } else { Color::Yellow };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", status.at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(&status.message, Style::default().fg(colour)),
        Span::raw("  "),
        Span::styled(app.gallery.summary(), Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the key help, dimming actions that are unavailable right now.
fn draw_help_bar(app: &App, frame: &mut Frame, area: Rect) {
    let gallery = &app.gallery;
    let actions = [
        ("n", "load more", gallery.can_load_more()),
        ("c", "clear", true),
        ("x", "remove last", gallery.can_remove_last()),
        ("r", "reverse", gallery.can_reverse()),
        ("l", "like", !gallery.is_empty()),
        ("↑/↓", "select", true),
        ("q", "quit", true),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (key, label, enabled) in actions {
        let style = if enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{key}: {label}"), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
