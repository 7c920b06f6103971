//! Board rendering for the five-in-a-row GUI

use std::ops::RangeInclusive;

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use serde::{Deserialize, Serialize};

use crate::{Board, Pos, Stone, BOARD_SIZE};

use super::theme::*;

/// Grid line colours offered in the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridColor {
    #[default]
    Wood,
    Black,
    Gray,
    Blue,
    Yellow,
    Red,
    Green,
    Cyan,
    Magenta,
}

impl GridColor {
    pub const ALL: [GridColor; 9] = [
        GridColor::Wood,
        GridColor::Black,
        GridColor::Gray,
        GridColor::Blue,
        GridColor::Yellow,
        GridColor::Red,
        GridColor::Green,
        GridColor::Cyan,
        GridColor::Magenta,
    ];

    pub fn color32(self) -> Color32 {
        match self {
            GridColor::Wood => GRID_LINE,
            GridColor::Black => Color32::BLACK,
            GridColor::Gray => Color32::GRAY,
            GridColor::Blue => Color32::BLUE,
            GridColor::Yellow => Color32::YELLOW,
            GridColor::Red => Color32::RED,
            GridColor::Green => Color32::GREEN,
            GridColor::Cyan => Color32::from_rgb(0, 255, 255),
            GridColor::Magenta => Color32::from_rgb(255, 0, 255),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GridColor::Wood => "Wood",
            GridColor::Black => "Black",
            GridColor::Gray => "Gray",
            GridColor::Blue => "Blue",
            GridColor::Yellow => "Yellow",
            GridColor::Red => "Red",
            GridColor::Green => "Green",
            GridColor::Cyan => "Cyan",
            GridColor::Magenta => "Magenta",
        }
    }
}

/// User adjustable grid appearance, saved with the app settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardStyle {
    pub grid_color: GridColor,
    pub line_width: f32,
    /// Space between the board edge and the outer grid lines
    pub padding: f32,
}

impl BoardStyle {
    pub const LINE_WIDTH_RANGE: RangeInclusive<f32> = 0.5..=6.0;
    pub const PADDING_RANGE: RangeInclusive<f32> = 16.0..=80.0;

    /// Copy with every field inside its slider range
    pub fn clamped(self) -> Self {
        let clamp = |v: f32, range: &RangeInclusive<f32>| {
            if v.is_finite() {
                v.clamp(*range.start(), *range.end())
            } else {
                *range.start()
            }
        };
        Self {
            grid_color: self.grid_color,
            line_width: clamp(self.line_width, &Self::LINE_WIDTH_RANGE),
            padding: clamp(self.padding, &Self::PADDING_RANGE),
        }
    }
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            grid_color: GridColor::Wood,
            line_width: GRID_LINE_WIDTH,
            padding: BOARD_MARGIN,
        }
    }
}

/// What the board view needs to draw one frame
pub struct BoardFrame<'a> {
    pub board: &'a Board,
    pub current_turn: Stone,
    pub last_move: Option<Pos>,
    pub pending: Option<Pos>,
    pub winning_line: Option<&'a [Pos]>,
    /// Clicks are ignored when false
    pub interactive: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    pub style: BoardStyle,
    pub(crate) cell_size: f32,
    pub(crate) board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            style: BoardStyle::default(),
            cell_size: 40.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked empty cell, if any
    pub fn show(&mut self, ui: &mut egui::Ui, frame: &BoardFrame<'_>) -> Option<Pos> {
        let available = ui.available_size();
        let board_size = available.x.min(available.y) - 20.0;
        self.style = self.style.clamped();
        self.cell_size = (board_size - 2.0 * self.style.padding) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(Vec2::splat(board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);

        for stone in [Stone::Black, Stone::White] {
            for pos in frame.board.stones(stone) {
                self.draw_stone(&painter, pos, stone);
            }
        }

        if let Some(pos) = frame.last_move {
            painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        if let Some(line) = frame.winning_line {
            self.draw_winning_line(&painter, line);
        }
        if let Some(pos) = frame.pending {
            self.draw_pending(&painter, pos, frame.current_turn);
        }

        if !frame.interactive {
            return None;
        }

        let board_pos = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        if !frame.board.is_empty(board_pos) {
            return None;
        }
        if frame.pending != Some(board_pos) {
            let radius = self.cell_size * STONE_RADIUS_RATIO;
            painter.circle_filled(self.board_to_screen(board_pos), radius, hover_stone(frame.current_turn));
        }

        response.clicked().then_some(board_pos)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(self.style.line_width, self.style.grid_color.color32());
        let margin = self.style.padding;
        let span = (BOARD_SIZE as f32 - 1.0) * self.cell_size;

        for i in 0..BOARD_SIZE {
            let offset = margin + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, margin);
            painter.line_segment([start, start + Vec2::new(0.0, span)], stroke);

            let start = self.board_rect.min + Vec2::new(margin, offset);
            painter.line_segment([start, start + Vec2::new(span, 0.0)], stroke);
        }
    }

    fn draw_star_points(&self, painter: &Painter) {
        for (row, col) in STAR_POINTS {
            let center = self.board_to_screen(Pos::new(row, col));
            painter.circle_filled(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Draw coordinate labels (A-M, 13-1)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        let color = self.style.grid_color.color32();
        let inset = self.style.padding * 0.4;
        let margin = self.style.padding;

        for col in 0..BOARD_SIZE {
            let letter = (b'A' + col as u8) as char;
            let x = self.board_rect.min.x + margin + col as f32 * self.cell_size;
            for y in [self.board_rect.min.y + inset, self.board_rect.max.y - inset] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, letter, font.clone(), color);
            }
        }

        for row in 0..BOARD_SIZE {
            let label = format!("{}", BOARD_SIZE - row);
            let y = self.board_rect.min.y + margin + row as f32 * self.cell_size;
            for x in [self.board_rect.min.x + inset, self.board_rect.max.x - inset] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, &label, font.clone(), color);
            }
        }
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
                painter.circle_filled(center, radius, BLACK_STONE);
                painter.circle_filled(center - Vec2::splat(radius * 0.3), radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 40));
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_STONE_SHADOW));
            }
            Stone::Empty => {}
        }
    }

    fn draw_pending(&self, painter: &Painter, pos: Pos, turn: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        painter.circle_filled(center, radius, pending_stone(turn));
        painter.circle_stroke(center, radius + 2.0, Stroke::new(2.0, PENDING_RING));
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }
        for pos in line {
            let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
            painter.circle_stroke(self.board_to_screen(*pos), radius, stroke);
        }
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let margin = self.style.padding;
        let col = ((relative.x - margin + self.cell_size * 0.5) / self.cell_size).floor() as i32;
        let row = ((relative.y - margin + self.cell_size * 0.5) / self.cell_size).floor() as i32;
        Pos::try_new(row, col)
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + self.style.padding + pos.col as f32 * self.cell_size;
        let y = self.board_rect.min.y + self.style.padding + pos.row as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> BoardView {
        BoardView {
            style: BoardStyle::default(),
            cell_size: 40.0,
            board_rect: Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::splat(600.0)),
        }
    }

    #[test]
    fn test_screen_board_conversion() {
        let v = view();
        for pos in [Pos::new(0, 0), Pos::new(6, 6), Pos::new(12, 3)] {
            let screen = v.board_to_screen(pos);
            assert_eq!(v.screen_to_board(screen), Some(pos));
            assert_eq!(v.screen_to_board(screen + Vec2::new(15.0, -15.0)), Some(pos));
        }
    }

    #[test]
    fn test_outside_grid_is_none() {
        let v = view();
        assert_eq!(v.screen_to_board(Pos2::new(0.0, 0.0)), None);
        let far = v.board_to_screen(Pos::new(12, 12)) + Vec2::splat(30.0);
        assert_eq!(v.screen_to_board(far), None);
    }

    #[test]
    fn test_padding_moves_grid() {
        let mut v = view();
        v.style.padding = 60.0;
        let corner = v.board_to_screen(Pos::new(0, 0));
        assert_eq!(corner, Pos2::new(70.0, 80.0));
        assert_eq!(v.screen_to_board(corner), Some(Pos::new(0, 0)));
        assert_eq!(v.screen_to_board(corner - Vec2::splat(25.0)), None);
    }

    #[test]
    fn test_style_clamped() {
        let style = BoardStyle {
            grid_color: GridColor::Red,
            line_width: 50.0,
            padding: f32::NAN,
        }
        .clamped();
        assert_eq!(style.grid_color, GridColor::Red);
        assert_eq!(style.line_width, 6.0);
        assert_eq!(style.padding, 16.0);
        assert_eq!(BoardStyle::default().clamped(), BoardStyle::default());
    }

    #[test]
    fn test_style_serde_defaults() {
        let style: BoardStyle = serde_json::from_str(r#"{ "grid_color": "Blue" }"#).unwrap();
        assert_eq!(style.grid_color, GridColor::Blue);
        assert_eq!(style.line_width, GRID_LINE_WIDTH);
        assert_eq!(style.padding, BOARD_MARGIN);

        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(serde_json::from_str::<BoardStyle>(&json).unwrap(), style);
    }
}
