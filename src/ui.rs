use crate::board::{self, COLUMNS, ROWS};
use crate::game::GameState;
use crate::point::Point;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

/// Terminal columns per board cell; two keeps cells roughly square.
pub const CELL_WIDTH: u16 = 2;
pub const GRID_COLOR: Color = Color::Rgb(128, 128, 128);

/// Size of the board area, without any frame.
pub const BOARD_SIZE: (u16, u16) = (COLUMNS as u16 * CELL_WIDTH, ROWS as u16);

const BLOCK_CHAR: &str = "█";
const GRID_CHAR: &str = "·";

/// Locked cells, grid, and the falling piece on top.
pub struct GameWidget<'a> {
    pub game: &'a GameState,
}

impl Widget for GameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        for (y, row) in self.game.board().rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let pos = Point(x as u16, y as u16);
                match cell {
                    board::Cell::Empty => paint_grid(area, buf, pos),
                    board::Cell::Filled(color) => paint_block(area, buf, pos, *color),
                }
            }
        }

        if let Some(piece) = self.game.active() {
            for Point(x, y) in piece.cells() {
                if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
                    paint_block(area, buf, Point(x, y), piece.color());
                }
            }
        }
    }
}

fn paint_block(area: Rect, buf: &mut Buffer, pos: Point<u16>, color: Color) {
    for i in 0..CELL_WIDTH {
        if let Some(cell) = cell_at(area, buf, pos, i) {
            cell.set_symbol(BLOCK_CHAR).set_fg(color).set_bg(color);
        }
    }
}

fn paint_grid(area: Rect, buf: &mut Buffer, pos: Point<u16>) {
    for i in 0..CELL_WIDTH {
        if let Some(cell) = cell_at(area, buf, pos, i) {
            let symbol = if i == 0 { GRID_CHAR } else { " " };
            cell.set_symbol(symbol).set_fg(GRID_COLOR).set_bg(Color::Reset);
        }
    }
}

fn cell_at<'b>(
    area: Rect,
    buf: &'b mut Buffer,
    Point(x, y): Point<u16>,
    i: u16,
) -> Option<&'b mut ratatui::buffer::Cell> {
    let x = x.checked_mul(CELL_WIDTH)?.checked_add(i)?;
    if x >= area.width || y >= area.height {
        return None;
    }
    buf.cell_mut((area.x + x, area.y + y))
}
