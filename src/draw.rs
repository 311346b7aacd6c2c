use crate::config::Config;
use crate::game::{Cell, Direction, Game, Outcome, Status};

/// Paints whole frames into the RGBA buffer handed out by `pixels`.
pub struct Renderer {
    width: u32,
    height: u32,
    cell: u32,
    grid_width: i32,
    grid_height: i32,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.pixel_width(),
            height: config.pixel_height(),
            cell: config.cell_size,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
        }
    }

    pub fn draw(&self, frame: &mut [u8], game: &Game, paused: bool) {
        // Clear screen with dark background
        self.clear(frame, 20, 20, 30, 255);

        // Checkerboard tint so the grid reads without lines
        for y in 0..self.grid_height {
            for x in 0..self.grid_width {
                if (x + y) % 2 == 0 {
                    self.fill_cell(frame, x, y, 25, 25, 35);
                }
            }
        }

        // Food (red)
        let food = game.food();
        self.fill_cell(frame, food.x, food.y, 220, 50, 50);

        // Body (green gradient fading away from the head)
        for (i, &cell) in game.body().iter().rev().enumerate().skip(1) {
            let brightness = 200 - (i * 10).min(100) as u8;
            self.fill_cell(frame, cell.x, cell.y, 50, brightness, 50);
        }

        // Head (bright green) on top
        let head = game.head();
        self.fill_cell(frame, head.x, head.y, 100, 255, 100);
        self.draw_eyes(frame, head, game.direction());

        self.draw_text(
            frame,
            &format!("SCORE: {}", game.score()),
            8,
            8,
            2,
            (230, 230, 230, 255),
        );
        self.draw_text(
            frame,
            &format!("LENGTH: {}", game.body().len()),
            8,
            28,
            2,
            (200, 200, 200, 255),
        );

        match game.status() {
            Status::Running => {
                if paused {
                    self.overlay(frame, &[("PAUSED", (255, 255, 100, 255))]);
                }
            }
            Status::Over(Outcome::SelfCollision) => {
                self.overlay(
                    frame,
                    &[
                        ("GAME OVER", (255, 100, 100, 255)),
                        (&format!("SCORE: {}", game.score()), (255, 255, 255, 255)),
                        ("PRESS R TO RESTART", (200, 200, 200, 255)),
                    ],
                );
            }
            Status::Over(Outcome::BoardFull) => {
                self.overlay(
                    frame,
                    &[
                        ("YOU WIN", (100, 255, 140, 255)),
                        (&format!("SCORE: {}", game.score()), (255, 255, 255, 255)),
                        ("PRESS R TO RESTART", (200, 200, 200, 255)),
                    ],
                );
            }
        }
    }

    // Dims a panel in the middle of the board and centers each line in it.
    fn overlay(&self, frame: &mut [u8], lines: &[(&str, (u8, u8, u8, u8))]) {
        let scale = 2;
        let line_h = 7 * scale + 10;
        let mut widest = 0;
        for (text, _) in lines {
            widest = widest.max(self.text_width(text, scale));
        }
        let panel_w = widest + 40;
        let panel_h = lines.len() as u32 * line_h + 22;
        let panel_x = self.width.saturating_sub(panel_w) / 2;
        let panel_y = self.height.saturating_sub(panel_h) / 2;

        self.fill_rect(frame, panel_x, panel_y, panel_w, panel_h, 0, 0, 0, 140);
        self.stroke_rect(frame, panel_x, panel_y, panel_w, panel_h, 255, 255, 255, 60);

        let mut ty = panel_y + 16;
        for (text, color) in lines {
            let tx = self.width.saturating_sub(self.text_width(text, scale)) / 2;
            self.draw_text(frame, text, tx, ty, scale, *color);
            ty += line_h;
        }
    }

    fn clear(&self, frame: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
        for px in frame.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
    }

    fn blend_pixel(&self, frame: &mut [u8], x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        if idx + 3 >= frame.len() {
            return;
        }
        let an = a as u16;
        let inv = (255 - a) as u16;
        frame[idx] = (((r as u16) * an + frame[idx] as u16 * inv) / 255) as u8;
        frame[idx + 1] = (((g as u16) * an + frame[idx + 1] as u16 * inv) / 255) as u8;
        frame[idx + 2] = (((b as u16) * an + frame[idx + 2] as u16 * inv) / 255) as u8;
        frame[idx + 3] = 255;
    }

    fn fill_rect(&self, frame: &mut [u8], x: u32, y: u32, w: u32, h: u32, r: u8, g: u8, b: u8, a: u8) {
        let x2 = (x + w).min(self.width);
        let y2 = (y + h).min(self.height);
        for py in y..y2 {
            for px in x..x2 {
                self.blend_pixel(frame, px, py, r, g, b, a);
            }
        }
    }

    fn stroke_rect(&self, frame: &mut [u8], x: u32, y: u32, w: u32, h: u32, r: u8, g: u8, b: u8, a: u8) {
        if w == 0 || h == 0 {
            return;
        }
        let x2 = (x + w - 1).min(self.width - 1);
        let y2 = (y + h - 1).min(self.height - 1);
        for px in x..=x2 {
            self.blend_pixel(frame, px, y, r, g, b, a);
            self.blend_pixel(frame, px, y2, r, g, b, a);
        }
        for py in y..=y2 {
            self.blend_pixel(frame, x, py, r, g, b, a);
            self.blend_pixel(frame, x2, py, r, g, b, a);
        }
    }

    fn fill_cell(&self, frame: &mut [u8], grid_x: i32, grid_y: i32, r: u8, g: u8, b: u8) {
        let x = grid_x as u32 * self.cell;
        let y = grid_y as u32 * self.cell;
        self.fill_rect(frame, x, y, self.cell, self.cell, r, g, b, 255);
    }

    fn draw_eyes(&self, frame: &mut [u8], head: Cell, dir: Direction) {
        let base_x = head.x as u32 * self.cell;
        let base_y = head.y as u32 * self.cell;
        let near = self.cell / 4;
        let far = self.cell * 3 / 5;

        let (e1x, e1y, e2x, e2y) = match dir {
            Direction::Right => (base_x + far, base_y + near, base_x + far, base_y + far),
            Direction::Left => (base_x + near, base_y + near, base_x + near, base_y + far),
            Direction::Up => (base_x + near, base_y + near, base_x + far, base_y + near),
            Direction::Down => (base_x + near, base_y + far, base_x + far, base_y + far),
        };

        self.blend_pixel(frame, e1x, e1y, 0, 0, 0, 255);
        self.blend_pixel(frame, e2x, e2y, 0, 0, 0, 255);
    }

    fn draw_char(&self, frame: &mut [u8], ch: char, x: u32, y: u32, scale: u32, col: (u8, u8, u8, u8)) -> u32 {
        if let Some(rows) = glyph_5x7(ch) {
            for (ry, row) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (row >> (4 - rx)) & 1 == 1 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.blend_pixel(
                                    frame,
                                    x + rx as u32 * scale + sx,
                                    y + ry as u32 * scale + sy,
                                    col.0,
                                    col.1,
                                    col.2,
                                    col.3,
                                );
                            }
                        }
                    }
                }
            }
        }
        5 * scale + scale
    }

    fn draw_text(&self, frame: &mut [u8], text: &str, x: u32, y: u32, scale: u32, col: (u8, u8, u8, u8)) {
        let mut cx = x;
        for ch in text.chars() {
            cx += self.draw_char(frame, ch, cx, y, scale, col);
        }
    }

    fn text_width(&self, text: &str, scale: u32) -> u32 {
        text.chars().count() as u32 * (5 * scale + scale)
    }
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    let c = ch.to_ascii_uppercase();
    Some(match c {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => return None,
    })
}
