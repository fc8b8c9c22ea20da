/// Braille canvas for high-resolution terminal rendering
/// Each terminal cell contains a 2×4 grid of Braille dots
/// This gives us 2× horizontal and 4× vertical resolution
///
/// A cell has one foreground colour; the last dot drawn into it decides it.
use ratatui::style::Color;

pub struct BrailleCanvas {
    width: usize,  // Width in terminal cells
    height: usize, // Height in terminal cells
    dots: Vec<Vec<u8>>, // 2D array of dot patterns (0-255)
    colors: Vec<Vec<Option<Color>>>,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
            colors: vec![vec![None; width]; height],
        }
    }

    /// Set a dot at pixel coordinates
    /// pixel_x: 0 to (width * 2 - 1)
    /// pixel_y: 0 to (height * 4 - 1)
    pub fn set_pixel(&mut self, pixel_x: usize, pixel_y: usize, color: Color) {
        let cell_x = pixel_x / 2;
        let cell_y = pixel_y / 4;

        if cell_x >= self.width || cell_y >= self.height {
            return;
        }

        // Braille dot numbering:
        // 1 4
        // 2 5
        // 3 6
        // 7 8
        let dot_index = match (pixel_x % 2, pixel_y % 4) {
            (0, 0) => 0,
            (0, 1) => 1,
            (0, 2) => 2,
            (0, _) => 6,
            (_, 0) => 3,
            (_, 1) => 4,
            (_, 2) => 5,
            (_, _) => 7,
        };

        self.dots[cell_y][cell_x] |= 1 << dot_index;
        self.colors[cell_y][cell_x] = Some(color);
    }

    /// Fill a rectangle with pixels
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Color) {
        for py in y..(y + height) {
            for px in x..(x + width) {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Vertical run of dots, `gap` pixels skipped after each `dash`
    pub fn vertical_line(&mut self, x: usize, y0: usize, y1: usize, dash: usize, gap: usize, color: Color) {
        let period = (dash + gap).max(1);
        for y in y0..y1 {
            if (y - y0) % period < dash {
                self.set_pixel(x, y, color);
            }
        }
    }

    pub fn horizontal_line(&mut self, y: usize, x0: usize, x1: usize, color: Color) {
        for x in x0..x1 {
            self.set_pixel(x, y, color);
        }
    }

    /// Convert dot pattern to Braille character
    /// Braille Unicode: U+2800 + dot pattern
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        if cell_x >= self.width || cell_y >= self.height {
            return ' ';
        }

        let pattern = self.dots[cell_y][cell_x];
        char::from_u32(0x2800 + pattern as u32).unwrap_or(' ')
    }

    pub fn color_at(&self, cell_x: usize, cell_y: usize) -> Option<Color> {
        self.colors.get(cell_y)?.get(cell_x).copied().flatten()
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get width in pixels (2 per cell)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Get height in pixels (4 per cell)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_canvas() {
        let mut canvas = BrailleCanvas::new(2, 2);

        canvas.set_pixel(0, 0, Color::White);
        assert_eq!(canvas.to_char(0, 0), '⠁'); // dot 1
        assert_eq!(canvas.color_at(0, 0), Some(Color::White));
        assert_eq!(canvas.color_at(1, 0), None);

        canvas.fill_rect(2, 0, 2, 4, Color::Red);
        assert_eq!(canvas.to_char(1, 0), '⣿');
        assert_eq!(canvas.color_at(1, 0), Some(Color::Red));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(5, 9, Color::Red);
        assert_eq!(canvas.to_char(0, 0), '⠀');
        assert_eq!(canvas.to_char(3, 3), ' ');
    }

    #[test]
    fn test_dashed_line_skips_gaps() {
        let mut canvas = BrailleCanvas::new(1, 2);
        canvas.vertical_line(0, 0, 8, 2, 2, Color::Gray);
        // Dots 1,2 in the first cell and 1,2 in the second
        assert_eq!(canvas.to_char(0, 0), '⠃');
        assert_eq!(canvas.to_char(0, 1), '⠃');
    }
}
