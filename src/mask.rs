/// Pixel-accurate collision.
///
/// A `Mask` records which logical pixels of a sprite are opaque.  Two
/// entities collide when their masks, placed at the entities' positions,
/// share at least one opaque pixel.  There is no bounding-box shortcut in
/// the answer, only in the scan range.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Row-major opacity, `width * height` entries.
    bits: Vec<bool>,
}

impl Mask {
    /// A fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// A fully opaque rectangle.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask from text art.  Every non-space character becomes an
    /// opaque `cell_w × cell_h` block; rows shorter than the widest one are
    /// padded with transparency.
    pub fn from_art(art: &[String], cell_w: u32, cell_h: u32) -> Self {
        let cols = art.iter().map(|row| row.chars().count()).max().unwrap_or(0) as u32;
        let rows = art.len() as u32;
        let mut mask = Mask::new(cols * cell_w, rows * cell_h);

        for (r, row) in art.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x0 = c as u32 * cell_w;
                let y0 = r as u32 * cell_h;
                for y in y0..y0 + cell_h {
                    for x in x0..x0 + cell_w {
                        mask.set(x, y, true);
                    }
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = opaque;
        }
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First point, in `self`'s coordinates, where `self` and `other`
    /// (shifted by `offset`) are both opaque.  Scans row-major.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = offset;

        // Intersection of the two rectangles in self's frame.
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width as i32).min(dx + other.width as i32);
        let y_end = (self.height as i32).min(dy + other.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

/// Anything that occupies space on the canvas.
pub trait Collider {
    /// Top-left corner in logical units.
    fn position(&self) -> (f32, f32);
    fn mask(&self) -> &Mask;
}

/// True iff the two entities' opaque pixels overlap.  The offset between
/// them is truncated toward zero to whole pixels.
pub fn collide(a: &impl Collider, b: &impl Collider) -> bool {
    let (ax, ay) = a.position();
    let (bx, by) = b.position();
    let offset = ((bx - ax) as i32, (by - ay) as i32);
    a.mask().overlap(b.mask(), offset).is_some()
}
