use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

/// Axis-aligned pixel rectangle, `x..x + width` by `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }
}

/// A grid iterator that yields (x, y, pixel_idx) tuples.
///
/// Walks a rectangle of a row-major buffer whose rows are `stride` wide, so
/// `pixel_idx` always addresses the full buffer.
#[derive(Debug, Clone, Copy)]
pub struct GridIterator {
    region: Rect,
    stride: usize,
    x: usize,
    y: usize,
}

impl GridIterator {
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self::region(Rect::new(0, 0, width, height), width)
    }

    #[inline]
    pub const fn region(region: Rect, stride: usize) -> Self {
        Self {
            region,
            stride,
            x: 0,
            y: 0,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        if self.region.width == 0 || self.y >= self.region.height {
            return 0;
        }
        (self.region.height - self.y) * self.region.width - self.x
    }
}

impl Iterator for GridIterator {
    type Item = (usize, usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.region.width == 0 || self.y >= self.region.height {
            return None;
        }

        let x = self.region.x + self.x;
        let y = self.region.y + self.y;
        let result = (x, y, y * self.stride + x);

        self.x += 1;
        if self.x >= self.region.width {
            self.x = 0;
            self.y += 1;
        }

        Some(result)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIterator {}

/// A parallel grid iterator that yields (x, y, pixel_idx) tuples over a full frame.
///
/// Uses map_init to keep x/y state per thread and avoid `%` and `/` on
/// consecutive indices.
#[derive(Debug, Clone, Copy)]
pub struct ParGridIterator {
    width: usize,
    height: usize,
}

impl ParGridIterator {
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn par_iter(self) -> impl IndexedParallelIterator<Item = (usize, usize, usize)> {
        let width = self.width.max(1);
        (0..self.width * self.height).into_par_iter().map_init(
            || None,
            move |state: &mut Option<(usize, usize, usize)>, idx| match state {
                Some((x, y, last_idx)) if idx == *last_idx + 1 => {
                    *x += 1;
                    if *x >= width {
                        *x = 0;
                        *y += 1;
                    }
                    *last_idx = idx;
                    (*x, *y, idx)
                }
                _ => {
                    // first index for this thread, or a jump across a chunk boundary
                    let (x, y) = (idx % width, idx / width);
                    *state = Some((x, y, idx));
                    (x, y, idx)
                }
            },
        )
    }
}
