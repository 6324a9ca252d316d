use ndarray::Array2;

/// A binary structuring element with its anchor at the center.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuringElement {
    cells: Array2<bool>,
    /// Active cells as (row, col) offsets from the anchor.
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Ellipse inscribed in a `size x size` box.
    ///
    /// Row `i` spans columns `c - dx ..= c + dx` where
    /// `dx = round(c * sqrt(r^2 - (i - r)^2) / r)`; this yields the classic
    /// 5x5 "plus with fat middle" shape.
    pub fn ellipse(size: usize) -> Self {
        let r = (size / 2) as isize;
        let c = (size / 2) as isize;
        let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

        let mut cells = Array2::from_elem((size, size), false);
        for i in 0..size {
            let dy = i as isize - r;
            if dy.abs() > r {
                continue;
            }
            let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as isize;
            let j1 = (c - dx).max(0) as usize;
            let j2 = ((c + dx + 1) as usize).min(size);
            for j in j1..j2 {
                cells[[i, j]] = true;
            }
        }
        Self::from_cells(cells)
    }

    fn from_cells(cells: Array2<bool>) -> Self {
        let (h, w) = cells.dim();
        let (ar, ac) = ((h / 2) as isize, (w / 2) as isize);
        let offsets = cells
            .indexed_iter()
            .filter(|(_, &on)| on)
            .map(|((row, col), _)| (row as isize - ar, col as isize - ac))
            .collect();
        Self { cells, offsets }
    }

    pub fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }
}
