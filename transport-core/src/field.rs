use serde::Serialize;

/// Dense `(nt, nx)` concentration arena, row-major by time step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationField {
    nt: usize,
    nx: usize,
    data: Vec<f64>,
}

impl ConcentrationField {
    /// Clean river: every entry zero.
    pub fn zeros(nt: usize, nx: usize) -> Self {
        ConcentrationField {
            nt,
            nx,
            data: vec![0.0; nt * nx],
        }
    }

    // ---- Accessors ----

    pub fn nt(&self) -> usize {
        self.nt
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nt, self.nx)
    }

    pub fn get(&self, n: usize, i: usize) -> Option<f64> {
        if n >= self.nt || i >= self.nx {
            return None;
        }
        Some(self.data[n * self.nx + i])
    }

    pub fn row(&self, n: usize) -> &[f64] {
        let start = n * self.nx;
        &self.data[start..start + self.nx]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.nx)
    }

    /// Values at node `i` over all time steps.
    pub fn column(&self, i: usize) -> Vec<f64> {
        self.rows().map(|r| r[i]).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Largest finite value in the field, if any.
    pub fn max(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    /// Node index and value of the peak in row `n`. Ties keep the first node.
    pub fn argmax_in_row(&self, n: usize) -> (usize, f64) {
        let mut best = (0, self.row(n)[0]);
        for (i, &v) in self.row(n).iter().enumerate().skip(1) {
            if v > best.1 {
                best = (i, v);
            }
        }
        best
    }

    /// Row `n` for reading and row `n + 1` for writing.
    pub(crate) fn step_rows_mut(&mut self, n: usize) -> (&[f64], &mut [f64]) {
        let nx = self.nx;
        let (head, tail) = self.data.split_at_mut((n + 1) * nx);
        (&head[n * nx..], &mut tail[..nx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConcentrationField {
        ConcentrationField {
            nt: 3,
            nx: 3,
            data: vec![0.0, 0.0, 0.0, 1.0, 4.0, 2.0, 3.0, 3.0, 0.5],
        }
    }

    #[test]
    fn zeros_has_requested_shape() {
        let f = ConcentrationField::zeros(4, 6);
        assert_eq!(f.shape(), (4, 6));
        assert!(f.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(f.rows().count(), 4);
    }

    #[test]
    fn row_and_column_views() {
        let f = sample();
        assert_eq!(f.row(1), &[1.0, 4.0, 2.0]);
        assert_eq!(f.column(2), vec![0.0, 2.0, 0.5]);
        assert_eq!(f.get(2, 0), Some(3.0));
        assert_eq!(f.get(3, 0), None);
    }

    #[test]
    fn peaks() {
        let f = sample();
        assert_eq!(f.max(), Some(4.0));
        assert_eq!(f.argmax_in_row(1), (1, 4.0));
        assert_eq!(f.argmax_in_row(2), (0, 3.0));
    }

    #[test]
    fn step_rows_are_disjoint() {
        let mut f = sample();
        let (prev, next) = f.step_rows_mut(1);
        assert_eq!(prev, &[1.0, 4.0, 2.0]);
        next.copy_from_slice(&[7.0, 8.0, 9.0]);
        assert_eq!(f.row(2), &[7.0, 8.0, 9.0]);
        assert_eq!(f.row(1), &[1.0, 4.0, 2.0]);
    }
}
