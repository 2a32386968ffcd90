use crate::models::PricingResult;

/// Scalar stored in each heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridField {
    /// Moneyness-adjusted call value
    #[default]
    CallValue,
    /// Moneyness-adjusted put value
    PutValue,
    /// Probability that the call expires in the money, `N(d2)`
    Nd2,
    /// Unadjusted Black-Scholes call
    TheoreticalCall,
    /// Unadjusted Black-Scholes put
    TheoreticalPut,
}

impl GridField {
    /// Short label used in CSV headers and logs.
    pub fn label(&self) -> &'static str {
        match self {
            GridField::CallValue => "call_value",
            GridField::PutValue => "put_value",
            GridField::Nd2 => "nd2",
            GridField::TheoreticalCall => "theoretical_call",
            GridField::TheoreticalPut => "theoretical_put",
        }
    }
}

/// One entry of a [`CurveSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub spot: f64,
    pub result: PricingResult,
}

/// Adjusted call/put values along a spot sequence at a fixed strike.
///
/// Entries appear in the order of the input spots, one per spot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSeries {
    pub strike: f64,
    pub points: Vec<CurvePoint>,
}

impl CurveSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn spots(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.spot).collect()
    }

    /// Call values aligned with [`CurveSeries::spots`].
    pub fn calls(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.result.call_value).collect()
    }

    /// Put values aligned with [`CurveSeries::spots`].
    pub fn puts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.result.put_value).collect()
    }
}

/// Dense row-major table of one scalar over `spots × strikes`.
///
/// Rows follow the spot sequence and columns the strike sequence, both in the
/// order they were supplied. Every cell is populated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMatrix {
    pub field: GridField,
    pub(crate) spots: Vec<f64>,
    pub(crate) strikes: Vec<f64>,
    pub(crate) values: Vec<f64>,
}

impl GridMatrix {
    /// Assemble a matrix from row-major values. Returns `None` on a size mismatch.
    pub fn from_row_major(
        field: GridField,
        spots: Vec<f64>,
        strikes: Vec<f64>,
        values: Vec<f64>,
    ) -> Option<Self> {
        if values.len() != spots.len() * strikes.len() {
            return None;
        }
        Some(Self {
            field,
            spots,
            strikes,
            values,
        })
    }

    pub fn spots(&self) -> &[f64] {
        &self.spots
    }

    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// `(rows, columns)` = `(spots.len(), strikes.len())`
    pub fn dims(&self) -> (usize, usize) {
        (self.spots.len(), self.strikes.len())
    }

    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    /// Value at row `row` (spot index) and column `col` (strike index).
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.spots.len() || col >= self.strikes.len() {
            return None;
        }
        self.values.get(row * self.strikes.len() + col).copied()
    }

    /// Value for the first cell whose coordinates equal `(spot, strike)`.
    pub fn lookup(&self, spot: f64, strike: f64) -> Option<f64> {
        let row = self.spots.iter().position(|&s| s == spot)?;
        let col = self.strikes.iter().position(|&k| k == strike)?;
        self.get(row, col)
    }

    /// Iterator over rows, each a slice of `strikes.len()` values.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks() panics on zero; an empty strike axis means no cells at all.
        self.values.chunks(self.strikes.len().max(1))
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest and largest cell value, `None` for an empty matrix.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// Holder's profit at expiry for one spot of a [`ProfitCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfitPoint {
    pub spot: f64,
    pub call_profit: f64,
    pub put_profit: f64,
}

/// Profit of long call and long put positions bought at a reference spot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfitCurve {
    pub strike: f64,
    /// Theoretical call premium paid at the reference spot
    pub call_premium: f64,
    /// Theoretical put premium paid at the reference spot
    pub put_premium: f64,
    pub points: Vec<ProfitPoint>,
}

impl ProfitCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Break-even spots `(K + call_premium, K - put_premium)`.
    pub fn break_even(&self) -> (f64, f64) {
        (
            self.strike + self.call_premium,
            self.strike - self.put_premium,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> GridMatrix {
        GridMatrix::from_row_major(
            GridField::Nd2,
            vec![5.0, 6.5],
            vec![5.0, 6.5, 8.0],
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        )
        .unwrap()
    }

    #[test]
    fn test_row_major_indexing() {
        let m = sample_matrix();
        assert_eq!(m.dims(), (2, 3));
        assert_eq!(m.get(0, 2), Some(0.3));
        assert_eq!(m.get(1, 0), Some(0.4));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.lookup(6.5, 8.0), Some(0.6));
        assert_eq!(m.lookup(7.0, 8.0), None);
    }

    #[test]
    fn test_rows_and_range() {
        let m = sample_matrix();
        let rows: Vec<&[f64]> = m.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[0.4, 0.5, 0.6]);
        assert_eq!(m.value_range(), Some((0.1, 0.6)));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        assert!(GridMatrix::from_row_major(GridField::CallValue, vec![1.0], vec![1.0, 2.0], vec![0.0])
            .is_none());
    }

    #[test]
    fn test_break_even() {
        let curve = ProfitCurve {
            strike: 13.0,
            call_premium: 2.0,
            put_premium: 1.5,
            points: Vec::new(),
        };
        assert_eq!(curve.break_even(), (15.0, 11.5));
    }
}
