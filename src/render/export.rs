use std::io::Write;

use anyhow::Result;

use crate::grid::types::{CurveSeries, GridMatrix, ProfitCurve};

/// Write a curve as `spot,call,put` rows.
pub fn write_curve_csv<W: Write>(series: &CurveSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["spot", "call", "put"])?;
    for p in &series.points {
        wtr.write_record([
            p.spot.to_string(),
            p.result.call_value.to_string(),
            p.result.put_value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a profit curve as `spot,call_profit,put_profit` rows.
pub fn write_profit_curve_csv<W: Write>(curve: &ProfitCurve, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["spot", "call_profit", "put_profit"])?;
    for p in &curve.points {
        wtr.write_record([
            p.spot.to_string(),
            p.call_profit.to_string(),
            p.put_profit.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a grid as a pivot table.
///
/// The header row holds the field label followed by the strikes; each following
/// row starts with its spot and lists that row's values in strike order.
pub fn write_grid_csv<W: Write>(matrix: &GridMatrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.strikes().len() + 1);
    header.push(format!("{}|spot\\strike", matrix.field.label()));
    header.extend(matrix.strikes().iter().map(|k| k.to_string()));
    wtr.write_record(&header)?;

    for (spot, row) in matrix.spots().iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(spot.to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    tracing::debug!(
        field = matrix.field.label(),
        rows = matrix.spots().len(),
        "grid exported"
    );
    Ok(())
}
