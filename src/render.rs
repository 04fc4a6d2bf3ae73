use analytics::CorrelationResult;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::{LagSpec, TimeSeries};

const NO_VALUE: &str = "n/a";

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// The combined ranked report: one row per (commodity, indicator) pair with
/// the best correlation, its timing and the value at every examined lag.
pub fn report_table(rows: &[CorrelationResult], lags: &[LagSpec]) -> Table {
    let mut table = base_table();

    let mut header = vec![
        Cell::new("Commodity"),
        Cell::new("Indicator"),
        Cell::new("Best Corr"),
        Cell::new("Timing"),
    ];
    header.extend(lags.iter().map(|lag| Cell::new(&lag.label)));
    table.set_header(header);

    for row in rows {
        let mut cells = vec![
            Cell::new(&row.target),
            Cell::new(&row.reference),
            Cell::new(row.best_correlation).set_alignment(CellAlignment::Right),
            Cell::new(&row.timing),
        ];
        cells.extend(lags.iter().map(|lag| {
            let value = row
                .correlation_at(lag.offset)
                .map_or_else(|| NO_VALUE.to_string(), |c| c.to_string());
            Cell::new(value).set_alignment(CellAlignment::Right)
        }));
        table.add_row(cells);
    }
    table
}

/// One line of the data inventory shown by `check`.
pub struct InventoryRow {
    pub kind: &'static str,
    pub name: String,
    pub file: String,
    pub series: Result<TimeSeries, String>,
}

pub fn inventory_table(rows: &[InventoryRow]) -> Table {
    let mut table = base_table();
    table.set_header(vec![
        "Kind", "Name", "File", "Observations", "Recorded", "First", "Last",
    ]);

    for row in rows {
        match &row.series {
            Ok(series) => {
                let first = series.first_date().map_or_else(|| "-".to_string(), |d| d.to_string());
                let last = series.last_date().map_or_else(|| "-".to_string(), |d| d.to_string());
                table.add_row(vec![
                    row.kind.to_string(),
                    row.name.clone(),
                    row.file.clone(),
                    series.len().to_string(),
                    series.recorded().to_string(),
                    first,
                    last,
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    row.kind.to_string(),
                    row.name.clone(),
                    row.file.clone(),
                    format!("error: {e}"),
                    String::new(),
                    String::new(),
                    String::new(),
                ]);
            }
        }
    }
    table
}
