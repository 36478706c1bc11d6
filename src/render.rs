use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{config::Config, quantity::power::Kilowatts, statistics::ReportRow};

fn base_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn numeric(text: Option<String>) -> Cell {
    Cell::new(text.unwrap_or_else(|| "-".to_owned())).set_alignment(CellAlignment::Right)
}

/// The interval report: raw readings next to their deltas, elapsed time, mean
/// power and 24-hour-normalized consumption. Zero and absent values render as
/// `-` to keep the operator's eye on actual consumption.
#[must_use]
pub fn report_table(rows: &[ReportRow]) -> Table {
    let mut table = base_table();
    table.set_header(vec![
        "Date",
        "Asset",
        "kWh reading",
        "Δ kWh",
        "Δ m³",
        "Hours",
        "Mean power (kW)",
        "24h consumption (kWh)",
    ]);
    for row in rows {
        let interval = &row.interval;
        let power = interval.power();
        let norm24 = interval.normalized_24h();
        table.add_row(vec![
            Cell::new(row.date.format("%Y-%m-%d %H:%M")),
            Cell::new(&row.asset_name).add_attribute(Attribute::Bold),
            numeric(row.read_energy.map(|energy| format!("{:.1}", energy.0))),
            numeric(
                interval
                    .energy
                    .filter(|energy| energy.0 > 0.0)
                    .map(|energy| format!("{:.1}", energy.0)),
            )
            .fg(Color::Blue),
            numeric(
                interval
                    .volume
                    .filter(|volume| volume.0 > 0.0)
                    .map(|volume| format!("{:.0}", volume.0)),
            )
            .fg(Color::Cyan),
            numeric(Some(format!("{:.2}", interval.elapsed_hours()))),
            numeric((power > Kilowatts::ZERO).then(|| format!("{:.2}", power.0)))
                .fg(Color::DarkYellow),
            numeric((norm24.0 > 0.0).then(|| format!("{:.1}", norm24.0)))
                .add_attribute(Attribute::Bold),
        ]);
    }
    table
}

/// Blank daily-control sheets, one per extraction point: a row per asset with
/// the cells applicable to its type left open and the rest struck out.
#[must_use]
pub fn field_sheets(config: &Config) -> Vec<(String, Table)> {
    config
        .0
        .iter()
        .map(|point| {
            let mut table = base_table();
            table.set_header(vec![
                "Asset",
                "Time",
                "kWh reading",
                "Conn. hours",
                "Run hours",
                "m³ reading",
                "Notes",
            ]);
            for asset in &point.assets {
                let open = || Cell::new("");
                let closed = || Cell::new("×").set_alignment(CellAlignment::Center).fg(Color::DarkGrey);
                table.add_row(vec![
                    Cell::new(format!("{} ({})", asset.name, asset.kind))
                        .add_attribute(Attribute::Bold),
                    open(),
                    if asset.kind.tracks_energy() { open() } else { closed() },
                    if asset.kind.tracks_connection_hours() { open() } else { closed() },
                    if asset.kind.tracks_run_hours() { open() } else { closed() },
                    if asset.kind.tracks_volume() { open() } else { closed() },
                    open(),
                ]);
            }
            (point.name.clone(), table)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        reading::{Counters, Reading, ReadingLog},
        statistics::build_report,
    };

    #[test]
    fn test_report_table_renders_deltas() {
        let at = |hour| {
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(hour, 0, 0).unwrap()
        };
        let readings = ReadingLog::from(vec![
            Reading::new(1, at(8), "pump".to_owned(), Counters::energy_only(100.0.into())),
            Reading::new(2, at(9), "pump".to_owned(), Counters::energy_only(150.0.into())),
        ]);
        let rows = build_report(&readings, &Config::default());
        let rendered = report_table(&rows).to_string();
        assert!(rendered.contains("50.0"));
        assert!(rendered.contains("1200.0"));
        assert!(rendered.contains("pump"));
    }

    #[test]
    fn test_field_sheets_close_inapplicable_cells() {
        let sheets = field_sheets(&Config::default_site());
        assert_eq!(sheets.len(), 5);
        let (name, table) = &sheets[4];
        assert_eq!(name, "Osmosis / Ingreso BES");
        // The lone flow meter gets open volume cells and struck-out energy cells.
        let rendered = table.to_string();
        assert!(rendered.contains("FIT Ingreso BES (FIT)"));
        assert!(rendered.contains('×'));
    }
}
