//! CSV import and export of per-match stat lines.
//!
//! Layout: a header row naming [`STAT_COLUMNS`] followed by one row per
//! player. Column order in uploaded files is free; exported files use the
//! canonical order.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::collections::HashSet;

use crate::domain::StatLine;
use crate::errors::{AppError, AppResult};

pub const STAT_COLUMNS: [&str; 9] = [
    "player_id",
    "minutes",
    "points",
    "rebounds",
    "assists",
    "steals",
    "blocks",
    "turnovers",
    "fouls",
];

/// A parsed row with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvStatLine {
    pub line: u64,
    pub stats: StatLine,
}

fn line_error(line: u64, message: impl std::fmt::Display) -> AppError {
    AppError::csv(format!("line {}: {}", line, message))
}

fn describe(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::Utf8 { err, .. } => err.to_string(),
        _ => err.to_string(),
    }
}

/// Parse and validate an uploaded stats file.
///
/// Blank rows are skipped and fields are trimmed. Every error names the
/// line it was found on; a player may appear only once per file.
pub fn read_stat_lines(data: &[u8]) -> AppResult<Vec<CsvStatLine>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| line_error(1, describe(&e)))?
        .clone();
    if headers.iter().all(str::is_empty) {
        return Err(line_error(1, "missing header row"));
    }
    if let Some(missing) = STAT_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(line_error(1, format!("missing column '{}'", missing)));
    }

    let mut seen = HashSet::new();
    let mut parsed = Vec::new();
    let mut record = StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                return Err(line_error(line, describe(&e)));
            }
        }

        let line = record.position().map_or(0, |p| p.line());
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(line_error(
                line,
                format!("expected {} fields, found {}", headers.len(), record.len()),
            ));
        }

        let stats: StatLine = record
            .deserialize(Some(&headers))
            .map_err(|e| line_error(line, describe(&e)))?;
        stats.validate().map_err(|e| line_error(line, e))?;

        if !seen.insert(stats.player_id) {
            return Err(line_error(
                line,
                format!("duplicate player_id {}", stats.player_id),
            ));
        }

        parsed.push(CsvStatLine { line, stats });
    }

    Ok(parsed)
}

/// Render stat lines with the canonical header, which is written even when
/// there are no rows.
pub fn write_stat_lines(lines: &[StatLine]) -> AppResult<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(STAT_COLUMNS)
        .map_err(|e| AppError::csv(e.to_string()))?;
    for line in lines {
        writer
            .serialize(line)
            .map_err(|e| AppError::csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::internal(format!("CSV encoding: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "player_id,minutes,points,rebounds,assists,steals,blocks,turnovers,fouls";

    fn message(err: AppError) -> String {
        match err {
            AppError::Csv(m) => m,
            other => panic!("expected CSV error, got {:?}", other),
        }
    }

    #[test]
    fn test_reads_rows_with_line_numbers() {
        let data = format!("{}\n23,38,31,7,6,2,1,3,2\n\n 33 , 40, 12, 11, 4, 1, 0, 2, 5 \n", HEADER);

        let rows = read_stat_lines(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].stats.points, 31);
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].stats.player_id, 33);
        assert_eq!(rows[1].stats.fouls, 5);
    }

    #[test]
    fn test_column_order_is_free() {
        let data = "fouls,turnovers,blocks,steals,assists,rebounds,points,minutes,player_id\n1,2,3,4,5,6,7,8,9\n";

        let rows = read_stat_lines(data.as_bytes()).unwrap();

        assert_eq!(rows[0].stats.player_id, 9);
        assert_eq!(rows[0].stats.fouls, 1);
    }

    #[test]
    fn test_bad_number_names_line() {
        let data = format!("{}\n23,38,31,7,6,2,1,3,2\n24,x,0,0,0,0,0,0,0\n", HEADER);

        let msg = message(read_stat_lines(data.as_bytes()).unwrap_err());

        assert!(msg.starts_with("line 3:"), "{}", msg);
    }

    #[test]
    fn test_negative_counter_names_line() {
        let data = format!("{}\n23,38,-1,7,6,2,1,3,2\n", HEADER);

        let msg = message(read_stat_lines(data.as_bytes()).unwrap_err());

        assert_eq!(msg, "line 2: points: must not be negative");
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let data = format!("{}\n23,1,1,1,1,1,1,1,1\n23,2,2,2,2,2,2,2,2\n", HEADER);

        let msg = message(read_stat_lines(data.as_bytes()).unwrap_err());

        assert_eq!(msg, "line 3: duplicate player_id 23");
    }

    #[test]
    fn test_missing_column_rejected() {
        let data = "player_id,minutes,points\n1,2,3\n";

        let msg = message(read_stat_lines(data.as_bytes()).unwrap_err());

        assert_eq!(msg, "line 1: missing column 'rebounds'");
    }

    #[test]
    fn test_short_row_rejected() {
        let data = format!("{}\n23,38,31\n", HEADER);

        let msg = message(read_stat_lines(data.as_bytes()).unwrap_err());

        assert!(msg.starts_with("line 2: expected 9 fields"), "{}", msg);
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(read_stat_lines(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let line = StatLine {
            player_id: 23,
            minutes: 38,
            points: 31,
            rebounds: 7,
            assists: 6,
            steals: 2,
            blocks: 1,
            turnovers: 3,
            fouls: 2,
        };

        let out = write_stat_lines(&[line]).unwrap();

        assert_eq!(out, format!("{}\n23,38,31,7,6,2,1,3,2\n", HEADER));
        assert_eq!(write_stat_lines(&[]).unwrap(), format!("{}\n", HEADER));
    }
}
