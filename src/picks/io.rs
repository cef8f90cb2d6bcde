//! CSV pick files: `time,distance,phase`, one pick per row.

use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tempfile::NamedTempFile;

use super::{PersistenceError, Pick, PickStatus};
use crate::phases::PhaseRegistry;
use crate::timefmt::{format_timestamp, parse_timestamp};

const TIME_COLUMN: &str = "time";
const DISTANCE_COLUMN: &str = "distance";
const PHASE_COLUMN: &str = "phase";

/// Persisted form of a pick; the status is display state and never written
#[derive(Debug, Serialize)]
struct PickRow<'a> {
    time: String,
    distance: f64,
    phase: &'a str,
}

/// Write `picks` sorted by time.
///
/// Rows go to a temporary file next to `path` which then replaces it, so a
/// failure never leaves a truncated pick file behind.
pub(crate) fn write_picks(path: &Path, picks: &[Pick]) -> Result<(), PersistenceError> {
    let mut sorted: Vec<&Pick> = picks.iter().collect();
    sorted.sort_by_key(|p| p.time);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(PersistenceError::io(dir))?;
    let temp_path = temp.path().to_path_buf();
    {
        let mut writer = csv::Writer::from_writer(temp.as_file_mut());
        for pick in sorted {
            writer.serialize(PickRow {
                time: format_timestamp(&pick.time),
                distance: pick.distance,
                phase: &pick.phase,
            })?;
        }
        if picks.is_empty() {
            writer.write_record([TIME_COLUMN, DISTANCE_COLUMN, PHASE_COLUMN])?;
        }
        writer.flush().map_err(PersistenceError::io(&temp_path))?;
    }
    temp.as_file()
        .sync_all()
        .map_err(PersistenceError::io(&temp_path))?;
    temp.persist(path)
        .map_err(|e| PersistenceError::io(path)(e.error))?;
    Ok(())
}

/// Parse every row of a pick file; the first bad row fails the whole read.
///
/// Loaded picks are inactive. Columns are found by header name, extra
/// columns are ignored.
pub(crate) fn read_picks(path: &Path, phases: &PhaseRegistry) -> Result<Vec<Pick>, PersistenceError> {
    let file = File::open(path).map_err(PersistenceError::io(path))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(PersistenceError::MissingColumn(name))
    };
    let time_col = column(TIME_COLUMN)?;
    let distance_col = column(DISTANCE_COLUMN)?;
    let phase_col = column(PHASE_COLUMN)?;

    let mut picks = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(index as u64 + 2, |position| position.line());
        let cell = |col: usize| record.get(col).unwrap_or_default();

        let time_text = cell(time_col);
        let time = parse_timestamp(time_text).ok_or_else(|| PersistenceError::InvalidTime {
            line,
            text: time_text.to_string(),
        })?;

        let distance_text = cell(distance_col);
        let distance = distance_text
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .ok_or_else(|| PersistenceError::InvalidDistance {
                line,
                text: distance_text.to_string(),
            })?;

        let phase = cell(phase_col);
        if !phases.contains(phase) {
            return Err(PersistenceError::UnknownPhase {
                line,
                label: phase.to_string(),
            });
        }

        picks.push(Pick {
            time,
            distance,
            phase: phase.to_string(),
            status: PickStatus::Inactive,
        });
    }
    Ok(picks)
}
