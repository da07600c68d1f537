//! CSV loading into an immutable [`Dataset`].

use std::io::Read;
use std::path::Path;

use budget_core::{CampaignRecord, Dataset, PlannerError, PlannerResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::headers::ColumnMap;
use crate::numeric::{parse_cost, parse_impressions};

/// What happened while reading the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub retained_rows: usize,
    /// Rows whose cost or impressions could not be parsed, or that the CSV
    /// reader rejected.
    pub dropped_unparsable: usize,
    /// Rows with parsed but non-positive cost or impressions.
    pub dropped_non_positive: usize,
    pub has_country_column: bool,
}

enum RowOutcome {
    Kept(CampaignRecord),
    Unparsable,
    NonPositive,
}

/// Reads campaign CSVs. Every campaign status is kept; status filtering is
/// left to the caller (see [`Dataset::retain_statuses`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetLoader;

impl DatasetLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a dataset from a file on disk.
    pub fn load_path(&self, path: &Path) -> PlannerResult<(Dataset, LoadReport)> {
        let display = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| PlannerError::load(&display, e))?;
        let (dataset, report) = self.load_reader(file, &display)?;
        Ok((dataset.with_source(path), report))
    }

    /// Load a dataset from any reader. `origin` names the source in errors.
    pub fn load_reader<R: Read>(
        &self,
        reader: R,
        origin: &str,
    ) -> PlannerResult<(Dataset, LoadReport)> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| PlannerError::load(origin, e))?
            .clone();
        if headers.is_empty() {
            return Err(PlannerError::load(origin, "source has no header row"));
        }
        let columns = ColumnMap::from_headers(headers.iter())?;
        debug!(origin = origin, ?columns, "Header mapped");

        let mut report = LoadReport {
            has_country_column: columns.has_country(),
            ..LoadReport::default()
        };
        let mut records = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            report.total_rows += 1;
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    if e.is_io_error() {
                        return Err(PlannerError::load(origin, e));
                    }
                    warn!(origin = origin, line = line + 2, error = %e, "Skipping malformed row");
                    report.dropped_unparsable += 1;
                    continue;
                }
            };

            match parse_row(&row, &columns) {
                RowOutcome::Kept(record) => records.push(record),
                RowOutcome::Unparsable => report.dropped_unparsable += 1,
                RowOutcome::NonPositive => report.dropped_non_positive += 1,
            }
        }
        report.retained_rows = records.len();

        metrics::counter!("ingest.rows.total").increment(report.total_rows as u64);
        metrics::counter!("ingest.rows.retained").increment(report.retained_rows as u64);
        metrics::counter!("ingest.rows.dropped", "reason" => "unparsable")
            .increment(report.dropped_unparsable as u64);
        metrics::counter!("ingest.rows.dropped", "reason" => "non_positive")
            .increment(report.dropped_non_positive as u64);

        info!(
            origin = origin,
            total = report.total_rows,
            retained = report.retained_rows,
            unparsable = report.dropped_unparsable,
            non_positive = report.dropped_non_positive,
            country_column = report.has_country_column,
            "Campaign data loaded"
        );

        Ok((Dataset::new(records, report.has_country_column), report))
    }
}

fn cell<'r>(row: &'r StringRecord, idx: usize) -> &'r str {
    row.get(idx).unwrap_or("")
}

fn parse_row(row: &StringRecord, columns: &ColumnMap) -> RowOutcome {
    let (Some(cost), Some(impressions)) = (
        parse_cost(cell(row, columns.cost)),
        parse_impressions(cell(row, columns.impressions)),
    ) else {
        return RowOutcome::Unparsable;
    };
    if cost <= 0.0 || impressions == 0 {
        return RowOutcome::NonPositive;
    }

    let country = columns
        .country
        .map(|idx| cell(row, idx))
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    RowOutcome::Kept(CampaignRecord {
        status: cell(row, columns.status).to_string(),
        platform: cell(row, columns.platform).to_string(),
        campaign_type: cell(row, columns.campaign_type).to_string(),
        cost,
        impressions,
        country,
    })
}
