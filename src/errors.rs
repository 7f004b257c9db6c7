use thiserror::Error;

/// Errors that can occur while loading and transforming the hourly source data.
///
/// A failed load publishes no partial dataset; the caller decides whether to
/// retry by invoking the load again.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("could not read the source data: {0}")]
    Read(#[from] csv::Error),
    #[error("the source contained a header row but no data rows")]
    EmptyDataset,
    #[error("the source header is missing the required column `{0}`")]
    MissingColumn(String),
    #[error("no building columns (of the form `b_<N>_<field>`) were found in the header")]
    NoBuildings,
    #[error("row {row}: field `{column}` is missing or non-numeric")]
    MissingField { row: usize, column: String },
}
