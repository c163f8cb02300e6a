use std::path::PathBuf;

use polars::prelude::*;
use tracing::{debug, error, info};

use crate::helper_functions::read_csv;
use crate::models::Dataset;

/// Scored primer pairs with their expected copy numbers, one pair per row,
/// already ordered best-first.
pub struct PrimerPairsDataset {
    pub(crate) path: PathBuf,
}

impl Dataset for PrimerPairsDataset {
    fn load(&self) -> PolarsResult<DataFrame> {
        info!("Reading primer pairs from {}", self.path.display());
        let df = match read_csv(&self.path) {
            Ok(df) => df,
            Err(e) => {
                error!("Failed to read primer pair CSV: {}", e);
                return Err(e);
            }
        };

        info!("Loaded {} primer pairs", df.height());
        debug!("Columns: {:?}", df.get_column_names());
        Ok(df)
    }
}
