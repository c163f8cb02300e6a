use std::error::Error;

use polars::prelude::*;

/// A tabular input the pipeline knows how to load.
pub trait Dataset {
    fn load(&self) -> PolarsResult<DataFrame>;
}

/// Wraps a non-polars error so it can travel through `PolarsResult`.
pub fn polars_err(e: Box<dyn Error>) -> PolarsError {
    PolarsError::ComputeError(e.to_string().into())
}
