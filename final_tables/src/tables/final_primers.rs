//! Table 4.4: the top-ranked primer pairs in dissertation layout.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use crate::data_handling::primer_pairs::PrimerPairsDataset;
use crate::helper_functions::{dataframe_to_csv, project_root};
use crate::models::Dataset;

const INPUT_FILE: &str = "primer_pairs_with_copy_numbers.csv";
const OUTPUT_FILE: &str = "../../week9_tables/table_4_4_final_primers.csv";
const TOP_N: usize = 5;

const SEQUENCE_ID: &str = "sequence_id";
const RANK: &str = "rank";
const TARGET_ID: &str = "target_id";

/// Everything from the first `_len` to the end of a sequence id is length
/// bookkeeping, not part of the target name.
const LENGTH_SUFFIX: &str = r"_len.*";

/// Source column and display label, in output order.
pub const TABLE_4_4_COLUMNS: [(&str, &str); 10] = [
    ("rank", "Rank"),
    ("target_id", "Target ID"),
    ("repeat_family", "Repeat Family"),
    ("amplicon_length", "Amplicon (bp)"),
    ("expected_copy_number", "Expected Copy Number"),
    ("forward_primer", "Forward Primer"),
    ("reverse_primer", "Reverse Primer"),
    ("dimer_risk", "Dimer Risk"),
    ("final_score", "Final Score"),
    ("sensitivity_rank", "Sensitivity Rank"),
];

#[derive(Debug, Clone)]
pub struct FinalTableConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub top_n: usize,
    pub columns: &'static [(&'static str, &'static str)],
}

impl FinalTableConfig {
    /// Table 4.4 with its input and output resolved against `root`.
    pub fn table_4_4(root: &Path) -> Self {
        FinalTableConfig {
            input: root.join(INPUT_FILE),
            output: root.join(OUTPUT_FILE),
            top_n: TOP_N,
            columns: &TABLE_4_4_COLUMNS,
        }
    }
}

impl Default for FinalTableConfig {
    fn default() -> Self {
        FinalTableConfig::table_4_4(&project_root())
    }
}

/// Loads the primer pairs, builds the final table and saves it.
/// Returns the saved table so the caller can print it.
pub fn create_final_table(config: &FinalTableConfig) -> PolarsResult<DataFrame> {
    let primers = PrimerPairsDataset {
        path: config.input.clone(),
    }
    .load()?;

    let mut table = build_final_table(&primers, config)?;
    dataframe_to_csv(&mut table, &config.output)?;
    Ok(table)
}

pub fn build_final_table(
    primers: &DataFrame,
    config: &FinalTableConfig,
) -> PolarsResult<DataFrame> {
    let mut top = primers.head(Some(config.top_n));
    info!("Keeping top {} of {} primer pairs", top.height(), primers.height());

    add_rank(&mut top)?;
    let top = add_target_id(top)?;
    let table = to_display_columns(&top, config.columns)?;

    debug!("Final table shape: {:?}", table.shape());
    Ok(table)
}

/// Adds `rank` = 1..=height in current row order.
fn add_rank(df: &mut DataFrame) -> PolarsResult<()> {
    let ranks: Vec<i64> = (1..=df.height() as i64).collect();
    df.with_column(Series::new(RANK.into(), ranks))?;
    Ok(())
}

/// Adds `target_id`: the sequence id with its length suffix removed.
fn add_target_id(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .with_column(
            col(SEQUENCE_ID)
                .cast(DataType::String)
                .str()
                .replace(lit(LENGTH_SUFFIX), lit(""), false) // false => pattern is a regex
                .alias(TARGET_ID),
        )
        .collect()
}

/// Projects onto the source columns in order, then swaps in the display labels.
fn to_display_columns(df: &DataFrame, columns: &[(&str, &str)]) -> PolarsResult<DataFrame> {
    let mut out = df.select(columns.iter().map(|&(source, _)| source))?;
    for &(source, label) in columns {
        out.rename(source, label.into())?;
    }
    Ok(out)
}
