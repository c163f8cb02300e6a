use std::io::Write;

use polars::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::helper_functions::to_plain_string;
use crate::tables::final_primers::{create_final_table, FinalTableConfig};

mod data_handling;
mod helper_functions;
mod models;
mod tables;

fn main() -> PolarsResult<()> {
    // Logs go to stderr so stdout carries only the table
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = FinalTableConfig::default();
    info!("Input : {}", config.input.display());
    info!("Output: {}", config.output.display());

    report(&config, &mut std::io::stdout().lock())
}

/// Builds and saves the table, narrating progress and echoing the result to `out`.
fn report<W: Write>(config: &FinalTableConfig, out: &mut W) -> PolarsResult<()> {
    writeln!(out, "creating TABLE 4.4")?;

    let table_4_4 = create_final_table(config)?;

    writeln!(out, "table 4.4 created")?;
    write!(out, "{}", to_plain_string(&table_4_4)?)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn stdout_has_banners_then_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = FinalTableConfig::table_4_4(&dir.path().join("week9").join("primers"));
        fs::create_dir_all(dir.path().join("week9").join("primers")).unwrap();
        fs::create_dir(dir.path().join("week9_tables")).unwrap();
        fs::write(
            &config.input,
            "sequence_id,repeat_family,amplicon_length,expected_copy_number,forward_primer,\
             reverse_primer,dimer_risk,final_score,sensitivity_rank\n\
             ALU_chr1_len300,ALU,150,1000000,ACGT...,TGCA...,low,0.95,1\n",
        )
        .unwrap();

        let mut out = Vec::new();
        report(&config, &mut out).unwrap();

        let header = "Rank Target ID Repeat Family Amplicon (bp) Expected Copy Number \
                      Forward Primer Reverse Primer Dimer Risk Final Score Sensitivity Rank";
        let values = [
            "1", "ALU_chr1", "ALU", "150", "1000000", "ACGT...", "TGCA...", "low", "0.95", "1",
        ];
        let widths: [usize; 10] = [4, 9, 13, 13, 20, 14, 14, 10, 11, 16];
        let row = values
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{value:>width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        let expected = format!("creating TABLE 4.4\ntable 4.4 created\n{header}\n{row}\n");
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert!(config.output.exists());
    }

    #[test]
    fn failed_build_stops_after_first_banner() {
        let dir = tempfile::tempdir().unwrap();
        let config = FinalTableConfig::table_4_4(dir.path());

        let mut out = Vec::new();
        assert!(report(&config, &mut out).is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "creating TABLE 4.4\n");
    }
}
