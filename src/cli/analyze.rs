//! Analyze command implementation

use crate::config::{AnalysisConfig, Config};
use crate::economics::MetricsRecord;
use crate::pipeline::{AnalysisOutcome, AnalysisReport, Pipeline};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::PathBuf;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File with pasted marketplace text (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Override the minimum declared ROI for this run
    #[arg(long)]
    pub min_return: Option<Decimal>,

    /// Override the maximum number of results for this run
    #[arg(long)]
    pub max_results: Option<usize>,
}

impl AnalyzeArgs {
    /// Thresholds for this run: config values with CLI overrides applied
    pub fn analysis_config(&self, base: &AnalysisConfig) -> AnalysisConfig {
        AnalysisConfig {
            min_declared_return: self.min_return.unwrap_or(base.min_declared_return),
            max_results: self.max_results.unwrap_or(base.max_results),
            ..base.clone()
        }
    }

    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let analysis = self.analysis_config(&config.analysis);
        analysis.validate()?;

        let text = match &self.input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        tracing::info!(length = text.len(), "Analyzing text");

        let pipeline = Pipeline::from_config(config)?;
        let report = pipeline.report(&text, &analysis);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print!("{}", render_table(&report)),
        }
        Ok(())
    }
}

/// Plain-text report
pub fn render_table(report: &AnalysisReport) -> String {
    let mut out = format!(
        "Hashrate scout analysis - {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    match &report.outcome {
        AnalysisOutcome::NoListings { .. } => {
            out.push_str("No listings found. Paste the text copied from the marketplace.\n");
        }
        AnalysisOutcome::NoOpportunities { analyzed, .. } => {
            out.push_str(&format!(
                "{} listings analyzed, no opportunities with the current thresholds.\n",
                analyzed
            ));
        }
        AnalysisOutcome::Opportunities {
            analyzed, ranked, ..
        } => {
            out.push_str(&format!(
                "{} listings analyzed, {} opportunities\n\n",
                analyzed,
                ranked.len()
            ));
            for (i, metrics) in ranked.iter().enumerate() {
                out.push_str(&render_row(i + 1, metrics));
            }
        }
    }

    out
}

fn render_row(rank: usize, m: &MetricsRecord) -> String {
    let tier = m.tier();
    let listing = &m.listing;
    let mut row = format!(
        "{}. #{} {} TH @ {} W/TH - ${} (${}/TH)\n   normalized ${}/TH vs primary ${}/TH: {}% [{}{}]\n",
        rank,
        listing.id,
        listing.capacity_units.round_dp(2),
        listing.efficiency_per_unit.round_dp(2),
        listing.price_total.round_dp(2),
        listing.price_per_unit.round_dp(2),
        m.normalized_price_per_unit.round_dp(2),
        m.reference_price_per_unit.round_dp(2),
        m.discount_pct.round_dp(2),
        "*".repeat(tier.stars() as usize),
        if tier.stars() > 0 {
            format!(" {}", tier.label())
        } else {
            tier.label().to_string()
        }
    );
    if m.normalization_cost > Decimal::ZERO {
        row.push_str(&format!(
            "   upgrade to 15 W/TH: ${}\n",
            m.normalization_cost.round_dp(2)
        ));
    }
    if let Some(roi) = listing.declared_return_pct {
        row.push_str(&format!("   declared ROI: {}%\n", roi.round_dp(2)));
    }
    row
}
