//! End-to-end analysis tests

use hashrate_scout::config::AnalysisConfig;
use hashrate_scout::{AnalysisOutcome, Extractor, Pipeline, PriceSchedule};
use rust_decimal_macros::dec;

fn pipeline() -> Pipeline<PriceSchedule> {
    Pipeline::default()
}

/// Marketplace paste with three miners, one broken card and UI noise
const MARKETPLACE_PASTE: &str = "\
Marketplace

Miner #7128
177 TH
28 W/TH
$1,366.59
$7.72 / TH
ROI
27.43%

Miner #5521
512 TH
15 W/TH
$8,448.00
$16.50 / TH
ROI
31.10%

Miner #9001
40 TH
16 W/TH
$900.00
$22.50 / TH

Miner #4410
64 TH
$1,100.00

Miner #3300
260 TH
18 W/TH
$3,900.00
$15.00 / TH
ROI
12.00%
";

#[test]
fn test_extracts_marketplace_paste() {
    let report = Extractor::new().extract_with_report(MARKETPLACE_PASTE);

    let ids: Vec<_> = report.listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["7128", "5521", "9001", "3300"]);
    // "Marketplace" header and the card without efficiency
    assert_eq!(report.skipped_count(), 2);

    let first = &report.listings[0];
    assert_eq!(first.capacity_units, dec!(177));
    assert_eq!(first.price_total, dec!(1366.59));
    assert_eq!(first.declared_return_pct, Some(dec!(27.43)));
    assert_eq!(report.listings[2].declared_return_pct, None);
}

#[test]
fn test_ranks_marketplace_paste() {
    let outcome = pipeline().run(MARKETPLACE_PASTE, &AnalysisConfig::default());

    // #5521: 16.50 vs ~19.63 primary
    // #7128: (1366.59 + 177 * 17.94) / 177 = 25.66, above primary
    // #9001: (900 + 40 * 1.14) / 40 = 23.64, above primary
    // #3300: discounted but declares only 12% ROI
    let AnalysisOutcome::Opportunities {
        analyzed,
        skipped,
        ranked,
    } = outcome
    else {
        panic!("expected opportunities");
    };

    assert_eq!(analyzed, 4);
    assert_eq!(skipped, 2);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].listing.id, "5521");
    assert!(ranked[0].discount_pct < dec!(-15));
}

#[test]
fn test_lower_return_threshold_admits_more() {
    let config = AnalysisConfig {
        min_declared_return: dec!(10),
        ..Default::default()
    };
    let outcome = pipeline().run(MARKETPLACE_PASTE, &config);

    let ids: Vec<_> = outcome
        .opportunities()
        .iter()
        .map(|m| m.listing.id.as_str())
        .collect();
    // #3300: (3900 + 260 * 3.42) / 260 = 18.42 vs ~20.02 primary
    assert_eq!(ids, vec!["5521", "3300"]);
}

#[test]
fn test_max_results_truncates() {
    let config = AnalysisConfig {
        min_declared_return: dec!(10),
        max_results: 1,
        ..Default::default()
    };
    let outcome = pipeline().run(MARKETPLACE_PASTE, &config);
    assert_eq!(outcome.opportunities().len(), 1);
    assert_eq!(outcome.opportunities()[0].listing.id, "5521");
}

#[test]
fn test_whitespace_only_paste() {
    let outcome = pipeline().run(" \n\n\t\n ", &AnalysisConfig::default());
    assert!(matches!(outcome, AnalysisOutcome::NoListings { skipped: 0 }));
}
