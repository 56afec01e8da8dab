//! Integration tests for the full batch pipeline.
//!
//! Tests: report files → loaders → RestockJob → sink
//!
//! Verifies:
//! - Failures name the source that could not be read
//! - Nothing is written for failed or empty runs
//! - Output is byte-identical across runs

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use replen_restock::RestockConfig;

    use crate::config::RunConfig;
    use crate::pipeline::{RunError, run_restock, summarize_listings};
    use crate::sink::{CsvRecommendationSink, InMemoryRecommendationSink, SinkOutcome};
    use crate::source::{SourceError, SourceKind};

    const SALES: &str = "order-id,purchase-date,sku,quantity,order-status\n\
        111-1,2024-01-01 08:10:00 PST,SKU1,10,Shipped\n\
        111-2,2024-01-02 09:00:00 PST,SKU1,5,Shipped\n\
        111-3,2024-01-02 09:30:00 PST,SKU2,2,Shipped\n\
        111-4,2024-01-05 12:00:00 PST,SKU2,2,Shipped\n\
        111-5,2024-01-05 12:00:00 PST,SKU3,abc,Shipped\n\
        111-6,2024-01-06,SKU4,1,Shipped\n";

    const INVENTORY: &str = "sku,available\n\
        SKU1,10\n\
        SKU2,500\n\
        SKU5,0\n";

    fn write_reports(root: &Path) -> RunConfig {
        let config = RunConfig::rooted_at(root);
        fs::create_dir_all(config.sales_path.parent().unwrap()).unwrap();
        fs::create_dir_all(config.inventory_path.parent().unwrap()).unwrap();
        fs::write(&config.sales_path, SALES).unwrap();
        fs::write(&config.inventory_path, INVENTORY).unwrap();
        config
    }

    #[test]
    fn end_to_end_writes_sorted_recommendations() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_reports(dir.path());
        let sink = CsvRecommendationSink::new(&config.output_path);

        let report = run_restock(&config, &sink).unwrap();

        // SKU2: 2 units/day, 500 on hand -> 250 days, not flagged.
        // SKU4: sold, not stocked -> 0 days.  SKU5: stocked, never sold.
        assert_eq!(report.plan.skus_evaluated, 3);
        let skus: Vec<&str> = report
            .plan
            .recommendations
            .iter()
            .map(|r| r.sku.as_str())
            .collect();
        assert_eq!(skus, vec!["SKU1", "SKU4"]);
        assert_eq!(report.sales.rows_rejected, 1);
        assert_eq!(report.inventory.rows_accepted, 3);

        let written = fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(
            written,
            "sku,avg_daily_sales,current_inventory,days_of_supply,restock_needed_in_days,recommendation\n\
             SKU1,7.5,10,1.33,28,Restock recommended. 1 days of supply remaining.\n\
             SKU4,1.0,0,0.0,30,Restock recommended. 0 days of supply remaining.\n"
        );
    }

    #[test]
    fn rerun_produces_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_reports(dir.path());
        let sink = CsvRecommendationSink::new(&config.output_path);

        run_restock(&config, &sink).unwrap();
        let first = fs::read(&config.output_path).unwrap();
        run_restock(&config, &sink).unwrap();
        let second = fs::read(&config.output_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_inventory_fails_naming_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_reports(dir.path());
        fs::remove_file(&config.inventory_path).unwrap();
        let sink = CsvRecommendationSink::new(&config.output_path);

        let err = run_restock(&config, &sink).unwrap_err();
        match &err {
            RunError::Source(e) => assert_eq!(e.kind(), SourceKind::Inventory),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("inventory source unavailable"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn sales_with_no_valid_rows_fails_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_reports(dir.path());
        fs::write(&config.sales_path, "sku,quantity,purchase-date\nSKU1,0,2024-01-01\n").unwrap();

        let err = run_restock(&config, &InMemoryRecommendationSink::new()).unwrap_err();
        assert!(matches!(
            err,
            RunError::Source(SourceError::Empty {
                kind: SourceKind::Sales,
                ..
            })
        ));
    }

    #[test]
    fn nothing_flagged_means_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_reports(dir.path());
        fs::write(&config.inventory_path, "sku,available\nSKU1,1000\nSKU4,1000\n").unwrap();
        let sink = CsvRecommendationSink::new(&config.output_path);

        let report = run_restock(&config, &sink).unwrap();
        assert_eq!(report.outcome, SinkOutcome::NothingToWrite);
        assert!(report.plan.is_empty());
        assert!(!config.output_path.exists());
    }

    #[test]
    fn higher_threshold_flags_a_superset() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_reports(dir.path());

        let narrow = run_restock(&config, &InMemoryRecommendationSink::new()).unwrap();
        let wide_config = config.clone().with_restock(RestockConfig::with_threshold_days(365));
        let wide = run_restock(&wide_config, &InMemoryRecommendationSink::new()).unwrap();

        for rec in &narrow.plan.recommendations {
            assert!(wide.plan.recommendations.iter().any(|w| w.sku == rec.sku));
        }
        assert_eq!(wide.plan.len(), 3);
    }

    #[test]
    fn listing_summary_reads_tab_delimited_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all-listing-report.tsv");
        fs::write(
            &path,
            "item-name\tseller-sku\tprice\topen-date\tstatus\n\
             Kids GPS Tracker\tSKU1\t24.99\t2023-01-10 10:00:00 PST\tActive\n\
             Vehicle OBD Tracker\tSKU2\t1,049.50\t2022-06-01 09:00:00 PDT\tInactive\n",
        )
        .unwrap();

        let summary = summarize_listings(&path).unwrap();
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.price.max, 1049.5);
        assert_eq!(summary.status_counts.len(), 2);
        assert_eq!(
            summary.open_date_range.map(|r| r.earliest),
            Some("2022-06-01 09:00:00 PDT".to_string())
        );
    }

    #[test]
    fn empty_listing_report_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all-listing-report.tsv");
        fs::write(&path, "item-name\tprice\n").unwrap();
        assert!(matches!(summarize_listings(&path), Err(RunError::Listing(_))));
    }
}
