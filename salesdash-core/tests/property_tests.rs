//! Property tests for the cleaning and aggregation invariants.
//!
//! 1. Daily series sums to total sales
//! 2. Daily series is strictly ascending with no repeated dates
//! 3. "All"/"All" keeps every row
//! 4. Filtering is idempotent and only keeps matching rows
//! 5. Rows with an unparseable required field are dropped, never coerced

use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use proptest::prelude::*;
use salesdash_core::aggregate::{aggregate_metrics, sales_by_region, sales_over_time};
use salesdash_core::data::clean_reader;
use salesdash_core::{apply_filters, FilterSelection, OrderRecord, Selector};

const REGIONS: [&str; 4] = ["Central", "East", "South", "West"];
const CATEGORIES: [&str; 3] = ["Furniture", "Office Supplies", "Technology"];

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_record() -> impl Strategy<Value = OrderRecord> {
    (
        0i64..400,
        (0u32..1_000_000).prop_map(|c| c as f64 / 100.0),
        (-50_000i32..50_000).prop_map(|c| c as f64 / 100.0),
        (0u32..=80).prop_map(|d| d as f64 / 100.0),
        0usize..REGIONS.len(),
        0usize..CATEGORIES.len(),
    )
        .prop_map(|(day, sales, profit, discount, r, c)| {
            let date = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap() + chrono::Duration::days(day);
            OrderRecord::new(date, sales, profit, discount, REGIONS[r], CATEGORIES[c])
        })
}

fn arb_records() -> impl Strategy<Value = Vec<OrderRecord>> {
    prop::collection::vec(arb_record(), 0..200)
}

fn arb_selector(values: &'static [&'static str]) -> impl Strategy<Value = Selector> {
    prop_oneof![
        Just(Selector::All),
        (0..values.len()).prop_map(move |i| Selector::only(values[i])),
        Just(Selector::only("Nowhere")),
    ]
}

fn arb_selection() -> impl Strategy<Value = FilterSelection> {
    (arb_selector(&REGIONS), arb_selector(&CATEGORIES))
        .prop_map(|(region, category)| FilterSelection::new(region, category))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

// ── 1-2. Daily series ────────────────────────────────────────────────

proptest! {
    #[test]
    fn daily_series_sums_to_total(records in arb_records(), selection in arb_selection()) {
        let filtered = apply_filters(&records, &selection);
        let total = aggregate_metrics(&filtered).total_sales;
        let series_sum: f64 = sales_over_time(&filtered).iter().map(|(_, s)| s).sum();
        prop_assert!(close(total, series_sum), "total {total} vs series {series_sum}");
    }

    #[test]
    fn region_totals_sum_to_total(records in arb_records(), selection in arb_selection()) {
        let filtered = apply_filters(&records, &selection);
        let total = aggregate_metrics(&filtered).total_sales;
        let region_sum: f64 = sales_by_region(&filtered).values().sum();
        prop_assert!(close(total, region_sum));
    }

    #[test]
    fn daily_series_is_strictly_ascending(records in arb_records()) {
        let series = sales_over_time(&records);
        for pair in series.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0);
        }
    }
}

// ── 3-4. Filters ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn all_all_is_identity(records in arb_records()) {
        prop_assert_eq!(apply_filters(&records, &FilterSelection::all()), records);
    }

    #[test]
    fn filtering_is_idempotent(records in arb_records(), selection in arb_selection()) {
        let once = apply_filters(&records, &selection);
        let twice = apply_filters(&once, &selection);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|r| selection.matches(r)));
        prop_assert!(once.len() <= records.len());
    }
}

// ── 5. Cleaning ──────────────────────────────────────────────────────

fn arb_bad_date() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just("NA"),
        Just("not a date"),
        Just("31/02/2023"),
        Just("45/45/2023"),
    ]
}

proptest! {
    #[test]
    fn unparseable_rows_are_dropped(
        good in 0usize..20,
        bad in prop::collection::vec(arb_bad_date(), 0..20),
    ) {
        let mut csv = String::from("order_date,sales,profit,discount,region,category\n");
        for i in 0..good {
            csv.push_str(&format!("{:02}/03/2023,\"1,0{i:02}\",1,0.1,East,Tech\n", i % 28 + 1));
        }
        for raw in &bad {
            csv.push_str(&format!("{raw},10,1,0.1,East,Tech\n"));
        }

        let table = clean_reader(Path::new("generated.csv"), Cursor::new(csv)).unwrap();
        prop_assert_eq!(table.stats().rows_read, good + bad.len());
        prop_assert_eq!(table.len(), good);
        prop_assert!(table.records().iter().all(|r| r.sales >= 1000.0));
    }
}
