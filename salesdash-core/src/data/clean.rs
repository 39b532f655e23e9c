//! Row cleaning: coerce, drop incomplete rows, derive calendar fields.

use super::ingest::RawOrderRow;
use super::parse::{parse_decimal, parse_label, parse_order_date, parse_sales};
use crate::domain::OrderRecord;

/// Coerce one raw row into an order record.
///
/// Steps run in order: date (day-first), sales (separator strip), profit and
/// discount, then the required-field check. Any missing field drops the row;
/// `year`/`month` are derived only for surviving rows.
pub fn clean_row(raw: RawOrderRow<'_>) -> Option<OrderRecord> {
    let order_date = parse_order_date(raw.order_date);
    let sales = parse_sales(raw.sales);
    let profit = parse_decimal(raw.profit);
    let discount = parse_decimal(raw.discount);
    let region = parse_label(raw.region);
    let category = parse_label(raw.category);

    Some(OrderRecord::new(
        order_date?,
        sales?,
        profit?,
        discount?,
        region?,
        category?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw<'a>(
        order_date: &'a str,
        sales: &'a str,
        profit: &'a str,
        discount: &'a str,
        region: &'a str,
        category: &'a str,
    ) -> RawOrderRow<'a> {
        RawOrderRow {
            order_date,
            sales,
            profit,
            discount,
            region,
            category,
        }
    }

    #[test]
    fn complete_row_is_kept() {
        let rec = clean_row(raw("31-12-2014", "2,309.65", "762.18", "0.1", "Oceania", "Technology"))
            .unwrap();
        assert_eq!(rec.order_date, NaiveDate::from_ymd_opt(2014, 12, 31).unwrap());
        assert_eq!(rec.sales, 2309.65);
        assert_eq!(rec.profit, 762.18);
        assert_eq!(rec.discount, 0.1);
        assert_eq!(rec.region, "Oceania");
        assert_eq!(rec.category, "Technology");
        assert_eq!((rec.year, rec.month), (2014, 12));
    }

    #[test]
    fn any_missing_field_drops_the_row() {
        let good = ["2023-01-05", "100", "10", "0.0", "East", "Tech"];
        for i in 0..good.len() {
            let mut cells = good;
            cells[i] = "";
            let row = raw(cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]);
            assert!(clean_row(row).is_none(), "blank column {i} should drop the row");
        }
    }

    #[test]
    fn unparseable_values_drop_the_row() {
        assert!(clean_row(raw("soon", "100", "10", "0", "East", "Tech")).is_none());
        assert!(clean_row(raw("2023-01-05", "bad", "10", "0", "East", "Tech")).is_none());
        assert!(clean_row(raw("2023-01-05", "100", "ten", "0", "East", "Tech")).is_none());
        assert!(clean_row(raw("2023-01-05", "100", "10", "none%", "East", "Tech")).is_none());
    }

    #[test]
    fn profit_keeps_its_sign() {
        let rec = clean_row(raw("2023-01-05", "100", "-42.5", "0.5", "East", "Tech")).unwrap();
        assert_eq!(rec.profit, -42.5);
    }
}
