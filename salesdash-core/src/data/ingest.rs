//! CSV ingest: header validation and raw row access.
//!
//! Rows are handed out as borrowed string slices; nothing is coerced here.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::DataError;

/// Columns the source file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["order_date", "sales", "profit", "discount", "region", "category"];

/// One source row, uncoerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOrderRow<'a> {
    pub order_date: &'a str,
    pub sales: &'a str,
    pub profit: &'a str,
    pub discount: &'a str,
    pub region: &'a str,
    pub category: &'a str,
}

/// Positions of the required columns in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    order_date: usize,
    sales: usize,
    profit: usize,
    discount: usize,
    region: usize,
    category: usize,
}

impl ColumnIndex {
    /// Locate the required columns. Header names are compared after trimming.
    pub fn from_headers(headers: &StringRecord, source: &Path) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn {
                    column: name.to_string(),
                    path: source.to_path_buf(),
                })
        };

        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find(name)?;
        }
        let [order_date, sales, profit, discount, region, category] = positions;

        Ok(Self {
            order_date,
            sales,
            profit,
            discount,
            region,
            category,
        })
    }

    /// View a record through the index. Short rows read as empty cells.
    pub fn row<'a>(&self, record: &'a StringRecord) -> RawOrderRow<'a> {
        let cell = |i: usize| record.get(i).unwrap_or("");
        RawOrderRow {
            order_date: cell(self.order_date),
            sales: cell(self.sales),
            profit: cell(self.profit),
            discount: cell(self.discount),
            region: cell(self.region),
            category: cell(self.category),
        }
    }
}

/// Stream every data row of a CSV source through `visit`.
///
/// Returns the number of rows read. Any CSV or encoding error aborts the whole
/// read; there is no partial result.
pub fn read_rows<R, F>(source: &Path, reader: R, mut visit: F) -> Result<usize, DataError>
where
    R: Read,
    F: FnMut(RawOrderRow<'_>),
{
    let csv_err = |e: csv::Error| DataError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let columns = ColumnIndex::from_headers(&headers, source)?;

    let mut record = StringRecord::new();
    let mut count = 0usize;
    while rdr.read_record(&mut record).map_err(csv_err)? {
        visit(columns.row(&record));
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(csv: &str) -> Result<Vec<Vec<String>>, DataError> {
        let mut rows = Vec::new();
        read_rows(Path::new("inline.csv"), csv.as_bytes(), |row| {
            rows.push(vec![
                row.order_date.to_string(),
                row.sales.to_string(),
                row.profit.to_string(),
                row.discount.to_string(),
                row.region.to_string(),
                row.category.to_string(),
            ]);
        })?;
        Ok(rows)
    }

    #[test]
    fn columns_are_found_by_name_in_any_order() {
        let csv = "category,row_id,region,discount,profit,sales,order_date\n\
                   Tech,1,East,0.1,100,\"1,200\",05-01-2023\n";
        let rows = collect(csv).unwrap();
        assert_eq!(
            rows,
            vec![vec!["05-01-2023", "1,200", "100", "0.1", "East", "Tech"]]
        );
    }

    #[test]
    fn header_names_are_trimmed() {
        let csv = " order_date , sales,profit,discount,region,category\n\
                   2023-01-05,10,1,0,East,Tech\n";
        assert_eq!(collect(csv).unwrap().len(), 1);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "order_date,sales,profit,region,category\n2023-01-05,10,1,East,Tech\n";
        match collect(csv) {
            Err(DataError::MissingColumn { column, .. }) => assert_eq!(column, "discount"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn every_required_column_is_checked() {
        for missing in REQUIRED_COLUMNS {
            let header: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|c| *c != missing)
                .collect();
            let csv = format!("{}\n", header.join(","));
            match collect(&csv) {
                Err(DataError::MissingColumn { column, .. }) => assert_eq!(column, missing),
                other => panic!("expected MissingColumn for {missing}, got {other:?}"),
            }
        }
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let csv = "order_date,sales,profit,discount,region,category\n2023-01-05,10,1\n";
        let rows = collect(csv).unwrap();
        assert_eq!(rows[0][3], "");
        assert_eq!(rows[0][5], "");
    }

    #[test]
    fn row_count_is_reported() {
        let csv = "order_date,sales,profit,discount,region,category\n\
                   2023-01-05,10,1,0,East,Tech\n\
                   2023-01-06,bad,1,0,East,Tech\n";
        let n = read_rows(Path::new("inline.csv"), csv.as_bytes(), |_| {}).unwrap();
        assert_eq!(n, 2);
    }
}
