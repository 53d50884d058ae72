//! CSV export of the filtered catalog.
//!
//! The exporter only produces a payload and a filename. Saving the file
//! (browser download, disk write, upload) belongs to whoever consumes it.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::ProductRecord;

/// MIME type of the exported payload.
pub const CSV_MIME_TYPE: &str = "text/csv; charset=utf-8";

/// Fixed column order of the export.
pub const COLUMNS: [&str; 9] = [
    "S.No",
    "Part Code",
    "Product Name",
    "Description",
    "Category",
    "Sub Category",
    "Price",
    "Stock",
    "Image URLs",
];

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The filtered sequence was empty; no file is produced.
    #[error("no products to export")]
    NothingToExport,

    #[error("failed to serialize export: {0}")]
    Serialization(String),
}

/// How an embedded `"` is escaped inside a quoted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteEscape {
    /// `\"`
    #[default]
    Backslash,
    /// `""` (RFC 4180)
    Doubled,
}

/// Whether a search narrowed the exported set. Picks the filename variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    All,
    Filtered,
}

impl ExportScope {
    /// `Filtered` for any non-empty raw query string.
    pub fn from_query(query: &str) -> Self {
        if query.is_empty() {
            Self::All
        } else {
            Self::Filtered
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Filtered => "Filtered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Prefix of the Price column, e.g. `₹`.
    pub currency_symbol: String,
    /// chrono strftime pattern for the date in the filename.
    pub date_format: String,
    pub quote_escape: QuoteEscape,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            date_format: "%-d-%-m-%Y".to_string(),
            quote_escape: QuoteEscape::default(),
        }
    }
}

impl ExportOptions {
    /// Check that `date_format` renders; chrono only reports bad patterns
    /// when formatting.
    pub fn validate(&self) -> Result<(), ExportError> {
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        format_date(sample, &self.date_format).map(|_| ())
    }
}

/// A ready-to-save export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
    /// Data rows, header excluded.
    pub row_count: usize,
}

impl ExportPayload {
    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }
}

/// Serializes a filtered record sequence to CSV.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    options: ExportOptions,
}

impl CsvExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// `Products_Export_{All|Filtered}_{date}.csv`
    pub fn filename(&self, scope: ExportScope, date: NaiveDate) -> Result<String, ExportError> {
        let date = format_date(date, &self.options.date_format)?;
        Ok(format!("Products_Export_{}_{}.csv", scope.label(), date))
    }

    /// Export `records` (the currently filtered sequence, in order).
    ///
    /// The header row is written bare; every data field is quoted. Rows are
    /// joined by `\n` without a trailing newline.
    pub fn export<'a, I>(
        &self,
        records: I,
        scope: ExportScope,
        date: NaiveDate,
    ) -> Result<ExportPayload, ExportError>
    where
        I: IntoIterator<Item = &'a ProductRecord>,
    {
        let rows: Vec<[String; 9]> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.row(index + 1, record))
            .collect();

        if rows.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let filename = self.filename(scope, date)?;

        let mut header = COLUMNS.join(",").into_bytes();
        header.push(b'\n');

        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .double_quote(self.options.quote_escape == QuoteEscape::Doubled)
            .escape(b'\\')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(header);

        for row in &rows {
            writer
                .write_record(row)
                .map_err(|e| ExportError::Serialization(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        let mut body =
            String::from_utf8(bytes).map_err(|e| ExportError::Serialization(e.to_string()))?;
        if body.ends_with('\n') {
            body.pop();
        }

        Ok(ExportPayload {
            filename,
            mime_type: CSV_MIME_TYPE,
            body,
            row_count: rows.len(),
        })
    }

    fn row(&self, serial: usize, record: &ProductRecord) -> [String; 9] {
        [
            serial.to_string(),
            text_or_na(record.sku.as_deref()),
            text_or_na(Some(record.name.as_str())),
            text_or_na(Some(record.description.as_str())),
            text_or_na(record.category.as_deref()),
            text_or_na(record.sub_category.as_deref()),
            record
                .price()
                .map(|price| price.with_symbol(&self.options.currency_symbol))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            record
                .stock
                .map(|stock| stock.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            match record.images.as_deref() {
                Some(images) if !images.is_empty() => images.join(", "),
                _ => NOT_AVAILABLE.to_string(),
            },
        ]
    }
}

fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn format_date(date: NaiveDate, pattern: &str) -> Result<String, ExportError> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| ExportError::Serialization(format!("invalid date format {pattern:?}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn coil() -> ProductRecord {
        ProductRecord::new("1", "Copper Coil", "Heavy gauge")
            .with_sku("CU-200")
            .with_category("Coils")
            .with_sub_category("Copper")
            .with_price(1250.0)
            .with_stock(12.0)
            .with_images(["a.png", "b.png"])
    }

    #[test]
    fn exports_header_and_quoted_rows() {
        let exporter = CsvExporter::default();
        let sparse = ProductRecord::new("2", "Gasket", "");
        let records = [coil(), sparse];

        let payload = exporter.export(&records, ExportScope::All, date()).unwrap();

        let expected = [
            "S.No,Part Code,Product Name,Description,Category,Sub Category,Price,Stock,Image URLs",
            r#""1","CU-200","Copper Coil","Heavy gauge","Coils","Copper","₹1250","12","a.png, b.png""#,
            r#""2","N/A","Gasket","N/A","N/A","N/A","N/A","N/A","N/A""#,
        ]
        .join("\n");
        assert_eq!(payload.body, expected);
        assert_eq!(payload.row_count, 2);
        assert_eq!(payload.mime_type, CSV_MIME_TYPE);
        assert_eq!(payload.filename, "Products_Export_All_18-10-2026.csv");
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let record = ProductRecord::new("1", r#"Pipe 2" elbow"#, "d");

        let backslash = CsvExporter::default()
            .export([&record], ExportScope::All, date())
            .unwrap();
        assert!(backslash.body.contains(r#""Pipe 2\" elbow""#));

        let doubled = CsvExporter::new(ExportOptions {
            quote_escape: QuoteEscape::Doubled,
            ..ExportOptions::default()
        })
        .export([&record], ExportScope::All, date())
        .unwrap();
        assert!(doubled.body.contains(r#""Pipe 2"" elbow""#));
    }

    #[test]
    fn zero_price_is_present_and_empty_images_are_not() {
        let record = ProductRecord::new("1", "Sample", "Free")
            .with_price(0.0)
            .with_stock(0.0)
            .with_images(Vec::<String>::new());

        let payload = CsvExporter::default()
            .export([&record], ExportScope::All, date())
            .unwrap();
        assert!(payload.body.ends_with(r#""₹0","0","N/A""#));
    }

    #[test]
    fn empty_sequence_is_nothing_to_export() {
        let err = CsvExporter::default()
            .export(std::iter::empty(), ExportScope::All, date())
            .unwrap_err();
        assert_eq!(err, ExportError::NothingToExport);
    }

    #[test]
    fn filename_reflects_scope_and_date_format() {
        let exporter = CsvExporter::new(ExportOptions {
            date_format: "%Y-%m-%d".to_string(),
            ..ExportOptions::default()
        });
        assert_eq!(
            exporter.filename(ExportScope::Filtered, date()).unwrap(),
            "Products_Export_Filtered_2026-10-18.csv"
        );
        assert_eq!(ExportScope::from_query(""), ExportScope::All);
        assert_eq!(ExportScope::from_query(" "), ExportScope::Filtered);
    }

    #[test]
    fn bad_date_format_is_a_serialization_error() {
        let options = ExportOptions {
            date_format: "%Q".to_string(),
            ..ExportOptions::default()
        };
        assert!(matches!(options.validate(), Err(ExportError::Serialization(_))));
        assert!(ExportOptions::default().validate().is_ok());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: one header plus one row per record, serials 1..=n in order.
            #[test]
            fn row_count_and_serials(names in proptest::collection::vec("[A-Za-z ]{1,12}", 1..30)) {
                let records: Vec<ProductRecord> = names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| ProductRecord::new(format!("p-{i}"), name.as_str(), "desc"))
                    .collect();

                let payload = CsvExporter::default()
                    .export(&records, ExportScope::All, date())
                    .unwrap();
                let lines: Vec<&str> = payload.body.split('\n').collect();

                prop_assert_eq!(lines.len(), records.len() + 1);
                for (index, line) in lines.iter().skip(1).enumerate() {
                    let expected = format!("\"{}\",", index + 1);
                    prop_assert!(line.starts_with(&expected));
                }
            }
        }
    }
}
