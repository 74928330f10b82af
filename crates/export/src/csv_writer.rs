use crate::error::ExportError;
use crate::schema::TabularRow;
use std::io::Write;

/// Writes `rows` as CSV into `writer`: one header row, then one row per value.
///
/// Bytes reach `writer` as the internal buffer fills, so a failure part-way
/// can leave a prefix behind. Use [`render_csv`] when the consumer must never
/// see partial output.
pub fn write_csv<R: TabularRow, W: Write>(rows: &[R], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(R::SCHEMA.header())?;
    for row in rows {
        csv.write_record(row.record())?;
    }

    csv.flush()?;
    Ok(())
}

/// Renders `rows` into a complete in-memory CSV document.
pub fn render_csv<R: TabularRow>(rows: &[R]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AGGREGATED_HEADER, PLAIN_HEADER};
    use analytics::{AggregatedEntry, AnalyticsEngine};
    use chrono::{NaiveDate, TimeZone, Utc};
    use core_types::{EntryKind, FinancialEntry};
    use std::io;

    fn entry(id: i64, kind: EntryKind, amount: i64, category: &str) -> FinancialEntry {
        FinancialEntry {
            id,
            kind,
            amount,
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            category: category.to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 10, 15, 30).unwrap(),
        }
    }

    fn parse(bytes: &[u8]) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn single_income_row_in_aggregated_schema() {
        let rows = AnalyticsEngine::new()
            .annotate(vec![entry(1, EntryKind::Income, 100, "test")])
            .unwrap();

        let bytes = render_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("id,type,amount,date,category,created_at,sum,average,count,median,percentile_90")
        );
        assert_eq!(
            lines.next(),
            Some("1,income,100,2023-01-01,test,2023-01-01T10:15:30.000000Z,100,100.00,1,100.00,100.00")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn every_aggregated_row_repeats_the_same_stats() {
        let rows: Vec<AggregatedEntry> = AnalyticsEngine::new()
            .annotate(vec![
                entry(1, EntryKind::Income, 100, "salary"),
                entry(2, EntryKind::Expense, 50, "food"),
            ])
            .unwrap();

        let records = parse(&render_csv(&rows).unwrap());

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].iter().collect::<Vec<_>>(), AGGREGATED_HEADER.to_vec());
        for record in &records[1..] {
            let stats: Vec<&str> = record.iter().skip(6).collect();
            assert_eq!(stats, vec!["50", "25.00", "2", "25.00", "85.00"]);
        }
        assert_eq!(&records[2][1], "expense");
        assert_eq!(&records[2][2], "50");
    }

    #[test]
    fn plain_schema_has_six_columns() {
        let rows = vec![entry(7, EntryKind::Expense, 50, "rent")];
        let records = parse(&render_csv(&rows).unwrap());

        assert_eq!(records[0].iter().collect::<Vec<_>>(), PLAIN_HEADER.to_vec());
        assert_eq!(
            records[1].iter().collect::<Vec<_>>(),
            vec!["7", "expense", "50", "2023-01-01", "rent", "2023-01-01T10:15:30.000000Z"]
        );
    }

    #[test]
    fn separators_and_quotes_are_escaped() {
        let rows = vec![entry(1, EntryKind::Income, 5, "books, \"rare\"\nand maps")];
        let bytes = render_csv(&rows).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        assert!(text.contains("\"books, \"\"rare\"\"\nand maps\""));
        let records = parse(&bytes);
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][4], "books, \"rare\"\nand maps");
    }

    #[test]
    fn empty_result_set_is_header_only() {
        let bytes = render_csv::<FinancialEntry>(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "id,type,amount,date,category,created_at\n");
    }

    #[test]
    fn input_is_left_untouched() {
        let rows = vec![entry(2, EntryKind::Income, 9, "b"), entry(1, EntryKind::Income, 3, "a")];
        let before = rows.clone();
        render_csv(&rows).unwrap();
        assert_eq!(rows, before);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "consumer went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failure_is_surfaced() {
        let rows = vec![entry(1, EntryKind::Income, 1, "x")];
        assert!(write_csv(&rows, BrokenPipe).is_err());
    }
}
