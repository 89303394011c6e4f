use std::{fs::File, io::Write, path::Path};

use s3viewer::types::list::ListingResult;

use crate::error::OutputError;

/// Spaces between columns
const PADDING: usize = 2;
const TABLE_HEADER: [&str; 3] = ["Key", "Size", "LastModifiedDate"];
const CSV_HEADER: [&str; 3] = ["Key", "Size", "LastModified"];

/// Writes the entries as a left aligned table. The last column is not padded.
pub fn print_table<W: Write>(mut writer: W, result: &ListingResult) -> Result<(), OutputError> {
    let rows: Vec<[String; 3]> = result
        .entries
        .iter()
        .map(|entry| {
            [
                entry.key.clone(),
                entry.size.to_string(),
                entry.last_modified.clone(),
            ]
        })
        .collect();
    let mut widths = TABLE_HEADER.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let header = TABLE_HEADER.map(String::from);
    for row in std::iter::once(&header).chain(&rows) {
        let [key, size, last_modified] = row;
        writeln!(
            writer,
            "{}{}{}",
            pad(key, widths[0]),
            pad(size, widths[1]),
            last_modified
        )?;
    }
    writer.flush()?;
    Ok(())
}
fn pad(cell: &str, width: usize) -> String {
    let fill = width - cell.chars().count() + PADDING;
    format!("{cell}{}", " ".repeat(fill))
}

/// Writes `Key,Size,LastModified` and one row per entry.
pub fn write_csv<W: Write>(writer: W, result: &ListingResult) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for entry in &result.entries {
        writer.write_record([
            entry.key.as_str(),
            entry.size.to_string().as_str(),
            entry.last_modified.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
pub fn save_csv(path: &Path, result: &ListingResult) -> Result<(), OutputError> {
    let file = File::create(path)?;
    write_csv(file, result)
}

#[cfg(test)]
mod tests {
    use s3viewer::types::list::Entry;

    use super::*;

    fn result() -> ListingResult {
        ListingResult {
            source_url: "http://bucket.example.com/".into(),
            entries: vec![
                Entry {
                    key: "test-file1.txt".into(),
                    last_modified: "2023-05-22T08:49:07.000Z".into(),
                    size: 1234,
                },
                Entry {
                    key: "a, \"quoted\" & odd.txt".into(),
                    last_modified: "2023-05-23T08:49:07.000Z".into(),
                    size: 7,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn table_is_aligned() {
        let mut output = Vec::new();
        print_table(&mut output, &result()).unwrap();
        let output = String::from_utf8(output).unwrap();
        let expected = "\
Key                    Size  LastModifiedDate
test-file1.txt         1234  2023-05-22T08:49:07.000Z
a, \"quoted\" & odd.txt  7     2023-05-23T08:49:07.000Z
";
        assert_eq!(output, expected);
    }

    #[test]
    fn csv_is_quoted() {
        let mut output = Vec::new();
        write_csv(&mut output, &result()).unwrap();
        let output = String::from_utf8(output).unwrap();
        let expected = "\
Key,Size,LastModified
test-file1.txt,1234,2023-05-22T08:49:07.000Z
\"a, \"\"quoted\"\" & odd.txt\",7,2023-05-23T08:49:07.000Z
";
        assert_eq!(output, expected);
    }

    #[test]
    fn empty_listing_has_header_only() {
        let mut output = Vec::new();
        write_csv(&mut output, &ListingResult::new("http://bucket.example.com/")).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Key,Size,LastModified\n");
    }
}
