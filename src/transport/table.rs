use std::collections::BTreeMap;

use super::legacy_text::decode_big5;
use super::lines::ResponseLine;
use crate::domain::LogEntry;

/// Key of the line declaring column names for the rows that follow.
pub const CAPTION_KEY: &str = "caption";
/// Prefix of row keys (`item1`, `item2`, ...).
pub const ROW_KEY_PREFIX: &str = "item";

/// Columns the gateway sends in Big5 rather than UTF-8.
const BIG5_COLUMNS: [&str; 2] = ["prms", "msg"];

/// Pairs `caption=` headers with the `item<N>=` rows after them.
///
/// A row is only accepted when its cell count matches the most recent caption; anything
/// else (including a row before any caption) is dropped and counted.
#[derive(Debug, Default)]
pub struct TableAssembler {
    caption: Vec<String>,
    entries: BTreeMap<String, LogEntry>,
    dropped_rows: usize,
}

impl TableAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take `line` if it belongs to the table. Returns `false` for any other key.
    pub fn absorb(&mut self, line: &ResponseLine<'_>) -> bool {
        if line.key == CAPTION_KEY {
            self.caption = split_cells(line.value)
                .map(|name| String::from_utf8_lossy(name).into_owned())
                .collect();
            return true;
        }

        let Some(row_id) = line.key.strip_prefix(ROW_KEY_PREFIX) else {
            return false;
        };

        let cells = split_cells(line.value).collect::<Vec<_>>();
        if cells.len() != self.caption.len() {
            self.dropped_rows += 1;
            tracing::debug!(
                row = line.key,
                cells = cells.len(),
                columns = self.caption.len(),
                "dropping row that does not match caption"
            );
            return true;
        }

        let fields = self
            .caption
            .iter()
            .zip(cells)
            .map(|(column, cell)| (column.clone(), decode_cell(column, cell)))
            .collect();
        self.entries.insert(
            line.key.to_owned(),
            LogEntry {
                row_id: row_id.to_owned(),
                fields,
            },
        );
        true
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn into_entries(self) -> BTreeMap<String, LogEntry> {
        self.entries
    }
}

/// Comma-split a table value, stripping one layer of quotes from each cell.
fn split_cells(value: &[u8]) -> impl Iterator<Item = &[u8]> {
    value.split(|byte| *byte == b',').map(strip_quotes)
}

fn strip_quotes(cell: &[u8]) -> &[u8] {
    let cell = cell.strip_prefix(b"\"").unwrap_or(cell);
    cell.strip_suffix(b"\"").unwrap_or(cell)
}

fn decode_cell(column: &str, cell: &[u8]) -> String {
    if BIG5_COLUMNS.contains(&column) {
        decode_big5(cell)
    } else {
        String::from_utf8_lossy(cell).into_owned()
    }
}
