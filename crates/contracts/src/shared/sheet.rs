//! Workbook-independent description of an exported sheet
//!
//! Builders in the dashboards produce a [`SheetLayout`]; the frontend renders it
//! into an xlsx file. Rows and columns are 1-based, as in spreadsheet addresses.

#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Empty,
    Text(String),
    Integer(i64),
}

impl SheetCell {
    pub fn text(value: impl Into<String>) -> Self {
        SheetCell::Text(value.into())
    }
}

impl From<&str> for SheetCell {
    fn from(value: &str) -> Self {
        SheetCell::Text(value.to_string())
    }
}

impl From<String> for SheetCell {
    fn from(value: String) -> Self {
        SheetCell::Text(value)
    }
}

impl From<i64> for SheetCell {
    fn from(value: i64) -> Self {
        SheetCell::Integer(value)
    }
}

/// Horizontal merge on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub row: u32,
    pub first_col: u32,
    pub last_col: u32,
}

impl MergeRange {
    /// A1-style range, e.g. `A1:E1`
    pub fn a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_letter(self.first_col),
            self.row,
            column_letter(self.last_col),
            self.row
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub file_name: String,
    pub column_count: u32,
    pub rows: Vec<Vec<SheetCell>>,
    pub merges: Vec<MergeRange>,
    /// Rows rendered bold (titles, headers, totals)
    pub emphasis_rows: Vec<u32>,
    /// Column widths in characters, by column index starting at 1
    pub column_widths: Vec<f64>,
}

impl SheetLayout {
    pub fn new(sheet_name: impl Into<String>, file_name: impl Into<String>, column_count: u32) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            file_name: file_name.into(),
            column_count,
            rows: Vec::new(),
            merges: Vec::new(),
            emphasis_rows: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    /// Appends a row and returns its 1-based number
    pub fn push_row(&mut self, cells: Vec<SheetCell>) -> u32 {
        self.rows.push(cells);
        self.rows.len() as u32
    }

    pub fn push_blank(&mut self) -> u32 {
        self.push_row(Vec::new())
    }

    /// Appends a single-cell row merged across every column
    pub fn push_banner(&mut self, text: impl Into<String>) -> u32 {
        let row = self.push_row(vec![SheetCell::Text(text.into())]);
        self.merges.push(MergeRange {
            row,
            first_col: 1,
            last_col: self.column_count,
        });
        self.emphasis_rows.push(row);
        row
    }

    pub fn emphasize(&mut self, row: u32) {
        if !self.emphasis_rows.contains(&row) {
            self.emphasis_rows.push(row);
        }
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&SheetCell> {
        self.rows
            .get(row.checked_sub(1)? as usize)?
            .get(col.checked_sub(1)? as usize)
    }
}

/// Spreadsheet column name for a 1-based index: 1 → A, 27 → AA
pub fn column_letter(mut col: u32) -> String {
    let mut name = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        name.push((b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    name.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(5), "E");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
    }

    #[test]
    fn test_banner_merges_all_columns() {
        let mut layout = SheetLayout::new("s", "f.xlsx", 5);
        let row = layout.push_banner("Title");
        assert_eq!(row, 1);
        assert_eq!(layout.merges[0].a1(), "A1:E1");
        assert_eq!(layout.cell(1, 1), Some(&SheetCell::text("Title")));
        assert_eq!(layout.cell(1, 2), None);
        assert_eq!(layout.cell(0, 1), None);
    }
}
