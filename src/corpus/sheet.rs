use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::corpus::loader::LoadError;

/// One usable spreadsheet row after the fixed column mapping:
/// first column prompt/Chinese, second answer/English, optional third an
/// audio file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRow {
    pub prompt: String,
    pub answer: String,
    pub audio: Option<String>,
}

/// Read the first worksheet into rows. Rows whose first two columns are both
/// blank are skipped; a row with only one of the two text columns filled is
/// kept (the loader decides per mode whether it is usable).
pub fn rows(path: &Path) -> Result<Vec<SheetRow>, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        detail: format!("cannot open workbook: {e}"),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Malformed {
            path: path.to_path_buf(),
            detail: "workbook has no worksheets".to_string(),
        })?
        .map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            detail: format!("cannot read first worksheet: {e}"),
        })?;

    Ok(rows_from_cells(range.rows()))
}

fn rows_from_cells<'a>(cells: impl Iterator<Item = &'a [Data]>) -> Vec<SheetRow> {
    let mut out = Vec::new();
    for row in cells {
        let prompt = cell_text(row.first());
        let answer = cell_text(row.get(1));
        if prompt.is_empty() && answer.is_empty() {
            continue;
        }
        let audio = Some(cell_text(row.get(2))).filter(|a| !a.is_empty());
        out.push(SheetRow {
            prompt,
            answer,
            audio,
        });
    }
    out
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Float(f)) => {
            // Excel stores whole numbers as floats; drop the fraction marker.
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Some(Data::Bool(b)) => b.to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_fixed_column_mapping() {
        let grid: Vec<Vec<Data>> = vec![
            vec![s("你好"), s("Hello"), s("hello.mp3")],
            vec![s("再见"), s("Bye")],
        ];
        let rows = rows_from_cells(grid.iter().map(|r| r.as_slice()));
        assert_eq!(
            rows,
            vec![
                SheetRow {
                    prompt: "你好".to_string(),
                    answer: "Hello".to_string(),
                    audio: Some("hello.mp3".to_string()),
                },
                SheetRow {
                    prompt: "再见".to_string(),
                    answer: "Bye".to_string(),
                    audio: None,
                },
            ]
        );
    }

    #[test]
    fn test_blank_rows_skipped() {
        let grid: Vec<Vec<Data>> = vec![
            vec![Data::Empty, Data::Empty, s("orphan.mp3")],
            vec![],
            vec![s("你好"), s("Hello")],
        ];
        let rows = rows_from_cells(grid.iter().map(|r| r.as_slice()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].answer, "Hello");
    }

    #[test]
    fn test_numeric_cells_render_without_fraction() {
        let grid: Vec<Vec<Data>> = vec![vec![Data::Float(3.0), s("three")]];
        let rows = rows_from_cells(grid.iter().map(|r| r.as_slice()));
        assert_eq!(rows[0].prompt, "3");
    }

    #[test]
    fn test_cell_text_trims_whitespace() {
        let grid: Vec<Vec<Data>> = vec![vec![s("  你好  "), s(" Hello ")]];
        let rows = rows_from_cells(grid.iter().map(|r| r.as_slice()));
        assert_eq!(rows[0].prompt, "你好");
        assert_eq!(rows[0].answer, "Hello");
    }

    #[test]
    fn test_missing_workbook_is_malformed() {
        let err = rows(Path::new("no/such/book.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }
}
