//! Terminal table formatting for thread listings.
//!
//! Each row is `index  unread-marker  authors` with the subject on a
//! continuation line, indented past the first two columns so long
//! subjects never shear the listing apart.

/// One listing row: index, unread marker, authors, subject.
pub type Row = [String; 4];

/// Formats rows into printable lines, one entry per row.
#[must_use]
pub fn tabler(rows: &[Row]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    let index_col = pad_column(rows.iter().map(|r| r[0].as_str()));
    let marker_col = pad_column(rows.iter().map(|r| r[1].as_str()));
    let authors_col = pad_column(rows.iter().map(|r| r[2].as_str()));

    let indent = widest(rows.iter().map(|r| r[0].as_str()))
        + widest(rows.iter().map(|r| r[1].as_str()))
        + 2;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let subject = &row[3];
            let line = format!(
                "{}{}{}\n{}{subject}",
                index_col[i],
                marker_col[i],
                authors_col[i],
                " ".repeat(indent),
            );
            // drop padding that would trail each physical line
            line.lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

fn widest<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.chars().count()).max().unwrap_or(0)
}

/// Pads every cell to the widest entry plus one separating space.
fn pad_column<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> Vec<String> {
    let width = widest(cells.clone()) + 1;
    cells
        .map(|cell| {
            let padding = width - cell.chars().count();
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(i: &str, n: &str, authors: &str, subject: &str) -> Row {
        [
            i.to_string(),
            n.to_string(),
            authors.to_string(),
            subject.to_string(),
        ]
    }

    #[test]
    fn test_empty_input() {
        assert!(tabler(&[]).is_empty());
    }

    #[test]
    fn test_columns_align_to_widest() {
        let rows = vec![
            row("0", "N", "Alice", "Hi"),
            row("10", "", "Bo", "Re: something longer"),
        ];
        let lines = tabler(&rows);

        assert_eq!(lines.len(), 2);
        // both author columns start at the same offset
        let first = lines[0].lines().next().unwrap_or("");
        let second = lines[1].lines().next().unwrap_or("");
        assert_eq!(first.find("Alice"), second.find("Bo"));
    }

    #[test]
    fn test_subject_on_indented_continuation() {
        let rows = vec![row("0", "N", "Alice", "The subject")];
        let lines = tabler(&rows);
        let mut parts = lines[0].lines();
        let head = parts.next().unwrap_or("");
        let cont = parts.next().unwrap_or("");

        assert!(head.starts_with("0 N Alice"));
        assert!(cont.ends_with("The subject"));
        assert!(cont.starts_with("    "));
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let rows = vec![row("0", "", "A", "s"), row("1", "N", "Blake", "t")];
        for entry in tabler(&rows) {
            for line in entry.lines() {
                assert_eq!(line, line.trim_end());
            }
        }
    }
}
