//! Plain-text rendering of similarity matrices.
//!
//! Rows are the left-hand search, columns the right-hand search. Self cells
//! are shown as `-` because they are never compared.

use crate::matrix::SimilarityMatrix;

/// Render `matrix` as a fixed-width table with `precision` decimals.
pub fn render_matrix(matrix: &SimilarityMatrix, precision: u32) -> String {
    let names = matrix.search_names();
    if names.is_empty() {
        return String::from("(no comparisons)\n");
    }

    let precision = precision as usize;
    // "0." plus decimals, never narrower than a name.
    let cell_width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(precision + 2);
    let label_width = cell_width;

    let mut out = " ".repeat(label_width);
    for name in &names {
        out.push_str(&format!("  {name:>cell_width$}"));
    }
    out.push('\n');

    for a in &names {
        out.push_str(&format!("{a:<label_width$}"));
        for b in &names {
            let cell = if a == b {
                "-".to_string()
            } else {
                match matrix.get(a, b) {
                    Some(score) => format!("{:.precision$}", score.score),
                    None => String::new(),
                }
            };
            out.push_str(&format!("  {cell:>cell_width$}"));
        }
        out.push('\n');
    }
    out
}
