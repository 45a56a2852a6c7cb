//! Problem file parsing and rendering
//!
//! A problem file is plain text: the first non-empty line is the dimension
//! `d`, the next `d` non-empty lines are the basis columns (comma-separated
//! rationals, one column per line), and the final non-empty line is the
//! shift vector added to every lattice point before the bounds are applied.

use anyhow::{bail, Context, Result};
use std::path::Path;

use lattice_scan_core::{Matrix, Rational, Vector};

#[derive(Debug)]
pub struct ProblemInput {
    pub basis: Matrix<Rational>,
    pub shift: Vector<Rational>,
}

pub fn parse_file(path: &Path) -> Result<ProblemInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse(text: &str) -> Result<ProblemInput> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let dimensions: usize = lines
        .next()
        .context("missing dimension line")?
        .parse()
        .context("dimension line is not an integer")?;
    if dimensions == 0 {
        bail!("dimension must be at least 1");
    }

    let mut columns = Vec::with_capacity(dimensions);
    for i in 0..dimensions {
        let line = lines
            .next()
            .with_context(|| format!("missing basis column {i}"))?;
        let column = parse_entries(line).with_context(|| format!("basis column {i}"))?;
        if column.len() != dimensions {
            bail!(
                "basis column {i} has {} entries, expected {dimensions}",
                column.len()
            );
        }
        columns.push(column);
    }

    let shift = parse_entries(lines.next().context("missing shift line")?)
        .context("shift line")?;
    if shift.len() != dimensions {
        bail!("shift has {} entries, expected {dimensions}", shift.len());
    }

    // file stores columns, the matrix stores rows
    let basis = Matrix::from_fn(dimensions, dimensions, |r, c| columns[c][r].clone());

    Ok(ProblemInput {
        basis,
        shift: Vector::from_vec(shift),
    })
}

fn parse_entries(line: &str) -> Result<Vec<Rational>> {
    line.split(',')
        .map(|entry| entry.trim().parse::<Rational>().map_err(Into::into))
        .collect()
}

/// Render a problem in the same column-per-line format `parse` accepts.
pub fn render(basis: &Matrix<Rational>, shift: &Vector<Rational>) -> String {
    let d = basis.rows();
    let mut out = format!("{d}\n");
    for col in 0..d {
        let entries: Vec<String> = (0..d).map(|row| basis.get(row, col).to_string()).collect();
        out.push_str(&entries.join(","));
        out.push('\n');
    }
    out.push('\n');
    let entries: Vec<String> = shift.iter().map(ToString::to_string).collect();
    out.push_str(&entries.join(","));
    out.push('\n');
    out
}
