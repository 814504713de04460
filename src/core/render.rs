//! Bordered "fancy grid" table rendering for matrix logs.
//!
//! ```text
//! ╒═══╤═══╕
//! │ 1 │ 2 │
//! ├───┼───┤
//! │ 3 │ 4 │
//! ╘═══╧═══╛
//! ```

use crate::domain::model::Grid;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Column type in the tabulate sense: a column is numeric when every present
/// cell is a number or a string that parses as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn align(self) -> Align {
        match self {
            ColumnKind::Int | ColumnKind::Float => Align::Right,
            ColumnKind::Text => Align::Left,
        }
    }
}

struct Rule {
    left: char,
    fill: char,
    join: char,
    right: char,
}

const TOP: Rule = Rule {
    left: '╒',
    fill: '═',
    join: '╤',
    right: '╕',
};
const BETWEEN: Rule = Rule {
    left: '├',
    fill: '─',
    join: '┼',
    right: '┤',
};
const BOTTOM: Rule = Rule {
    left: '╘',
    fill: '═',
    join: '╧',
    right: '╛',
};
const VERTICAL: char = '│';

/// Renders a grid as a fancy-grid table without a trailing newline. An empty
/// grid renders as an empty string.
pub fn render_grid(grid: &Grid) -> String {
    let columns = grid.column_count();
    if columns == 0 {
        return String::new();
    }

    // Ragged rows are padded with missing cells.
    let cells: Vec<Vec<Option<&Value>>> = grid
        .rows
        .iter()
        .map(|row| (0..columns).map(|c| row.get(c)).collect())
        .collect();

    let kinds: Vec<ColumnKind> = (0..columns)
        .map(|c| column_kind(cells.iter().map(|row| row[c])))
        .collect();

    let text: Vec<Vec<Vec<String>>> = cells
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    cell_text(*cell, kinds[c])
                        .split('\n')
                        .map(str::to_string)
                        .collect()
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            text.iter()
                .flat_map(|row| row[c].iter())
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(text.len() * 2 + 1);
    lines.push(rule(&TOP, &widths));
    for (i, row) in text.iter().enumerate() {
        if i > 0 {
            lines.push(rule(&BETWEEN, &widths));
        }
        let height = row.iter().map(Vec::len).max().unwrap_or(1);
        for line_idx in 0..height {
            let padded: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(c, cell_lines)| {
                    let line = cell_lines.get(line_idx).map(String::as_str).unwrap_or("");
                    pad(line, widths[c], kinds[c].align())
                })
                .collect();
            lines.push(format!(
                "{v} {} {v}",
                padded.join(format!(" {} ", VERTICAL).as_str()),
                v = VERTICAL
            ));
        }
    }
    lines.push(rule(&BOTTOM, &widths));

    lines.join("\n")
}

fn rule(rule: &Rule, widths: &[usize]) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| rule.fill.to_string().repeat(w + 2))
        .collect();
    format!(
        "{}{}{}",
        rule.left,
        segments.join(rule.join.to_string().as_str()),
        rule.right
    )
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text, width = width),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}

/// Missing and null cells do not affect the column kind.
fn column_kind<'a>(cells: impl Iterator<Item = Option<&'a Value>>) -> ColumnKind {
    let mut kind = None;
    for cell in cells {
        let cell_kind = match cell {
            None | Some(Value::Null) => continue,
            Some(Value::Number(n)) if n.is_f64() => ColumnKind::Float,
            Some(Value::Number(_)) => ColumnKind::Int,
            Some(Value::String(s)) if s.trim().parse::<i64>().is_ok() => ColumnKind::Int,
            Some(Value::String(s)) if s.trim().parse::<f64>().is_ok() => ColumnKind::Float,
            Some(_) => return ColumnKind::Text,
        };
        kind = Some(match (kind, cell_kind) {
            (Some(ColumnKind::Float), _) | (_, ColumnKind::Float) => ColumnKind::Float,
            _ => ColumnKind::Int,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

fn cell_text(cell: Option<&Value>, kind: ColumnKind) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::Number(n)) if kind == ColumnKind::Float => {
            n.as_f64().map(format_general).unwrap_or_else(|| n.to_string())
        }
        Some(Value::String(s)) if kind == ColumnKind::Float => s
            .trim()
            .parse::<f64>()
            .map(format_general)
            .unwrap_or_else(|_| s.clone()),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(other) => other.to_string(),
    }
}

/// `%g` with six significant digits: fixed notation for exponents in
/// [-4, 6), scientific otherwise, trailing zeros stripped.
fn format_general(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.5e}", x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if (-4..6).contains(&exponent) {
        let decimals = (5 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, x))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(&mantissa),
            sign,
            exponent.abs()
        )
    }
}

fn strip_trailing_zeros(number: &str) -> String {
    if number.contains('.') {
        number
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        number.to_string()
    }
}
