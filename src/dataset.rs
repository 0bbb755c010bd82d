use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A single cell value. CSV parsing and the mock generator only ever produce
/// these two shapes; anything that fails to parse as a number stays text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

/// An ordered tabular dataset: column names plus rows of values. Value
/// object, produced fresh per analysis and never mutated by the core.
///
/// The grouping (`Region`-like) and outcome (`Revenue`-like) columns are
/// opportunistic: accessors return `None` when they are missing and callers
/// degrade to neutral defaults instead of erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Numeric values of a column, skipping non-numeric cells. `None` when
    /// the column is missing or holds no numbers at all.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        let values: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|row| row.get(idx).and_then(Value::as_number))
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// Names of the categorical (all-text) columns. Columns whose every
    /// value looks like a date are excluded; a date series is an axis, not
    /// a category set.
    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.is_categorical(*idx))
            .map(|(_, name)| name.as_str())
            .collect()
    }

    fn is_categorical(&self, idx: usize) -> bool {
        let mut any_text = false;
        let mut all_dates = true;
        for row in &self.rows {
            match row.get(idx) {
                Some(Value::Text(s)) => {
                    any_text = true;
                    if !looks_like_date(s) {
                        all_dates = false;
                    }
                }
                _ => return false,
            }
        }
        any_text && !all_dates
    }

    /// Unique trimmed text values of a column in first-encounter order.
    pub fn unique_text_values(&self, name: &str) -> Vec<String> {
        let Some(idx) = self.column_index(name) else {
            return Vec::new();
        };
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            if let Some(Value::Text(s)) = row.get(idx) {
                let trimmed = s.trim();
                if !trimmed.is_empty() && seen.insert(trimmed.to_string()) {
                    out.push(trimmed.to_string());
                }
            }
        }
        out
    }

    /// Mean of `value_col` per unique value of `group_col`, in the groups'
    /// first-encounter order. `None` when either column is missing or no
    /// (group, number) pair exists.
    pub fn group_means(&self, group_col: &str, value_col: &str) -> Option<Vec<(String, f64)>> {
        let gi = self.column_index(group_col)?;
        let vi = self.column_index(value_col)?;

        let mut order: Vec<String> = Vec::new();
        let mut sums: HashMap<String, (f64, u32)> = HashMap::new();
        for row in &self.rows {
            let group = match row.get(gi).and_then(Value::as_text) {
                Some(g) if !g.trim().is_empty() => g.trim().to_string(),
                _ => continue,
            };
            let Some(v) = row.get(vi).and_then(Value::as_number) else {
                continue;
            };
            let entry = sums.entry(group.clone()).or_insert_with(|| {
                order.push(group.clone());
                (0.0, 0)
            });
            entry.0 += v;
            entry.1 += 1;
        }

        if order.is_empty() {
            return None;
        }
        Some(
            order
                .into_iter()
                .map(|g| {
                    let (sum, count) = sums[&g];
                    (g, sum / f64::from(count))
                })
                .collect(),
        )
    }

    /// The group with the highest mean outcome ("top performer"). Ties go
    /// to the first-encountered group, matching stable ordering elsewhere.
    pub fn top_group_by_mean(&self, group_col: &str, value_col: &str) -> Option<String> {
        let means = self.group_means(group_col, value_col)?;
        let mut best: Option<(String, f64)> = None;
        for (group, mean) in means {
            match &best {
                Some((_, m)) if mean <= *m => {}
                _ => best = Some((group, mean)),
            }
        }
        best.map(|(g, _)| g)
    }
}

/// Heuristic: "YYYY-MM-DD" prefix.
fn looks_like_date(s: &str) -> bool {
    let s = s.trim();
    s.len() >= 10
        && s.as_bytes().get(4) == Some(&b'-')
        && s.as_bytes().get(7) == Some(&b'-')
        && s[..4].chars().all(|c| c.is_ascii_digit())
        && s[5..7].chars().all(|c| c.is_ascii_digit())
        && s[8..10].chars().all(|c| c.is_ascii_digit())
}
