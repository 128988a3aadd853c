use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    name: String,
    label: String,
    color: Color,
    visible: bool,
    values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        color: Color,
        values: Vec<f64>,
    ) -> ChartResult<Self> {
        let name = name.into();
        color.validate()?;
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::InvalidDataset(format!(
                "series `{name}` has a non-finite value at index {position}"
            )));
        }
        Ok(Self {
            name,
            label: label.into(),
            color,
            visible: true,
            values,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Flips visibility and returns the new state.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

/// Largest value of any visible series over the inclusive index range.
///
/// The scan starts from zero, so all-negative data and empty ranges yield `0`.
#[must_use]
pub fn max_value_in_range(series: &[ChartSeries], start: usize, end: usize) -> f64 {
    if start > end {
        return 0.0;
    }
    series
        .iter()
        .filter(|series| series.is_visible())
        .filter_map(|series| {
            let last = series.values.len().checked_sub(1)?;
            let end = end.min(last);
            (start <= end).then(|| &series.values[start..=end])
        })
        .flatten()
        .copied()
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |max| max.0.max(0.0))
}

/// Column role in the raw dataset format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    X,
    Line,
}

/// Column-oriented dataset as it arrives over the wire.
///
/// Every column is a JSON array whose first element is the column name and
/// the rest are numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChartData {
    pub columns: Vec<Vec<Value>>,
    pub types: IndexMap<String, ColumnKind>,
    #[serde(default)]
    pub names: IndexMap<String, String>,
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

/// Validated dataset: one x column of millisecond timestamps plus lines of
/// the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    x_values: Vec<f64>,
    series: Vec<ChartSeries>,
}

impl ChartDataset {
    pub fn new(x_values: Vec<f64>, series: Vec<ChartSeries>) -> ChartResult<Self> {
        if x_values.is_empty() {
            return Err(ChartError::InvalidDataset(
                "x column must contain at least one sample".to_owned(),
            ));
        }
        if x_values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidDataset(
                "x column values must be finite".to_owned(),
            ));
        }
        if series.is_empty() {
            return Err(ChartError::InvalidDataset(
                "dataset needs at least one line column".to_owned(),
            ));
        }
        if let Some(series) = series
            .iter()
            .find(|series| series.values().len() != x_values.len())
        {
            return Err(ChartError::InvalidDataset(format!(
                "series `{}` has {} values, expected {}",
                series.name(),
                series.values().len(),
                x_values.len()
            )));
        }
        Ok(Self { x_values, series })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let raw: RawChartData = serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidDataset(format!("failed to parse dataset: {err}")))?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawChartData) -> ChartResult<Self> {
        let mut x_values = None;
        let mut series = Vec::new();

        for column in &raw.columns {
            let (name, values) = parse_column(column)?;
            let kind = raw.types.get(name).copied().ok_or_else(|| {
                ChartError::InvalidDataset(format!("column `{name}` has no declared type"))
            })?;
            match kind {
                ColumnKind::X => {
                    if x_values.replace(values).is_some() {
                        return Err(ChartError::InvalidDataset(
                            "dataset declares more than one x column".to_owned(),
                        ));
                    }
                }
                ColumnKind::Line => {
                    let label = raw.names.get(name).cloned().unwrap_or_else(|| name.to_owned());
                    let color = match raw.colors.get(name) {
                        Some(hex) => Color::from_hex(hex)?,
                        None => Color::rgb(0.0, 0.0, 0.0),
                    };
                    series.push(ChartSeries::new(name, label, color, values)?);
                }
            }
        }

        let x_values = x_values.ok_or_else(|| {
            ChartError::InvalidDataset("dataset has no x column".to_owned())
        })?;
        Self::new(x_values, series)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    #[must_use]
    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<ChartSeries>) {
        (self.x_values, self.series)
    }
}

fn parse_column(column: &[Value]) -> ChartResult<(&str, Vec<f64>)> {
    let (head, rest) = column.split_first().ok_or_else(|| {
        ChartError::InvalidDataset("dataset contains an empty column".to_owned())
    })?;
    let name = head.as_str().ok_or_else(|| {
        ChartError::InvalidDataset("column must start with its name".to_owned())
    })?;
    let values = rest
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.as_f64().ok_or_else(|| {
                ChartError::InvalidDataset(format!(
                    "column `{name}` has a non-numeric value at index {index}"
                ))
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;
    Ok((name, values))
}
