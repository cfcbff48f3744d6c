//! Long-form reshaping and counting for the categorical plot

use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::*;

use super::schema::{i32_values, ExamColumn};

/// One (row, indicator) cell in long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongRecord {
    pub cardio: Option<i32>,
    pub variable: ExamColumn,
    pub value: Option<i32>,
}

/// Reshape the indicator columns into long form with `cardio` as the id.
///
/// Output is row-major: all six indicators of row 0, then row 1, and so on.
pub fn melt_indicators(df: &DataFrame) -> Result<Vec<LongRecord>> {
    let cardio = i32_values(df, ExamColumn::Cardio)?;
    let indicators: Vec<(ExamColumn, Vec<Option<i32>>)> = ExamColumn::INDICATORS
        .iter()
        .map(|&column| i32_values(df, column).map(|values| (column, values)))
        .collect::<Result<_>>()?;

    let mut records = Vec::with_capacity(df.height() * indicators.len());
    for (row, &group) in cardio.iter().enumerate() {
        for (variable, values) in &indicators {
            records.push(LongRecord {
                cardio: group,
                variable: *variable,
                value: values[row],
            });
        }
    }

    Ok(records)
}

/// Count of long-form records sharing one (cardio, variable, value) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorCount {
    pub cardio: i32,
    pub variable: ExamColumn,
    pub value: i32,
    pub total: usize,
}

/// Grouped counts, ordered by cardio, then indicator order, then value.
#[derive(Debug, Clone, Default)]
pub struct CategoricalCounts {
    pub groups: Vec<IndicatorCount>,
}

impl CategoricalCounts {
    /// Distinct `cardio` values present, ascending.
    pub fn cardio_levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.groups.iter().map(|g| g.cardio).collect();
        levels.dedup();
        levels
    }

    /// Distinct indicator values present across all groups, ascending.
    pub fn value_levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.groups.iter().map(|g| g.value).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    /// Count for one key, zero when the combination never occurs.
    pub fn get(&self, cardio: i32, variable: ExamColumn, value: i32) -> usize {
        self.groups
            .iter()
            .find(|g| g.cardio == cardio && g.variable == variable && g.value == value)
            .map_or(0, |g| g.total)
    }

    /// Largest single count, used to scale the y axis.
    pub fn max_total(&self) -> usize {
        self.groups.iter().map(|g| g.total).max().unwrap_or(0)
    }
}

/// Group long-form records by (cardio, variable, value) and count them.
///
/// Records with a null `cardio` or `value` are not counted.
pub fn count_indicators(records: &[LongRecord]) -> CategoricalCounts {
    let order = |variable: ExamColumn| {
        ExamColumn::INDICATORS
            .iter()
            .position(|&c| c == variable)
            .unwrap_or(usize::MAX)
    };

    let mut totals: BTreeMap<(i32, usize, i32), (ExamColumn, usize)> = BTreeMap::new();
    for record in records {
        if let (Some(cardio), Some(value)) = (record.cardio, record.value) {
            totals
                .entry((cardio, order(record.variable), value))
                .or_insert((record.variable, 0))
                .1 += 1;
        }
    }

    let groups = totals
        .into_iter()
        .map(|((cardio, _, value), (variable, total))| IndicatorCount {
            cardio,
            variable,
            value,
            total,
        })
        .collect();

    CategoricalCounts { groups }
}
