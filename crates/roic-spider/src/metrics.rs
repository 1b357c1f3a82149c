use std::fmt;
use tracing::warn;

/// A table cell, interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Numbers where the text parses as one, text otherwise.
    pub fn parse(cell: Option<&str>) -> Self {
        match cell {
            None => Value::Missing,
            Some(text) => match text.trim().parse::<f64>() {
                Ok(number) => Value::Number(number),
                Err(_) => Value::Text(text.to_string()),
            },
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            Value::Missing => Some(f64::NAN),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{number}"),
            Value::Text(text) => write!(f, "{text:?}"),
            Value::Missing => f.write_str("NaN"),
        }
    }
}

/// Period-over-period change of `series`, as a fraction (`0.1` is +10%).
///
/// The first period has no predecessor and is NaN, as is any period next to a
/// missing value. Text is not converted: a series holding any returns `None`.
///
/// ```rust
/// use roic_spider::{growth_rate, Value};
///
/// let growth = growth_rate(&[Value::Number(100.0), Value::Number(110.0)]).unwrap();
/// assert!(growth[0].is_nan());
/// assert!((growth[1] - 0.1).abs() < 1e-12);
/// ```
pub fn growth_rate(series: &[Value]) -> Option<Vec<f64>> {
    let numbers = match series.iter().map(Value::as_number).collect::<Option<Vec<f64>>>() {
        Some(numbers) => numbers,
        None => {
            let found = series.iter().find(|value| matches!(value, Value::Text(_)));
            warn!("edge case: growth rate of non-numeric values, found {found:?}");
            return None;
        }
    };

    let mut growth = Vec::with_capacity(numbers.len());
    if !numbers.is_empty() {
        growth.push(f64::NAN);
    }
    growth.extend(numbers.windows(2).map(|pair| pair[1] / pair[0] - 1.0));

    Some(growth)
}
