use crate::errors::FetchError;
use crate::models::{DailyRow, Serving};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

pub const ENERGY_NUTRIENT: &str = "Energy";

/// Calories-out stand-in until real expenditure data is wired up.
pub const CALORIES_OUT_PLACEHOLDER: f64 = 2000.0;

pub const DEFAULT_ROLLING_WINDOW: usize = 7;
pub const ROLLING_WINDOW_CHOICES: [usize; 5] = [7, 14, 30, 60, 90];

/// Collapses servings into one row per distinct calendar date, ascending.
/// Energy amounts are summed per date; a serving without an Energy entry or
/// without an amount contributes zero.
pub fn daily_rows(servings: &[Serving], window: usize) -> Vec<DailyRow> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for serving in servings {
        *by_date.entry(serving.date).or_insert(0.0) += energy_amount(serving);
    }

    let mut rows: Vec<DailyRow> = by_date
        .into_iter()
        .map(|(date, calories_in)| DailyRow {
            date,
            calories_in,
            calories_out: CALORIES_OUT_PLACEHOLDER,
            net: calories_in - CALORIES_OUT_PLACEHOLDER,
            rolling_net: None,
        })
        .collect();
    apply_rolling(&mut rows, window);
    rows
}

fn energy_amount(serving: &Serving) -> f64 {
    serving
        .nutrients
        .get(ENERGY_NUTRIENT)
        .and_then(|nutrient| nutrient.amount)
        .unwrap_or(0.0)
}

/// Recomputes the trailing net sum in place: row `i` gets the sum of `net`
/// over `[i - window + 1, i]`, and the first `window - 1` rows stay `None`.
pub fn apply_rolling(rows: &mut [DailyRow], window: usize) {
    let nets: Vec<f64> = rows.iter().map(|row| row.net).collect();
    for (i, row) in rows.iter_mut().enumerate() {
        row.rolling_net = if window >= 1 && i + 1 >= window {
            Some(nets[i + 1 - window..=i].iter().sum())
        } else {
            None
        };
    }
}

/// File-based variant: loads daily rows from a pre-exported CSV with `Date`,
/// `Calories In` and `Calories Out` columns (order free). Net and the
/// rolling sum are recomputed the same way as for fetched data.
pub async fn rows_from_csv(path: &Path, window: usize) -> Result<Vec<DailyRow>, FetchError> {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(FetchError::MissingInput(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| FetchError::Malformed("csv file is empty".to_string()))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let date_col = find_column(&columns, "Date")?;
    let in_col = find_column(&columns, "Calories In")?;
    let out_col = find_column(&columns, "Calories Out")?;

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let line_number = index + 2;
        let date = field(&fields, date_col, line_number)?
            .parse::<NaiveDate>()
            .map_err(|err| FetchError::Malformed(format!("line {line_number}: bad date: {err}")))?;
        let calories_in = parse_number(&fields, in_col, line_number)?;
        let calories_out = parse_number(&fields, out_col, line_number)?;
        rows.push(DailyRow {
            date,
            calories_in,
            calories_out,
            net: calories_in - calories_out,
            rolling_net: None,
        });
    }

    rows.sort_by_key(|row| row.date);
    apply_rolling(&mut rows, window);
    Ok(rows)
}

fn find_column(columns: &[&str], name: &str) -> Result<usize, FetchError> {
    columns
        .iter()
        .position(|column| *column == name)
        .ok_or_else(|| FetchError::Malformed(format!("csv header is missing the '{name}' column")))
}

fn field<'a>(fields: &[&'a str], index: usize, line_number: usize) -> Result<&'a str, FetchError> {
    fields.get(index).copied().ok_or_else(|| {
        FetchError::Malformed(format!("line {line_number}: too few columns"))
    })
}

fn parse_number(fields: &[&str], index: usize, line_number: usize) -> Result<f64, FetchError> {
    field(fields, index, line_number)?
        .parse::<f64>()
        .map_err(|err| FetchError::Malformed(format!("line {line_number}: bad number: {err}")))
}
