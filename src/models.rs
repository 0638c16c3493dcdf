use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One nutrient reading inside a serving. Amounts are optional on the wire;
/// a missing amount reads as zero when aggregating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Nutrient {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// One logged food/drink entry with its nutrient breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Serving {
    pub date: NaiveDate,
    #[serde(default)]
    pub nutrients: BTreeMap<String, Nutrient>,
}

/// On-disk cache entry: the day it was written plus the servings fetched
/// that day. Stale entries are ignored and overwritten, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheFile {
    pub date: NaiveDate,
    pub servings: Vec<Serving>,
}

/// One calendar day of the calorie report. `rolling_net` is `None` for the
/// first `window - 1` rows of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub calories_in: f64,
    pub calories_out: f64,
    pub net: f64,
    pub rolling_net: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    pub window: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyReportResponse {
    pub window: usize,
    pub rows: Vec<DailyRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub days: usize,
}
