//! Analysis domain — single-area and comparison results, response classification.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::AreaKey;
use std::collections::HashMap;
use std::fmt;

pub use wire::{QueryRequest, UploadResponse};

/// One row of the tabular breakdown: column name → scalar value.
pub type TableRow = serde_json::Map<String, serde_json::Value>;

// ─── ChartSeries ─────────────────────────────────────────────────────────────

/// A yearly price/demand series. All three sequences have equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    labels: Vec<String>,
    price: Vec<Option<f64>>,
    demand: Vec<Option<f64>>,
}

/// One point of a [`ChartSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint<'a> {
    pub label: &'a str,
    pub price: Option<f64>,
    pub demand: Option<f64>,
}

impl ChartSeries {
    /// Build a series, rejecting sequences of unequal length.
    pub fn new(
        labels: Vec<String>,
        price: Vec<Option<f64>>,
        demand: Vec<Option<f64>>,
    ) -> Result<Self, (usize, usize, usize)> {
        if labels.len() != price.len() || labels.len() != demand.len() {
            return Err((labels.len(), price.len(), demand.len()));
        }
        Ok(Self {
            labels,
            price,
            demand,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn price(&self) -> &[Option<f64>] {
        &self.price
    }

    pub fn demand(&self) -> &[Option<f64>] {
        &self.demand
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Points in label order, for feeding a chart.
    pub fn points(&self) -> impl Iterator<Item = ChartPoint<'_>> + '_ {
        self.labels
            .iter()
            .zip(self.price.iter().zip(self.demand.iter()))
            .map(|(label, (price, demand))| ChartPoint {
                label,
                price: *price,
                demand: *demand,
            })
    }
}

// ─── SingleResult ────────────────────────────────────────────────────────────

/// Analysis outcome for exactly one area.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleResult {
    pub area: String,
    pub summary: String,
    pub chart: ChartSeries,
    pub table: Vec<TableRow>,
}

// ─── CompareResult ───────────────────────────────────────────────────────────

/// Analysis outcome spanning several areas, keyed by area.
///
/// Iteration order is the order the keys appeared in the response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompareResult {
    areas: Vec<(AreaKey, SingleResult)>,
    index: HashMap<AreaKey, usize>,
}

impl CompareResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an area. Returns `false` (and keeps the first entry) if the key
    /// is already present.
    pub fn insert(&mut self, key: AreaKey, result: SingleResult) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.areas.len());
        self.areas.push((key, result));
        true
    }

    pub fn get(&self, key: &str) -> Option<&SingleResult> {
        self.index.get(key).map(|&i| &self.areas[i].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &AreaKey> + '_ {
        self.areas.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AreaKey, &SingleResult)> + '_ {
        self.areas.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

// ─── AnalysisResult ──────────────────────────────────────────────────────────

/// A classified response from the query endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Single(SingleResult),
    Compare(CompareResult),
}

impl AnalysisResult {
    /// `"single"` or `"compare"`, matching the wire discriminant.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisResult::Single(_) => "single",
            AnalysisResult::Compare(_) => "compare",
        }
    }

    /// Number of areas covered by this result.
    pub fn area_count(&self) -> usize {
        match self {
            AnalysisResult::Single(_) => 1,
            AnalysisResult::Compare(c) => c.len(),
        }
    }
}

/// Classify a decoded response body by its `type` discriminant.
///
/// Pure: no I/O, same input always yields the same outcome.
pub fn classify(body: serde_json::Value) -> Result<AnalysisResult, ClassificationError> {
    AnalysisResult::try_from(body)
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ClassificationError {
    NotAnObject,
    MissingType,
    InvalidType,
    UnknownType(String),
    Malformed {
        shape: &'static str,
        source: serde_json::Error,
    },
    SeriesLengthMismatch {
        area: String,
        labels: usize,
        price: usize,
        demand: usize,
    },
    Area {
        key: String,
        error: Box<ClassificationError>,
    },
}

impl fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationError::NotAnObject => write!(f, "Response is not a JSON object"),
            ClassificationError::MissingType => write!(f, "Missing 'type' discriminant"),
            ClassificationError::InvalidType => write!(f, "'type' discriminant is not a string"),
            ClassificationError::UnknownType(t) => write!(f, "Unknown response type '{t}'"),
            ClassificationError::Malformed { shape, source } => {
                write!(f, "Malformed {shape} response: {source}")
            }
            ClassificationError::SeriesLengthMismatch {
                area,
                labels,
                price,
                demand,
            } => write!(
                f,
                "Chart for '{area}' has mismatched lengths (labels {labels}, price {price}, demand {demand})"
            ),
            ClassificationError::Area { key, error } => write!(f, "Area '{key}': {error}"),
        }
    }
}

impl std::error::Error for ClassificationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClassificationError::Malformed { source, .. } => Some(source),
            ClassificationError::Area { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}
