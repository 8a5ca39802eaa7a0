//! Conversion: raw response body → AnalysisResult (TryFrom + validation).

use super::wire;
use super::{AnalysisResult, ChartSeries, ClassificationError, CompareResult, SingleResult};
use crate::shared::AreaKey;

fn chart_for(area: &str, chart: wire::ChartResponse) -> Result<ChartSeries, ClassificationError> {
    ChartSeries::new(chart.labels, chart.price, chart.demand).map_err(|(labels, price, demand)| {
        ClassificationError::SeriesLengthMismatch {
            area: area.to_string(),
            labels,
            price,
            demand,
        }
    })
}

impl TryFrom<wire::SingleResponse> for SingleResult {
    type Error = ClassificationError;

    fn try_from(source: wire::SingleResponse) -> Result<Self, Self::Error> {
        let chart = chart_for(&source.area, source.chart)?;
        Ok(SingleResult {
            area: source.area,
            summary: source.summary,
            chart,
            table: source.table,
        })
    }
}

impl TryFrom<(&str, wire::AreaResponse)> for SingleResult {
    type Error = ClassificationError;

    fn try_from((key, source): (&str, wire::AreaResponse)) -> Result<Self, Self::Error> {
        let area = source.area.unwrap_or_else(|| key.to_string());
        let chart = chart_for(&area, source.chart)?;
        Ok(SingleResult {
            area,
            summary: source.summary,
            chart,
            table: source.table,
        })
    }
}

impl TryFrom<wire::CompareResponse> for CompareResult {
    type Error = ClassificationError;

    fn try_from(source: wire::CompareResponse) -> Result<Self, Self::Error> {
        let mut compare = CompareResult::new();
        for (key, value) in source.results {
            let entry: wire::AreaResponse =
                serde_json::from_value(value).map_err(|e| ClassificationError::Area {
                    key: key.clone(),
                    error: Box::new(ClassificationError::Malformed {
                        shape: "area",
                        source: e,
                    }),
                })?;
            let result = SingleResult::try_from((key.as_str(), entry)).map_err(|e| {
                ClassificationError::Area {
                    key: key.clone(),
                    error: Box::new(e),
                }
            })?;
            // JSON object keys are already unique after parsing.
            compare.insert(AreaKey::from(key), result);
        }
        Ok(compare)
    }
}

impl TryFrom<serde_json::Value> for AnalysisResult {
    type Error = ClassificationError;

    fn try_from(body: serde_json::Value) -> Result<Self, Self::Error> {
        let kind = match body.as_object() {
            None => return Err(ClassificationError::NotAnObject),
            Some(obj) => match obj.get("type") {
                None | Some(serde_json::Value::Null) => {
                    return Err(ClassificationError::MissingType)
                }
                Some(serde_json::Value::String(kind)) => kind.clone(),
                Some(_) => return Err(ClassificationError::InvalidType),
            },
        };

        match kind.as_str() {
            "single" => {
                let single: wire::SingleResponse = serde_json::from_value(body).map_err(|e| {
                    ClassificationError::Malformed {
                        shape: "single",
                        source: e,
                    }
                })?;
                Ok(AnalysisResult::Single(single.try_into()?))
            }
            "compare" => {
                let compare: wire::CompareResponse =
                    serde_json::from_value(body).map_err(|e| ClassificationError::Malformed {
                        shape: "compare",
                        source: e,
                    })?;
                Ok(AnalysisResult::Compare(compare.try_into()?))
            }
            _ => Err(ClassificationError::UnknownType(kind)),
        }
    }
}
