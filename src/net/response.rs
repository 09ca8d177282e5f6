// src/net/response.rs
use serde::Deserialize;

/// Everything the analysis service sends back for one claim upload.
///
/// An error body (`{ "error": ... }`) and a result body are structurally
/// disjoint, so untagged deserialization picks the right branch; a body
/// matching neither is a parse failure handled upstream as a transport
/// problem.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ServiceResponse {
    Failure(ServiceFailure),
    Analyzed(ClaimRecord),
}

/// Explicit application-level failure reported by the service.
#[derive(Debug, Deserialize)]
pub struct ServiceFailure {
    pub error: String,
}

/// One analyzed claim document, immutable once stored.
///
/// `analysis` is absent when the service returned a structurally valid but
/// incomplete payload; every consumer has to handle that branch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimRecord {
    pub name: String,
    pub village: String,
    pub area: String,
    pub analysis: Option<ClaimAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimAnalysis {
    pub flagged_as_anomaly: bool,
    pub forest_cover_percent: f64,
    /// Raster of detected land-cover change. May be service-relative.
    pub change_map_url: Option<String>,
}

impl ClaimRecord {
    /// Clamp numeric fields to their documented range before the record
    /// crosses into the state store. In-range values pass through exactly.
    pub fn sanitized(mut self) -> Self {
        if let Some(analysis) = self.analysis.as_mut() {
            let percent = analysis.forest_cover_percent;
            if !(0.0..=100.0).contains(&percent) {
                log::warn!("forest_cover_percent {percent} out of range, clamping");
                analysis.forest_cover_percent = percent.clamp(0.0, 100.0);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ServiceResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn success_body_parses_as_analyzed() {
        let response = parse(
            r#"{
                "name": "Ram Lal",
                "village": "X",
                "area": "2ha",
                "analysis": {
                    "flagged_as_anomaly": true,
                    "forest_cover_percent": 70.0,
                    "change_map_url": "http://127.0.0.1:8000/a.png"
                }
            }"#,
        );
        let ServiceResponse::Analyzed(record) = response else {
            panic!("expected analyzed record");
        };
        assert_eq!(record.name, "Ram Lal");
        assert_eq!(record.village, "X");
        assert_eq!(record.area, "2ha");
        let analysis = record.analysis.unwrap();
        assert!(analysis.flagged_as_anomaly);
        assert_eq!(analysis.forest_cover_percent, 70.0);
        assert_eq!(
            analysis.change_map_url.as_deref(),
            Some("http://127.0.0.1:8000/a.png")
        );
    }

    #[test]
    fn error_body_parses_as_failure() {
        let response = parse(r#"{ "error": "unreadable image" }"#);
        let ServiceResponse::Failure(failure) = response else {
            panic!("expected failure");
        };
        assert_eq!(failure.error, "unreadable image");
    }

    #[test]
    fn missing_analysis_is_tolerated() {
        let response = parse(r#"{ "name": "A", "village": "B", "area": "C" }"#);
        let ServiceResponse::Analyzed(record) = response else {
            panic!("expected analyzed record");
        };
        assert!(record.analysis.is_none());
    }

    #[test]
    fn change_map_url_is_optional() {
        let response = parse(
            r#"{
                "name": "A",
                "village": "B",
                "area": "C",
                "analysis": { "flagged_as_anomaly": false, "forest_cover_percent": 12.5 }
            }"#,
        );
        let ServiceResponse::Analyzed(record) = response else {
            panic!("expected analyzed record");
        };
        assert!(record.analysis.unwrap().change_map_url.is_none());
    }

    #[test]
    fn unstructured_body_is_a_parse_error() {
        let result: Result<ServiceResponse, _> = serde_json::from_str("<html>oops</html>");
        assert!(result.is_err());
    }

    fn record_with_percent(percent: f64) -> ClaimRecord {
        ClaimRecord {
            name: String::new(),
            village: String::new(),
            area: String::new(),
            analysis: Some(ClaimAnalysis {
                flagged_as_anomaly: false,
                forest_cover_percent: percent,
                change_map_url: None,
            }),
        }
    }

    #[test]
    fn sanitized_passes_in_range_values_through_exactly() {
        let record = record_with_percent(70.0).sanitized();
        assert_eq!(record.analysis.unwrap().forest_cover_percent, 70.0);
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let high = record_with_percent(250.0).sanitized();
        assert_eq!(high.analysis.unwrap().forest_cover_percent, 100.0);

        let low = record_with_percent(-4.0).sanitized();
        assert_eq!(low.analysis.unwrap().forest_cover_percent, 0.0);
    }

    #[test]
    fn sanitized_ignores_missing_analysis() {
        let record = ClaimRecord {
            name: String::new(),
            village: String::new(),
            area: String::new(),
            analysis: None,
        };
        assert!(record.sanitized().analysis.is_none());
    }
}
