//! End-to-end tests: document text through to a SurveyReport.

use survey_oxide::config::{GeographicWindow, PipelineConfig, ZoneMetadata};
use survey_oxide::crs::Crs;
use survey_oxide::extractors::{BaseMode, PlainTextSource};
use survey_oxide::pipeline::{ProjectedLabel, SurveyPipeline};
use survey_oxide::Error;
use tempfile::tempdir;

const GEO_SCENARIO: &str = "23.5505,-46.6333 23.5510,-46.6340 23.5520,-46.6300";
const UTM_SCENARIO: &str = "320000,7395000 320100,7395000 320050,7395100";

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_geographic_triangle() {
    let report = SurveyPipeline::new()
        .process(GEO_SCENARIO, &ZoneMetadata::default())
        .unwrap();

    assert_eq!(report.detected, BaseMode::Geographic);
    assert_eq!(report.points_count, 4);
    assert!(report.area > 0.0);
    assert!(report.perimeter > 0.0);
    assert_eq!(report.points[0].x, -46.6333);
    assert_eq!(report.points[0].y, -23.5505);
}

#[test]
fn test_scenario_projected_with_zone() {
    let meta = ZoneMetadata::with_zone(23, true);
    let report = SurveyPipeline::new().process(UTM_SCENARIO, &meta).unwrap();

    assert_eq!(report.detected, BaseMode::Projected);
    assert_eq!(report.geometry.geographic_points.len(), 4);
    assert!(report
        .geometry
        .geographic_points
        .iter()
        .all(|p| p.x > -48.0 && p.x < -42.0 && p.y > -24.0 && p.y < -23.0));

    let projected = report.geometry.projected.as_ref().unwrap();
    assert_eq!(projected.crs, Crs::Utm { zone: 23, south: true });
    assert_eq!(projected.label, ProjectedLabel::ZoneExact);
    // Area and perimeter are in the base (metric) CRS
    assert!((report.area - 5000.0).abs() < 1e-6);
}

#[test]
fn test_scenario_projected_without_zone() {
    let err = SurveyPipeline::new()
        .process(UTM_SCENARIO, &ZoneMetadata::default())
        .unwrap_err();
    assert!(matches!(err, Error::MissingZoneMetadata { field: "utm_zone" }));
}

#[test]
fn test_scenario_two_geographic_pairs() {
    let err = SurveyPipeline::new()
        .process("-23.5505,-46.6333 -23.5510,-46.6340", &ZoneMetadata::default())
        .unwrap_err();
    match err {
        Error::InsufficientEvidence {
            projected,
            geographic,
        } => {
            assert_eq!(projected, 0);
            assert_eq!(geographic, 2);
        },
        other => panic!("expected InsufficientEvidence, got {other:?}"),
    }
}

#[test]
fn test_unsigned_lot_numbers_do_not_override_projected() {
    let text = "V1 320000,7395000\nV2 320100,7395000\nV3 320050,7395100\n\
                Confrontantes lotes 15 45 / 20 50 / 12 40 / 25 35";
    let report = SurveyPipeline::new()
        .process(text, &ZoneMetadata::with_zone(23, true))
        .unwrap();
    assert_eq!(report.detected, BaseMode::Projected);
    assert!((report.area - 5000.0).abs() < 1e-6);
}

#[test]
fn test_comma_decimal_geographic_text() {
    let report = SurveyPipeline::new()
        .process("-23,5505 -46,6333\n-23,5510 -46,6340\n-23,5520 -46,6300", &ZoneMetadata::default())
        .unwrap();
    assert_eq!(report.detected, BaseMode::Geographic);
    assert_eq!(report.points[0].x, -46.6333);
    assert_eq!(report.points[0].y, -23.5505);
}

#[test]
fn test_zone_zero_means_no_zone() {
    let meta = ZoneMetadata::from_json(r#"{"utm_zone": 0}"#).unwrap();
    let report = SurveyPipeline::new().process(GEO_SCENARIO, &meta).unwrap();
    assert_eq!(report.geometry.projected_label(), Some(ProjectedLabel::ApproximateFallback));
    assert_eq!(report.suggested_utm_zone, Some(23));

    let err = SurveyPipeline::new().process(UTM_SCENARIO, &meta).unwrap_err();
    assert!(matches!(err, Error::MissingZoneMetadata { field: "utm_zone" }));
}

#[test]
fn test_scenario_collinear_points() {
    let err = SurveyPipeline::new()
        .process("-23.0 -46.0 -23.5 -46.5 -24.0 -47.0 -24.5 -47.5", &ZoneMetadata::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry { .. }));
}

// ============================================================================
// Report contents
// ============================================================================

#[test]
fn test_center_is_mean_of_closed_ring() {
    let report = SurveyPipeline::new()
        .process(GEO_SCENARIO, &ZoneMetadata::default())
        .unwrap();
    // The closing vertex repeats the first point and counts twice
    let lons = [-46.6333, -46.6340, -46.6300, -46.6333];
    let lats = [-23.5505, -23.5510, -23.5520, -23.5505];
    let mean_lon = lons.iter().sum::<f64>() / 4.0;
    let mean_lat = lats.iter().sum::<f64>() / 4.0;
    assert!((report.center.lon - mean_lon).abs() < 1e-12);
    assert!((report.center.lat - mean_lat).abs() < 1e-12);
}

#[test]
fn test_report_json_shape() {
    let meta = ZoneMetadata::from_json(r#"{"utm_zone": 23, "name": "Lote 12"}"#).unwrap();
    let report = SurveyPipeline::new().process(UTM_SCENARIO, &meta).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["name"], "Lote 12");
    assert_eq!(json["detected"], "projected");
    assert_eq!(json["points_count"], 4);
    assert_eq!(json["geometry"]["projected"]["label"], "zone-exact");
    assert_eq!(json["geometry"]["projected"]["crs"], "EPSG:32723");
    assert!(json.get("suggested_utm_zone").is_none());
    assert_eq!(json["points"].as_array().unwrap().len(), 4);
}

#[test]
fn test_fallback_disabled_leaves_projected_empty() {
    let pipeline = SurveyPipeline::with_config(PipelineConfig::new().with_mercator_fallback(false));
    let report = pipeline.process(GEO_SCENARIO, &ZoneMetadata::default()).unwrap();
    assert!(report.geometry.projected.is_none());
    assert_eq!(report.suggested_utm_zone, Some(23));
}

#[test]
fn test_geographic_with_zone_is_exact() {
    let report = SurveyPipeline::new()
        .process(GEO_SCENARIO, &ZoneMetadata::with_zone(23, true))
        .unwrap();
    assert_eq!(report.geometry.projected_label(), Some(ProjectedLabel::ZoneExact));
}

#[test]
fn test_regional_window_is_configurable() {
    let europe = GeographicWindow {
        lat_min: 40.0,
        lat_max: 55.0,
        lon_min: -5.0,
        lon_max: 10.0,
    };
    let config = PipelineConfig::new().with_window(europe).with_recover_unsigned(false);
    let report = SurveyPipeline::with_config(config)
        .process("48.8566 2.3522 48.8570 2.3530 48.8560 2.3540", &ZoneMetadata::default())
        .unwrap();
    assert_eq!(report.detected, BaseMode::Geographic);
    assert_eq!(report.suggested_utm_zone, Some(31));
}

#[test]
fn test_multi_page_text_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("memorial.txt");
    std::fs::write(
        &path,
        "MEMORIAL DESCRITIVO\n\u{c}\u{c}V1 320000,7395000\nV2 320100,7395000\u{c}V3 320050,7395100\n",
    )
    .unwrap();

    let report = SurveyPipeline::new()
        .process_source(&mut PlainTextSource::new(&path), &ZoneMetadata::with_zone(23, true))
        .unwrap();
    assert_eq!(report.detected, BaseMode::Projected);
    assert_eq!(report.points_count, 4);
}

#[test]
fn test_pipeline_is_shareable_across_threads() {
    let pipeline = std::sync::Arc::new(SurveyPipeline::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || {
                pipeline
                    .process(GEO_SCENARIO, &ZoneMetadata::default())
                    .map(|r| r.points_count)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 4);
    }
}
