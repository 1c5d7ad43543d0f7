mod common;

use common::{blank_page, cut_top_wall_gap, draw_wall_outline, png_payload};
use rooms::{AnalysisResponse, PipelineConfig, RoomCandidate, RoomError, analyze_floor_plan};

/// 320x220 wall outline, 10px walls, on a 420x320 page. The interior is
/// a 300x200 room (60000 px² geometric area).
fn rectangle_room_payload() -> String {
    let mut page = blank_page(420, 320);
    draw_wall_outline(&mut page, 50, 50, 320, 220, 10);
    png_payload(&page)
}

/// A band that keeps the 300x200 interior but culls the wall's outer
/// shell (~71000 px²), standing in for the page-boundary removal the
/// default 1000000 px² cap performs on full-size scans.
fn interior_only_config() -> PipelineConfig {
    PipelineConfig {
        max_area: 65_000.0,
        ..Default::default()
    }
}

const INTERIOR_AREA: f64 = 60_000.0;

fn relative_to_interior(room: &RoomCandidate) -> f64 {
    (room.area_px - INTERIOR_AREA).abs() / INTERIOR_AREA
}

#[test]
fn rectangle_room_reports_interior_and_outer_shell() {
    let result = analyze_floor_plan(&rectangle_room_payload(), &PipelineConfig::default()).unwrap();

    // Both the wall's outer boundary and the room interior fall inside
    // the default area band; nesting depth is deliberately not used to
    // filter, so both are reported.
    assert_eq!(result.rooms.len(), 2);
    assert_eq!(result.image_width, 420);
    assert_eq!(result.image_height, 320);

    let interior = result
        .rooms
        .iter()
        .min_by(|a, b| relative_to_interior(a).total_cmp(&relative_to_interior(b)))
        .unwrap();
    let shell = result
        .rooms
        .iter()
        .max_by(|a, b| a.area_px.total_cmp(&b.area_px))
        .unwrap();

    assert!(relative_to_interior(interior) < 0.05);
    assert!(shell.area_px > interior.area_px);
}

#[test]
fn banded_config_yields_exactly_one_rectangular_room() {
    let result = analyze_floor_plan(&rectangle_room_payload(), &interior_only_config()).unwrap();

    assert_eq!(result.rooms.len(), 1);
    let room = &result.rooms[0];

    assert_eq!(room.points.len(), 4, "polygon: {:?}", room.points);
    assert!(relative_to_interior(room) < 0.05, "area {}", room.area_px);
    assert!(room.perimeter_px > 900.0 && room.perimeter_px < 1100.0);

    // Each simplified vertex sits within a few pixels of a true interior
    // corner, and every corner is matched.
    let corners = [[60, 60], [359, 60], [359, 259], [60, 259]];
    for corner in corners {
        assert!(
            room.points.iter().any(|p| {
                (p[0] - corner[0]).abs() <= 5 && (p[1] - corner[1]).abs() <= 5
            }),
            "no vertex near corner {corner:?}: {:?}",
            room.points
        );
    }
}

#[test]
fn eight_pixel_doorway_gap_is_bridged_closed() {
    let mut page = blank_page(420, 320);
    draw_wall_outline(&mut page, 50, 50, 320, 220, 10);
    cut_top_wall_gap(&mut page, 200, 8, 50, 10);

    let result = analyze_floor_plan(&png_payload(&page), &interior_only_config()).unwrap();

    assert_eq!(result.rooms.len(), 1, "areas: {:?}",
        result.rooms.iter().map(|r| r.area_px).collect::<Vec<_>>());
    assert!(relative_to_interior(&result.rooms[0]) < 0.05);
}

#[test]
fn forty_pixel_gap_exceeds_the_closing_reach() {
    let mut page = blank_page(420, 320);
    draw_wall_outline(&mut page, 50, 50, 320, 220, 10);
    cut_top_wall_gap(&mut page, 180, 40, 50, 10);

    let result = analyze_floor_plan(&png_payload(&page), &interior_only_config()).unwrap();

    // The room is no longer a closed region: nothing close to the true
    // interior area comes back (the broken wall stroke itself may).
    assert!(
        result.rooms.iter().all(|room| relative_to_interior(room) > 0.10),
        "areas: {:?}",
        result.rooms.iter().map(|r| r.area_px).collect::<Vec<_>>()
    );
}

#[test]
fn identical_payloads_yield_identical_results() {
    let payload = rectangle_room_payload();
    let config = PipelineConfig::default();

    let first = analyze_floor_plan(&payload, &config).unwrap();
    let second = analyze_floor_plan(&payload, &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn every_candidate_satisfies_the_documented_invariants() {
    let mut gapped = blank_page(420, 320);
    draw_wall_outline(&mut gapped, 50, 50, 320, 220, 10);
    cut_top_wall_gap(&mut gapped, 200, 8, 50, 10);

    let config = PipelineConfig::default();
    for payload in [rectangle_room_payload(), png_payload(&gapped)] {
        let result = analyze_floor_plan(&payload, &config).unwrap();
        for room in &result.rooms {
            assert!(room.area_px >= 1000.0 && room.area_px < 1_000_000.0);
            assert!(room.points.len() >= 3);
            assert!(room.perimeter_px > 0.0);
        }
    }
}

#[test]
fn parallel_analyses_do_not_cross_contaminate() {
    // Two plans with very different interiors: 300x200 and 150x100.
    let large = rectangle_room_payload();
    let mut page = blank_page(300, 250);
    draw_wall_outline(&mut page, 60, 60, 170, 120, 10);
    let small = png_payload(&page);
    let small_interior = 150.0 * 100.0;

    std::thread::scope(|scope| {
        for _ in 0..2 {
            scope.spawn(|| {
                let result = analyze_floor_plan(&large, &interior_only_config()).unwrap();
                assert_eq!(result.rooms.len(), 1);
                assert!(relative_to_interior(&result.rooms[0]) < 0.05);
            });
            scope.spawn(|| {
                let result = analyze_floor_plan(&small, &PipelineConfig::default()).unwrap();
                assert!(result.rooms.iter().any(|room| {
                    (room.area_px - small_interior).abs() / small_interior < 0.08
                }));
                assert!(result.rooms.iter().all(|room| {
                    (room.area_px - INTERIOR_AREA).abs() / INTERIOR_AREA > 0.10
                }));
            });
        }
    });
}

#[test]
fn malformed_payloads_surface_as_typed_errors() {
    let config = PipelineConfig::default();

    let empty = analyze_floor_plan("", &config).unwrap_err();
    assert!(matches!(empty, RoomError::MalformedInput(_)));

    let not_base64 = analyze_floor_plan("definitely *** not base64", &config).unwrap_err();
    assert!(matches!(not_base64, RoomError::MalformedInput(_)));

    let not_an_image = analyze_floor_plan("aGVsbG8gd29ybGQ=", &config).unwrap_err();
    assert!(matches!(not_an_image, RoomError::ImageDecode(_)));
}

#[test]
fn errors_map_to_the_error_envelope() {
    let outcome = analyze_floor_plan("%%%", &PipelineConfig::default());
    let envelope = AnalysisResponse::from_result(outcome);

    match envelope {
        AnalysisResponse::Error { message } => {
            assert!(!message.is_empty());
            assert!(message.contains("base64"));
        }
        AnalysisResponse::Success { .. } => panic!("expected an error envelope"),
    }
}

#[test]
fn data_uri_payloads_are_accepted() {
    let payload = format!("data:image/png;base64,{}", rectangle_room_payload());
    let result = analyze_floor_plan(&payload, &interior_only_config()).unwrap();
    assert_eq!(result.rooms.len(), 1);
}
