//! Integration tests for the public grid detection API.

use trellis_core::GridError;
use trellis_core::api::{PageLines, detect_grids, detect_grids_in_pages};
use trellis_core::grid::{HorizontalLine, Rectangle, VerticalLine};

fn make_h(top: f64, left: f64, stretch: f64) -> HorizontalLine {
    HorizontalLine::new(top, left, stretch)
}

fn make_v(top: f64, left: f64, stretch: f64) -> VerticalLine {
    VerticalLine::new(top, left, stretch)
}

/// A fully ruled grid with `rows` x `cols` cells starting at the origin.
fn ruling_grid(rows: usize, cols: usize, cell: f64) -> PageLines {
    let width = cols as f64 * cell;
    let height = rows as f64 * cell;
    PageLines {
        horizontals: (0..=rows)
            .map(|r| make_h(r as f64 * cell, 0.0, width))
            .collect(),
        verticals: (0..=cols)
            .map(|c| make_v(0.0, c as f64 * cell, height))
            .collect(),
    }
}

#[test]
fn simple_box_is_detected() {
    let detection = detect_grids(
        &[make_h(0.0, 0.0, 20.0), make_h(10.0, 0.0, 20.0)],
        &[make_v(0.0, 0.0, 10.0), make_v(0.0, 20.0, 10.0)],
        |_, _| true,
    )
    .unwrap();

    assert_eq!(detection.rectangles, vec![Rectangle::new(0.0, 0.0, 20.0, 10.0)]);
    assert_eq!(detection.polygons.len(), 1);
}

#[test]
fn torn_box_is_repaired_through_the_pipeline() {
    // The bottom rule is missing: the sweep reports a bottom-open rectangle
    // and the repair pass closes it at the ends of the vertical rules.
    let detection = detect_grids(
        &[make_h(0.0, 0.0, 20.0)],
        &[make_v(0.0, 0.0, 10.0), make_v(0.0, 20.0, 10.0)],
        |_, _| true,
    )
    .unwrap();

    assert_eq!(detection.rectangles, vec![Rectangle::new(0.0, 0.0, 20.0, 10.0)]);
}

#[test]
fn grid_polygon_passes_a_table_threshold() {
    let page = ruling_grid(3, 4, 24.0);
    let detection = detect_grids(&page.horizontals, &page.verticals, |_, _| true).unwrap();

    assert_eq!(detection.polygons.len(), 1);
    let polygon = &detection.polygons[0];
    // The acceptance rule used downstream: at least 2 rows and 2 columns.
    assert!(polygon.row_count() >= 2);
    assert!(polygon.column_count() >= 2);
    assert_eq!(polygon.row_count(), 3);
    assert_eq!(polygon.column_count(), 4);
    assert_eq!(
        polygon.bounding_rectangle(),
        Rectangle::new(0.0, 0.0, 96.0, 72.0)
    );
}

#[test]
fn splice_condition_is_honoured() {
    // Both vertical rules torn between y=10 and y=12; the gap closes only
    // when the caller's predicate accepts it.
    let horizontals = [make_h(0.0, 0.0, 20.0), make_h(22.0, 0.0, 20.0)];
    let verticals = [
        make_v(0.0, 0.0, 10.0),
        make_v(12.0, 0.0, 10.0),
        make_v(0.0, 20.0, 10.0),
        make_v(12.0, 20.0, 10.0),
    ];

    let spliced = detect_grids(&horizontals, &verticals, |upper, lower| {
        lower.top - upper.bottom() < 5.0
    })
    .unwrap();
    assert_eq!(spliced.rectangles.len(), 3);
    for expected in [
        Rectangle::new(0.0, 0.0, 20.0, 10.0),
        Rectangle::new(0.0, 10.0, 20.0, 2.0),
        Rectangle::new(0.0, 12.0, 20.0, 10.0),
    ] {
        assert!(spliced.rectangles.contains(&expected), "missing {expected:?}");
    }

    // Without the splice each half still closes at its own rule ends, but
    // the gap rectangle never appears.
    let refused = detect_grids(&horizontals, &verticals, |_, _| false).unwrap();
    assert_eq!(refused.rectangles.len(), 2);
    assert!(
        !refused
            .rectangles
            .contains(&Rectangle::new(0.0, 10.0, 20.0, 2.0))
    );
}

#[test]
fn nan_coordinates_are_rejected() {
    let result = detect_grids(
        &[make_h(f64::NAN, 0.0, 20.0)],
        &[make_v(0.0, 0.0, 10.0)],
        |_, _| true,
    );
    assert!(matches!(
        result,
        Err(GridError::NonFiniteCoordinate { field: "top", .. })
    ));

    let result = detect_grids(
        &[make_h(0.0, 0.0, 20.0)],
        &[make_v(0.0, f64::INFINITY, 10.0)],
        |_, _| true,
    );
    assert!(matches!(
        result,
        Err(GridError::NonFiniteCoordinate { field: "left", .. })
    ));
}

#[test]
fn parallel_pages_match_sequential_runs() {
    let pages: Vec<PageLines> = (1..=4).map(|n| ruling_grid(n, n, 20.0)).collect();

    let parallel = detect_grids_in_pages(&pages, |_, _| true).unwrap();
    assert_eq!(parallel.len(), pages.len());

    for (page, detection) in pages.iter().zip(&parallel) {
        let sequential = detect_grids(&page.horizontals, &page.verticals, |_, _| true).unwrap();
        assert_eq!(detection.rectangles, sequential.rectangles);
        assert_eq!(detection.polygons.len(), sequential.polygons.len());
    }
}

#[test]
fn empty_page_detects_nothing() {
    let detection = detect_grids(&[], &[], |_, _| true).unwrap();
    assert!(detection.rectangles.is_empty());
    assert!(detection.polygons.is_empty());
}
