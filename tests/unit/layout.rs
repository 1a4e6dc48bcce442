use super::*;

fn phone() -> Canvas {
    Canvas::new(1206, 2622).unwrap()
}

#[test]
fn rows_fixed_derives_columns() {
    assert_eq!(GridSpec::default().resolve(365).unwrap(), (25, 15));
    assert_eq!(GridSpec::default().resolve(366).unwrap(), (25, 15));
    assert_eq!(GridSpec::default().resolve(376).unwrap(), (25, 16));
}

#[test]
fn columns_fixed_derives_rows() {
    let spec = GridSpec {
        rows: None,
        columns: Some(20),
    };
    assert_eq!(spec.resolve(365).unwrap(), (19, 20));
}

#[test]
fn invalid_grids_are_rejected() {
    let too_small = GridSpec {
        rows: Some(10),
        columns: Some(10),
    };
    assert!(too_small.resolve(365).is_err());
    assert!(GridSpec { rows: Some(0), columns: None }.resolve(365).is_err());
    assert!(GridSpec { rows: None, columns: None }.resolve(365).is_err());
    assert!(GridSpec::default().resolve(0).is_err());
}

#[test]
fn default_layout_matches_lock_screen_offsets() {
    let l = GridLayout::compute(
        phone(),
        4,
        365,
        GridSpec::default(),
        DotSpec::default(),
        Placement::default(),
    )
    .unwrap();

    assert_eq!((l.rows, l.columns), (25, 15));
    assert_eq!(l.gap, 96);
    assert_eq!(l.radius, 40);
    assert_eq!(l.canvas, Canvas { width: 4824, height: 10488 });
    assert_eq!(l.start_x, 1740);
    // top = 629*4, centered in the remaining height, plus 262*4 extra.
    assert_eq!(l.start_y, 6398);
}

#[test]
fn center_placement_is_symmetric() {
    let canvas = Canvas::new(200, 100).unwrap();
    let dot = DotSpec {
        radius: 4,
        edge_gap: 2,
    };
    let grid = GridSpec {
        rows: Some(3),
        columns: Some(5),
    };
    let l = GridLayout::compute(canvas, 1, 15, grid, dot, Placement::Center).unwrap();

    let first = l.cell(0).unwrap().center;
    let last = l.cell(14).unwrap().center;
    let left = first.x - 0.5;
    let right = f64::from(canvas.width) - (last.x - 0.5);
    let top = first.y - 0.5;
    let bottom = f64::from(canvas.height) - (last.y - 0.5);
    assert_eq!(left, right);
    assert_eq!(top, bottom);
}

#[test]
fn cells_are_row_major_and_stop_at_dot_count() {
    let l = GridLayout::compute(
        phone(),
        1,
        365,
        GridSpec::default(),
        DotSpec::default(),
        Placement::Center,
    )
    .unwrap();

    let cells: Vec<Cell> = l.cells().collect();
    assert_eq!(cells.len(), 365);
    assert_eq!(cells[0].day, 1);
    assert_eq!((cells[1].row, cells[1].column), (0, 1));
    assert_eq!((cells[15].row, cells[15].column), (1, 0));
    assert_eq!(cells[15].center.y - cells[0].center.y, f64::from(l.gap));

    // 365 = 24 full rows of 15 plus 5 in the last row.
    let last = cells[364];
    assert_eq!((last.row, last.column), (24, 4));
    assert!(l.cell(365).is_none());
}

#[test]
fn oversized_grid_may_start_off_canvas() {
    let canvas = Canvas::new(10, 10).unwrap();
    let l = GridLayout::compute(
        canvas,
        1,
        4,
        GridSpec {
            rows: Some(2),
            columns: Some(2),
        },
        DotSpec {
            radius: 10,
            edge_gap: 0,
        },
        Placement::Center,
    )
    .unwrap();
    assert_eq!(l.start_x, -5);
    assert_eq!(l.start_y, -5);
}

#[test]
fn placement_fractions_are_validated() {
    let bad = Placement::LockScreen {
        top_safe: 1.5,
        extra_offset: 0.0,
    };
    assert!(bad.validate().is_err());
    let nan = Placement::LockScreen {
        top_safe: f64::NAN,
        extra_offset: 0.0,
    };
    assert!(nan.validate().is_err());
    assert!(Placement::Center.validate().is_ok());
}

#[test]
fn placement_json_is_tagged() {
    let p: Placement =
        serde_json::from_str(r#"{"kind":"lock_screen","top_safe":0.2,"extra_offset":0.05}"#)
            .unwrap();
    assert_eq!(
        p,
        Placement::LockScreen {
            top_safe: 0.2,
            extra_offset: 0.05
        }
    );
    let p: Placement = serde_json::from_str(r#"{"kind":"center"}"#).unwrap();
    assert_eq!(p, Placement::Center);
}

#[test]
fn pitch_overflow_is_a_validation_error() {
    let huge = DotSpec {
        radius: 2_147_483_648,
        edge_gap: 4,
    };
    assert_eq!(huge.pitch(), None);
    assert_eq!(DotSpec::default().pitch(), Some(24));

    let err = GridLayout::compute(
        phone(),
        1,
        365,
        GridSpec::default(),
        huge,
        Placement::Center,
    )
    .unwrap_err();
    assert!(err.to_string().contains("validation error:"), "{err}");
}
