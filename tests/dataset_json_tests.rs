use minimap_chart::ChartError;
use minimap_chart::api::{ChartWidget, ChartWidgetConfig};
use minimap_chart::core::{ChartDataset, max_value_in_range};
use minimap_chart::render::{Color, NullRenderer};

const FOLLOWERS_JSON: &str = r##"{
    "columns": [
        ["x", 1542412800000, 1542499200000, 1542585600000, 1542672000000],
        ["y0", 37, 20, 32, 39],
        ["y1", 22, 12, 30, 40]
    ],
    "types": {"y0": "line", "y1": "line", "x": "x"},
    "names": {"y0": "Joined", "y1": "Left"},
    "colors": {"y0": "#3DC23F", "y1": "#F34C44"}
}"##;

#[test]
fn parses_columns_in_declared_order() {
    let dataset = ChartDataset::from_json_str(FOLLOWERS_JSON).expect("dataset");
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.series()[0].name(), "y0");
    assert_eq!(dataset.series()[0].label(), "Joined");
    assert_eq!(dataset.series()[1].color(), Color::rgba8(0xF3, 0x4C, 0x44, 1.0));
    assert_eq!(dataset.series()[1].values(), &[22.0, 12.0, 30.0, 40.0]);
    assert_eq!(max_value_in_range(dataset.series(), 0, 3), 40.0);
}

#[test]
fn missing_names_and_colors_fall_back() {
    let json = r#"{
        "columns": [["x", 1, 2], ["a", 3, 4]],
        "types": {"x": "x", "a": "line"}
    }"#;
    let dataset = ChartDataset::from_json_str(json).expect("dataset");
    assert_eq!(dataset.series()[0].label(), "a");
}

#[test]
fn rejects_malformed_datasets() {
    let cases = [
        r#"{"columns": [["y0", 1, 2]], "types": {"y0": "line"}}"#,
        r#"{"columns": [["x", 1, 2]], "types": {"x": "x"}}"#,
        r#"{"columns": [["x", 1, 2], ["y0", 1, "a"]], "types": {"x": "x", "y0": "line"}}"#,
        r#"{"columns": [["x", 1, 2], ["y0", 1, 2]], "types": {"x": "x", "y0": "bar"}}"#,
        r#"{"columns": [["x", 1, 2], ["y0", 1, 2]], "types": {"x": "x"}}"#,
        r#"{"columns": [["x"], ["y0"]], "types": {"x": "x", "y0": "line"}}"#,
        r#"{"columns": [["x", 1], ["x", 2], ["y0", 1]], "types": {"x": "x", "y0": "line"}}"#,
        r##"{"columns": [["x", 1], ["y0", 1]], "types": {"x": "x", "y0": "line"}, "colors": {"y0": "#12"}}"##,
        r#"{"columns": [[], ["y0", 1]], "types": {"y0": "line"}}"#,
        "not json",
    ];
    for input in cases {
        let err = ChartDataset::from_json_str(input).expect_err(input);
        assert!(matches!(err, ChartError::InvalidDataset(_)), "{input}: {err}");
    }
}

#[test]
fn widget_builds_from_json() {
    let widget = ChartWidget::from_json_str(
        NullRenderer::default(),
        FOLLOWERS_JSON,
        ChartWidgetConfig::new(400.0, 300.0, 60.0).with_viewport_fractions(1.0, 0.1),
    )
    .expect("widget");
    assert_eq!(widget.viewport().unit_count(), 4);
    assert_eq!(widget.viewport().left_edge_unit(), 0.0);
    assert_eq!(widget.minimap().last_max_y(), 40.0);

    let labels = widget.time_labels();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0].text.as_deref(), Some("Nov 17"));
    assert_eq!(labels[0].x_px, 50.0);
}
