use approx::assert_abs_diff_eq;
use minimap_chart::animation::AnimationScheduler;
use minimap_chart::core::{ChartSeries, Viewport};
use minimap_chart::render::Color;
use minimap_chart::state::{ChartWindowAxisState, ChartWindowSettings, LabelDensityPhase};

fn settings() -> ChartWindowSettings {
    ChartWindowSettings {
        height_px: 400.0,
        top_margin_px: 20.0,
        bottom_margin_px: 45.0,
        min_grid_step_px: 70.0,
        desired_label_spacing_px: 60.0,
        y_scale_duration_ms: 300.0,
        grid_crossfade_duration_ms: 500.0,
        label_fade_duration_ms: 1000.0,
    }
}

fn series(values: Vec<f64>) -> Vec<ChartSeries> {
    vec![ChartSeries::new("y0", "Line", Color::rgb(0.1, 0.2, 0.3), values).expect("series")]
}

#[test]
fn zooming_in_halves_label_step_and_settles_stable() {
    let mut scheduler = AnimationScheduler::new();
    // 25 units over 500 px: 20 px per unit, so labels start every 4 units.
    let mut viewport = Viewport::new(100, 500.0, 0.25, 0.1).expect("viewport");
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);
    assert_eq!(axis.label_step_units(), 4);

    viewport.set_left_edge_unit(87.5);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("viewport updated");
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Adding);
    assert_eq!(axis.label_step_units(), 2);
    assert_eq!(axis.label_alpha(), 0.0);

    scheduler.on_tick(500.0);
    assert_abs_diff_eq!(axis.label_alpha(), 0.5, epsilon = 1e-9);
    assert!(axis.is_adding_labels());

    scheduler.on_tick(1000.0);
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Stable);
    assert_eq!(axis.label_step_units(), 2);
    assert_eq!(axis.label_alpha(), 1.0);
}

#[test]
fn zooming_out_doubles_label_step_after_fade_out() {
    let mut scheduler = AnimationScheduler::new();
    let mut viewport = Viewport::new(100, 1000.0, 0.25, 0.1).expect("viewport");
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);
    assert_eq!(axis.label_step_units(), 2);

    // 50 units over 1000 px: labels every 2 units sit 40 px apart.
    viewport.set_left_edge_unit(50.0);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("viewport updated");
    assert!(axis.is_removing_labels());
    assert_eq!(axis.label_step_units(), 2);

    let labels = axis.visible_time_labels(&viewport, &[0.0; 100]);
    assert!(labels.iter().any(|label| label.fading));
    for label in &labels {
        assert_eq!(label.fading, (label.index / 2) % 2 == 1);
    }

    scheduler.on_tick(1000.0);
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Stable);
    assert_eq!(axis.label_step_units(), 4);
    assert_eq!(axis.label_alpha(), 0.0);
    assert!(axis
        .visible_time_labels(&viewport, &[0.0; 100])
        .iter()
        .all(|label| !label.fading && label.alpha == 1.0));
}

#[test]
fn squeezing_further_while_removing_shortens_the_fade() {
    let mut scheduler = AnimationScheduler::new();
    let mut viewport = Viewport::new(100, 1000.0, 0.25, 0.1).expect("viewport");
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);

    viewport.set_left_edge_unit(50.0);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("start removing");
    // 2 units now 30 px apart: half the desired spacing.
    viewport.set_left_edge_unit(100.0 - 1000.0 / 15.0);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("retune");

    let tween = scheduler.tween(axis.label_alpha_tween()).expect("tween");
    assert_abs_diff_eq!(tween.duration_ms(), 0.0, epsilon = 1e-6);
    scheduler.on_tick(1.0);
    assert_eq!(axis.label_step_units(), 4);
}

#[test]
fn steady_zoom_between_thresholds_does_not_flip() {
    let mut scheduler = AnimationScheduler::new();
    let mut viewport = Viewport::new(100, 1000.0, 0.25, 0.1).expect("viewport");
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);

    // 45 px per unit: step 2 labels 90 px apart, between 60 and 120.
    viewport.set_left_edge_unit(100.0 - 1000.0 / 45.0);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("viewport updated");
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Stable);
    assert_eq!(axis.label_step_units(), 2);
    assert!(!scheduler.has_running_tweens());
}

#[test]
fn labels_between_one_and_two_minimum_spacings_keep_their_step() {
    let mut scheduler = AnimationScheduler::new();
    // 50 units over 1000 px: 20 px per unit, labels every 4 units.
    let mut viewport = Viewport::new(100, 1000.0, 0.5, 0.1).expect("viewport");
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);
    assert_eq!(axis.label_step_units(), 4);

    // 25 px per unit: labels 100 px apart, halving would give 50 px.
    viewport.set_left_edge_unit(60.0);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("viewport updated");
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Stable);
    assert_eq!(axis.label_step_units(), 4);

    // 32 px per unit: labels 128 px apart, halving keeps 64 px.
    viewport.set_left_edge_unit(68.75);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("viewport updated");
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Adding);
    assert_eq!(axis.label_step_units(), 2);

    scheduler.on_tick(1000.0);
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Stable);
    // 31.25 px per unit: halved labels stay 62.5 px apart.
    viewport.set_left_edge_unit(68.0);
    axis.viewport_updated(&viewport, &mut scheduler)
        .expect("viewport updated");
    assert_eq!(axis.label_density_phase(), LabelDensityPhase::Stable);
    assert_eq!(axis.label_step_units(), 2);
    assert!(!scheduler.has_running_tweens());
}

#[test]
fn rescale_crossfades_grid_and_converges() {
    let mut scheduler = AnimationScheduler::new();
    let mut viewport = Viewport::new(101, 1000.0, 1.0, 0.1).expect("viewport");
    let lines = series((0..=100).map(f64::from).collect());
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);

    assert!(axis
        .update_max_y(&viewport, &lines, &mut scheduler, true)
        .expect("initial max"));
    assert_eq!(axis.animated_max_y(), 100.0);
    assert_eq!(axis.current_grid_divides()[0], 0.0);

    viewport.set_right_edge_unit(50.0);
    assert!(axis
        .update_max_y(&viewport, &lines, &mut scheduler, false)
        .expect("rescale"));
    assert_eq!(axis.last_max_y(), 50.0);
    assert_eq!(axis.grid_alpha(), 0.0);
    assert!(!axis.previous_grid_divides().is_empty());

    scheduler.on_tick(250.0);
    assert_abs_diff_eq!(axis.grid_alpha() + axis.previous_grid_alpha(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(axis.grid_alpha(), 0.5, epsilon = 1e-9);
    assert!(axis.animated_max_y() > 50.0);

    scheduler.on_tick(500.0);
    assert_eq!(axis.animated_max_y(), 50.0);
    assert_eq!(axis.grid_alpha(), 1.0);

    assert!(!axis
        .update_max_y(&viewport, &lines, &mut scheduler, false)
        .expect("unchanged"));
}

#[test]
fn all_negative_data_collapses_grid_to_zero_line() {
    let mut scheduler = AnimationScheduler::new();
    let viewport = Viewport::new(10, 500.0, 1.0, 0.1).expect("viewport");
    let lines = series(vec![-3.0; 10]);
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);

    assert!(!axis
        .update_max_y(&viewport, &lines, &mut scheduler, false)
        .expect("max"));
    assert_eq!(axis.current_grid_divides(), &[0.0]);
    assert_eq!(axis.value_to_pixel(5.0), 355.0);
}

#[test]
fn value_to_pixel_respects_margins() {
    let mut scheduler = AnimationScheduler::new();
    let viewport = Viewport::new(10, 500.0, 1.0, 0.1).expect("viewport");
    let lines = series((0..10).map(|i| f64::from(i) * 10.0).collect());
    let mut axis = ChartWindowAxisState::new(&mut scheduler, settings(), &viewport);
    axis.update_max_y(&viewport, &lines, &mut scheduler, true)
        .expect("max");

    assert_eq!(axis.animated_max_y(), 90.0);
    assert_eq!(axis.value_to_pixel(90.0), 20.0);
    assert_eq!(axis.value_to_pixel(0.0), 355.0);
}
