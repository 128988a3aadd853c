use std::cell::Cell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use minimap_chart::animation::{
    AffectedRegion, AffectedRegions, AnimatedValue, AnimationScheduler, RedirectPolicy,
    TweenBinding,
};

fn chart_window() -> AffectedRegions {
    AffectedRegions::from_region(AffectedRegion::ChartWindow)
}

#[test]
fn back_to_back_starts_reach_the_second_target() {
    let value = AnimatedValue::new(0.0);
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.create_tween(chart_window(), value.binding());

    scheduler.start(id, 100.0, 10.0).expect("first start");
    scheduler.start(id, 100.0, 20.0).expect("second start");

    scheduler.on_tick(50.0);
    assert_abs_diff_eq!(value.get(), 10.0, epsilon = 1e-9);
    scheduler.on_tick(100.0);
    assert_eq!(value.get(), 20.0);
    assert!(!scheduler.is_running(id));
}

#[test]
fn tween_started_by_hook_advances_on_next_tick() {
    let first = AnimatedValue::new(0.0);
    let second = AnimatedValue::new(0.0);
    let mut scheduler = AnimationScheduler::new();
    let first_id = scheduler.create_tween(chart_window(), first.binding());
    let second_id = scheduler.create_tween(
        AffectedRegions::from_region(AffectedRegion::Minimap),
        second.binding(),
    );

    scheduler
        .start_with_hook(first_id, 10.0, 1.0, move |scheduler| {
            scheduler
                .start(second_id, 100.0, 10.0)
                .expect("start from hook");
        })
        .expect("start");

    scheduler.on_tick(20.0);
    assert_eq!(first.get(), 1.0);
    assert!(scheduler.is_running(second_id));
    assert_eq!(second.get(), 0.0);
    assert_eq!(scheduler.tween(second_id).expect("tween").start_timestamp(), 20.0);

    scheduler.on_tick(70.0);
    assert_abs_diff_eq!(second.get(), 5.0, epsilon = 1e-9);
}

#[test]
fn tween_rearmed_by_hook_is_not_advanced_in_the_same_pass() {
    let hooked = AnimatedValue::new(0.0);
    let later = AnimatedValue::new(0.0);
    let mut scheduler = AnimationScheduler::new();
    let hooked_id = scheduler.create_tween(chart_window(), hooked.binding());
    let later_id = scheduler.create_tween(chart_window(), later.binding());

    scheduler.start(later_id, 1000.0, 100.0).expect("later");
    scheduler
        .start_with_hook(hooked_id, 10.0, 1.0, move |scheduler| {
            scheduler.cancel(later_id).expect("cancel");
            scheduler.start(later_id, 0.0, 50.0).expect("rearm");
        })
        .expect("hooked");

    scheduler.on_tick(20.0);
    assert_eq!(later.get(), 0.0);
    assert!(scheduler.is_running(later_id));

    scheduler.on_tick(30.0);
    assert_eq!(later.get(), 50.0);
    assert!(!scheduler.is_running(later_id));
}

#[test]
fn cancel_freezes_value_and_drops_hook() {
    let value = AnimatedValue::new(0.0);
    let fired = Rc::new(Cell::new(false));
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.create_tween(chart_window(), value.binding());

    let flag = Rc::clone(&fired);
    scheduler
        .start_with_hook(id, 100.0, 10.0, move |_| flag.set(true))
        .expect("start");
    scheduler.on_tick(50.0);
    scheduler.cancel(id).expect("cancel");
    scheduler.on_tick(200.0);

    assert_abs_diff_eq!(value.get(), 5.0, epsilon = 1e-9);
    assert!(!scheduler.is_running(id));
    assert!(!fired.get());
}

#[test]
fn redirect_without_hook_keeps_pending_hook() {
    let value = AnimatedValue::new(0.0);
    let fired = Rc::new(Cell::new(0));
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.create_tween(chart_window(), value.binding());

    let counter = Rc::clone(&fired);
    scheduler
        .start_with_hook(id, 100.0, 1.0, move |_| counter.set(counter.get() + 1))
        .expect("start");
    scheduler.start(id, 100.0, 2.0).expect("redirect");
    scheduler.on_tick(500.0);

    assert_eq!(value.get(), 2.0);
    assert_eq!(fired.get(), 1);
}

#[test]
fn set_duration_retunes_in_flight_tween() {
    let value = AnimatedValue::new(0.0);
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.create_tween(chart_window(), value.binding());

    scheduler.start(id, 1000.0, 1.0).expect("start");
    scheduler.on_tick(100.0);
    scheduler.set_duration(id, 200.0).expect("retune");
    scheduler.on_tick(150.0);
    assert_abs_diff_eq!(value.get(), 0.75, epsilon = 1e-9);
    scheduler.on_tick(200.0);
    assert_eq!(value.get(), 1.0);
}

#[test]
fn restart_policy_keeps_speed_constant_after_redirect() {
    let value = AnimatedValue::new(0.0);
    let mut scheduler = AnimationScheduler::with_redirect_policy(RedirectPolicy::Restart);
    let id = scheduler.create_tween(chart_window(), value.binding());

    scheduler.start(id, 100.0, 10.0).expect("start");
    scheduler.on_tick(50.0);
    scheduler.start(id, 100.0, 0.0).expect("redirect");
    scheduler.on_tick(100.0);
    assert_abs_diff_eq!(value.get(), 2.5, epsilon = 1e-9);
}

#[test]
fn custom_binding_drives_any_field() {
    let store = Rc::new(Cell::new(3.0));
    let read = Rc::clone(&store);
    let write = Rc::clone(&store);
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.create_tween(
        chart_window(),
        TweenBinding::new(move || read.get(), move |value| write.set(value)),
    );

    scheduler.start(id, 10.0, 7.0).expect("start");
    scheduler.on_tick(10.0);
    assert_eq!(store.get(), 7.0);
    assert!(scheduler.start(id, 10.0, f64::NAN).is_err());
}
