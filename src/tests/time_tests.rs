#![cfg(test)]

use std::thread::sleep;
use std::time::Duration;

use crate::Time;

#[test]
fn fresh_time_has_no_delta() {
    let time = Time::new();
    assert!(time.delta_seconds().abs() < f32::EPSILON);
}

#[test]
fn update_measures_the_elapsed_wall_time() {
    let mut time = Time::new();
    sleep(Duration::from_millis(20));
    time.update();
    let delta = time.delta_seconds();
    assert!(delta >= 0.015, "delta was {delta}");
    assert!(delta < 1.0, "delta was {delta}");
}

#[test]
fn successive_updates_measure_separate_intervals() {
    let mut time = Time::new();
    sleep(Duration::from_millis(30));
    time.update();
    time.update();
    // The second interval was nearly instantaneous
    assert!(time.delta_seconds() < 0.015);
}
