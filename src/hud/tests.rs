//! HUD domain: tests for the run timer.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use std::time::Duration;

use super::timer::detect_finish;
use super::*;
use crate::level::FinishLine;
use crate::movement::Player;

// -----------------------------------------------------------------------------
// Clock formatting tests
// -----------------------------------------------------------------------------

#[test]
fn test_clock_zero_pads() {
    assert_eq!(format_clock(0.0), "00:00");
    assert_eq!(format_clock(7.9), "00:07");
    assert_eq!(format_clock(59.99), "00:59");
}

#[test]
fn test_clock_rolls_over_at_sixty_seconds() {
    assert_eq!(format_clock(60.0), "01:00");
    assert_eq!(format_clock(61.5), "01:01");
    assert_eq!(format_clock(605.0), "10:05");
}

#[test]
fn test_clock_keeps_last_two_minute_digits() {
    assert_eq!(format_clock(100.0 * 60.0 + 3.0), "00:03");
}

#[test]
fn test_clock_clamps_negative() {
    assert_eq!(format_clock(-4.0), "00:00");
}

// -----------------------------------------------------------------------------
// Run timer tests
// -----------------------------------------------------------------------------

#[test]
fn test_timer_counts_from_start() {
    let mut timer = RunTimer::default();
    timer.restart(2.0);

    assert!(!timer.is_finished());
    assert_eq!(timer.elapsed(12.5), 10.5);
}

#[test]
fn test_first_finish_freezes_and_later_ones_are_ignored() {
    let mut timer = RunTimer::default();
    timer.restart(0.0);

    assert!(timer.finish(42.0));
    assert!(timer.is_finished());
    assert_eq!(timer.elapsed(100.0), 42.0);

    assert!(!timer.finish(80.0));
    assert_eq!(timer.elapsed(200.0), 42.0);
    assert_eq!(format_clock(timer.elapsed(200.0)), "00:42");
}

#[test]
fn test_restart_clears_finish() {
    let mut timer = RunTimer::default();
    timer.finish(30.0);
    timer.restart(50.0);

    assert!(!timer.is_finished());
    assert_eq!(timer.elapsed(55.0), 5.0);
    assert!(timer.finish(70.0));
}

// -----------------------------------------------------------------------------
// Finish line tests
// -----------------------------------------------------------------------------

fn finish_world() -> (World, Entity, Entity) {
    let mut world = World::new();
    world.init_resource::<Time>();
    world.init_resource::<RunTimer>();
    world.init_resource::<Messages<CollisionStart>>();
    let player = world.spawn(Player).id();
    let finish = world.spawn(FinishLine).id();
    (world, player, finish)
}

fn enter(world: &mut World, finish: Entity, other: Entity) {
    world.write_message(CollisionStart {
        collider1: finish,
        collider2: other,
        body1: Some(finish),
        body2: Some(other),
    });
    world.run_system_cached(detect_finish).unwrap();
}

fn advance(world: &mut World, seconds: u64) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs(seconds));
}

#[test]
fn test_player_entering_finish_stops_timer_once() {
    let (mut world, player, finish) = finish_world();

    advance(&mut world, 5);
    enter(&mut world, finish, player);
    assert!(world.resource::<RunTimer>().is_finished());

    advance(&mut world, 10);
    enter(&mut world, finish, player);
    assert_eq!(world.resource::<RunTimer>().elapsed(100.0), 5.0);
}

#[test]
fn test_other_bodies_do_not_finish() {
    let (mut world, _, finish) = finish_world();
    let crate_box = world.spawn_empty().id();

    advance(&mut world, 3);
    enter(&mut world, finish, crate_box);
    assert!(!world.resource::<RunTimer>().is_finished());
}
