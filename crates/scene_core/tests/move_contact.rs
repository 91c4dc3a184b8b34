use approx::assert_abs_diff_eq;
use collision_core::ShapeDesc;
use glam::vec2;
use scene_core::Scene;

#[test]
fn mover_stops_short_of_the_wall() {
    let mut s = Scene::new();
    let mover = s.spawn_at(ShapeDesc::Circle { radius: 0.5 }, vec2(0.0, 0.0), None);
    // Wall occupying x in [4.5, 5.5].
    let _wall = s.spawn_at(
        ShapeDesc::Rect { min: vec2(-0.5, -5.0), max: vec2(0.5, 5.0) },
        vec2(5.0, 0.0),
        Some("walls"),
    );

    let moved = s.move_contact(mover, vec2(1.0, 0.0), 10.0, Some("walls"));
    // Contact when the rim reaches x=4.5, i.e. center near 4.0 (0.1 substeps).
    assert!(moved > 3.8 && moved <= 4.05, "moved {moved}");
    let pos = s.get(mover).unwrap().pose.pos;
    assert_abs_diff_eq!(pos.x, moved, epsilon = 1e-4);
    assert_abs_diff_eq!(pos.y, 0.0, epsilon = 1e-6);
    // The committed position is itself free.
    assert!(s.is_free(mover, pos, Some("walls")));
}

#[test]
fn mover_travels_the_full_distance_in_the_open() {
    let mut s = Scene::new();
    let mover = s.spawn_at(ShapeDesc::Circle { radius: 0.5 }, vec2(0.0, 0.0), None);
    let moved = s.move_contact(mover, vec2(0.0, 1.0), 3.0, None);
    assert_abs_diff_eq!(moved, 3.0, epsilon = 1e-4);
    let pos = s.get(mover).unwrap().pose.pos;
    assert_abs_diff_eq!(pos.y, 3.0, epsilon = 1e-4);
    // Registration followed the committed move.
    assert_eq!(s.registered_cells(mover), s.grid_cells_containing(mover));
}

#[test]
fn blocked_mover_does_not_move_at_all() {
    let mut s = Scene::new();
    let mover = s.spawn_at(ShapeDesc::Circle { radius: 0.5 }, vec2(0.0, 0.0), None);
    let _wall = s.spawn_at(
        ShapeDesc::Rect { min: vec2(-0.5, -5.0), max: vec2(0.5, 5.0) },
        vec2(0.6, 0.0),
        Some("walls"),
    );
    // The first substep already collides.
    let moved = s.move_contact(mover, vec2(1.0, 0.0), 5.0, Some("walls"));
    assert_eq!(moved, 0.0);
    assert_eq!(s.get(mover).unwrap().pose.pos, vec2(0.0, 0.0));
}

#[test]
fn zero_direction_is_a_no_op() {
    let mut s = Scene::new();
    let mover = s.spawn_at(ShapeDesc::Circle { radius: 0.5 }, vec2(1.0, 1.0), None);
    assert_eq!(s.move_contact(mover, vec2(0.0, 0.0), 5.0, None), 0.0);
    assert_eq!(s.get(mover).unwrap().pose.pos, vec2(1.0, 1.0));
}
