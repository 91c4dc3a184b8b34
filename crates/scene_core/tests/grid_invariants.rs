use collision_core::{resolve, Pose, ShapeDesc};
use glam::vec2;
use scene_core::Scene;

// Independently derive the cell keys an entity should occupy: padded bounds,
// floored by the cell size (defaults: cell 4.0, margin 0.25).
fn expected_cells(shape: &ShapeDesc, pose: &Pose) -> Vec<(i32, i32)> {
    let bb = resolve(shape, pose).bounds().expand(0.25);
    let x0 = (bb.min.x / 4.0).floor() as i32;
    let x1 = (bb.max.x / 4.0).floor() as i32;
    let y0 = (bb.min.y / 4.0).floor() as i32;
    let y1 = (bb.max.y / 4.0).floor() as i32;
    let mut keys = Vec::new();
    for cx in x0..=x1 {
        for cy in y0..=y1 {
            keys.push((cx, cy));
        }
    }
    keys.sort_unstable();
    keys
}

#[test]
fn registration_tracks_moves_exactly() {
    let mut s = Scene::new();
    let shape = ShapeDesc::Circle { radius: 1.5 };
    let id = s.spawn(shape.clone(), Pose::at(vec2(0.0, 0.0)), None);

    let path = [
        vec2(0.0, 0.0),
        vec2(3.9, 0.0),   // straddles a cell boundary
        vec2(-7.3, 2.2),  // negative cells
        vec2(100.0, -50.0),
        vec2(0.05, 0.05), // back near the origin corner
    ];
    for pos in path {
        let pose = Pose::at(pos);
        s.set_pose(id, pose);
        let expected = expected_cells(&shape, &pose);
        assert_eq!(
            s.registered_cells(id),
            expected,
            "registered keys diverged at {pos:?}"
        );
        // The full bucket scan must agree: no stale entry left anywhere.
        assert_eq!(
            s.grid_cells_containing(id),
            expected,
            "stale or missing bucket entries at {pos:?}"
        );
    }
}

#[test]
fn shape_change_reregisters() {
    let mut s = Scene::new();
    let id = s.spawn(ShapeDesc::Circle { radius: 0.5 }, Pose::at(vec2(2.0, 2.0)), None);
    let before = s.registered_cells(id);
    assert_eq!(before.len(), 1);

    // Growing the shape to span many cells must add registrations.
    let big = ShapeDesc::Circle { radius: 10.0 };
    s.set_shape(id, big.clone());
    let expected = expected_cells(&big, &Pose::at(vec2(2.0, 2.0)));
    assert_eq!(s.registered_cells(id), expected);
    assert_eq!(s.grid_cells_containing(id), expected);
}

#[test]
fn scale_and_rotation_feed_registration() {
    let mut s = Scene::new();
    let shape = ShapeDesc::Rect { min: vec2(-4.0, -0.5), max: vec2(4.0, 0.5) };
    let id = s.spawn(shape.clone(), Pose::at(vec2(0.0, 0.0)), None);
    let wide = s.registered_cells(id).len();

    // Rotating the long rect upright changes which cells it covers.
    let pose = Pose::at(vec2(0.0, 0.0)).with_rot_deg(90.0);
    s.set_pose(id, pose);
    assert_eq!(s.registered_cells(id), expected_cells(&shape, &pose));

    // Mirroring keeps the footprint; doubling the scale grows it.
    let mirrored = Pose::at(vec2(0.0, 0.0)).with_scale(vec2(-1.0, 1.0));
    s.set_pose(id, mirrored);
    assert_eq!(s.registered_cells(id).len(), wide);
    let doubled = Pose::at(vec2(0.0, 0.0)).with_scale(vec2(2.0, 2.0));
    s.set_pose(id, doubled);
    assert_eq!(s.registered_cells(id), expected_cells(&shape, &doubled));
}

#[test]
fn many_entities_despawn_cleanly() {
    let mut s = Scene::new();
    let mut ids = Vec::new();
    for i in 0..50 {
        let x = (i as f32 % 10.0) * 2.0;
        let y = (i as f32 / 10.0).floor() * 2.0;
        ids.push(s.spawn_at(ShapeDesc::Circle { radius: 0.8 }, vec2(x, y), None));
    }
    for id in &ids {
        assert!(s.despawn(*id));
    }
    assert!(s.is_empty());
    for id in &ids {
        assert!(s.grid_cells_containing(*id).is_empty());
    }
}
