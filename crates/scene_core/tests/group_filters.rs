use collision_core::{Pose, ShapeDesc};
use glam::vec2;
use scene_core::Scene;

fn block() -> ShapeDesc {
    ShapeDesc::Rect { min: vec2(-1.0, -1.0), max: vec2(1.0, 1.0) }
}

#[test]
fn filter_matches_only_the_named_group() {
    let mut s = Scene::new();
    let probe = s.spawn(ShapeDesc::Circle { radius: 0.5 }, Pose::at(vec2(0.0, 0.0)), None);
    let wall = s.spawn(block(), Pose::at(vec2(10.0, 0.0)), Some("walls"));
    let npc = s.spawn(block(), Pose::at(vec2(10.0, 0.0)), Some("npcs"));

    assert_eq!(s.occupied_at(probe, vec2(10.0, 0.0), Some("walls")), Some(wall));
    assert_eq!(s.occupied_at(probe, vec2(10.0, 0.0), Some("npcs")), Some(npc));
    let mut all = s.occupied_multiple(probe, vec2(10.0, 0.0), None);
    all.sort_unstable();
    assert_eq!(all, vec![wall, npc]);
}

#[test]
fn unknown_group_behaves_as_no_filter() {
    let mut s = Scene::new();
    let probe = s.spawn(ShapeDesc::Circle { radius: 0.5 }, Pose::at(vec2(0.0, 0.0)), None);
    let wall = s.spawn(block(), Pose::at(vec2(10.0, 0.0)), Some("walls"));
    // "lava" was never registered: the filter matches anything, not nothing.
    assert_eq!(s.occupied_at(probe, vec2(10.0, 0.0), Some("lava")), Some(wall));
}

#[test]
fn named_filter_skips_untagged_entities() {
    let mut s = Scene::new();
    let probe = s.spawn(ShapeDesc::Circle { radius: 0.5 }, Pose::at(vec2(0.0, 0.0)), None);
    let plain = s.spawn(block(), Pose::at(vec2(10.0, 0.0)), None);
    let _wall = s.spawn(block(), Pose::at(vec2(30.0, 0.0)), Some("walls"));
    // The untagged entity carries no group, so a named filter skips it.
    assert_eq!(s.occupied_at(probe, vec2(10.0, 0.0), Some("walls")), None);
    assert_eq!(s.occupied_at(probe, vec2(10.0, 0.0), None), Some(plain));
}

#[test]
fn nearest_in_group_picks_by_distance_within_the_group() {
    let mut s = Scene::new();
    let _wall_near = s.spawn(block(), Pose::at(vec2(1.0, 0.0)), Some("walls"));
    let npc_far = s.spawn(block(), Pose::at(vec2(8.0, 0.0)), Some("npcs"));
    let npc_near = s.spawn(block(), Pose::at(vec2(4.0, 0.0)), Some("npcs"));

    assert_eq!(s.nearest_in_group(vec2(0.0, 0.0), Some("npcs")), Some(npc_near));
    assert_eq!(s.nearest_in_group(vec2(10.0, 0.0), Some("npcs")), Some(npc_far));
    // Unknown group: nearest of anything.
    let nearest_any = s.nearest_in_group(vec2(0.0, 0.0), Some("ghosts"));
    assert_eq!(nearest_any, s.nearest_in_group(vec2(0.0, 0.0), None));
}

#[test]
fn nearest_in_group_empty_scene_is_none() {
    let s = Scene::new();
    assert_eq!(s.nearest_in_group(vec2(0.0, 0.0), Some("npcs")), None);
    assert_eq!(s.nearest_in_group(vec2(0.0, 0.0), None), None);
}
