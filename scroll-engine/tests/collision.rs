// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Integration tests for entity-level collision resolution

use scroll_engine::animation::{AnimationState, FrameSequence, FrameStore};
use scroll_engine::collision::resolve;
use scroll_engine::entity::{CollisionReaction, Entity, MAIN_CHARACTER};
use scroll_engine::geometry::{Anchor, Vector2};
use scroll_engine::hitbox::HitboxSpec;
use scroll_engine::integration::KinematicState;
use std::sync::Arc;

const DT: f64 = 1.0 / 60.0;

fn store() -> Arc<FrameStore> {
    let mut store = FrameStore::new();
    for (name, handle, size) in [
        ("Idle", 0, Vector2::new(60.0, 100.0)),
        ("Hurt", 10, Vector2::new(60.0, 100.0)),
        ("crate", 100, Vector2::new(50.0, 50.0)),
        ("tall", 200, Vector2::new(90.0, 140.0)),
        ("tall_dented", 300, Vector2::new(90.0, 140.0)),
    ] {
        store.insert(FrameSequence::strip(name, handle, 1, size).unwrap());
    }
    Arc::new(store)
}

fn mover(at: Vector2, velocity: Vector2) -> Entity {
    Entity::new(
        KinematicState::new(at).with_velocity(velocity).collidable(),
        AnimationState::new(store(), "crate").unwrap(),
    )
    .with_category(MAIN_CHARACTER)
}

fn obstacle(at: Vector2) -> Entity {
    Entity::new(
        KinematicState::new(at).collidable(),
        AnimationState::new(store(), "tall").unwrap(),
    )
    .with_category("wall")
}

#[test]
fn test_pure_x_motion_snaps_to_left_edge() {
    let mut box_ = mover(Vector2::new(0.0, 100.0), Vector2::new(600.0, 0.0));
    let mut walls = vec![obstacle(Vector2::new(55.0, 80.0))];

    box_.update(0.1);
    assert!(box_.hitbox().overlaps(&walls[0].hitbox()));

    assert!(resolve(&mut box_, &mut walls).unwrap());
    assert_eq!(box_.hitbox().right(), walls[0].hitbox().left());
    assert_eq!(box_.position().y, 100.0);
    assert!(box_.collided());
    assert!(walls[0].collided());
}

#[test]
fn test_approach_closes_gap_without_overshoot() {
    // 50x50 hitbox centred in a 60x100 frame, walking right at constant speed
    let kinematics = KinematicState::new(Vector2::new(50.0, 200.0))
        .with_velocity(Vector2::new(200.0, 0.0))
        .collidable()
        .with_hitbox(HitboxSpec::fixed(Vector2::new(50.0, 50.0), Anchor::Center));
    let mut hero = Entity::new(kinematics, AnimationState::new(store(), "Idle").unwrap())
        .with_anchor(Anchor::Center)
        .with_category(MAIN_CHARACTER);
    let mut walls = vec![obstacle(Vector2::new(300.0, 150.0))];
    let wall_left = walls[0].hitbox().left();

    let mut touched = false;
    for _ in 0..180 {
        hero.update(DT);
        let hit = resolve(&mut hero, &mut walls).unwrap();
        let gap = wall_left - hero.hitbox().right();
        assert!(gap >= -1e-9, "overshoot by {}", -gap);
        if hit {
            touched = true;
            assert!(gap.abs() < 1e-9, "gap {} after contact", gap);
            assert_eq!(hero.position().y, 200.0);
        }
    }
    assert!(touched);
    assert!((hero.hitbox().right() - wall_left).abs() < 1e-9);
}

#[test]
fn test_non_collidable_pairs_only_notify() {
    let mut ghost = Entity::new(
        KinematicState::new(Vector2::new(10.0, 10.0)),
        AnimationState::new(store(), "Idle").unwrap(),
    )
    .with_category(MAIN_CHARACTER)
    .on_collision("wall", CollisionReaction::SwitchSequence("Hurt".to_string()));
    ghost.kinematics.previous_position = Vector2::new(0.0, 10.0);

    let mut walls = vec![obstacle(Vector2::new(20.0, 20.0)).on_collision(
        MAIN_CHARACTER,
        CollisionReaction::SwitchSequence("tall_dented".to_string()),
    )];

    assert!(resolve(&mut ghost, &mut walls).unwrap());
    assert_eq!(ghost.position(), Vector2::new(10.0, 10.0));
    assert_eq!(ghost.animation.active_name(), "Hurt");
    assert_eq!(walls[0].animation.active_name(), "tall_dented");
}

#[test]
fn test_obstacles_processed_in_order() {
    let mut box_ = mover(Vector2::new(0.0, 100.0), Vector2::new(600.0, 0.0));
    // The first wall pushes the mover out of the second one's reach
    let mut walls = vec![obstacle(Vector2::new(55.0, 80.0)), obstacle(Vector2::new(100.0, 80.0))];

    box_.update(0.1);
    assert!(box_.hitbox().overlaps(&walls[1].hitbox()));

    assert!(resolve(&mut box_, &mut walls).unwrap());
    assert_eq!(box_.hitbox().right(), 55.0);
    assert!(walls[0].collided());
    assert!(!walls[1].collided());
}

#[test]
fn test_no_overlap_clears_flags() {
    let mut box_ = mover(Vector2::new(0.0, 0.0), Vector2::ZERO);
    let mut walls = vec![obstacle(Vector2::new(500.0, 500.0))];
    assert!(!resolve(&mut box_, &mut walls).unwrap());
    assert!(!box_.collided());
    assert!(!walls[0].collided());
}

#[test]
fn test_touching_edges_do_not_collide() {
    let mut box_ = mover(Vector2::new(5.0, 100.0), Vector2::ZERO);
    let mut walls = vec![obstacle(Vector2::new(55.0, 80.0))];
    assert!(!resolve(&mut box_, &mut walls).unwrap());
}
