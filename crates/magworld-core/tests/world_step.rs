use magworld_core::{
    Body, BodyId, BodySet, Displacement, Intent, Position, Registry, Shape, VecEventSink, World,
    WorldError, WorldEvent,
};

struct Scene {
    world: World,
    wall: BodyId,
    boxed: BodyId,
}

/// 3x3 hollow agent, a fixed wall column at x = 10 and a 2x2 movable box.
fn scene(agent_at: (i32, i32), box_at: (i32, i32)) -> Scene {
    let mut registry = Registry::new();
    let agent = registry
        .insert(Body::new("agent", Shape::rect(3, 3).expect("agent"), agent_at))
        .expect("agent");
    let wall_shape = Shape::builder().vline(0, 0, 40).build().expect("wall");
    let wall = registry
        .insert(Body::new("wall", wall_shape, (10, 0)).fixed())
        .expect("wall");
    let boxed = registry
        .insert(Body::new("box", Shape::rect(2, 2).expect("box"), box_at))
        .expect("box");
    Scene {
        world: World::new(registry, agent).expect("world"),
        wall,
        boxed,
    }
}

fn east() -> Intent {
    Intent::moving(1, 0)
}

fn position(world: &World, id: BodyId) -> Position {
    world.registry().get(id).expect("body").position()
}

fn set(ids: &[BodyId]) -> BodySet {
    ids.iter().copied().collect()
}

#[test]
fn world_rejects_bad_agents() {
    let mut registry = Registry::new();
    let wall = registry
        .insert(Body::new("wall", Shape::new([(0, 0)]).expect("wall"), (0, 0)).fixed())
        .expect("wall");
    assert_eq!(
        World::new(registry.clone(), wall).err(),
        Some(WorldError::FixedAgent("wall".to_string()))
    );

    let mut other = Registry::new();
    for i in 0..3i32 {
        other
            .insert(Body::new(format!("b{i}"), Shape::new([(0, 0)]).expect("b"), (i, 0)))
            .expect("b");
    }
    let foreign = other.find("b2").expect("b2");
    assert!(matches!(
        World::new(registry, foreign),
        Err(WorldError::UnknownBody(_))
    ));
}

#[test]
fn fresh_world_is_idle() {
    let s = scene((0, 0), (0, 20));
    assert!(s.world.contacts().is_none());
    assert!(s.world.holding().is_empty());
    assert!(!s.world.temp_stop());
    assert_eq!(s.world.tick(), 0);
}

#[test]
fn approaching_a_fixed_wall_stops_on_first_contact() {
    // Agent spans x 6..=8; one empty column (x = 9) before the wall.
    let mut s = scene((6, 5), (0, 20));
    let agent = s.world.agent();

    let r = s.world.evolve(&east());
    assert_eq!(r.realized, Displacement::new(1, 0));
    assert!(!s.world.temp_stop());
    assert_eq!(position(&s.world, agent), Position::new(7, 5));

    for _ in 0..2 {
        let r = s.world.evolve(&east());
        assert_eq!(r.realized, Displacement::ZERO);
        assert!(s.world.temp_stop());
        assert_eq!(position(&s.world, agent), Position::new(7, 5));
    }

    assert_eq!(s.world.contacts(), Some(&set(&[agent, s.wall])));
    assert!(s.world.sensors().touch.east);
    assert!(!s.world.sensors().is_moving());
}

#[test]
fn collision_is_reported_once_and_blocking_every_tick() {
    let mut s = scene((6, 5), (0, 20));
    let mut events = VecEventSink::default();

    let reports: Vec<_> = (0..3)
        .map(|_| s.world.evolve_with(&east(), &mut events))
        .collect();

    assert_eq!(
        reports.iter().map(|r| r.collided).collect::<Vec<_>>(),
        vec![false, true, false]
    );
    assert!(reports[1].fixed_contact && reports[2].fixed_contact);

    let collisions = events
        .events
        .iter()
        .filter(|e| matches!(e, WorldEvent::CollisionStop { .. }))
        .count();
    let blocked: Vec<u64> = events
        .events
        .iter()
        .filter_map(|e| match e {
            WorldEvent::Blocked { tick, by_fixed, .. } => {
                assert!(*by_fixed);
                Some(*tick)
            }
            _ => None,
        })
        .collect();
    assert_eq!(collisions, 1);
    assert_eq!(blocked, vec![1, 2]);
    assert!(matches!(
        events.events[0],
        WorldEvent::Moved { tick: 0, carried: 0, .. }
    ));
}

#[test]
fn starting_against_a_wall_blocks_without_latching() {
    // Agent spans x 7..=9, flush against the wall.
    let mut s = scene((7, 5), (0, 20));

    for _ in 0..3 {
        let r = s.world.evolve(&east());
        assert_eq!(r.realized, Displacement::ZERO);
        assert!(r.fixed_contact);
        assert!(!s.world.temp_stop());
    }
}

#[test]
fn sliding_along_a_wall_keeps_moving() {
    let mut s = scene((7, 5), (0, 20));
    let agent = s.world.agent();
    let south = Intent::moving(0, 1);

    for step in 1..=5 {
        let r = s.world.evolve(&south);
        assert_eq!(r.realized, Displacement::new(0, 1));
        assert!(!s.world.temp_stop());
        assert!(s.world.sensors().touch.east);
        assert_eq!(position(&s.world, agent), Position::new(7, 5 + step));
        assert_eq!(s.world.contacts(), Some(&set(&[agent])));
    }
}

#[test]
fn going_idle_resets_contacts_and_unlatches() {
    let mut s = scene((6, 5), (0, 20));
    for _ in 0..2 {
        s.world.evolve(&east());
    }
    assert!(s.world.temp_stop());

    let r = s.world.evolve(&Intent::IDLE);
    assert!(!r.attempting);
    assert_eq!(r.realized, Displacement::ZERO);
    assert!(s.world.contacts().is_none());
    assert!(!s.world.temp_stop());

    // Pressing again into the wall is blocked by the fixed body, not the latch.
    let r = s.world.evolve(&east());
    assert_eq!(r.realized, Displacement::ZERO);
    assert!(!r.collided);
    assert!(!s.world.temp_stop());
}

#[test]
fn first_press_against_a_movable_prop_is_not_a_collision() {
    // Box spans x 3..=4, flush with the agent's east side.
    let mut s = scene((0, 5), (3, 5));
    let agent = s.world.agent();

    let r = s.world.evolve(&east());
    assert!(!r.collided);
    assert!(!r.fixed_contact);
    assert_eq!(r.realized, Displacement::new(1, 0));
    assert_eq!(s.world.contacts(), Some(&set(&[agent, s.boxed])));
    // Contacts are not carried: only the agent moved.
    assert_eq!(position(&s.world, s.boxed), Position::new(3, 5));
}

#[test]
fn pickup_carry_and_drop_round_trip() {
    let mut s = scene((5, 5), (8, 5));
    let agent = s.world.agent();
    let north = Intent::moving(0, -1);

    let r = s.world.evolve(&Intent::pickup());
    assert!(r.attempting);
    assert_eq!(r.realized, Displacement::ZERO);
    assert_eq!(s.world.holding(), &set(&[agent, s.boxed]));
    assert_eq!(s.world.contacts(), Some(&BodySet::new()));
    s.world.evolve(&Intent::IDLE);

    for _ in 0..3 {
        let r = s.world.evolve(&north);
        assert_eq!(r.realized, Displacement::new(0, -1));
    }
    assert!(!s.world.temp_stop());
    assert_eq!(position(&s.world, agent), Position::new(5, 2));
    assert_eq!(position(&s.world, s.boxed), Position::new(8, 2));
    assert_eq!(s.world.holding(), &set(&[agent, s.boxed]));

    s.world.evolve(&Intent::IDLE);
    s.world.evolve(&Intent::drop());
    assert!(s.world.holding().is_empty());
    s.world.evolve(&Intent::IDLE);

    for _ in 0..2 {
        s.world.evolve(&north);
    }
    assert_eq!(position(&s.world, agent), Position::new(5, 0));
    assert_eq!(position(&s.world, s.boxed), Position::new(8, 2));
}

#[test]
fn held_body_moves_with_the_agent_instead_of_blocking() {
    let mut s = scene((0, 5), (3, 5));
    let agent = s.world.agent();

    s.world.evolve(&Intent::pickup());
    s.world.evolve(&Intent::IDLE);

    for _ in 0..3 {
        let r = s.world.evolve(&east());
        assert_eq!(r.realized, Displacement::new(1, 0));
        assert!(!r.collided);
    }
    assert_eq!(s.world.contacts(), Some(&BodySet::new()));
    assert_eq!(position(&s.world, agent), Position::new(3, 5));
    assert_eq!(position(&s.world, s.boxed), Position::new(6, 5));
}

#[test]
fn carried_body_against_a_wall_blocks_its_carrier() {
    // Box spans x 8..=9, flush with the wall; agent flush with the box.
    let mut s = scene((5, 5), (8, 5));
    let agent = s.world.agent();

    s.world.evolve(&Intent::pickup());
    s.world.evolve(&Intent::IDLE);

    let r = s.world.evolve(&east());
    assert_eq!(r.realized, Displacement::ZERO);
    assert!(r.fixed_contact);
    assert_eq!(s.world.contacts(), Some(&set(&[s.wall])));
    assert_eq!(position(&s.world, agent), Position::new(5, 5));
    assert_eq!(position(&s.world, s.boxed), Position::new(8, 5));
}

#[test]
fn pickup_replaces_what_was_held_and_skips_fixed_bodies() {
    let mut s = scene((5, 5), (8, 5));
    let agent = s.world.agent();

    s.world.evolve(&Intent::pickup());
    assert_eq!(s.world.holding(), &set(&[agent, s.boxed]));
    s.world.evolve(&Intent::IDLE);

    // Walk away from the box, dropping nothing, then pick up again next to nothing.
    s.world.evolve(&Intent::drop());
    s.world.evolve(&Intent::IDLE);
    for _ in 0..3 {
        s.world.evolve(&Intent::moving(0, 1));
    }
    s.world.evolve(&Intent::IDLE);
    s.world.evolve(&Intent::pickup());
    assert_eq!(s.world.holding(), &set(&[agent]));

    // Flush against the wall: the wall is never lifted.
    let mut s = scene((7, 5), (0, 20));
    let agent = s.world.agent();
    s.world.evolve(&Intent::pickup());
    assert_eq!(s.world.holding(), &set(&[agent]));
    assert!(s.world.sensors().touch.east);
}

#[test]
fn pickup_and_drop_in_one_tick_leaves_hands_empty() {
    let mut s = scene((5, 5), (8, 5));
    let both = Intent {
        pickup: true,
        drop: true,
        ..Intent::IDLE
    };
    s.world.evolve(&both);
    assert!(s.world.holding().is_empty());
}

#[test]
fn diagonal_requests_are_evaluated_as_given() {
    let mut registry = Registry::new();
    let agent = registry
        .insert(Body::new("agent", Shape::new([(0, 0)]).expect("agent"), (0, 0)))
        .expect("agent");
    let corner = registry
        .insert(Body::new("corner", Shape::new([(0, 0)]).expect("corner"), (2, 2)).fixed())
        .expect("corner");
    let mut world = World::new(registry, agent).expect("world");

    let r = world.evolve(&Intent::moving(1, 1));
    assert_eq!(r.realized, Displacement::new(1, 1));
    assert!(world.sensors().motion().is_none());
    assert!(world.sensors().is_moving());

    let r = world.evolve(&Intent::moving(1, 1));
    assert_eq!(r.realized, Displacement::ZERO);
    assert!(r.collided);
    assert_eq!(world.contacts(), Some(&set(&[agent, corner])));
}

#[test]
fn oversized_requests_are_clamped_to_unit_steps() {
    let mut s = scene((0, 5), (0, 20));
    let agent = s.world.agent();

    let raw = Intent {
        motion: Displacement::new(5, -3),
        ..Intent::IDLE
    };
    let r = s.world.evolve(&raw);
    assert_eq!(r.requested, Displacement::new(1, -1));
    assert_eq!(position(&s.world, agent), Position::new(1, 4));
}

#[test]
fn magnetism_is_tracked_but_inert() {
    let run = |magnet: bool| {
        let mut s = scene((6, 5), (0, 20));
        if magnet {
            let r = s.world.evolve(&Intent::toggle_magnetism());
            assert!(!r.attempting);
            assert!(s.world.contacts().is_none());
            assert!(s.world.sensors().magnetism);
        }
        let realized: Vec<_> = (0..3).map(|_| s.world.evolve(&east()).realized).collect();
        (realized, position(&s.world, s.world.agent()), s.world.magnetism())
    };

    let (plain, plain_at, plain_flag) = run(false);
    let (magnet, magnet_at, magnet_flag) = run(true);
    assert_eq!(plain, magnet);
    assert_eq!(plain_at, magnet_at);
    assert!(!plain_flag);
    assert!(magnet_flag);
}
