use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, Vec2};
use ribbons_core::mesh::EdgePair;
use ribbons_core::{Kinematics, Layer, RibbonConfig, RibbonTrail, StepOrder, TrailError};

const EPS: f32 = 1e-4;

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPS,
        "expected {expected}, got {actual}"
    );
}

fn curving(num_nodes: usize) -> RibbonConfig {
    RibbonConfig {
        num_nodes,
        position: DVec2::new(10.0, -5.0),
        angle: 0.3,
        speed: 2.5,
        speed_accel: 0.0,
        angle_speed: 0.17,
        width: 12.0,
        border_width: 2.0,
        ..RibbonConfig::default()
    }
}

fn straight(num_nodes: usize, width: f32) -> RibbonConfig {
    RibbonConfig {
        num_nodes,
        position: DVec2::ZERO,
        angle: 0.0,
        speed: 1.0,
        speed_accel: 0.0,
        angle_speed: 0.0,
        width,
        border_width: 1.0,
        ..RibbonConfig::default()
    }
}

/// Head positions the trail should have produced, oldest first.
fn integrated_heads(config: &RibbonConfig, steps: usize) -> Vec<DVec2> {
    let mut kinematics = Kinematics::new(config.position, config.angle, config.speed)
        .with_angle_speed(config.angle_speed)
        .with_speed_accel(config.speed_accel);
    (0..steps)
        .map(|_| kinematics.step(StepOrder::HeadingFirst))
        .collect()
}

#[test]
fn head_node_follows_integrated_pose() {
    for num_nodes in [2, 3, 7] {
        let config = curving(num_nodes);
        let heads = integrated_heads(&config, 25);
        let mut trail = RibbonTrail::new(config.clone()).unwrap();
        assert_eq!(trail.node(0), config.position);
        for head in heads {
            trail.advance();
            assert_eq!(trail.node(0), head);
            assert_eq!(trail.kinematics().position, head);
        }
    }
}

#[test]
fn nodes_are_the_last_head_poses_newest_first() {
    let num_nodes = 6;
    let config = curving(num_nodes);
    let heads = integrated_heads(&config, 11);
    let mut trail = RibbonTrail::new(config).unwrap();
    for _ in 0..11 {
        trail.advance();
    }

    let expected: Vec<DVec2> = heads.iter().rev().take(num_nodes).copied().collect();
    let nodes: Vec<DVec2> = trail.nodes().collect();
    assert_eq!(nodes, expected);
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn tangents_use_forward_head_and_backward_body_differences() {
    let mut trail = RibbonTrail::new(curving(5)).unwrap();
    for _ in 0..9 {
        trail.advance();
    }
    let n = |i: usize| trail.node(i);
    assert_eq!(
        trail.tangent_angle(0),
        (n(1).y - n(0).y).atan2(n(1).x - n(0).x)
    );
    for i in 1..trail.len() {
        assert_eq!(
            trail.tangent_angle(i),
            (n(i).y - n(i - 1).y).atan2(n(i).x - n(i - 1).x)
        );
    }
}

#[test]
fn edge_pairs_span_the_layer_widths() {
    let config = curving(8);
    let (width, inner_width) = (config.width, config.width - 2.0 * config.border_width);
    let mut trail = RibbonTrail::new(config).unwrap();
    for frame in 0..20 {
        trail.advance();
        if frame < 3 {
            continue;
        }
        for (layer, expected) in [(Layer::Outer, width), (Layer::Inner, inner_width)] {
            for (i, pair) in trail.mesh().edge_pairs(layer).iter().enumerate() {
                let (minus, plus) = (Vec2::from(pair.minus), Vec2::from(pair.plus));
                let span = plus.distance(minus);
                assert!(
                    (span - expected).abs() <= EPS,
                    "frame {frame} node {i} {layer:?}: {span} != {expected}"
                );
                let mid = (plus + minus) / 2.0;
                assert!(mid.distance(trail.node(i).as_vec2()) <= EPS);
            }
        }
    }
}

#[test]
fn curving_mesh_is_oriented_by_node_tangents() {
    let config = curving(12);
    let halves = [
        (Layer::Outer, f64::from(config.width) / 2.0),
        (
            Layer::Inner,
            f64::from(config.width - 2.0 * config.border_width) / 2.0,
        ),
    ];
    let mut trail = RibbonTrail::new(config).unwrap();
    for _ in 0..30 {
        trail.advance();
    }

    for (layer, half) in halves {
        for (i, pair) in trail.mesh().edge_pairs(layer).iter().enumerate() {
            let node = trail.node(i);
            let angle = trail.tangent_angle(i);
            let minus = (node + half * DVec2::from_angle(angle - FRAC_PI_2)).as_vec2();
            let plus = (node + half * DVec2::from_angle(angle + FRAC_PI_2)).as_vec2();
            assert!(
                Vec2::from(pair.minus).distance(minus) <= EPS,
                "{layer:?} node {i}: minus {:?} != {minus:?}",
                pair.minus
            );
            assert!(
                Vec2::from(pair.plus).distance(plus) <= EPS,
                "{layer:?} node {i}: plus {:?} != {plus:?}",
                pair.plus
            );
        }
    }

    // A turning path gives each body node its own backward direction, which
    // differs from the forward one the head uses.
    let ahead = trail.node(2) - trail.node(1);
    let forward = ahead.y.atan2(ahead.x);
    assert!((trail.tangent_angle(1) - forward).abs() > 1e-3);
}

#[test]
fn demo_ribbon_keeps_the_double_precision_head_path() {
    let mut trail = RibbonTrail::new(RibbonConfig::default()).unwrap();
    let (mut x, mut y, mut angle) = (960.0_f64, 540.0_f64, 0.0_f64);
    for _ in 0..900 {
        trail.advance();
        angle += 0.02;
        x += 6.0 * angle.cos();
        y += 6.0 * angle.sin();
    }
    assert_eq!(trail.node(0), DVec2::new(x, y));
    assert_eq!(trail.caps().head.outer.center, DVec2::new(x, y).as_vec2());
}

#[test]
fn static_buffers_never_change() {
    let mut trail = RibbonTrail::new(curving(9)).unwrap();
    let uvs = trail.mesh().uvs().to_vec();
    let indices = trail.mesh().indices().to_vec();
    let before = trail.mesh().vertices(Layer::Outer).to_vec();
    for _ in 0..50 {
        trail.advance();
    }
    assert_eq!(trail.mesh().uvs(), uvs.as_slice());
    assert_eq!(trail.mesh().indices(), indices.as_slice());
    assert_ne!(trail.mesh().vertices(Layer::Outer), before.as_slice());
}

#[test]
fn construction_needs_two_nodes() {
    for n in [0, 1] {
        assert!(matches!(
            RibbonTrail::new(straight(n, 8.0)),
            Err(TrailError::InvalidNodeCount { .. })
        ));
    }
    let mut pair = RibbonTrail::new(straight(2, 8.0)).unwrap();
    pair.advance();
    assert_eq!(pair.len(), 2);
    assert_eq!(pair.mesh().indices(), &[0, 1, 2, 3]);
    assert_eq!(pair.mesh().uvs(), &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
}

#[test]
fn three_node_straight_run() {
    let width = 6.0;
    let mut trail = RibbonTrail::new(straight(3, width)).unwrap();
    trail.advance();
    trail.advance();

    let nodes: Vec<DVec2> = trail.nodes().collect();
    assert_eq!(
        nodes,
        vec![DVec2::new(2.0, 0.0), DVec2::new(1.0, 0.0), DVec2::ZERO]
    );
    // Every tangent points from newer to older nodes, i.e. backwards.
    for i in 0..3 {
        assert_eq!(trail.tangent_angle(i), PI);
    }

    let EdgePair { minus, plus } = trail.mesh().edge_pairs(Layer::Outer)[0];
    assert_close(minus[0], 2.0);
    assert_close(minus[1], width / 2.0);
    assert_close(plus[0], 2.0);
    assert_close(plus[1], -width / 2.0);
}

#[test]
fn identical_runs_are_bit_identical() {
    let run = || {
        let mut trail = RibbonTrail::new(curving(16)).unwrap();
        for _ in 0..200 {
            trail.advance();
        }
        trail.mesh().vertex_bytes(Layer::Inner).to_vec()
    };
    assert_eq!(run(), run());
}
