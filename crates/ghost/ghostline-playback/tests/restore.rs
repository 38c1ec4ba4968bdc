mod common;

use common::{Call, MockActor, MockController};
use ghostline_core::{decode_stream, LayerState, ParameterState, Snapshot, UpdateMode};
use ghostline_playback::{restore, ClipInfo};
use ghostline_test_fixtures::ghosts;

/// it should restore controller state in a fixed order and finish with a zero update
#[test]
fn animated_restore_order() {
    let tl = decode_stream(&ghosts::bytes("animated").expect("fixture")).expect("decode");
    let snapshot = tl.query(1.0).expect("in range");

    let mut actor = MockActor::animated();
    restore(&mut actor, &snapshot, 1.0);

    assert_eq!(actor.position(), Some([0.0, 0.0, 2.0]));
    let calls = &actor.controller.as_ref().unwrap().calls;
    assert_eq!(calls[0], Call::TimeScale(1.0));
    assert_eq!(calls[1], Call::Speed(1.5));
    assert_eq!(calls[2], Call::UpdateMode(UpdateMode::AnimatePhysics));
    assert!(matches!(calls[3], Call::Play { layer: 0, hash: 1234, .. }));
    assert!(matches!(calls[4], Call::Play { layer: 1, hash: -998, .. }));
    assert_eq!(calls[5], Call::Parameter(ParameterState::float(1, 0.5)));
    assert_eq!(calls[8], Call::Parameter(ParameterState::trigger(4, false)));
    assert_eq!(calls.last(), Some(&Call::Update(0.0)));
    assert_eq!(calls.len(), 10);
}

#[test]
fn transform_only_actor_gets_transform() {
    let snapshot = Snapshot::from_transform([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [2.0; 3]);
    let mut actor = MockActor::default();
    restore(&mut actor, &snapshot, 0.0);
    assert_eq!(
        actor.transform,
        Some(([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [2.0; 3]))
    );
}

/// it should advance a layer captured earlier by the elapsed, speed-scaled time
#[test]
fn layers_are_elapsed_corrected() {
    let snapshot = Snapshot {
        speed: 2.0,
        time_scale: 0.5,
        layers: vec![LayerState::new(0, 7, 0.1).captured_at(1.0)],
        ..Snapshot::default()
    };
    let mut actor = MockActor {
        controller: Some(MockController {
            calls: Vec::new(),
            clip: Some(ClipInfo {
                length: 4.0,
                speed: 1.0,
                looping: true,
            }),
        }),
        ..MockActor::default()
    };
    restore(&mut actor, &snapshot, 3.0);

    // elapsed = 2s * 2.0 * 1.0 * 0.5 = 2s = half the clip.
    let calls = &actor.controller.as_ref().unwrap().calls;
    let played = calls
        .iter()
        .find_map(|c| match c {
            Call::Play {
                normalized_time, ..
            } => Some(*normalized_time),
            _ => None,
        })
        .expect("layer played");
    assert!((played - 0.6).abs() < 1e-5);
}
