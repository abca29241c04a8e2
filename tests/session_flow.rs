// Integration tests (native) for a whole play-through through the public API.
// Timestamps are fed by hand; nothing here touches the DOM.

use glam::DVec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use uzy::render::BACKGROUND;
use uzy::{DIALOGUE_SEQUENCE, DrawOp, EmotionState, ParticleConfig, Phase, Recording, Session, SessionTiming};

const VIEW: DVec2 = DVec2::new(1280.0, 720.0);
const FRAME: f64 = 16.0;

fn session_with(config: ParticleConfig) -> (Session, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(11);
    let s = Session::new(&mut rng, config, SessionTiming::default(), DIALOGUE_SEQUENCE, VIEW);
    (s, rng)
}

/// Run frames until `until` (inclusive), returning the last timestamp.
fn run(s: &mut Session, from: f64, until: f64) -> f64 {
    let mut now = from;
    while now + FRAME <= until {
        now += FRAME;
        s.advance(now);
    }
    now
}

#[test]
fn menu_draws_a_linked_swarm() {
    let (mut s, _) = session_with(ParticleConfig { count: 120, ..Default::default() });
    s.advance(FRAME);
    let mut rec = Recording::default();
    s.render(&mut rec);
    assert_eq!(rec.ops[0], DrawOp::Clear { color: BACKGROUND.to_string() });
    assert_eq!(rec.circles().count(), 120);
    // 120 particles over 1280x720 with a 160px reach always find a neighbour
    assert!(rec.lines().count() > 0);
    assert!(s.field().protagonist().is_none());
}

#[test]
fn transition_fades_the_swarm_then_spawns_the_protagonist() {
    let (mut s, _) = session_with(ParticleConfig::default());
    assert!(s.begin(0.0));
    let now = run(&mut s, 0.0, 1_900.0);
    assert_eq!(s.phase(), Phase::Transitioning);
    assert!(s.field().ambient().iter().all(|p| p.opacity < 0.7));
    assert!(s.field().protagonist().is_none());

    run(&mut s, now, 2_100.0);
    assert_eq!(s.phase(), Phase::Active);
    let hero = s.field().protagonist().expect("protagonist");
    assert_eq!(hero.pos.x, VIEW.x / 2.0);
    assert!(hero.pos.y < 0.0);
}

#[test]
fn protagonist_mood_tracks_the_cursor_after_arrival() {
    let (mut s, _) = session_with(ParticleConfig::default());
    s.begin(0.0);
    s.advance(2_000.0);
    // descent from -100 to 45% height at 0.4px per frame
    let mut now = 2_000.0;
    while !s.field().protagonist().and_then(|p| p.protagonist_state()).is_some_and(|st| st.arrived) {
        now += FRAME;
        s.advance(now);
    }
    assert_eq!(s.status(), EmotionState::Tranquil);

    let hero = s.field().protagonist().expect("protagonist").pos;
    s.pointer_moved(hero.x + 40.0, hero.y);
    now += FRAME;
    s.advance(now);
    assert_eq!(s.status(), EmotionState::Comfort);

    let hero = s.field().protagonist().expect("protagonist").pos;
    s.pointer_moved(hero.x + 1_000.0, hero.y);
    now += FRAME;
    s.advance(now);
    assert_eq!(s.status(), EmotionState::Panic);
}

#[test]
fn vitality_drains_monotonically_and_score_mirrors_it() {
    let (mut s, _) = session_with(ParticleConfig { count: 10, ..Default::default() });
    s.begin(0.0);
    let mut now = 0.0;
    let mut last = s.vitality();
    while now < 2_000.0 + 2_500.0 * 105.0 {
        now += 250.0;
        s.advance(now);
        let v = s.vitality();
        assert!(v <= last);
        assert_eq!(v + s.score(), 100);
        last = v;
        if !s.choices().is_empty() {
            s.select_choice(1, now);
        }
    }
    assert_eq!(s.vitality(), 0);
    assert!(!s.is_vitality_running());
}

#[test]
fn silent_player_is_forced_to_the_last_line_at_zero() {
    let (mut s, _) = session_with(ParticleConfig { count: 10, ..Default::default() });
    s.begin(0.0);
    let zero_tick = 2_000.0 + 2_500.0 * 100.0;
    let mut now = 0.0;
    while now < zero_tick {
        now += 100.0;
        s.advance(now);
    }
    let last = DIALOGUE_SEQUENCE.last().expect("script");
    assert_eq!(s.vitality(), 0);
    // entry 0 was never answered, yet the final line takes over on the zero tick
    assert_eq!(s.dialogue().typewriter().source(), last.text);
    assert_eq!(s.next_entry(), DIALOGUE_SEQUENCE.len());

    run(&mut s, now, now + 10_000.0);
    assert_eq!(s.dialogue_text(), last.text);
    assert_eq!(s.last_response(), None);
}

#[test]
fn answering_player_ends_on_a_reply_to_the_last_line() {
    let (mut s, _) = session_with(ParticleConfig { count: 10, ..Default::default() });
    s.begin(0.0);
    let mut now = 0.0;
    while now < 2_000.0 + 2_500.0 * 100.0 + 10_000.0 {
        now += 100.0;
        s.advance(now);
        if !s.choices().is_empty() {
            s.select_choice(0, now);
        }
    }
    let last = DIALOGUE_SEQUENCE.last().expect("script");
    assert_eq!(s.next_entry(), DIALOGUE_SEQUENCE.len());
    assert_eq!(s.last_response(), Some(last.choices[0].label));
    assert_eq!(s.dialogue().typewriter().source(), last.choices[0].reaction);
}

#[test]
fn reconfigure_rebuilds_only_on_count_change() {
    let (mut s, mut rng) = session_with(ParticleConfig::default());
    let before: Vec<DVec2> = s.field().ambient().iter().map(|p| p.pos).collect();

    s.reconfigure(&mut rng, ParticleConfig { speed: 2.0, ..Default::default() });
    let after: Vec<DVec2> = s.field().ambient().iter().map(|p| p.pos).collect();
    assert_eq!(before, after);
    assert_eq!(s.config().speed, 2.0);

    s.reconfigure(&mut rng, ParticleConfig { count: 500, ..Default::default() });
    assert_eq!(s.field().ambient().len(), 200);
}

#[cfg(feature = "serde_json")]
#[test]
fn json_config_applies_to_a_running_session() {
    let (mut s, mut rng) = session_with(ParticleConfig::default());
    let cfg = ParticleConfig::from_json(r#"{"count": 30, "interactive": false}"#).unwrap();
    s.reconfigure(&mut rng, cfg);
    assert_eq!(s.field().ambient().len(), 30);
    s.pointer_moved(5.0, 5.0);
    assert_eq!(s.cursor(), DVec2::ZERO);
}

#[test]
fn ending_freezes_the_schedules() {
    let (mut s, _) = session_with(ParticleConfig::default());
    s.begin(0.0);
    s.advance(2_000.0);
    s.end();
    s.advance(60_000.0);
    assert_eq!(s.vitality(), 100);
    assert!(!s.is_vitality_running());
}
