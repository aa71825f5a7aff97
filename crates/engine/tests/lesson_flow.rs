use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use chrono::Duration;
use engine::{LessonError, LessonSession, Sampler, Ticker, load_lesson_config};
use lesson_core::Clock;
use lesson_core::time::fixed_now;

const LESSON_JSON: &str = r#"{
    "id": 11,
    "title": "Profiling Smart Pointer Overhead",
    "scenarios": [
        {
            "id": "stack_opt",
            "profile": {
                "overhead_pct": 3.0,
                "metrics": [
                    { "name": "memoryUsage", "base": 70.0, "amplitude": 10.0, "frequency_hz": 0.5 },
                    { "name": "realtimePerformance", "base": 85.0, "amplitude": 8.0, "frequency_hz": 0.5, "phase": 1.0 },
                    { "name": "powerEfficiency", "base": 90.0, "amplitude": 5.0, "frequency_hz": 0.3, "phase": 1.5 }
                ]
            }
        },
        {
            "id": "make_shared",
            "profile": {
                "overhead_pct": 12.0,
                "metrics": [
                    { "name": "memoryUsage", "base": 55.0, "amplitude": 6.0, "frequency_hz": 0.5 },
                    { "name": "realtimePerformance", "base": 78.0, "amplitude": 7.0, "frequency_hz": 0.5, "phase": 0.5 }
                ]
            }
        }
    ],
    "questions": [
        { "prompt": "Q1", "options": ["a", "b", "c", "d"], "correct": 1 },
        { "prompt": "Q2", "options": ["a", "b", "c", "d"], "correct": 0 },
        { "prompt": "Q3", "options": ["a", "b", "c", "d"], "correct": 2 },
        { "prompt": "Q4", "options": ["a", "b", "c", "d"], "correct": 3 },
        { "prompt": "Q5", "options": ["a", "b", "c", "d"], "correct": 0 }
    ]
}"#;

#[test]
fn full_lesson_run_scores_eighty_and_notifies_once() {
    let config = Arc::new(load_lesson_config(LESSON_JSON).unwrap());
    let notifications = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notifications);

    let mut clock = Clock::fixed(fixed_now());
    let mut session = LessonSession::new(Arc::clone(&config), Sampler::new())
        .with_on_complete(Box::new(move |score| sink.lock().unwrap().push(score)));

    // scenario exploration: t=0 returns base values for the zero-phase metric
    session.start_animation(clock.now());
    let snap = session.tick(clock.now()).unwrap();
    assert!((snap.value("memoryUsage").unwrap() - 70.0).abs() < 1e-9);
    assert_eq!(snap.overhead_pct(), 3.0);

    // a later tick oscillates but stays within the bound
    clock.advance(Duration::milliseconds(1_337));
    let snap = session.tick(clock.now()).unwrap();
    let bound = config.scenarios()[0].profile.bound();
    for value in snap.values() {
        assert!(bound.contains(value.value));
    }

    // switching scenarios applies on the next tick with the new profile
    session.select_scenario("make_shared").unwrap();
    clock.advance(Duration::milliseconds(16));
    let snap = session.tick(clock.now()).unwrap();
    assert_eq!(snap.scenario().as_str(), "make_shared");
    assert_eq!(snap.overhead_pct(), 12.0);

    // stopping drops every further tick
    session.stop_animation();
    clock.advance(Duration::seconds(5));
    assert!(session.tick(clock.now()).is_none());

    // the quiz: [1,1,2,3,0] against [1,0,2,3,0] is 4/5 correct
    for (question, &choice) in [1usize, 1, 2, 3, 0].iter().enumerate() {
        let outcome = session.answer(question, choice).unwrap();
        assert_eq!(outcome.finalized, question == 4);
    }

    assert_eq!(session.score(), Some(80.0));
    assert!(session.is_complete());
    assert_eq!(*notifications.lock().unwrap(), vec![80.0]);

    // answering after completion is rejected and never re-notifies
    for _ in 0..3 {
        assert_eq!(
            session.answer(0, 0).unwrap_err(),
            LessonError::QuizAlreadyComplete
        );
    }
    assert_eq!(notifications.lock().unwrap().len(), 1);

    let view = session.view();
    assert_eq!(view.score, Some(80.0));
    assert_eq!(view.questions[1].is_correct, Some(false));
    assert_eq!(view.questions[3].is_correct, Some(true));
}

#[test]
fn sampling_is_deterministic_across_sessions() {
    let config = Arc::new(load_lesson_config(LESSON_JSON).unwrap());
    let now = fixed_now();

    let mut a = LessonSession::new(Arc::clone(&config), Sampler::new());
    let mut b = LessonSession::new(Arc::clone(&config), Sampler::new());

    a.start_animation(now);
    b.start_animation(now);

    let later = now + Duration::milliseconds(2_718);
    assert_eq!(a.tick(later).cloned(), b.tick(later).cloned());
}

#[tokio::test(start_paused = true)]
async fn ticker_drives_a_shared_session() {
    let config = Arc::new(load_lesson_config(LESSON_JSON).unwrap());
    let session = Arc::new(Mutex::new(LessonSession::new(config, Sampler::new())));
    session.lock().unwrap().start_animation(fixed_now());

    let driven = Arc::clone(&session);
    let handle = Ticker::spawn(StdDuration::from_millis(16), move |now| {
        driven.lock().unwrap().tick(now);
    });

    tokio::time::sleep(StdDuration::from_millis(100)).await;
    handle.stopped().await;

    let session = session.lock().unwrap();
    let snapshot = session.snapshot().expect("ticker produced a snapshot");
    assert_eq!(snapshot.scenario().as_str(), "stack_opt");
}
