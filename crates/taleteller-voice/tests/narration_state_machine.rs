//! State-machine tests for the narration controller.
//!
//! A scripted speech engine records every call and only reports utterances
//! finished when the test says so. `narrator.status().await` is used as a
//! barrier: engine signals fired before it are applied before it returns.

mod support;

use std::sync::Arc;
use std::time::Duration;

use mockall::mock;
use support::{
    FOUR_CHUNK_LIMIT, FOUR_CHUNK_TEXT, FOUR_CHUNKS, ScriptedEngine, drain, spawn_narrator,
};
use taleteller_core::{
    NarrationEvent, NarrationOutcome, NarrationPreferences, NarrationProgress, NoopEmitter,
    PlaybackState,
};
use taleteller_voice::{
    Narrator, NarratorConfig, NarratorError, SpeakOptions, SpeechEngine, UtteranceCallbacks,
    VoiceInfo,
};

fn prefs() -> NarrationPreferences {
    NarrationPreferences::default()
}

/// Play the four-chunk text and finish chunks until chunk `k` is speaking.
async fn playing_at(engine: &Arc<ScriptedEngine>, narrator: &Narrator, k: usize) {
    let _ = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();
    for n in 0..k {
        engine.finish(n);
        narrator.status().await.unwrap();
    }
    assert_eq!(narrator.current_chunk_index(), k);
}

// ── Chunk chain ────────────────────────────────────────────────────

#[tokio::test]
async fn test_end_to_end_two_chunks() {
    let engine = ScriptedEngine::new();
    let (narrator, mut events) = spawn_narrator(&engine, 12);

    let completion = narrator.play("One. Two. Three. Four.", prefs());
    let status = narrator.status().await.unwrap();
    assert_eq!(status.total_chunks, 2);
    assert_eq!(status.state, PlaybackState::Playing);
    assert_eq!(engine.spoken_texts(), vec!["One. Two."]);

    engine.finish(0);
    narrator.status().await.unwrap();
    assert_eq!(narrator.current_chunk_index(), 1);
    assert_eq!(engine.spoken_texts(), vec!["One. Two.", "Three. Four."]);

    engine.finish(1);
    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Idle);
    assert_eq!(status.chunk_index, 0);
    assert_eq!(completion.await, Ok(NarrationOutcome::Completed));

    let events = drain(&mut events);
    assert!(events.contains(&NarrationEvent::progress(NarrationProgress::at_chunk(1, 2))));
    assert!(events.contains(&NarrationEvent::progress(NarrationProgress::complete(2))));
    assert_eq!(
        events.last(),
        Some(&NarrationEvent::Finished {
            outcome: NarrationOutcome::Completed
        })
    );
}

#[tokio::test]
async fn test_progress_is_published_to_queries() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    playing_at(&engine, &narrator, 1).await;

    assert!(narrator.is_playing());
    assert!(!narrator.is_paused());
    let progress = narrator.current_progress();
    assert_eq!(progress.chunk, 2);
    assert_eq!(progress.total, 4);
    assert!((progress.fraction - 0.5).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_preferences_are_applied_to_every_utterance() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    let preferences = NarrationPreferences::new(Some("sim.en-GB.Daniel".to_string()), 1.25);

    let _ = narrator.play(FOUR_CHUNK_TEXT, preferences);
    narrator.status().await.unwrap();
    engine.finish(0);
    narrator.status().await.unwrap();

    for utterance in engine.spoken() {
        assert_eq!(utterance.voice_id.as_deref(), Some("sim.en-GB.Daniel"));
        assert!((utterance.rate - 1.25).abs() < f32::EPSILON);
    }
}

#[tokio::test]
async fn test_empty_text_completes_immediately() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    assert_eq!(
        narrator.play("  \n ", prefs()).await,
        Ok(NarrationOutcome::Completed)
    );
    assert_eq!(engine.speak_count(), 0);
}

// ── Fencing and re-entrancy ────────────────────────────────────────

#[tokio::test]
async fn test_stale_session_suppression() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    let first = narrator.play(FOUR_CHUNK_TEXT, prefs());
    let s1 = narrator.status().await.unwrap().session_id;

    let _second = narrator.restart(FOUR_CHUNK_TEXT, prefs());
    let s2 = narrator.status().await.unwrap().session_id;
    assert!(s2 > s1);
    assert_eq!(engine.speak_count(), 2);

    // The superseded utterance finishing must not advance the new session
    engine.finish(0);
    let status = narrator.status().await.unwrap();
    assert_eq!(status.chunk_index, 0);
    assert_eq!(engine.speak_count(), 2);

    engine.finish(1);
    narrator.status().await.unwrap();
    assert_eq!(narrator.current_chunk_index(), 1);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[1]);

    assert_eq!(first.await, Ok(NarrationOutcome::Stopped));
}

#[tokio::test]
async fn test_concurrent_play_starts_one_chain() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    let other = narrator.clone();

    let first = narrator.play(FOUR_CHUNK_TEXT, prefs());
    let second = other.play(FOUR_CHUNK_TEXT, prefs());

    assert_eq!(second.await, Ok(NarrationOutcome::Ignored));
    narrator.status().await.unwrap();
    assert_eq!(engine.speak_count(), 1);

    // The guard is released once setup is done
    narrator.stop().await.unwrap();
    assert_eq!(first.await, Ok(NarrationOutcome::Stopped));
    let _ = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();
    assert_eq!(engine.speak_count(), 2);
}

#[tokio::test]
async fn test_restart_during_play_setup_is_ignored() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    let other = narrator.clone();

    let first = narrator.play(FOUR_CHUNK_TEXT, prefs());
    let second = other.restart("A different tale.", prefs());

    assert_eq!(second.await, Ok(NarrationOutcome::Ignored));
    let status = narrator.status().await.unwrap();
    assert_eq!(engine.speak_count(), 1);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[0]);
    assert_eq!(status.total_chunks, 4);
    drop(first);
}

#[tokio::test]
async fn test_resume_during_restart_setup_is_ignored() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 2).await;
    narrator.pause().await.unwrap();
    let before = engine.speak_count();
    let other = narrator.clone();

    let first = narrator.restart(FOUR_CHUNK_TEXT, prefs());
    let second = other.resume();

    assert_eq!(second.await, Ok(NarrationOutcome::Ignored));
    let status = narrator.status().await.unwrap();
    assert_eq!(engine.speak_count(), before + 1);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[0]);
    assert_eq!(status.chunk_index, 0);
    drop(first);
}

// ── Pause and resume ───────────────────────────────────────────────

#[tokio::test]
async fn test_pause_preserves_position() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 2).await;

    narrator.pause().await.unwrap();
    assert!(narrator.is_paused());
    assert_eq!(narrator.current_chunk_index(), 2);

    let _ = narrator.resume();
    narrator.status().await.unwrap();
    assert!(narrator.is_playing());
    assert_eq!(narrator.current_chunk_index(), 2);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[2]);
}

#[tokio::test]
async fn test_late_done_after_emulated_pause_is_ignored() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 1).await;
    let stops_before = engine.stop_count();

    narrator.pause().await.unwrap();
    assert_eq!(engine.stop_count(), stops_before + 1);

    engine.finish(1);
    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Paused);
    assert_eq!(status.chunk_index, 1);
    assert_eq!(engine.speak_count(), 2);
}

#[tokio::test]
async fn test_native_pause_and_resume() {
    let engine = ScriptedEngine::with_native_pause(true);
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 1).await;
    let stops_before = engine.stop_count();

    narrator.pause().await.unwrap();
    assert_eq!(engine.pause_count(), 1);
    assert_eq!(engine.stop_count(), stops_before);

    let _ = narrator.resume();
    narrator.status().await.unwrap();
    assert_eq!(engine.resume_count(), 1);
    assert_eq!(engine.speak_count(), 2);
    assert!(narrator.is_playing());

    // The natively resumed utterance still drives the chain
    engine.finish(1);
    narrator.status().await.unwrap();
    assert_eq!(narrator.current_chunk_index(), 2);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[2]);
}

#[tokio::test]
async fn test_failed_native_resume_replays_chunk() {
    let engine = ScriptedEngine::with_native_pause(false);
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 2).await;

    narrator.pause().await.unwrap();
    let _ = narrator.resume();
    narrator.status().await.unwrap();

    assert_eq!(engine.resume_count(), 1);
    assert_eq!(engine.speak_count(), 4);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[2]);
}

#[tokio::test]
async fn test_done_while_natively_paused_keeps_position() {
    let engine = ScriptedEngine::with_native_pause(false);
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 1).await;

    narrator.pause().await.unwrap();
    engine.finish(1);
    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Paused);
    assert_eq!(status.chunk_index, 1);

    let _ = narrator.resume();
    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Playing);
    assert_eq!(status.chunk_index, 1);
    assert_eq!(engine.speak_count(), 3);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[1]);
}

#[tokio::test]
async fn test_play_of_paused_text_resumes() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 2).await;
    narrator.pause().await.unwrap();
    let session_id = narrator.snapshot().session_id;

    let _ = narrator.play(FOUR_CHUNK_TEXT, prefs());
    let status = narrator.status().await.unwrap();

    assert_eq!(status.session_id, session_id);
    assert_eq!(status.chunk_index, 2);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[2]);
}

#[tokio::test]
async fn test_resume_attaches_to_running_session() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, 12);

    let _ = narrator.play("One. Two. Three. Four.", prefs());
    narrator.status().await.unwrap();
    let resumed = narrator.resume();
    narrator.status().await.unwrap();
    assert_eq!(engine.speak_count(), 1);

    engine.finish(0);
    narrator.status().await.unwrap();
    engine.finish(1);
    assert_eq!(resumed.await, Ok(NarrationOutcome::Completed));
}

// ── Restart and new text ───────────────────────────────────────────

#[tokio::test]
async fn test_restart_resets_position() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 2).await;
    narrator.pause().await.unwrap();

    let _ = narrator.restart(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();

    assert!(narrator.is_playing());
    assert_eq!(narrator.current_chunk_index(), 0);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[0]);
}

#[tokio::test]
async fn test_new_text_resets_position() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 2).await;
    narrator.pause().await.unwrap();

    let new_text = "A brand new tale begins. It has two parts.";
    let _ = narrator.play(new_text, prefs());
    let status = narrator.status().await.unwrap();

    assert_eq!(status.chunk_index, 0);
    assert_eq!(status.total_chunks, 2);
    assert_eq!(engine.last_spoken().text, "A brand new tale begins.");
}

#[tokio::test]
async fn test_replay_of_finished_text_starts_over() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, 12);

    let first = narrator.play("One. Two. Three. Four.", prefs());
    narrator.status().await.unwrap();
    engine.finish(0);
    narrator.status().await.unwrap();
    engine.finish(1);
    assert_eq!(first.await, Ok(NarrationOutcome::Completed));

    let faster = prefs().at_speed(2.0);
    let _ = narrator.play("One. Two. Three. Four.", faster);
    narrator.status().await.unwrap();
    let last = engine.last_spoken();
    assert_eq!(last.text, "One. Two.");
    assert!((last.rate - 2.0).abs() < f32::EPSILON);
}

// ── Live preference changes ────────────────────────────────────────

const TEN_WORDS: &str = "one two three four five six seven eight nine ten.";

#[tokio::test(start_paused = true)]
async fn test_live_speed_change_speaks_remainder() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, 600);

    let _ = narrator.play(TEN_WORDS, prefs());
    narrator.status().await.unwrap();

    tokio::time::advance(Duration::from_millis(1700)).await;
    narrator
        .set_preferences(NarrationPreferences::with_speed(1.5))
        .await
        .unwrap();

    let next = engine.last_spoken();
    assert_eq!(engine.speak_count(), 2);
    assert_eq!(next.text, "six seven eight nine ten.");
    assert!((next.rate - 1.5).abs() < f32::EPSILON);
    assert_eq!(narrator.current_chunk_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_speed_change_truncation_is_reasonable() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, 600);

    let _ = narrator.play(TEN_WORDS, prefs());
    narrator.status().await.unwrap();

    tokio::time::advance(Duration::from_millis(1000)).await;
    narrator
        .set_preferences(NarrationPreferences::with_speed(0.8))
        .await
        .unwrap();

    let words = engine.last_spoken().text.split_whitespace().count();
    assert!(words > 0 && words < 10, "remainder had {words} words");
}

#[tokio::test(start_paused = true)]
async fn test_speed_change_after_whole_chunk_advances() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    let _ = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();

    tokio::time::advance(Duration::from_secs(30)).await;
    narrator
        .set_preferences(NarrationPreferences::with_speed(1.2))
        .await
        .unwrap();

    assert_eq!(narrator.current_chunk_index(), 1);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[1]);
}

#[tokio::test(start_paused = true)]
async fn test_immediate_speed_change_respeaks_whole_chunk() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, 600);

    let _ = narrator.play(TEN_WORDS, prefs());
    narrator.status().await.unwrap();
    narrator
        .set_preferences(NarrationPreferences::with_speed(2.0))
        .await
        .unwrap();

    assert_eq!(engine.last_spoken().text, TEN_WORDS);
}

#[tokio::test(start_paused = true)]
async fn test_stale_done_after_speed_change_is_ignored() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    let _ = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();
    narrator
        .set_preferences(NarrationPreferences::with_speed(1.5))
        .await
        .unwrap();

    engine.finish(0);
    narrator.status().await.unwrap();
    assert_eq!(engine.speak_count(), 2);
    assert_eq!(narrator.current_chunk_index(), 0);
}

#[tokio::test]
async fn test_preferences_while_idle_do_not_speak() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    narrator
        .set_preferences(NarrationPreferences::with_speed(0.5))
        .await
        .unwrap();

    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Idle);
    assert!((status.preferences.speed_multiplier() - 0.5).abs() < f32::EPSILON);
    assert_eq!(engine.speak_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_preferences_while_paused_excludes_paused_time() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, 600);

    let _ = narrator.play(TEN_WORDS, prefs());
    narrator.status().await.unwrap();
    tokio::time::advance(Duration::from_millis(1700)).await;
    narrator.pause().await.unwrap();
    tokio::time::advance(Duration::from_secs(60)).await;

    narrator
        .set_preferences(NarrationPreferences::with_speed(1.5))
        .await
        .unwrap();

    assert_eq!(engine.last_spoken().text, "six seven eight nine ten.");
}

// ── Seek ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_seek_while_playing_speaks_target() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 0).await;

    assert!(narrator.seek_to_chunk(3).await.unwrap());
    assert_eq!(narrator.current_chunk_index(), 3);
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[3]);

    // The utterance the seek replaced must not advance the chain
    engine.finish(0);
    narrator.status().await.unwrap();
    assert_eq!(narrator.current_chunk_index(), 3);
}

#[tokio::test]
async fn test_seek_out_of_range_is_rejected() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    assert!(!narrator.seek_to_chunk(0).await.unwrap());

    playing_at(&engine, &narrator, 1).await;
    assert!(!narrator.seek_to_chunk(4).await.unwrap());
    assert_eq!(narrator.current_chunk_index(), 1);
    assert_eq!(engine.speak_count(), 2);
}

#[tokio::test]
async fn test_seek_while_idle_moves_without_speaking() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);
    playing_at(&engine, &narrator, 0).await;
    narrator.stop().await.unwrap();
    let spoken = engine.speak_count();

    assert!(narrator.seek_to_chunk(2).await.unwrap());
    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Idle);
    assert_eq!(status.chunk_index, 2);
    assert_eq!(engine.speak_count(), spoken);

    let _ = narrator.resume();
    narrator.status().await.unwrap();
    assert_eq!(engine.last_spoken().text, FOUR_CHUNKS[2]);
}

#[tokio::test]
async fn test_seek_without_text_is_rejected() {
    let engine = ScriptedEngine::new();
    let (narrator, mut events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    assert_eq!(narrator.seek_to_chunk(0).await, Ok(false));
    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Idle);
    assert_eq!(status.chunk_index, 0);
    assert_eq!(engine.speak_count(), 0);
    assert_eq!(engine.stop_count(), 0);
    assert!(drain(&mut events).is_empty());
}

// ── Ending early ───────────────────────────────────────────────────

#[tokio::test]
async fn test_engine_error_finalizes_session() {
    let engine = ScriptedEngine::new();
    let (narrator, mut events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    let completion = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();
    engine.fail(0, "voice unavailable");

    assert_eq!(
        completion.await,
        Err(NarratorError::Engine("voice unavailable".to_string()))
    );
    assert_eq!(narrator.status().await.unwrap().state, PlaybackState::Idle);
    assert_eq!(engine.speak_count(), 1);
    assert!(drain(&mut events).contains(&NarrationEvent::Error {
        message: "voice unavailable".to_string()
    }));
}

#[tokio::test]
async fn test_platform_interruption_stops_session() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    let completion = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();
    engine.interrupt(0);

    assert_eq!(completion.await, Ok(NarrationOutcome::Stopped));
    assert!(!narrator.is_playing());
}

#[tokio::test]
async fn test_stop_resets_and_resolves() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    let completion = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();
    engine.finish(0);
    narrator.status().await.unwrap();

    narrator.stop().await.unwrap();
    assert_eq!(completion.await, Ok(NarrationOutcome::Stopped));
    let status = narrator.status().await.unwrap();
    assert_eq!(status.state, PlaybackState::Idle);
    assert_eq!(status.chunk_index, 0);

    // Utterance 1 was in flight when stopped
    engine.finish(1);
    narrator.status().await.unwrap();
    assert_eq!(engine.speak_count(), 2);
}

#[tokio::test]
async fn test_dropping_every_handle_stops_engine() {
    let engine = ScriptedEngine::new();
    let (narrator, _events) = spawn_narrator(&engine, FOUR_CHUNK_LIMIT);

    let completion = narrator.play(FOUR_CHUNK_TEXT, prefs());
    narrator.status().await.unwrap();
    let stops = engine.stop_count();
    drop(narrator);

    assert_eq!(completion.await, Ok(NarrationOutcome::Stopped));
    assert_eq!(engine.stop_count(), stops + 1);
}

// ── Engine call expectations ───────────────────────────────────────

mock! {
    pub Engine {}

    impl SpeechEngine for Engine {
        fn speak(&self, text: &str, options: &SpeakOptions, callbacks: UtteranceCallbacks);
        fn supports_native_pause(&self) -> bool;
        fn pause(&self) -> bool;
        fn resume(&self) -> bool;
        fn stop(&self);
        fn list_voices(&self) -> Vec<VoiceInfo>;
    }
}

#[tokio::test]
async fn test_resume_without_text_never_touches_engine() {
    let mut engine = MockEngine::new();
    engine.expect_speak().times(0);
    engine.expect_resume().times(0);
    engine.expect_stop().return_const(());

    let narrator = Narrator::spawn(
        Arc::new(engine),
        Arc::new(NoopEmitter::new()),
        NarratorConfig::default(),
    );

    assert_eq!(narrator.resume().await, Ok(NarrationOutcome::Ignored));
    assert!(!narrator.is_playing());
}

#[tokio::test]
async fn test_pause_while_idle_never_touches_engine() {
    let mut engine = MockEngine::new();
    engine.expect_pause().times(0);
    engine.expect_supports_native_pause().times(0);
    engine.expect_stop().return_const(());

    let narrator = Narrator::spawn(
        Arc::new(engine),
        Arc::new(NoopEmitter::new()),
        NarratorConfig::default(),
    );

    narrator.pause().await.unwrap();
    assert!(!narrator.is_paused());
}

#[tokio::test]
async fn test_seek_without_text_never_touches_engine() {
    let mut engine = MockEngine::new();
    engine.expect_speak().times(0);
    engine.expect_stop().return_const(());

    let narrator = Narrator::spawn(
        Arc::new(engine),
        Arc::new(NoopEmitter::new()),
        NarratorConfig::default(),
    );

    assert_eq!(narrator.seek_to_chunk(0).await, Ok(false));
    assert_eq!(narrator.current_chunk_index(), 0);
}
