#![cfg(test)]

use crate::sound::{AudioState, SoundEffect, effect_sample};

// AudioState tests run with or without an audio device: construction
// must never fail, only mark itself unavailable.

#[test]
fn new_state_defaults_to_silence_at_half_volume() {
    let state = AudioState::new();
    assert!(!state.is_music_playing());
    assert!((state.get_volume() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn music_toggle_flips_intent_regardless_of_device() {
    let mut state = AudioState::new();
    state.toggle_music();
    assert!(state.is_music_playing());
    state.toggle_music();
    assert!(!state.is_music_playing());
}

#[test]
fn set_music_playing_is_idempotent() {
    let mut state = AudioState::new();
    state.set_music_playing(true);
    state.set_music_playing(true);
    assert!(state.is_music_playing());
    state.set_music_playing(false);
    assert!(!state.is_music_playing());
}

#[test]
fn volume_is_clamped_to_unit_range() {
    let mut state = AudioState::new();
    state.set_volume(1.5);
    assert!((state.get_volume() - 1.0).abs() < f32::EPSILON);
    state.set_volume(-0.2);
    assert!(state.get_volume().abs() < f32::EPSILON);
    state.set_volume(0.3);
    assert!((state.get_volume() - 0.3).abs() < f32::EPSILON);
}

#[test]
fn play_sound_never_panics() {
    let state = AudioState::new();
    for _ in 0..100 {
        state.play_sound(SoundEffect::PieceLock);
        state.play_sound(SoundEffect::LineClear);
        state.play_sound(SoundEffect::GameOver);
    }
}

#[test]
fn effect_samples_stay_finite_and_bounded() {
    for effect in [
        SoundEffect::PieceLock,
        SoundEffect::LineClear,
        SoundEffect::GameOver,
    ] {
        for i in 0..=2200 {
            let t = i as f32 * 0.001;
            let (l, r) = effect_sample(effect, t);
            assert!(l.is_finite() && r.is_finite(), "{effect:?} at t={t}");
            assert!(l.abs() <= 2.0 && r.abs() <= 2.0, "{effect:?} at t={t}");
        }
    }
}

#[test]
fn effect_samples_are_silent_after_two_seconds() {
    for effect in [
        SoundEffect::PieceLock,
        SoundEffect::LineClear,
        SoundEffect::GameOver,
    ] {
        assert_eq!(effect_sample(effect, 2.5), (0.0, 0.0));
    }
}

#[test]
fn piece_lock_thud_dies_out_quickly() {
    let (l, r) = effect_sample(SoundEffect::PieceLock, 0.5);
    assert_eq!((l, r), (0.0, 0.0));
}
