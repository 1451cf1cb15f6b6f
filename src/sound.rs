use anyhow::Result;
use bevy_ecs::prelude::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use fundsp::hacker32::*;
use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Decorative audio cues. Nothing here feeds back into game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    PieceLock,
    LineClear,
    GameOver,
}

enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool),
    SetVolume(f32),
}

/// Owned handle to the audio thread. Device or stream failures flip
/// `available` and are otherwise invisible: commands are fire-and-forget
/// and playback is simply skipped.
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    available: Arc<AtomicBool>,
    music_playing: bool,
    volume: f32,
}

impl AudioState {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = bounded(64);
        let available = Arc::new(AtomicBool::new(true));

        let thread_available = Arc::clone(&available);
        thread::spawn(move || {
            if let Err(e) = run_audio_thread(&receiver) {
                warn!("audio unavailable, continuing without sound: {e}");
                thread_available.store(false, Ordering::Relaxed);
            }
        });

        Self {
            sender: Some(sender),
            available,
            music_playing: false,
            volume: 0.5,
        }
    }

    #[must_use]
    pub fn is_audio_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    pub fn play_sound(&self, effect: SoundEffect) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::PlaySound(effect));
        }
    }

    /// Starts or stops the background clip. The flag tracks intent, not
    /// device state, so muting works the same with or without audio.
    pub fn toggle_music(&mut self) {
        self.music_playing = !self.music_playing;
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::PlayMusic(self.music_playing));
        }
    }

    pub fn set_music_playing(&mut self, playing: bool) {
        if self.music_playing != playing {
            self.toggle_music();
        }
    }

    #[must_use]
    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    #[must_use]
    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::SetVolume(self.volume));
        }
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new()
    }
}

fn run_audio_thread(receiver: &Receiver<AudioCommand>) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no audio output device found"))?;
    let config = device.default_output_config()?;

    let (sound_sender, sound_receiver) = bounded::<SoundEffect>(64);
    let (state_sender, state_receiver) = bounded::<(bool, f32)>(16);

    let mut music_playing = false;
    let mut volume = 0.5f32;

    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            run_audio_stream::<f32>(&device, &config.into(), sound_receiver, state_receiver)?
        }
        cpal::SampleFormat::I16 => {
            run_audio_stream::<i16>(&device, &config.into(), sound_receiver, state_receiver)?
        }
        cpal::SampleFormat::U16 => {
            run_audio_stream::<u16>(&device, &config.into(), sound_receiver, state_receiver)?
        }
        _ => return Err(anyhow::anyhow!("unsupported audio sample format")),
    };

    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect) => {
                let _ = sound_sender.try_send(effect);
            }
            AudioCommand::PlayMusic(playing) => {
                music_playing = playing;
                let _ = state_sender.try_send((music_playing, volume));
            }
            AudioCommand::SetVolume(new_volume) => {
                volume = new_volume;
                let _ = state_sender.try_send((music_playing, volume));
            }
        }
    }

    Ok(())
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sound_receiver: Receiver<SoundEffect>,
    state_receiver: Receiver<(bool, f32)>,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = f64::from(config.sample_rate.0);
    let channels = config.channels as usize;

    let mut music_playing = false;
    let mut volume = 0.5f32;
    let mut music = background_music();
    music.set_sample_rate(sample_rate);

    let mut active_sounds: Vec<(SoundEffect, f64)> = Vec::new();
    let mut current_time = 0.0f64;

    let mut next_value = move || {
        while let Ok((playing, new_volume)) = state_receiver.try_recv() {
            music_playing = playing;
            volume = new_volume;
        }

        while let Ok(effect) = sound_receiver.try_recv() {
            active_sounds.push((effect, current_time));
        }

        let mut left = 0.0f32;
        let mut right = 0.0f32;

        active_sounds.retain(|&(effect, start_time)| {
            let t = current_time - start_time;
            if t > 2.0 {
                return false;
            }
            let (l, r) = effect_sample(effect, t as f32);
            left += l;
            right += r;
            true
        });

        if music_playing {
            let (l, r) = music.get_stereo();
            left += l;
            right += r;
        }

        current_time += 1.0 / sample_rate;

        left = (left * volume).clamp(-1.0, 1.0);
        right = (right * volume).clamp(-1.0, 1.0);
        (left, right)
    };

    let err_fn = |err| warn!("audio stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let sample = next_value();
                let left = T::from_sample(sample.0);
                let right = T::from_sample(sample.1);
                for (channel, out) in frame.iter_mut().enumerate() {
                    *out = if channel & 1 == 0 { left } else { right };
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

/// Looping synthesized background clip: a bass drone, a slow pentatonic
/// melody and a quiet chord pad.
fn background_music() -> Box<dyn AudioUnit> {
    let bass = sine_hz(110.0) * 0.08;

    let melody = lfo(move |t| {
        let notes = [220.0, 261.63, 293.66, 349.23, 392.0];
        let idx = ((t * 0.5) % 5.0) as usize;
        notes[idx]
    }) >> sine() * 0.1;

    let chord = sine_hz(220.0) * 0.03 + sine_hz(329.63) * 0.02 + sine_hz(392.0) * 0.02;

    Box::new((bass + melody + chord) * 0.6 >> pan(0.0))
}

/// Pure sample generator for the short effect cues; `t` is seconds since
/// the cue started.
pub fn effect_sample(effect: SoundEffect, t: f32) -> (f32, f32) {
    if t > 2.0 {
        return (0.0, 0.0);
    }

    match effect {
        SoundEffect::PieceLock => {
            // Short thud
            let amp = (0.1 - t).max(0.0) * 5.0;
            let noise = fastrand::f32() * 0.1;
            let tone = (t * 80.0 * std::f32::consts::TAU).sin() * 0.2;
            let sample = (noise + tone) * amp;
            (sample * 0.8, sample * 1.2)
        }
        SoundEffect::LineClear => {
            // Rising sweep
            let freq = 300.0 + 500.0 * (t * 5.0).min(1.0);
            let amp = if t < 0.2 {
                1.0
            } else {
                (0.5 - t).max(0.0) * 2.0
            };
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp * 0.3;
            (sample * 1.2, sample * 0.8)
        }
        SoundEffect::GameOver => {
            // Descending pitch
            let freq = 600.0 - 400.0 * t;
            let amp = (2.0 - t).max(0.0) * 0.5;
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp * 0.4;
            (sample, sample)
        }
    }
}
