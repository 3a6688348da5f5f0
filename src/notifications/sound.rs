use std::{collections::HashMap, sync::{Arc, Mutex}, time::Duration};

use crate::{error::AppError, models::SoundType};

use super::{NotificationChannel, TriggerEvent};

pub const PREVIEW_LENGTH: Duration = Duration::from_secs(2);

/// Something that can hold and drive one audio handle per sound type.
pub trait AudioSink: Send + Sync {
    fn preload(&self, sound: SoundType, src: &str, looping: bool) -> Result<(), AppError>;
    fn play(&self, sound: SoundType) -> Result<(), AppError>;
    fn pause(&self, sound: SoundType);
    fn rewind(&self, sound: SoundType);
    fn preview(&self, sound: SoundType, src: &str, length: Duration) -> Result<(), AppError>;
}

/// Plays at most one looping alert sound at a time.
pub struct SoundChannel {
    sink: Arc<dyn AudioSink>,
    sources: HashMap<SoundType, String>,
    active: Mutex<Option<SoundType>>,
}

pub fn sound_src(base: &str, sound: SoundType) -> String {
    format!("{}/{}.mp3", base.trim_end_matches('/'), sound.as_str())
}

impl SoundChannel {
    pub fn new(sink: Arc<dyn AudioSink>, sounds_path: &str) -> Self {
        let sources = SoundType::ALL
            .into_iter()
            .map(|s| (s, sound_src(sounds_path, s)))
            .collect();

        Self {
            sink,
            sources,
            active: Mutex::new(None),
        }
    }

    /// Registers a looping handle for every sound type with the sink.
    pub fn preload(&self) {
        for sound in SoundType::ALL {
            if let Err(e) = self.sink.preload(sound, &self.sources[&sound], true) {
                tracing::warn!("could not preload {} sound: {}", sound, e);
            }
        }
    }

    pub fn sources(&self) -> &HashMap<SoundType, String> {
        &self.sources
    }

    pub fn active(&self) -> Option<SoundType> {
        *self.active.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn play(&self, sound: SoundType) -> Result<(), AppError> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(prev) = active.take() {
            self.sink.pause(prev);
            self.sink.rewind(prev);
        }

        *active = Some(sound);
        self.sink.play(sound)
    }

    pub fn stop(&self) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(prev) = active.take() {
            self.sink.pause(prev);
            self.sink.rewind(prev);
            tracing::debug!("stopped {} sound", prev);
        }
    }

    /// Short non-looping sample for the sound picker.
    pub fn preview(&self, sound: SoundType) -> Result<(), AppError> {
        self.stop();
        self.sink.preview(sound, &self.sources[&sound], PREVIEW_LENGTH)
    }
}

impl NotificationChannel for SoundChannel {
    fn name(&self) -> &'static str {
        "sound"
    }

    fn dispatch(&self, event: &TriggerEvent) -> Result<(), AppError> {
        self.play(event.alert.sound_type)
    }
}
