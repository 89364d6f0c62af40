/// Best-effort audio.
///
/// Game code only ever talks to `SoundManager`; whatever sits behind it may
/// be missing files or a sound device entirely.  No call here can fail.
use std::path::Path;

use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Laser,
    Explosion,
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::Laser, SoundCue::Explosion, SoundCue::GameOver];

    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Laser => "laser",
            SoundCue::Explosion => "explosion",
            SoundCue::GameOver => "game_over",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Laser => "laser.wav",
            SoundCue::Explosion => "explosion.wav",
            SoundCue::GameOver => "game_over.wav",
        }
    }
}

pub const MUSIC_FILE: &str = "background_music.mp3";

/// Something that can make noise.  Implementations swallow their own
/// failures.
pub trait AudioBackend {
    fn play(&mut self, cue: SoundCue);
    fn play_music(&mut self);
    fn stop_music(&mut self);
}

/// Backend used when no audio device or feature is available.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, _cue: SoundCue) {}
    fn play_music(&mut self) {}
    fn stop_music(&mut self) {}
}

pub struct SoundManager {
    backend: Box<dyn AudioBackend>,
}

impl SoundManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self { backend }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend))
    }

    /// Open the real audio device when built with the `audio` feature,
    /// falling back to silence.
    pub fn from_assets(assets_dir: &Path) -> Self {
        #[cfg(feature = "audio")]
        {
            match rodio_backend::RodioBackend::open(assets_dir) {
                Ok(backend) => return Self::new(Box::new(backend)),
                Err(e) => warn!("audio unavailable: {e}; continuing without sound"),
            }
        }
        #[cfg(not(feature = "audio"))]
        info!(
            "built without the `audio` feature; sounds in {} are ignored",
            assets_dir.display()
        );
        Self::silent()
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.backend.play(cue);
    }

    pub fn play_music(&mut self) {
        self.backend.play_music();
    }

    pub fn stop_music(&mut self) {
        self.backend.stop_music();
    }
}

impl std::fmt::Debug for SoundManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundManager").finish_non_exhaustive()
    }
}

/// Check which cue files exist, warning about the ones that don't.
pub fn available_cues(assets_dir: &Path) -> Vec<SoundCue> {
    SoundCue::ALL
        .into_iter()
        .filter(|cue| {
            let present = assets_dir.join(cue.file_name()).exists();
            if !present {
                warn!("sound file '{}' not found", cue.file_name());
            }
            present
        })
        .collect()
}

#[cfg(feature = "audio")]
mod rodio_backend {
    use std::collections::HashMap;
    use std::fs::File;
    use std::path::{Path, PathBuf};

    use rodio::mixer::Mixer;
    use rodio::{source::Source, Decoder, OutputStream, Sink};
    use tracing::{info, warn};

    use super::{available_cues, AudioBackend, SoundCue, MUSIC_FILE};

    pub struct RodioBackend {
        _stream: OutputStream,
        mixer: Mixer,
        cues: HashMap<SoundCue, PathBuf>,
        music_path: Option<PathBuf>,
        music: Option<Sink>,
    }

    impl RodioBackend {
        pub fn open(assets_dir: &Path) -> Result<Self, String> {
            let stream = rodio::OutputStreamBuilder::open_default_stream()
                .map_err(|e| format!("failed to open audio stream: {e}"))?;
            let mixer = stream.mixer().clone();

            let cues = available_cues(assets_dir)
                .into_iter()
                .map(|cue| (cue, assets_dir.join(cue.file_name())))
                .collect::<HashMap<_, _>>();

            let music = assets_dir.join(MUSIC_FILE);
            let music_path = if music.exists() {
                Some(music)
            } else {
                warn!("background music file not found");
                None
            };

            info!("audio initialised with {} cues", cues.len());
            Ok(Self {
                _stream: stream,
                mixer,
                cues,
                music_path,
                music: None,
            })
        }

        fn decode(path: &Path) -> Result<Decoder<std::io::BufReader<File>>, String> {
            let file = File::open(path).map_err(|e| format!("open {}: {e}", path.display()))?;
            Decoder::try_from(file).map_err(|e| format!("decode {}: {e}", path.display()))
        }
    }

    impl AudioBackend for RodioBackend {
        fn play(&mut self, cue: SoundCue) {
            let Some(path) = self.cues.get(&cue) else {
                return;
            };
            match Self::decode(path) {
                Ok(source) => {
                    let sink = Sink::connect_new(&self.mixer);
                    sink.append(source);
                    sink.detach();
                }
                Err(e) => {
                    warn!("disabling cue '{}': {e}", cue.name());
                    self.cues.remove(&cue);
                }
            }
        }

        fn play_music(&mut self) {
            let Some(path) = self.music_path.clone() else {
                return;
            };
            self.stop_music();
            match Self::decode(&path) {
                Ok(source) => {
                    let sink = Sink::connect_new(&self.mixer);
                    sink.append(source.repeat_infinite());
                    self.music = Some(sink);
                }
                Err(e) => {
                    warn!("disabling background music: {e}");
                    self.music_path = None;
                }
            }
        }

        fn stop_music(&mut self) {
            if let Some(sink) = self.music.take() {
                sink.stop();
            }
        }
    }
}
