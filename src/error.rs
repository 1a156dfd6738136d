use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("harmonic profile has {ratios} ratios but {weights} weights")]
    ProfileLengthMismatch { ratios: usize, weights: usize },

    #[error("harmonic profile needs at least one partial")]
    EmptyProfile,

    #[error("harmonic ratios must be positive, got {0}")]
    InvalidRatio(f32),

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("chunk size must be positive")]
    InvalidChunkSize,

    #[error("{stage} duration must not be negative, got {seconds}")]
    NegativeDuration { stage: &'static str, seconds: f32 },

    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("failed to query output config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("render thread exited before reporting ready")]
    EngineStartup,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse instrument preset: {0}")]
    PresetParse(#[from] ron::de::SpannedError),

    #[error("failed to serialize instrument preset: {0}")]
    PresetEncode(#[from] ron::Error),
}
