use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam::channel::{Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use ringbuf::{
    HeapProd, HeapRb,
    traits::{Consumer, Producer, Split},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::audio::{
    advance_envelope, apply_ramp, render_voice, EnvelopeRates, HarmonicProfile, TimeBase,
    VoiceRegistry,
};
use crate::config::SynthConfig;
use crate::controls::Controls;
use crate::error::SynthError;

#[derive(Debug, Clone)]
pub enum EngineCommand {
    Stop,
}

/// Handle to a running engine. Dropping it without calling `shutdown`
/// disconnects the command channel, which stops the render thread after its
/// current chunk.
pub struct SynthHandle {
    command_tx: Sender<EngineCommand>,
    thread: std::thread::JoinHandle<()>,
}

impl SynthHandle {
    pub fn shutdown(self) {
        let _ = self.command_tx.send(EngineCommand::Stop);
        let _ = self.thread.join();
    }
}

/// Starts the render thread and opens the output stream, returning the
/// handle and the input-facing controls. Fails fast on invalid
/// configuration or an unavailable output device.
pub fn spawn_synth(
    config: SynthConfig,
    profile: HarmonicProfile,
) -> Result<(SynthHandle, Controls), SynthError> {
    config.validate()?;

    let registry = Arc::new(Mutex::new(VoiceRegistry::new()));
    let (command_tx, command_rx) = crossbeam::channel::bounded(1);
    let (ready_tx, ready_rx) = crossbeam::channel::bounded(1);

    let thread_registry = registry.clone();
    let thread_config = config.clone();
    let thread = std::thread::spawn(move || {
        render_thread(thread_config, profile, thread_registry, command_rx, ready_tx);
    });

    match ready_rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            let _ = thread.join();
            return Err(e);
        }
        Err(_) => {
            let _ = thread.join();
            return Err(SynthError::EngineStartup);
        }
    }

    Ok((SynthHandle { command_tx, thread }, Controls::new(registry)))
}

fn render_thread(
    config: SynthConfig,
    profile: HarmonicProfile,
    registry: Arc<Mutex<VoiceRegistry>>,
    command_rx: Receiver<EngineCommand>,
    ready_tx: Sender<Result<(), SynthError>>,
) {
    let (stream, mut producer) = match open_output(&config) {
        Ok(output) => {
            let _ = ready_tx.send(Ok(()));
            output
        }
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    let pace = Duration::from_secs_f64(config.chunk_duration());
    let mut synth = Synth::new(&config, profile, registry);
    let mut chunk = vec![0.0_f32; config.chunk_size];

    loop {
        match command_rx.try_recv() {
            Ok(EngineCommand::Stop) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }

        synth.render_chunk(&mut chunk);

        let mut written = 0;
        while written < chunk.len() {
            written += producer.push_slice(&chunk[written..]);
            if written < chunk.len() {
                // Sink already holds a full chunk; wait out one buffer.
                std::thread::sleep(pace);
            }
        }
    }

    drop(stream);
    info!("render loop stopped");
}

fn open_output(config: &SynthConfig) -> Result<(cpal::Stream, HeapProd<f32>), SynthError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(SynthError::NoOutputDevice)?;
    let channels = device.default_output_config()?.channels() as usize;

    let stream_config = cpal::StreamConfig {
        channels: channels as u16,
        sample_rate: config.sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    let ring = HeapRb::<f32>::new(config.chunk_size * 2);
    let (producer, mut consumer) = ring.split();

    let stream = device.build_output_stream(
        &stream_config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            // Mono chunks fan out to every device channel; an underrun
            // plays silence.
            for frame in data.chunks_mut(channels) {
                let sample = consumer.try_pop().unwrap_or(0.0);
                for out in frame.iter_mut() {
                    *out = sample;
                }
            }
        },
        |err| error!("audio stream error: {err}"),
        None,
    )?;
    stream.play()?;

    info!(channels, sample_rate = config.sample_rate, "audio output open");

    Ok((stream, producer))
}

/// Per-tick mixer: renders every registered voice at the shared time base,
/// shapes it with its envelope ramp, and sums the result into one chunk.
pub struct Synth {
    profile: HarmonicProfile,
    registry: Arc<Mutex<VoiceRegistry>>,
    time: TimeBase,
    rates: EnvelopeRates,
    scratch: Vec<f32>,
}

impl Synth {
    pub fn new(
        config: &SynthConfig,
        profile: HarmonicProfile,
        registry: Arc<Mutex<VoiceRegistry>>,
    ) -> Self {
        Self {
            profile,
            registry,
            time: TimeBase::new(config.sample_rate, config.chunk_size),
            rates: EnvelopeRates::from_config(config),
            scratch: vec![0.0; config.chunk_size],
        }
    }

    pub fn time_offset(&self) -> f64 {
        self.time.offset()
    }

    /// Produces one output chunk. The registry lock is held for the whole
    /// tick, so input events land either entirely before or entirely after
    /// a chunk, never in the middle of one.
    pub fn render_chunk(&mut self, out: &mut [f32]) {
        debug_assert_eq!(out.len(), self.scratch.len());
        out.fill(0.0);

        let Self {
            profile,
            registry,
            time,
            rates,
            scratch,
        } = self;
        let mut registry = registry.lock();

        if registry.is_idle() {
            time.reset();
            return;
        }

        for voice in registry.attacking.values_mut() {
            render_voice(scratch, voice.fundamental, profile, time);
            let (start, end) = advance_envelope(voice, rates);
            if start < 1.0 {
                apply_ramp(scratch, start, end);
            }
            mix(out, scratch);
        }

        // A voice entered with no level left is retired here, contributing
        // nothing this tick.
        registry.releasing.retain(|_, voice| {
            if voice.amplitude <= 0.0 {
                return false;
            }
            render_voice(scratch, voice.fundamental, profile, time);
            let (start, end) = advance_envelope(voice, rates);
            apply_ramp(scratch, start, end);
            mix(out, scratch);
            true
        });

        time.advance();
    }
}

fn mix(out: &mut [f32], chunk: &[f32]) {
    for (acc, sample) in out.iter_mut().zip(chunk) {
        *acc += sample;
    }
}
