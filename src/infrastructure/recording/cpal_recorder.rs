//! In-process recorder using cpal
//!
//! Captures the default input device and mixes it down to mono. On stop the
//! samples are resampled to the configured rate and written as FLAC.
//!
//! The stream is managed on its own capture thread because cpal::Stream is
//! not Send.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use thiserror::Error;
use tracing::{debug, warn};

use super::ensure_output_dir;
use super::flac_encoder::{encode_to_flac, EncodingError};
use super::pending::PendingWrites;
use crate::application::ports::{
    AudioRecorder, RecorderError, RecorderFactory, RecordingFinishedObserver,
};
use crate::domain::recording::{AudioFormat, EncoderSettings};

/// How long `record` waits for the capture thread to open the stream
const STARTUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Capture thread poll interval while waiting for stop
const POLL_INTERVAL: Duration = Duration::from_millis(20);

type SampleBuffer = Arc<Mutex<Vec<i16>>>;

/// Errors while turning captured samples into a file
#[derive(Debug, Error)]
enum FinalizeError {
    #[error("No audio data captured")]
    NoAudio,

    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error(transparent)]
    Encode(#[from] EncodingError),

    #[error("Failed to write file: {0}")]
    Write(#[from] std::io::Error),
}

/// Creates cpal recorders (FLAC output only)
#[derive(Default)]
pub struct CpalRecorderFactory {
    pending: PendingWrites,
}

impl CpalRecorderFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecorderFactory for CpalRecorderFactory {
    fn create(
        &self,
        path: &Path,
        settings: &EncoderSettings,
    ) -> Result<Box<dyn AudioRecorder>, RecorderError> {
        if settings.format != AudioFormat::Flac {
            return Err(RecorderError::UnsupportedFormat {
                format: settings.format,
                backend: "cpal",
            });
        }
        if settings.channels != 1 {
            return Err(RecorderError::InvalidSettings(
                "the cpal recorder captures mono only".to_string(),
            ));
        }
        if settings.sample_rate == 0 {
            return Err(RecorderError::InvalidSettings(
                "sample rate must be positive".to_string(),
            ));
        }
        ensure_output_dir(path)?;

        // Fail at creation, not at record time, when no usable input exists
        let device = get_input_device()?;
        let (config, sample_format) = get_input_config(&device, settings.sample_rate)?;
        debug!(
            rate = config.sample_rate.0,
            channels = config.channels,
            format = ?sample_format,
            "Prepared cpal recorder"
        );

        Ok(Box::new(CpalRecorder {
            path: path.to_path_buf(),
            target_rate: settings.sample_rate,
            samples: Arc::new(Mutex::new(Vec::new())),
            device_rate: Arc::new(AtomicU32::new(0)),
            active: Arc::new(AtomicBool::new(false)),
            capture: None,
            observer: None,
            pending: self.pending.clone(),
        }))
    }

    async fn flush(&self) {
        self.pending.wait_idle().await;
    }
}

/// One cpal capture bound to one output file
pub struct CpalRecorder {
    path: PathBuf,
    target_rate: u32,
    /// Captured mono samples at the device rate
    samples: SampleBuffer,
    device_rate: Arc<AtomicU32>,
    active: Arc<AtomicBool>,
    capture: Option<JoinHandle<()>>,
    observer: Option<Arc<dyn RecordingFinishedObserver>>,
    pending: PendingWrites,
}

impl AudioRecorder for CpalRecorder {
    fn set_finished_observer(&mut self, observer: Arc<dyn RecordingFinishedObserver>) {
        self.observer = Some(observer);
    }

    fn record(&mut self) -> Result<(), RecorderError> {
        if self.active.load(Ordering::SeqCst) {
            return Err(RecorderError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        lock(&self.samples).clear();
        self.active.store(true, Ordering::SeqCst);

        let (ready_tx, ready_rx) = mpsc::channel();
        let samples = Arc::clone(&self.samples);
        let device_rate = Arc::clone(&self.device_rate);
        let active = Arc::clone(&self.active);
        let target_rate = self.target_rate;

        let handle = std::thread::spawn(move || {
            let stream = match open_stream(&samples, &device_rate, &active, target_rate) {
                Ok(stream) => stream,
                Err(e) => {
                    active.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));

            while active.load(Ordering::SeqCst) {
                std::thread::sleep(POLL_INTERVAL);
            }
            drop(stream);
        });

        match ready_rx.recv_timeout(STARTUP_TIMEOUT) {
            Ok(Ok(())) => {
                self.capture = Some(handle);
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                self.active.store(false, Ordering::SeqCst);
                Err(RecorderError::StartFailed(
                    "Timed out opening the input stream".to_string(),
                ))
            }
        }
    }

    fn stop(&mut self) {
        let Some(capture) = self.capture.take() else {
            return;
        };
        self.active.store(false, Ordering::SeqCst);

        let guard = self.pending.begin();
        let samples = Arc::clone(&self.samples);
        let device_rate = Arc::clone(&self.device_rate);
        let observer = self.observer.clone();
        let path = self.path.clone();
        let target_rate = self.target_rate;

        std::thread::spawn(move || {
            let _guard = guard;
            let _ = capture.join();

            let source_rate = device_rate.load(Ordering::SeqCst);
            let result = finalize(&samples, source_rate, target_rate, &path);
            if let Err(e) = &result {
                warn!(path = %path.display(), error = %e, "Failed to write recording");
            }

            if let Some(observer) = observer {
                observer.finished(result.is_ok());
            }
        });
    }

    fn is_recording(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CpalRecorder {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock(samples: &SampleBuffer) -> std::sync::MutexGuard<'_, Vec<i16>> {
    samples.lock().unwrap_or_else(|e| e.into_inner())
}

/// Get the default input device
fn get_input_device() -> Result<cpal::Device, RecorderError> {
    cpal::default_host()
        .default_input_device()
        .ok_or(RecorderError::NoInputDevice)
}

/// Pick an i16/f32 input configuration, preferring mono and `target_rate`
fn get_input_config(
    device: &cpal::Device,
    target_rate: u32,
) -> Result<(StreamConfig, SampleFormat), RecorderError> {
    let supported_configs = device
        .supported_input_configs()
        .map_err(|e| RecorderError::CreationFailed(format!("Failed to get configs: {}", e)))?;

    let includes_target = |config: &cpal::SupportedStreamConfigRange| {
        config.min_sample_rate().0 <= target_rate && config.max_sample_rate().0 >= target_rate
    };

    let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

    for config in supported_configs {
        if config.sample_format() != SampleFormat::I16
            && config.sample_format() != SampleFormat::F32
        {
            continue;
        }

        let is_better = match &best_config {
            None => true,
            Some(current) => {
                let fewer_channels = config.channels() < current.channels();
                let better_rate = includes_target(&config) && !includes_target(current);
                fewer_channels || better_rate
            }
        };
        if is_better {
            best_config = Some(config);
        }
    }

    let config_range = best_config.ok_or_else(|| {
        RecorderError::CreationFailed("No suitable input config found".to_string())
    })?;

    // Capture at the target rate when possible, otherwise resample later
    let sample_rate = if includes_target(&config_range) {
        SampleRate(target_rate)
    } else {
        config_range.min_sample_rate()
    };

    let sample_format = config_range.sample_format();
    let config = StreamConfig {
        channels: config_range.channels(),
        sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    Ok((config, sample_format))
}

/// Open and start the input stream, appending mono samples to `samples`
fn open_stream(
    samples: &SampleBuffer,
    device_rate: &Arc<AtomicU32>,
    active: &Arc<AtomicBool>,
    target_rate: u32,
) -> Result<cpal::Stream, RecorderError> {
    let device = get_input_device()?;
    let (config, sample_format) = get_input_config(&device, target_rate)?;
    let channels = config.channels;
    device_rate.store(config.sample_rate.0, Ordering::SeqCst);

    let on_error = |err| warn!(error = %err, "Audio stream error");

    let stream = match sample_format {
        SampleFormat::I16 => {
            let samples = Arc::clone(samples);
            let active = Arc::clone(active);
            device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if active.load(Ordering::SeqCst) {
                        let mono = downmix(data, channels);
                        lock(&samples).extend_from_slice(&mono);
                    }
                },
                on_error,
                None,
            )
        }
        SampleFormat::F32 => {
            let samples = Arc::clone(samples);
            let active = Arc::clone(active);
            device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if active.load(Ordering::SeqCst) {
                        let i16_data: Vec<i16> =
                            data.iter().map(|&s| (s * 32767.0) as i16).collect();
                        let mono = downmix(&i16_data, channels);
                        lock(&samples).extend_from_slice(&mono);
                    }
                },
                on_error,
                None,
            )
        }
        other => {
            return Err(RecorderError::StartFailed(format!(
                "Unsupported sample format: {:?}",
                other
            )))
        }
    }
    .map_err(|e| RecorderError::StartFailed(e.to_string()))?;

    stream
        .play()
        .map_err(|e| RecorderError::StartFailed(e.to_string()))?;

    Ok(stream)
}

/// Resample, encode and write the captured samples
fn finalize(
    samples: &SampleBuffer,
    source_rate: u32,
    target_rate: u32,
    path: &Path,
) -> Result<(), FinalizeError> {
    let captured = std::mem::take(&mut *lock(samples));
    if captured.is_empty() || source_rate == 0 {
        return Err(FinalizeError::NoAudio);
    }

    let resampled = resample(&captured, source_rate, target_rate)?;
    let flac = encode_to_flac(&resampled, target_rate)?;
    std::fs::write(path, flac)?;

    debug!(path = %path.display(), samples = resampled.len(), "Recording written");
    Ok(())
}

/// Mix interleaved frames down to mono
fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|chunk| {
            let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
            (sum / chunk.len() as i32) as i16
        })
        .collect()
}

/// Resample mono audio from `source_rate` to `target_rate`
fn resample(samples: &[i16], source_rate: u32, target_rate: u32) -> Result<Vec<i16>, FinalizeError> {
    if source_rate == target_rate {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = target_rate as f64 / source_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        1024, // Chunk size
        2,    // Sub-chunks
        1,    // Mono
    )
    .map_err(|e| FinalizeError::Resample(format!("init failed: {}", e)))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());

        // Zero-pad the final chunk
        let mut chunk = samples_f32[input_pos..end_pos].to_vec();
        chunk.resize(frames_needed, 0.0);

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| FinalizeError::Resample(e.to_string()))?;

        output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
        input_pos = end_pos;
    }

    output.truncate(output_len);

    Ok(output)
}
