//! Real-time ECG window streaming for live quality sessions

use crate::contact_patterns::ContactPattern;
use crate::ecg_simulator::{EcgSimConfig, EcgSimulator};
use ecgq_core::{config_error, QualityResult, Window};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Duration, Instant};
use tracing::{debug, info, warn};

/// Configuration for real-time streaming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// ECG simulation configuration
    pub sim: EcgSimConfig,
    /// Signal time covered by each emitted window
    pub window_duration_ms: u64,
    /// How often a window is emitted, in Hz
    pub update_rate_hz: f32,
    /// Windows buffered per subscriber before it lags
    pub buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sim: EcgSimConfig::default(),
            window_duration_ms: 3_000,
            update_rate_hz: 10.0,
            buffer_size: 50,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> QualityResult<()> {
        if self.window_duration_ms == 0 {
            return Err(config_error!("stream window duration must be positive"));
        }
        self.tick_period()?;
        if self.buffer_size == 0 {
            return Err(config_error!("stream buffer size must be at least 1"));
        }
        Ok(())
    }

    /// Time between emitted windows; must be a non-zero representable duration
    pub fn tick_period(&self) -> QualityResult<Duration> {
        if !(self.update_rate_hz.is_finite() && self.update_rate_hz > 0.0) {
            return Err(config_error!("stream update rate must be positive"));
        }
        let period = Duration::try_from_secs_f32(1.0 / self.update_rate_hz)
            .map_err(|e| config_error!("stream update rate {} Hz: {}", self.update_rate_hz, e))?;
        if period.is_zero() {
            return Err(config_error!(
                "stream update rate {} Hz is too high for a timer",
                self.update_rate_hz
            ));
        }
        Ok(period)
    }
}

/// Commands for controlling the stream
#[derive(Debug, Clone)]
pub enum StreamCommand {
    Start,
    /// Stop and rewind signal time
    Stop,
    Pause,
    Resume,
    SetPattern(ContactPattern),
    Shutdown,
}

/// Simulated ECG source that emits one window per tick
pub struct RealTimeEcgStream {
    config: StreamConfig,
    simulator: EcgSimulator,
    window_sender: broadcast::Sender<Window>,
    control_receiver: mpsc::Receiver<StreamCommand>,
    is_running: bool,
    windows_emitted: u64,
}

impl RealTimeEcgStream {
    /// Create a stream and the sender that controls it
    pub fn new(config: StreamConfig) -> QualityResult<(Self, mpsc::Sender<StreamCommand>)> {
        config.validate()?;
        let simulator = EcgSimulator::new(config.sim.clone())?;
        let (window_sender, _) = broadcast::channel(config.buffer_size);
        let (control_sender, control_receiver) = mpsc::channel(32);

        let stream = RealTimeEcgStream {
            config,
            simulator,
            window_sender,
            control_receiver,
            is_running: false,
            windows_emitted: 0,
        };
        Ok((stream, control_sender))
    }

    /// Get a receiver for emitted windows
    pub fn subscribe(&self) -> broadcast::Receiver<Window> {
        self.window_sender.subscribe()
    }

    /// Run until `Shutdown` or until every control sender is dropped
    pub async fn run(mut self) -> QualityResult<u64> {
        let period = self.config.tick_period()?;
        let mut ticker = interval(period);

        info!(
            update_rate_hz = self.config.update_rate_hz,
            window_duration_ms = self.config.window_duration_ms,
            pattern = %self.simulator.config().pattern.description(),
            "ECG stream ready"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.is_running {
                        self.emit_window(period);
                    }
                }
                command = self.control_receiver.recv() => {
                    match command {
                        Some(StreamCommand::Start) | Some(StreamCommand::Resume) => {
                            self.is_running = true;
                            debug!("ECG stream running");
                        }
                        Some(StreamCommand::Pause) => {
                            self.is_running = false;
                            debug!("ECG stream paused");
                        }
                        Some(StreamCommand::Stop) => {
                            self.is_running = false;
                            self.simulator.reset_time();
                            info!(windows = self.windows_emitted, "ECG stream stopped");
                        }
                        Some(StreamCommand::SetPattern(pattern)) => {
                            info!(pattern = %pattern.description(), "ECG stream pattern updated");
                            self.simulator.set_pattern(pattern);
                            self.config.sim.pattern = pattern;
                        }
                        Some(StreamCommand::Shutdown) | None => break,
                    }
                }
            }
        }

        info!(windows = self.windows_emitted, "ECG stream shut down");
        Ok(self.windows_emitted)
    }

    fn emit_window(&mut self, budget: Duration) {
        let started = Instant::now();
        let window = self.simulator.generate_window(self.config.window_duration_ms);
        let elapsed = started.elapsed();

        self.windows_emitted += 1;
        // Ignore if no receivers
        let _ = self.window_sender.send(window);

        if elapsed > budget {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = budget.as_millis() as u64,
                "window generation slower than update rate"
            );
        }
    }
}

/// Helper function to create and start a stream in the background
pub fn start_ecg_stream(
    config: StreamConfig,
) -> QualityResult<(broadcast::Receiver<Window>, mpsc::Sender<StreamCommand>)> {
    let (stream, control_sender) = RealTimeEcgStream::new(config)?;
    let window_receiver = stream.subscribe();

    tokio::spawn(async move {
        if let Err(e) = stream.run().await {
            warn!("ECG stream error: {}", e);
        }
    });

    Ok((window_receiver, control_sender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn fast_config() -> StreamConfig {
        StreamConfig {
            sim: EcgSimConfig {
                seed: Some(3),
                ..Default::default()
            },
            window_duration_ms: 100,
            update_rate_hz: 50.0,
            buffer_size: 64,
        }
    }

    #[tokio::test]
    async fn test_stream_emits_contiguous_windows() {
        let (mut windows, control) = start_ecg_stream(fast_config()).unwrap();
        control.send(StreamCommand::Start).await.unwrap();
        sleep(Duration::from_millis(200)).await;

        let mut received = Vec::new();
        while let Ok(window) = windows.try_recv() {
            received.push(window);
        }
        assert!(received.len() >= 3, "got {} windows", received.len());

        for window in &received {
            assert_eq!(window.len(), 25);
        }
        for pair in received.windows(2) {
            let gap = pair[1].start_time().unwrap().as_millis() - pair[0].end_time().unwrap().as_millis();
            assert_eq!(gap, 4);
        }

        control.send(StreamCommand::Shutdown).await.unwrap();
    }

    #[tokio::test]
    async fn test_nothing_emitted_until_started() {
        let (mut windows, control) = start_ecg_stream(fast_config()).unwrap();
        sleep(Duration::from_millis(100)).await;
        assert!(windows.try_recv().is_err());

        control.send(StreamCommand::Start).await.unwrap();
        let window = windows.recv().await.unwrap();
        assert_eq!(window.start_time().unwrap().as_millis(), 0);
        control.send(StreamCommand::Shutdown).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_pattern_changes_signal() {
        let (mut windows, control) = start_ecg_stream(fast_config()).unwrap();
        control
            .send(StreamCommand::SetPattern(ContactPattern::Detached { rail: 4095 }))
            .await
            .unwrap();
        control.send(StreamCommand::Start).await.unwrap();

        let window = windows.recv().await.unwrap();
        assert!(window.values().iter().all(|&v| v == 4095));
        control.send(StreamCommand::Shutdown).await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_reports_count() {
        let (stream, control) = RealTimeEcgStream::new(fast_config()).unwrap();
        let mut windows = stream.subscribe();
        let task = tokio::spawn(stream.run());

        control.send(StreamCommand::Start).await.unwrap();
        windows.recv().await.unwrap();
        control.send(StreamCommand::Pause).await.unwrap();
        control.send(StreamCommand::Shutdown).await.unwrap();

        let emitted = task.await.unwrap().unwrap();
        assert!(emitted >= 1);
    }

    #[test]
    fn test_invalid_stream_config() {
        let config = StreamConfig {
            update_rate_hz: 0.0,
            ..Default::default()
        };
        assert!(RealTimeEcgStream::new(config).is_err());
    }

    #[test]
    fn test_update_rate_must_give_nonzero_period() {
        for rate in [f32::MAX, 1e12, f32::MIN_POSITIVE, f32::INFINITY, f32::NAN] {
            let config = StreamConfig {
                update_rate_hz: rate,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "rate {} accepted", rate);
            assert!(RealTimeEcgStream::new(config).is_err());
        }

        let config = StreamConfig {
            update_rate_hz: 1_000.0,
            ..Default::default()
        };
        assert_eq!(config.tick_period().unwrap(), Duration::from_millis(1));
    }
}
