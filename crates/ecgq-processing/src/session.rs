//! Live quality session for a continuous ECG stream
//!
//! A session owns one classifier and receives windows over a channel in
//! arrival order. Each label is published to broadcast subscribers as soon
//! as the window is classified; the aggregate follows when the session is
//! finished.

use crate::classifier::{aggregate_labels, RecordingQuality, WindowedQualityClassifier};
use crate::config::{validate_quality_threshold, QualityConfig};
use ecgq_core::{AggregateLabel, LabeledPoint, QualityError, QualityLabel, QualityResult, Window};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Commands accepted by a running session
#[derive(Debug, Clone)]
pub enum SessionCommand {
    Submit(Window),
    Finish,
}

/// Published session output
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A window was classified
    Window(LabeledPoint<QualityLabel>),
    /// A window could not be classified; history is unchanged
    Rejected { reason: String },
    /// The session ended with at least one classified window
    Finished(LabeledPoint<AggregateLabel>),
}

/// Cloneable handle for feeding and observing a session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    command_sender: mpsc::Sender<SessionCommand>,
    event_sender: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Queue a window for classification
    pub async fn submit(&self, window: Window) -> QualityResult<()> {
        self.command_sender
            .send(SessionCommand::Submit(window))
            .await
            .map_err(|_| QualityError::SessionClosed)
    }

    /// Ask the session to aggregate and stop after queued windows
    pub async fn finish(&self) -> QualityResult<()> {
        self.command_sender
            .send(SessionCommand::Finish)
            .await
            .map_err(|_| QualityError::SessionClosed)
    }

    /// Receive events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_sender.subscribe()
    }
}

/// Classifier service for one continuous recording
pub struct QualitySession {
    classifier: WindowedQualityClassifier,
    quality_threshold: f64,
    command_receiver: mpsc::Receiver<SessionCommand>,
    event_sender: broadcast::Sender<SessionEvent>,
    labels: Vec<LabeledPoint<QualityLabel>>,
}

impl QualitySession {
    /// Create a session and the handle that drives it
    pub fn new(config: QualityConfig, quality_threshold: f64) -> QualityResult<(Self, SessionHandle)> {
        validate_quality_threshold(quality_threshold)?;
        let classifier = WindowedQualityClassifier::new(config)?;

        let (command_sender, command_receiver) = mpsc::channel(32);
        let (event_sender, _) = broadcast::channel(256);

        let session = QualitySession {
            classifier,
            quality_threshold,
            command_receiver,
            event_sender: event_sender.clone(),
            labels: Vec::new(),
        };
        let handle = SessionHandle {
            command_sender,
            event_sender,
        };

        Ok((session, handle))
    }

    /// Process commands until `Finish` or until every handle is dropped
    pub async fn run(mut self) -> QualityResult<RecordingQuality> {
        info!(
            buffer_length = self.classifier.config().buffer_length,
            quality_threshold = self.quality_threshold,
            "quality session started"
        );

        while let Some(command) = self.command_receiver.recv().await {
            match command {
                SessionCommand::Submit(window) => self.process_window(&window),
                SessionCommand::Finish => break,
            }
        }

        let quality = aggregate_labels(self.labels, self.quality_threshold);
        match &quality {
            Ok(quality) => {
                info!(
                    windows = quality.windows.len(),
                    good_fraction = quality.good_fraction,
                    aggregate = %quality.aggregate.label,
                    "quality session finished"
                );
                // Ignore if no receivers
                let _ = self.event_sender.send(SessionEvent::Finished(quality.aggregate));
            }
            Err(e) => warn!("quality session finished without a verdict: {}", e),
        }

        quality
    }

    fn process_window(&mut self, window: &Window) {
        let classified = window
            .start_time()
            .ok_or(QualityError::EmptyWindow)
            .and_then(|start| {
                let label = self.classifier.classify_window(&window.values())?;
                Ok(LabeledPoint::new(start, label))
            });

        let event = match classified {
            Ok(point) => {
                self.labels.push(point);
                SessionEvent::Window(point)
            }
            Err(e) => {
                warn!("rejected window: {}", e);
                SessionEvent::Rejected {
                    reason: e.to_string(),
                }
            }
        };

        debug!(windows = self.labels.len(), "session window processed");
        let _ = self.event_sender.send(event);
    }
}

/// Start a session on a background task
pub fn spawn_session(
    config: QualityConfig,
    quality_threshold: f64,
) -> QualityResult<(SessionHandle, JoinHandle<QualityResult<RecordingQuality>>)> {
    let (session, handle) = QualitySession::new(config, quality_threshold)?;
    let task = tokio::spawn(session.run());
    Ok((handle, task))
}
