// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Panic-alert dispatcher.
//!
//! Converts one user trigger into at most one outbound alert. The phase
//! machine (Idle → Arming → Sending → Cooldown → Idle) is published on a
//! watch channel; UI layers drive haptic and pulse feedback from those
//! transitions. Arming is a compare-and-set, so triggers arriving while a
//! dispatch is in progress are dropped rather than queued.

use crate::error::AppError;
use crate::models::Coordinates;
use crate::services::location::LocationProvider;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// The slice of the backend gateway the dispatcher needs.
#[async_trait]
pub trait AlertGateway: Send + Sync {
    /// Submit one panic alert under the active session's credentials.
    async fn submit_alert(&self, coordinates: Coordinates) -> crate::error::Result<()>;
}

/// Dispatcher phase, observable by UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    /// Ready; a trigger will be accepted.
    Idle,
    /// Trigger accepted, acquiring location. Feedback pulse starts here.
    Arming,
    /// Location acquired, alert request in flight.
    Sending,
    /// Fixed hold after every attempt before re-arming.
    Cooldown,
}

/// What became of one `trigger()` call.
#[derive(Debug)]
pub enum TriggerOutcome {
    /// The backend accepted the alert.
    Sent,
    /// The dispatcher was not idle; nothing happened.
    Ignored,
    /// Location or submission failed; no second attempt is made.
    Failed(AppError),
}

impl TriggerOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, TriggerOutcome::Sent)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, TriggerOutcome::Ignored)
    }
}

pub struct AlertDispatcher {
    location: Arc<dyn LocationProvider>,
    gateway: Arc<dyn AlertGateway>,
    phase_tx: watch::Sender<DispatchPhase>,
    cooldown: Duration,
    location_timeout: Duration,
}

impl AlertDispatcher {
    pub fn new(
        location: Arc<dyn LocationProvider>,
        gateway: Arc<dyn AlertGateway>,
        cooldown: Duration,
        location_timeout: Duration,
    ) -> Self {
        let (phase_tx, _) = watch::channel(DispatchPhase::Idle);
        Self {
            location,
            gateway,
            phase_tx,
            cooldown,
            location_timeout,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DispatchPhase {
        *self.phase_tx.borrow()
    }

    /// Subscribe to phase transitions (haptic/pulse feedback source).
    pub fn subscribe(&self) -> watch::Receiver<DispatchPhase> {
        self.phase_tx.subscribe()
    }

    /// Fire a panic alert.
    ///
    /// No-op unless the dispatcher is Idle. On acceptance: acquire a
    /// location fix under the configured bound, submit the alert, then hold
    /// the cooldown window — success or failure — before returning to Idle.
    /// Never issues two concurrent submissions.
    pub async fn trigger(&self) -> TriggerOutcome {
        let armed = self.phase_tx.send_if_modified(|phase| {
            if *phase == DispatchPhase::Idle {
                *phase = DispatchPhase::Arming;
                true
            } else {
                false
            }
        });
        if !armed {
            tracing::debug!("Trigger ignored, dispatch already in progress");
            return TriggerOutcome::Ignored;
        }

        let outcome = self.dispatch().await;

        self.phase_tx.send_replace(DispatchPhase::Cooldown);
        tokio::time::sleep(self.cooldown).await;
        self.phase_tx.send_replace(DispatchPhase::Idle);

        outcome
    }

    async fn dispatch(&self) -> TriggerOutcome {
        let fix = tokio::time::timeout(self.location_timeout, self.location.current_coordinates())
            .await;

        let coordinates = match fix {
            Err(_) => {
                tracing::warn!("Location fix timed out, alert not sent");
                return TriggerOutcome::Failed(AppError::LocationUnavailable(
                    "timed out waiting for a fix".to_string(),
                ));
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Location fix failed, alert not sent");
                return TriggerOutcome::Failed(e.into());
            }
            Ok(Ok(coordinates)) => coordinates,
        };

        self.phase_tx.send_replace(DispatchPhase::Sending);
        tracing::info!(
            longitude = coordinates.longitude(),
            latitude = coordinates.latitude(),
            "Submitting panic alert"
        );

        match self.gateway.submit_alert(coordinates).await {
            Ok(()) => {
                tracing::info!("Panic alert delivered");
                TriggerOutcome::Sent
            }
            Err(e) => {
                tracing::error!(error = %e, "Panic alert submission failed");
                TriggerOutcome::Failed(e)
            }
        }
    }
}
