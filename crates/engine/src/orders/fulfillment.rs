//! Order fulfillment state machine.
//!
//! Legality comes from [`OrderStatus::allowed_transitions`]. This module adds
//! the payload rules: a cancellation must carry a non-blank reason, and a
//! delivery may carry notes and a photo.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pazar_core::OrderStatus;

/// A requested status change was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("order is {0} and accepts no further status changes")]
    Terminal(OrderStatus),

    #[error("cannot move an order from {from} to {to}")]
    NotAllowed { from: OrderStatus, to: OrderStatus },

    #[error("cancelling an order requires a reason")]
    MissingCancellationReason,
}

/// Non-blank cancellation reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CancellationReason(String);

impl CancellationReason {
    /// Parse a reason, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::MissingCancellationReason`] if the reason
    /// is empty after trimming.
    pub fn parse(reason: &str) -> Result<Self, TransitionError> {
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(TransitionError::MissingCancellationReason);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Informational proof of delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryEvidence {
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

/// Optional payload sent along with a status change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionMetadata {
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub delivery_notes: Option<String>,
    #[serde(default)]
    pub delivery_photo_url: Option<String>,
}

/// A requested status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub target: OrderStatus,
    #[serde(default)]
    pub metadata: TransitionMetadata,
}

impl TransitionRequest {
    /// Move to `target` with no payload.
    #[must_use]
    pub fn to(target: OrderStatus) -> Self {
        Self {
            target,
            metadata: TransitionMetadata::default(),
        }
    }

    /// Cancel with `reason`.
    #[must_use]
    pub fn cancel(reason: impl Into<String>) -> Self {
        Self {
            target: OrderStatus::Cancelled,
            metadata: TransitionMetadata {
                cancellation_reason: Some(reason.into()),
                ..TransitionMetadata::default()
            },
        }
    }

    /// Mark delivered, optionally with notes and a photo.
    #[must_use]
    pub fn deliver(notes: Option<String>, photo_url: Option<String>) -> Self {
        Self {
            target: OrderStatus::Delivered,
            metadata: TransitionMetadata {
                delivery_notes: notes,
                delivery_photo_url: photo_url,
                ..TransitionMetadata::default()
            },
        }
    }
}

/// A legal, fully-specified status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: OrderStatus,
    pub to: OrderStatus,
    /// Present exactly when `to` is cancelled.
    pub cancellation_reason: Option<CancellationReason>,
    /// Only kept when `to` is delivered.
    pub delivery: Option<DeliveryEvidence>,
}

impl Transition {
    /// Check `request` against the transition table from `current`.
    ///
    /// Payload that does not belong to the target state is dropped.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::Terminal`] if `current` is delivered or cancelled
    /// - [`TransitionError::NotAllowed`] if the table has no such edge
    /// - [`TransitionError::MissingCancellationReason`] for a cancellation
    ///   without a non-blank reason
    pub fn plan(current: OrderStatus, request: &TransitionRequest) -> Result<Self, TransitionError> {
        if current.is_terminal() {
            return Err(TransitionError::Terminal(current));
        }

        let target = request.target;
        if !current.can_transition_to(target) {
            return Err(TransitionError::NotAllowed {
                from: current,
                to: target,
            });
        }

        let cancellation_reason = if target == OrderStatus::Cancelled {
            let reason = request
                .metadata
                .cancellation_reason
                .as_deref()
                .ok_or(TransitionError::MissingCancellationReason)?;
            Some(CancellationReason::parse(reason)?)
        } else {
            None
        };

        let delivery = (target == OrderStatus::Delivered)
            .then(|| DeliveryEvidence {
                notes: request.metadata.delivery_notes.clone(),
                photo_url: request.metadata.delivery_photo_url.clone(),
            })
            .filter(|evidence| evidence.notes.is_some() || evidence.photo_url.is_some());

        Ok(Self {
            from: current,
            to: target,
            cancellation_reason,
            delivery,
        })
    }
}

/// Next status on the happy path, or `None` from a terminal state.
#[must_use]
pub fn get_next_status(current: OrderStatus) -> Option<OrderStatus> {
    current.next_status()
}
