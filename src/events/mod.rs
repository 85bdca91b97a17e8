//! Non-transactional audit side channel. Events are emitted after a create
//! commits; losing one never affects the committed call.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::inspection::CallStage;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    InspectionCallCreated {
        call_id: Uuid,
        ic_number: String,
        stage: CallStage,
        po_no: String,
        timestamp: DateTime<Utc>,
    },
    /// A process call drew quantity from a raw material heat
    HeatQuantityDrawn {
        rm_ic_number: String,
        heat_number: String,
        process_ic_number: String,
        offered_qty: Decimal,
        remaining_qty: Decimal,
    },
}

/// Consumes audit events until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match event {
            Event::InspectionCallCreated {
                call_id,
                ic_number,
                stage,
                po_no,
                timestamp,
            } => {
                info!(
                    target: "audit",
                    %call_id,
                    %ic_number,
                    %stage,
                    %po_no,
                    %timestamp,
                    "Inspection call created"
                );
            }
            Event::HeatQuantityDrawn {
                rm_ic_number,
                heat_number,
                process_ic_number,
                offered_qty,
                remaining_qty,
            } => {
                info!(
                    target: "audit",
                    %rm_ic_number,
                    %heat_number,
                    %process_ic_number,
                    %offered_qty,
                    %remaining_qty,
                    "Heat quantity drawn by process call"
                );
            }
        }
    }

    warn!("Event processing loop has ended");
}
