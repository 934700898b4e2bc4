//! WebSocket handler for UI notification clients
//!
//! Provides real-time event streaming to UI clients.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::select;
use tracing::{debug, error, info, warn};

use crate::notifications::{EventMessage, SharedEventBus};

/// Query parameters for filtering events
#[derive(Debug, Deserialize)]
pub struct EventFilter {
    /// Filter by product ID (optional)
    pub product_id: Option<String>,
    /// Filter by event types (comma-separated, optional)
    pub event_types: Option<String>,
}

impl EventFilter {
    /// Check if event matches the filter
    pub fn matches(&self, event: &EventMessage) -> bool {
        if let Some(ref product_id) = self.product_id {
            if let Some(event_product_id) = event.event.product_id() {
                if event_product_id != product_id {
                    return false;
                }
            } else {
                return false;
            }
        }

        if let Some(ref types) = self.event_types {
            let allowed_types: Vec<&str> = types.split(',').map(|s| s.trim()).collect();
            if !allowed_types.contains(&event.event.event_type()) {
                return false;
            }
        }

        true
    }
}

/// State for notification WebSocket handler
#[derive(Clone)]
pub struct NotificationState {
    pub event_bus: SharedEventBus,
}

/// WebSocket upgrade handler for notifications
pub async fn ws_notifications_handler(
    ws: WebSocketUpgrade,
    State(state): State<NotificationState>,
    Query(filter): Query<EventFilter>,
) -> impl IntoResponse {
    info!(
        "New notification WebSocket connection: product={:?}, event_types={:?}",
        filter.product_id, filter.event_types
    );

    ws.on_upgrade(move |socket| handle_notification_socket(socket, state, filter))
}

/// Handle a WebSocket connection for notifications
async fn handle_notification_socket(
    socket: WebSocket,
    state: NotificationState,
    filter: EventFilter,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscriber = state.event_bus.subscribe();

    // Send welcome message
    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Connected to notification stream",
        "filter": {
            "product_id": filter.product_id,
            "event_types": filter.event_types
        }
    });

    if let Err(e) = sender
        .send(Message::Text(welcome.to_string().into()))
        .await
    {
        error!("Failed to send welcome message: {}", e);
        return;
    }

    info!("Notification WebSocket client connected");

    loop {
        select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Received text message: {}", text);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = sender.send(Message::Pong(data)).await {
                            error!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {
                        debug!("Received pong");
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Client sent close");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    None => {
                        info!("WebSocket stream ended");
                        break;
                    }
                    _ => {}
                }
            }

            event = subscriber.recv() => {
                match event {
                    Some(event_msg) => {
                        if !filter.matches(&event_msg) {
                            continue;
                        }

                        match serde_json::to_string(&event_msg) {
                            Ok(json) => {
                                if let Err(e) = sender.send(Message::Text(json.into())).await {
                                    error!("Failed to send event: {}", e);
                                    break;
                                }
                                debug!("Event sent to client: {}", event_msg.event.event_type());
                            }
                            Err(e) => {
                                error!("Failed to serialize event: {}", e);
                            }
                        }
                    }
                    None => {
                        warn!("Event bus closed");
                        break;
                    }
                }
            }
        }
    }

    info!("Notification WebSocket client disconnected");
}

/// Create notification state
pub fn create_notification_state(event_bus: SharedEventBus) -> NotificationState {
    NotificationState { event_bus }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Event, ProductEvent, ProductRemovedEvent, StatusRefreshedEvent};
    use chrono::Utc;

    fn product_event(id: &str) -> EventMessage {
        EventMessage::new(Event::ProductAdded(ProductEvent {
            product_id: id.to_string(),
            name: "Fresh Milk".to_string(),
            status: "Healthy".to_string(),
            priority: 4,
            timestamp: Utc::now(),
        }))
    }

    #[test]
    fn empty_filter_passes_everything() {
        let filter = EventFilter {
            product_id: None,
            event_types: None,
        };
        assert!(filter.matches(&product_event("prod_1")));
    }

    #[test]
    fn product_filter_rejects_other_products_and_global_events() {
        let filter = EventFilter {
            product_id: Some("prod_1".to_string()),
            event_types: None,
        };
        assert!(filter.matches(&product_event("prod_1")));
        assert!(!filter.matches(&product_event("prod_2")));

        let global = EventMessage::new(Event::StatusRefreshed(StatusRefreshedEvent {
            updated: 1,
            timestamp: Utc::now(),
        }));
        assert!(!filter.matches(&global));
    }

    #[test]
    fn event_type_filter_accepts_listed_types_only() {
        let filter = EventFilter {
            product_id: None,
            event_types: Some("product_removed, status_refreshed".to_string()),
        };
        let removed = EventMessage::new(Event::ProductRemoved(ProductRemovedEvent {
            product_id: "prod_1".to_string(),
            name: "Fresh Milk".to_string(),
            timestamp: Utc::now(),
        }));
        assert!(filter.matches(&removed));
        assert!(!filter.matches(&product_event("prod_1")));
    }
}
