//! Booking tools.
//!
//! Wrappers over the DirectStay booking endpoints: creation, per-property
//! listing, and status updates.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::error;

use crate::domains::tools::descriptor::{JsonObject, ParameterSchema, ToolDescriptor, ToolInvoke};
use crate::domains::tools::error::ToolFailure;

use super::client::DsClient;
use super::common::{path_segment, pick, soft_error};

/// Booking creation.
pub struct CreateBookingTool {
    client: DsClient,
}

impl CreateBookingTool {
    pub const NAME: &'static str = "create_booking";
    pub const DESCRIPTION: &'static str = "Create a new booking on DirectStay.";

    pub fn descriptor(client: DsClient) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(Self { client }),
        )
    }

    fn schema() -> ParameterSchema {
        ParameterSchema::object(
            json!({
                "propertyId": {
                    "type": "string",
                    "description": "The ID of the property to book."
                },
                "checkIn": {
                    "type": "string",
                    "description": "The check-in date (YYYY-MM-DD)."
                },
                "checkOut": {
                    "type": "string",
                    "description": "The check-out date (YYYY-MM-DD)."
                },
                "guests": {
                    "type": "integer",
                    "description": "The number of guests."
                },
                "totalPrice": {
                    "type": "number",
                    "description": "The total price for the booking."
                },
                "notes": {
                    "type": "string",
                    "description": "Optional notes for the booking."
                }
            }),
            &["propertyId", "checkIn", "checkOut", "guests", "totalPrice"],
        )
    }
}

#[async_trait]
impl ToolInvoke for CreateBookingTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let body = pick(
            &args,
            &["propertyId", "checkIn", "checkOut", "guests", "totalPrice", "notes"],
        );

        match self.client.post("/api/bookings", &body).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error creating booking: {}", err);
                Ok(soft_error("An error occurred while creating the booking."))
            }
        }
    }
}

/// Bookings for one property.
pub struct GetPropertyBookingsTool {
    client: DsClient,
}

impl GetPropertyBookingsTool {
    pub const NAME: &'static str = "get_property_bookings";
    pub const DESCRIPTION: &'static str = "Get all bookings for a specific property.";

    pub fn descriptor(client: DsClient) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(Self { client }),
        )
    }

    fn schema() -> ParameterSchema {
        ParameterSchema::object(
            json!({
                "property_id": {
                    "type": "string",
                    "description": "The ID of the property to get bookings for."
                }
            }),
            &["property_id"],
        )
    }
}

#[async_trait]
impl ToolInvoke for GetPropertyBookingsTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let path = format!(
            "/api/bookings/property/{}",
            path_segment(args.get("property_id"))
        );

        match self.client.get(&path, &[]).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error getting property bookings: {}", err);
                Ok(soft_error(
                    "An error occurred while retrieving property bookings.",
                ))
            }
        }
    }
}

/// Booking status transition.
pub struct UpdateBookingStatusTool {
    client: DsClient,
}

impl UpdateBookingStatusTool {
    pub const NAME: &'static str = "update_booking_status";
    pub const DESCRIPTION: &'static str =
        "Update the status of a booking in the DirectStay API.";

    pub fn descriptor(client: DsClient) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(Self { client }),
        )
    }

    fn schema() -> ParameterSchema {
        ParameterSchema::object(
            json!({
                "booking_id": {
                    "type": "string",
                    "description": "The ID of the booking to update."
                },
                "status": {
                    "type": "string",
                    "description": "The new status for the booking (e.g., \"confirmed\")."
                }
            }),
            &["booking_id", "status"],
        )
    }
}

#[async_trait]
impl ToolInvoke for UpdateBookingStatusTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let path = format!(
            "/api/bookings/{}/status",
            path_segment(args.get("booking_id"))
        );
        let body = pick(&args, &["status"]);

        match self.client.patch(&path, &body).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error updating booking status: {}", err);
                Ok(soft_error(
                    "An error occurred while updating the booking status.",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;
    use httpmock::Method::{GET, PATCH, POST};
    use httpmock::MockServer;

    fn client_for(server: &MockServer) -> DsClient {
        DsClient::from_config(&ApiConfig {
            base_url: server.base_url(),
            token: Some("token".to_string()),
        })
    }

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    }

    #[tokio::test]
    async fn test_create_booking_omits_absent_notes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/bookings").json_body(json!({
                "propertyId": "p1",
                "checkIn": "2025-07-01",
                "checkOut": "2025-07-08",
                "guests": 4,
                "totalPrice": 1200.5
            }));
            then.status(200).json_body(json!({ "bookingId": "b1" }));
        });

        let tool = CreateBookingTool {
            client: client_for(&server),
        };
        let result = tool
            .invoke(args(json!({
                "propertyId": "p1",
                "checkIn": "2025-07-01",
                "checkOut": "2025-07-08",
                "guests": 4,
                "totalPrice": 1200.5
            })))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result["bookingId"], "b1");
    }

    #[tokio::test]
    async fn test_create_booking_carries_notes_when_present() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/bookings")
                .json_body_partial(r#"{ "notes": "late arrival" }"#);
            then.status(200).json_body(json!({ "bookingId": "b2" }));
        });

        let tool = CreateBookingTool {
            client: client_for(&server),
        };
        tool.invoke(args(json!({
            "propertyId": "p1",
            "checkIn": "2025-07-01",
            "checkOut": "2025-07-08",
            "guests": 2,
            "totalPrice": 800,
            "notes": "late arrival"
        })))
        .await
        .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_create_booking_failure_becomes_soft_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/bookings");
            then.status(422).body("dates unavailable");
        });

        let tool = CreateBookingTool {
            client: client_for(&server),
        };
        let result = tool
            .invoke(args(json!({
                "propertyId": "p1",
                "checkIn": "x",
                "checkOut": "y",
                "guests": 1,
                "totalPrice": 1
            })))
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({ "error": "An error occurred while creating the booking." })
        );
    }

    #[tokio::test]
    async fn test_property_bookings_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/bookings/property/p7");
            then.status(200).json_body(json!({ "bookings": [] }));
        });

        let tool = GetPropertyBookingsTool {
            client: client_for(&server),
        };
        tool.invoke(args(json!({ "property_id": "p7" }))).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_update_status_patches_with_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/api/bookings/b42/status")
                .json_body(json!({ "status": "confirmed" }));
            then.status(200).json_body(json!({ "status": "confirmed" }));
        });

        let tool = UpdateBookingStatusTool {
            client: client_for(&server),
        };
        let result = tool
            .invoke(args(json!({ "booking_id": "b42", "status": "confirmed" })))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result["status"], "confirmed");
    }
}
