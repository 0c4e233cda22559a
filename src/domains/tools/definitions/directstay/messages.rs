//! Messaging tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::error;

use crate::domains::tools::descriptor::{JsonObject, ParameterSchema, ToolDescriptor, ToolInvoke};
use crate::domains::tools::error::ToolFailure;

use super::client::DsClient;
use super::common::{pick, soft_error};

/// Channel message delivery.
pub struct SendMessageTool {
    client: DsClient,
}

impl SendMessageTool {
    pub const NAME: &'static str = "send_message";
    pub const DESCRIPTION: &'static str = "Send a message to a channel in DirectStay.";

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
                "channelId": {
                    "type": "string",
                    "description": "The ID of the channel to send the message to."
                },
                "message": {
                    "type": "string",
                    "description": "The message content to send."
                }
            }),
            &["channelId", "message"],
        )
    }
}

#[async_trait]
impl ToolInvoke for SendMessageTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let body = pick(&args, &["channelId", "message"]);

        match self.client.post("/api/messages/send", &body).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error sending message: {}", err);
                Ok(soft_error("An error occurred while sending the message."))
            }
        }
    }
}
