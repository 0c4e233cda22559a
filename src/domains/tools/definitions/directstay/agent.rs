//! AI agent tools.
//!
//! Wrappers over the DirectStay `/api/agent` endpoints used during phone
//! conversations: caller identification, OTP verification, comparisons,
//! and post-call insight submission.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::error;

use crate::domains::tools::descriptor::{JsonObject, ParameterSchema, ToolDescriptor, ToolInvoke};
use crate::domains::tools::error::ToolFailure;

use super::client::DsClient;
use super::common::{pick, soft_error};

/// Caller lookup by phone number.
pub struct IdentifyCallerTool {
    client: DsClient,
}

impl IdentifyCallerTool {
    pub const NAME: &'static str = "identify_caller";
    pub const DESCRIPTION: &'static str = "Identify a caller by phone number.";

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
                "phoneNumber": {
                    "type": "string",
                    "description": "The phone number of the caller to identify."
                }
            }),
            &["phoneNumber"],
        )
    }
}

#[async_trait]
impl ToolInvoke for IdentifyCallerTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let body = pick(&args, &["phoneNumber"]);

        match self.client.post("/api/agent/identify-caller", &body).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error identifying caller: {}", err);
                Ok(soft_error("An error occurred while identifying the caller."))
            }
        }
    }
}

/// OTP generation and delivery.
pub struct GenerateOtpTool {
    client: DsClient,
}

impl GenerateOtpTool {
    pub const NAME: &'static str = "generate_otp";
    pub const DESCRIPTION: &'static str = "Generate and send OTP for user verification.";

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
                "userId": {
                    "type": "string",
                    "description": "The ID of the user for whom the OTP is being generated."
                },
                "phoneNumber": {
                    "type": "string",
                    "description": "The phone number to which the OTP will be sent."
                }
            }),
            &["userId", "phoneNumber"],
        )
    }
}

#[async_trait]
impl ToolInvoke for GenerateOtpTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let body = pick(&args, &["userId", "phoneNumber"]);

        match self.client.post("/api/agent/generate-otp", &body).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error generating OTP: {}", err);
                Ok(soft_error("An error occurred while generating OTP."))
            }
        }
    }
}

/// OTP verification.
pub struct VerifyOtpTool {
    client: DsClient,
}

impl VerifyOtpTool {
    pub const NAME: &'static str = "verify_otp";
    pub const DESCRIPTION: &'static str = "Verify OTP for a user and retrieve user data.";

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
                "userId": {
                    "type": "string",
                    "description": "The ID of the user to verify the OTP for."
                },
                "otpInput": {
                    "type": "string",
                    "description": "The OTP input provided by the user."
                }
            }),
            &["userId", "otpInput"],
        )
    }
}

#[async_trait]
impl ToolInvoke for VerifyOtpTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let body = pick(&args, &["userId", "otpInput"]);

        match self.client.post("/api/agent/verify-otp", &body).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error verifying OTP: {}", err);
                Ok(soft_error("An error occurred while verifying OTP."))
            }
        }
    }
}

/// Property comparison creation.
pub struct CreateComparisonTool {
    client: DsClient,
}

impl CreateComparisonTool {
    pub const NAME: &'static str = "create_comparison";
    pub const DESCRIPTION: &'static str = "Create a property comparison for the AI agent.";

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
                "userId": {
                    "type": "string",
                    "description": "The ID of the user creating the comparison."
                },
                "title": {
                    "type": "string",
                    "description": "The title of the comparison."
                },
                "propertyIds": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "An array of property IDs to compare."
                },
                "attributes": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "An array of attributes to compare."
                },
                "preferences": {
                    "type": "object",
                    "properties": {
                        "mustHave": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "An array of must-have features."
                        },
                        "budgetRange": {
                            "type": "object",
                            "properties": {
                                "min": {
                                    "type": "number",
                                    "description": "The minimum budget."
                                },
                                "max": {
                                    "type": "number",
                                    "description": "The maximum budget."
                                }
                            },
                            "description": "The budget range for the comparison."
                        }
                    },
                    "description": "User preferences for the comparison."
                }
            }),
            &["userId", "title", "propertyIds", "attributes", "preferences"],
        )
    }
}

#[async_trait]
impl ToolInvoke for CreateComparisonTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let body = pick(
            &args,
            &["userId", "title", "propertyIds", "attributes", "preferences"],
        );

        match self.client.post("/api/agent/comparisons", &body).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error creating comparison: {}", err);
                Ok(soft_error(
                    "An error occurred while creating the comparison.",
                ))
            }
        }
    }
}

/// Post-call insight submission.
pub struct SubmitConversationInsightsTool {
    client: DsClient,
}

impl SubmitConversationInsightsTool {
    pub const NAME: &'static str = "submit_conversation_insights";
    pub const DESCRIPTION: &'static str = "Submit insights from AI phone conversation.";

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
                "userId": {
                    "type": "string",
                    "description": "The ID of the user."
                },
                "conversationId": {
                    "type": "string",
                    "description": "The ID of the conversation."
                },
                "phoneNumber": {
                    "type": "string",
                    "description": "The phone number of the user."
                },
                "duration": {
                    "type": "integer",
                    "description": "The duration of the conversation in seconds."
                },
                "insights": {
                    "type": "object",
                    "properties": {
                        "preferences": {
                            "type": "object",
                            "properties": {
                                "propertyType": {
                                    "type": "string",
                                    "description": "Preferred property type."
                                },
                                "amenities": {
                                    "type": "array",
                                    "items": { "type": "string" },
                                    "description": "List of preferred amenities."
                                }
                            }
                        },
                        "concerns": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "List of user concerns."
                        },
                        "sentiment": {
                            "type": "string",
                            "description": "Sentiment of the conversation."
                        },
                        "intentToPurchase": {
                            "type": "string",
                            "description": "User's intent to purchase."
                        },
                        "followUpRequired": {
                            "type": "boolean",
                            "description": "Whether follow-up is required."
                        }
                    },
                    "required": [
                        "preferences",
                        "concerns",
                        "sentiment",
                        "intentToPurchase",
                        "followUpRequired"
                    ]
                }
            }),
            &["userId", "conversationId", "phoneNumber", "duration", "insights"],
        )
    }
}

#[async_trait]
impl ToolInvoke for SubmitConversationInsightsTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let body = pick(
            &args,
            &["userId", "conversationId", "phoneNumber", "duration", "insights"],
        );

        match self
            .client
            .post("/api/agent/insights/conversation", &body)
            .await
        {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error submitting conversation insights: {}", err);
                Ok(soft_error(
                    "An error occurred while submitting conversation insights.",
                ))
            }
        }
    }
}
