//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each API area is defined in its own file for better maintainability.

pub mod directstay;

pub use directstay::{
    CreateBookingTool, CreateComparisonTool, DsApiError, DsClient, GenerateOtpTool,
    GetAllPropertiesTool, GetPropertyBookingsTool, GetPropertyByIdTool, IdentifyCallerTool,
    SendMessageTool, SubmitConversationInsightsTool, UpdateBookingStatusTool, VerifyOtpTool,
};
