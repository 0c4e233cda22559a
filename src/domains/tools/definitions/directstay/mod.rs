//! DirectStay tools module.
//!
//! This module provides the tools backed by the DirectStay platform API,
//! grouped by API area:
//! - `properties`: property listing and detail lookup
//! - `bookings`: booking creation, per-property listing, status updates
//! - `agent`: caller identification, OTP flows, comparisons, call insights
//! - `messages`: channel message delivery
//!
//! All tools share one [`DsClient`] and report upstream failures as
//! `{"error": ...}` payloads rather than protocol errors.

pub mod agent;
pub mod bookings;
pub mod client;
pub mod common;
pub mod messages;
pub mod properties;

pub use agent::{
    CreateComparisonTool, GenerateOtpTool, IdentifyCallerTool, SubmitConversationInsightsTool,
    VerifyOtpTool,
};
pub use bookings::{CreateBookingTool, GetPropertyBookingsTool, UpdateBookingStatusTool};
pub use client::{DsApiError, DsClient};
pub use messages::SendMessageTool;
pub use properties::{GetAllPropertiesTool, GetPropertyByIdTool};
