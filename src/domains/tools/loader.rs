//! Static tool registration.
//!
//! Every tool the server exposes is declared once in [`TOOL_REGISTRATIONS`].
//! Loading walks the table in order, validates each descriptor, and produces
//! the [`ToolRegistry`] the server lists and dispatches against. A descriptor
//! whose required list names an undeclared parameter aborts startup; a
//! duplicate name is logged and skipped, keeping the first registration.

use tracing::{info, warn};

use crate::domains::tools::definitions::directstay::{
    CreateBookingTool, CreateComparisonTool, DsClient, GenerateOtpTool, GetAllPropertiesTool,
    GetPropertyBookingsTool, GetPropertyByIdTool, IdentifyCallerTool, SendMessageTool,
    SubmitConversationInsightsTool, UpdateBookingStatusTool, VerifyOtpTool,
};
use crate::domains::tools::descriptor::ToolDescriptor;
use crate::domains::tools::error::LoaderError;
use crate::domains::tools::registry::ToolRegistry;

/// One row of the registration table.
pub struct ToolRegistration {
    /// Module tag recorded on the descriptor; shown in diagnostics and the
    /// `tools` subcommand listing.
    pub location: &'static str,
    /// Builds the descriptor for a given API client.
    pub construct: fn(DsClient) -> ToolDescriptor,
}

/// The full set of tools this server ships, in listing order.
pub static TOOL_REGISTRATIONS: &[ToolRegistration] = &[
    ToolRegistration {
        location: "directstay/bookings",
        construct: CreateBookingTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/agent",
        construct: CreateComparisonTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/agent",
        construct: GenerateOtpTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/properties",
        construct: GetAllPropertiesTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/bookings",
        construct: GetPropertyBookingsTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/properties",
        construct: GetPropertyByIdTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/agent",
        construct: IdentifyCallerTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/messages",
        construct: SendMessageTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/agent",
        construct: SubmitConversationInsightsTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/bookings",
        construct: UpdateBookingStatusTool::descriptor,
    },
    ToolRegistration {
        location: "directstay/agent",
        construct: VerifyOtpTool::descriptor,
    },
];

/// Builds the registry from the static table.
pub fn load_tools(client: &DsClient) -> Result<ToolRegistry, LoaderError> {
    load_from(TOOL_REGISTRATIONS, client)
}

fn load_from(
    table: &[ToolRegistration],
    client: &DsClient,
) -> Result<ToolRegistry, LoaderError> {
    let mut tools: Vec<ToolDescriptor> = Vec::with_capacity(table.len());

    for entry in table {
        let descriptor = (entry.construct)(client.clone()).with_source(entry.location);
        validate(&descriptor)?;

        if tools.iter().any(|known| known.name == descriptor.name) {
            warn!(
                "Duplicate tool name '{}' from {}; first registration wins",
                descriptor.name, descriptor.source
            );
            continue;
        }
        tools.push(descriptor);
    }

    info!("Loaded {} tools", tools.len());
    Ok(ToolRegistry::new(tools))
}

fn validate(descriptor: &ToolDescriptor) -> Result<(), LoaderError> {
    for required in &descriptor.schema.required {
        if !descriptor.schema.properties.contains_key(required) {
            return Err(LoaderError::UndeclaredParameter {
                location: descriptor.source,
                field: required.clone(),
            });
        }
    }
    Ok(())
}
