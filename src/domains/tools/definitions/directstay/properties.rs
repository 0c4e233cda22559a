//! Property catalog tools.
//!
//! Wrappers over the DirectStay property endpoints: paginated listing and
//! single-property lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::error;

use crate::domains::tools::descriptor::{JsonObject, ParameterSchema, ToolDescriptor, ToolInvoke};
use crate::domains::tools::error::ToolFailure;

use super::client::DsClient;
use super::common::{path_segment, query_value, soft_error};

/// Paginated property listing.
pub struct GetAllPropertiesTool {
    client: DsClient,
}

impl GetAllPropertiesTool {
    pub const NAME: &'static str = "get_all_properties";
    pub const DESCRIPTION: &'static str = "Get a paginated list of properties from DirectStay.";

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
                "page": {
                    "type": "integer",
                    "description": "The page number to retrieve."
                },
                "limit": {
                    "type": "integer",
                    "description": "The number of properties to return per page."
                }
            }),
            &[],
        )
    }
}

#[async_trait]
impl ToolInvoke for GetAllPropertiesTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let page = query_value(&args, "page", "1");
        let limit = query_value(&args, "limit", "10");

        match self
            .client
            .get("/api/properties", &[("page", page), ("limit", limit)])
            .await
        {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error retrieving properties: {}", err);
                Ok(soft_error("An error occurred while retrieving properties."))
            }
        }
    }
}

/// Single property lookup by id.
pub struct GetPropertyByIdTool {
    client: DsClient,
}

impl GetPropertyByIdTool {
    pub const NAME: &'static str = "get_property_by_id";
    pub const DESCRIPTION: &'static str =
        "Get property details by ID from the DirectStay API.";

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
                    "description": "The ID of the property to retrieve."
                }
            }),
            &["property_id"],
        )
    }
}

#[async_trait]
impl ToolInvoke for GetPropertyByIdTool {
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure> {
        let path = format!("/api/properties/{}", path_segment(args.get("property_id")));

        match self.client.get(&path, &[]).await {
            Ok(data) => Ok(data),
            Err(err) => {
                error!("Error fetching property details: {}", err);
                Ok(soft_error("An error occurred while fetching property details."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;
    use httpmock::Method::GET;
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

    #[test]
    fn test_listing_schema_has_no_required_parameters() {
        let schema = GetAllPropertiesTool::schema();
        assert!(schema.required.is_empty());
        assert!(schema.properties.contains_key("page"));
        assert!(schema.properties.contains_key("limit"));
    }

    #[tokio::test]
    async fn test_listing_defaults_page_and_limit() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/properties")
                .query_param("page", "1")
                .query_param("limit", "10");
            then.status(200).json_body(json!({ "properties": [], "total": 0 }));
        });

        let tool = GetAllPropertiesTool {
            client: client_for(&server),
        };
        let result = tool.invoke(JsonObject::new()).await.unwrap();

        mock.assert();
        assert_eq!(result["total"], 0);
    }

    #[tokio::test]
    async fn test_listing_forwards_explicit_pagination() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/properties")
                .query_param("page", "3")
                .query_param("limit", "25");
            then.status(200).json_body(json!({ "properties": [] }));
        });

        let tool = GetAllPropertiesTool {
            client: client_for(&server),
        };
        tool.invoke(args(json!({ "page": 3, "limit": 25 }))).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_lookup_builds_path_from_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/properties/villa-9");
            then.status(200)
                .json_body(json!({ "id": "villa-9", "name": "Villa" }));
        });

        let tool = GetPropertyByIdTool {
            client: client_for(&server),
        };
        let result = tool
            .invoke(args(json!({ "property_id": "villa-9" })))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result["name"], "Villa");
    }

    #[tokio::test]
    async fn test_lookup_failure_becomes_soft_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/properties/nope");
            then.status(500).body("internal");
        });

        let tool = GetPropertyByIdTool {
            client: client_for(&server),
        };
        let result = tool.invoke(args(json!({ "property_id": "nope" }))).await.unwrap();

        assert_eq!(
            result,
            json!({ "error": "An error occurred while fetching property details." })
        );
    }
}
