//! OpenAPI description of the pricing API

use axum::Json;
use serde_json::{json, Value};

pub async fn openapi() -> Json<Value> {
    Json(openapi_document())
}

pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Delivery Pricing API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Delivery price quotes and pricing catalog"
        },
        "tags": [{ "name": "Pricing", "description": "API endpoints for managing pricing" }],
        "paths": {
            "/api/price/calculate-price": { "post": calculate_price_operation() },
            "/api/price/pricing": {
                "post": create_pricing_operation(),
                "get": get_pricing_operation()
            },
            "/api/price/pricing/{id}": {
                "put": update_pricing_operation(),
                "delete": delete_pricing_operation()
            }
        },
        "components": { "schemas": { "Pricing": pricing_schema(), "Error": error_schema() } }
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn id_parameter() -> Value {
    json!([{
        "in": "path",
        "name": "id",
        "schema": { "type": "string" },
        "required": true,
        "description": "Pricing ID"
    }])
}

fn calculate_price_operation() -> Value {
    let request = json!({
        "type": "object",
        "required": ["zone", "organization_id", "total_distance"],
        "properties": {
            "zone": { "type": "string" },
            "organization_id": { "type": "string" },
            "total_distance": { "type": "number", "minimum": 0 },
            "item_type": { "type": "string" }
        }
    });
    let quote = json!({
        "type": "object",
        "properties": { "total_price": { "type": "number" } }
    });

    json!({
        "summary": "Calculate delivery price",
        "description": "Calculate the total delivery price for an item type in a zone for an organization.",
        "requestBody": { "required": true, "content": json_content(request) },
        "responses": {
            "200": { "description": "Successful operation", "content": json_content(quote) },
            "400": { "description": "Invalid request", "content": json_content(schema_ref("Error")) },
            "404": { "description": "Pricing not found", "content": json_content(schema_ref("Error")) },
            "500": { "description": "Internal server error", "content": json_content(schema_ref("Error")) }
        }
    })
}

fn create_pricing_operation() -> Value {
    json!({
        "summary": "Create new pricing",
        "tags": ["Pricing"],
        "requestBody": { "required": true, "content": json_content(schema_ref("Pricing")) },
        "responses": {
            "201": { "description": "Created", "content": json_content(schema_ref("Pricing")) },
            "400": { "description": "Invalid request" },
            "500": { "description": "Internal server error" }
        }
    })
}

fn get_pricing_operation() -> Value {
    json!({
        "summary": "Get pricing details",
        "tags": ["Pricing"],
        "parameters": [
            { "in": "query", "name": "organization_id", "schema": { "type": "string" } },
            { "in": "query", "name": "zone", "schema": { "type": "string" } },
            { "in": "query", "name": "item_type", "schema": { "type": "string" } }
        ],
        "responses": {
            "200": { "description": "OK", "content": json_content(schema_ref("Pricing")) },
            "404": { "description": "Pricing not found" },
            "500": { "description": "Internal server error" }
        }
    })
}

fn update_pricing_operation() -> Value {
    json!({
        "summary": "Update pricing details",
        "tags": ["Pricing"],
        "parameters": id_parameter(),
        "requestBody": { "required": true, "content": json_content(schema_ref("Pricing")) },
        "responses": {
            "200": { "description": "OK", "content": json_content(schema_ref("Pricing")) },
            "404": { "description": "Pricing not found" },
            "500": { "description": "Internal server error" }
        }
    })
}

fn delete_pricing_operation() -> Value {
    json!({
        "summary": "Delete pricing",
        "tags": ["Pricing"],
        "parameters": id_parameter(),
        "responses": {
            "200": { "description": "Deleted" },
            "404": { "description": "Pricing not found" },
            "500": { "description": "Internal server error" }
        }
    })
}

fn pricing_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "organization_id": { "type": "string" },
            "item_id": { "type": "string" },
            "zone": { "type": "string" },
            "base_distance_in_km": { "type": "integer", "minimum": 0 },
            "km_price": { "type": "number", "minimum": 0 },
            "fix_price": { "type": "number", "minimum": 0 }
        }
    })
}

fn error_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "error": { "type": "string" } }
    })
}
