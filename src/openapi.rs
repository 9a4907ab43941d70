//! OpenAPI 3 description of the inventory HTTP routes.
//!
//! Built by hand with `serde_json` and served by the `http` transport at
//! `/api-docs/openapi.json`.

use serde_json::{json, Value};

const RECORD: &str = "#/components/schemas/InventoryRecord";
const NEW_RECORD: &str = "#/components/schemas/NewRecord";
const RECORD_UPDATE: &str = "#/components/schemas/RecordUpdate";
const WRITE_RESULT: &str = "#/components/schemas/WriteResult";
const ERROR: &str = "#/components/schemas/Error";

fn schema_ref(target: &str) -> Value {
    json!({ "$ref": target })
}

fn body(target: &str) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref(target) } }
    })
}

fn response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn error(description: &str) -> Value {
    response(description, schema_ref(ERROR))
}

fn id_param() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "minimum": 1 }
    })
}

fn query_param(name: &str, required: bool) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": required,
        "schema": { "type": "integer", "format": "int64", "minimum": 0 }
    })
}

fn record_list() -> Value {
    json!({ "type": "array", "items": schema_ref(RECORD) })
}

/// The complete document.
pub fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Inventory service",
            "description": "Stock level and warehouse location per inventory item.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/api/v1/inventory": collection(),
            "/api/v1/inventory/{id}": item(),
            "/api/v1/inventory/{id}/stock": stock_only(),
            "/api/v1/inventory/{id}/sufficient": sufficiency(),
            "/api/v1/inventory/location/{location}": by_location(),
            "/api/v1/inventory/stock": by_stock_range(),
            "/health": health(),
        },
        "components": { "schemas": schemas() },
    })
}

fn collection() -> Value {
    json!({
        "get": {
            "summary": "List every inventory record",
            "operationId": "listAll",
            "responses": { "200": response("All records, possibly empty", record_list()) }
        },
        "post": {
            "summary": "Create an inventory record",
            "operationId": "create",
            "requestBody": body(NEW_RECORD),
            "responses": {
                "201": response("Record created", schema_ref(WRITE_RESULT)),
                "400": error("Invalid payload"),
                "409": error("A record with this id already exists"),
                "500": error("Store failure"),
            }
        }
    })
}

fn item() -> Value {
    let patch_body = json!({
        "required": true,
        "content": { "application/json": { "schema": {
            "type": "object",
            "properties": {
                "stockQuantity": { "type": "integer", "minimum": 0 },
                "warehouseLocation": { "type": "string" },
                "lastUpdated": { "type": "string" },
            }
        } } }
    });
    let deleted = json!({
        "type": "object",
        "properties": {
            "message": { "type": "string" },
            "id": { "type": "integer", "format": "int64" },
        }
    });
    json!({
        "parameters": [id_param()],
        "get": {
            "summary": "Get one inventory record",
            "operationId": "get",
            "responses": {
                "200": response("The record", schema_ref(RECORD)),
                "404": error("No record with this id"),
                "500": error("Store failure"),
            }
        },
        "put": {
            "summary": "Replace stock and location",
            "operationId": "updateFull",
            "requestBody": body(RECORD_UPDATE),
            "responses": write_responses("Invalid payload"),
        },
        "patch": {
            "summary": "Apply the fields present in the body",
            "operationId": "updatePartial",
            "requestBody": patch_body,
            "responses": write_responses("A field failed to convert; nothing was written"),
        },
        "delete": {
            "summary": "Delete an inventory record",
            "operationId": "delete",
            "responses": {
                "200": response("Record deleted", deleted),
                "404": error("No record with this id"),
                "500": error("Store failure"),
            }
        }
    })
}

fn stock_only() -> Value {
    json!({
        "parameters": [id_param()],
        "put": {
            "summary": "Replace only the stock figure",
            "operationId": "updateStockOnly",
            "requestBody": body(RECORD_UPDATE),
            "responses": write_responses("Invalid payload"),
        }
    })
}

fn write_responses(invalid: &str) -> Value {
    json!({
        "200": response("Record updated", schema_ref(WRITE_RESULT)),
        "400": error(invalid),
        "404": error("No record with this id"),
        "500": error("Store failure"),
    })
}

fn sufficiency() -> Value {
    let verdict = json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer", "format": "int64" },
            "quantity": { "type": "integer" },
            "sufficient": { "type": "boolean" },
        }
    });
    json!({
        "parameters": [id_param(), query_param("quantity", true)],
        "get": {
            "summary": "Check whether a record holds at least `quantity` units",
            "operationId": "checkStockSufficient",
            "responses": { "200": response("Sufficiency verdict", verdict) }
        }
    })
}

fn by_location() -> Value {
    let nothing = json!({
        "type": "object",
        "properties": { "message": { "type": "string" } }
    });
    json!({
        "parameters": [{
            "name": "location",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        }],
        "get": {
            "summary": "Search records by warehouse location",
            "operationId": "findByLocation",
            "responses": {
                "200": response("Matching records", record_list()),
                "404": response("Nothing matched", nothing),
            }
        }
    })
}

fn by_stock_range() -> Value {
    json!({
        "parameters": [query_param("min", false), query_param("max", false)],
        "get": {
            "summary": "Search records with min <= stock <= max",
            "operationId": "findByStockRange",
            "responses": { "200": response("Matching records, possibly empty", record_list()) }
        }
    })
}

fn health() -> Value {
    let up = json!({
        "type": "object",
        "properties": { "ok": { "type": "boolean" } }
    });
    json!({
        "get": {
            "summary": "Health check",
            "operationId": "health",
            "responses": { "200": response("Service is up", up) }
        }
    })
}

fn schemas() -> Value {
    json!({
        "InventoryRecord": {
            "type": "object",
            "required": ["id", "stockQuantity", "warehouseLocation", "lastUpdated"],
            "properties": {
                "id": { "type": "integer", "format": "int64", "minimum": 1 },
                "stockQuantity": { "type": "integer", "minimum": 0 },
                "warehouseLocation": { "type": "string" },
                "lastUpdated": { "type": "string", "format": "date-time" },
            }
        },
        "NewRecord": {
            "type": "object",
            "required": ["id", "stockQuantity", "warehouseLocation"],
            "properties": {
                "id": { "type": "integer", "format": "int64", "minimum": 1 },
                "stockQuantity": { "type": "integer", "minimum": 0 },
                "warehouseLocation": { "type": "string" },
                "lastUpdated": { "type": "string", "format": "date-time" },
            }
        },
        "RecordUpdate": {
            "type": "object",
            "required": ["stockQuantity"],
            "properties": {
                "stockQuantity": { "type": "integer", "minimum": 0 },
                "warehouseLocation": { "type": "string" },
            }
        },
        "WriteResult": {
            "type": "object",
            "properties": {
                "message": { "type": "string" },
                "record": schema_ref(RECORD),
            }
        },
        "Error": {
            "type": "object",
            "required": ["error"],
            "properties": { "error": { "type": "string" } }
        }
    })
}
