use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "scan": {
                "type": "object",
                "properties": {
                    "tick_interval_ms": { "type": "integer", "minimum": 1 },
                    "tick_size": { "type": "number", "exclusiveMinimum": 0 },
                    "completion_delay_ms": { "type": "integer", "minimum": 0 },
                    "phases": {
                        "type": "array",
                        "minItems": 1,
                        "items": { "$ref": "#/$defs/phase" }
                    }
                }
            },
            "metrics": {
                "type": "object",
                "properties": {
                    "max_hosts": { "type": "integer", "minimum": 0 },
                    "max_vulnerabilities": { "type": "integer", "minimum": 0 },
                    "max_ports": { "type": "integer", "minimum": 0 }
                }
            },
            "assistant": {
                "type": "object",
                "properties": {
                    "reply_delay_ms": { "type": "integer", "minimum": 0 }
                }
            },
            "dashboard": {
                "type": "object",
                "properties": {
                    "refresh_interval_secs": { "type": "integer", "minimum": 1 }
                }
            }
        },
        "$defs": {
            "phase": {
                "type": "object",
                "required": ["label", "weight"],
                "properties": {
                    "label": { "type": "string", "minLength": 1 },
                    "weight": { "type": "number", "exclusiveMinimum": 0 }
                }
            }
        }
    })
});
