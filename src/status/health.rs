use serde_json::Value;
use url::Url;

use crate::models::health::{InstanceHealth, ServiceCheck};
use crate::status::error::{DecodeError, Document};
use crate::status::fields::{parse_document, type_name, Fields};

/// Decode a health document into instances, in the order the backend sent them.
///
/// Unlike the deployment document, `data` must be present: a finished build
/// always reports health, even if the list is empty. The first malformed
/// instance fails the whole decode.
pub fn decode(raw: &[u8]) -> Result<Vec<InstanceHealth>, DecodeError> {
    let root = parse_document(Document::Health, raw)?;

    let items = match root.get("data") {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => {
            return Err(DecodeError::shape(Document::Health, "data", "missing"))
        }
        Some(other) => {
            return Err(DecodeError::shape(
                Document::Health,
                "data",
                format!("expected array, found {}", type_name(other)),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_instance(index, item))
        .collect()
}

fn decode_instance(index: usize, value: &Value) -> Result<InstanceHealth, DecodeError> {
    let fields = Fields::from_value(Document::Health, format!("instance[{}]", index), value)?;

    let region = fields.string("region")?;
    let instance_number = fields.integer("instance")?;
    let cardinal = fields.object("cardinal")?;
    let nakama = fields.object("nakama")?;

    Ok(InstanceHealth {
        region: region.to_string(),
        instance_number,
        cardinal: decode_check(&cardinal)?,
        nakama: decode_check(&nakama)?,
    })
}

fn decode_check(fields: &Fields<'_>) -> Result<ServiceCheck, DecodeError> {
    let url = fields.string("url")?;
    let host = authority(url).map_err(|reason| fields.error("url", reason))?;
    let ok = fields.boolean("ok")?;
    let result_code = fields.integer("result_code")?;
    let result_str = fields.string("result_str")?;

    Ok(ServiceCheck {
        url: url.to_string(),
        host,
        ok,
        result_code,
        result_str: result_str.to_string(),
    })
}

/// Displayed `host[:port]` of a `scheme://authority/path` URL.
///
/// The URL must parse, carry a host, and have a path separator directly after
/// the authority; a query or fragment in its place does not count. Userinfo is
/// never part of the result, and default ports are omitted.
pub fn authority(raw: &str) -> Result<String, String> {
    let parsed = Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(format!("URL '{}' has no host", raw)),
    };

    let (_, rest) = raw
        .split_once("://")
        .ok_or_else(|| format!("URL '{}' has no authority", raw))?;
    match rest.find(['/', '?', '#']) {
        Some(end) if end > 0 && rest[end..].starts_with('/') => {}
        _ => return Err(format!("URL '{}' has no path after the host", raw)),
    }

    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
