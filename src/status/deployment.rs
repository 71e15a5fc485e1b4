use serde_json::Value;

use crate::models::deployment::{Deployment, DeploymentStatus};
use crate::status::error::{DecodeError, Document};
use crate::status::fields::{parse_document, type_name, Fields};

pub const DEPLOY_KIND: &str = "deploy";

/// Decode a deployment-status document for `expected_project_id`.
///
/// A null or missing `data` field means the project was never deployed and
/// decodes to [`Deployment::Absent`]. Fields are read in a fixed order and the
/// first failure is returned; the identity checks run only once every field
/// has decoded.
pub fn decode(raw: &[u8], expected_project_id: &str) -> Result<Deployment, DecodeError> {
    let root = parse_document(Document::Deployment, raw)?;

    let data = match root.get("data") {
        None | Some(Value::Null) => return Ok(Deployment::Absent),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(DecodeError::shape(
                Document::Deployment,
                "data",
                format!("expected object, found {}", type_name(other)),
            ))
        }
    };

    let fields = Fields::new(Document::Deployment, "", data);
    let project_id = fields.string("project_id")?;
    let kind = fields.string("type")?;
    let executor_id = fields.string("executor_id")?;
    let execution_time = fields.timestamp("execution_time")?;
    let build_number = fields.integer("build_number")?;
    let build_time = fields.timestamp("build_time")?;
    let build_state = fields.string("build_state")?;

    if project_id != expected_project_id {
        return Err(DecodeError::Consistency {
            field: "project_id",
            expected: expected_project_id.to_string(),
            found: project_id.to_string(),
        });
    }
    if kind != DEPLOY_KIND {
        return Err(DecodeError::Consistency {
            field: "type",
            expected: DEPLOY_KIND.to_string(),
            found: kind.to_string(),
        });
    }

    Ok(Deployment::Deployed(DeploymentStatus {
        project_id: project_id.to_string(),
        kind: kind.to_string(),
        executor_id: executor_id.to_string(),
        execution_time,
        build_number,
        build_time,
        build_state: build_state.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::error::Stage;
    use serde_json::json;

    fn document(data: Value) -> Vec<u8> {
        serde_json::to_vec(&json!({ "data": data })).unwrap()
    }

    fn valid_data() -> Value {
        json!({
            "project_id": "prj-1",
            "type": "deploy",
            "executor_id": "alice",
            "execution_time": "2024-05-02T08:30:00Z",
            "build_number": 42,
            "build_time": "2024-05-02T08:25:00Z",
            "build_state": "finished"
        })
    }

    fn decode_err(data: Value) -> DecodeError {
        decode(&document(data), "prj-1").unwrap_err()
    }

    #[test]
    fn test_decode_valid() {
        let deployment = decode(&document(valid_data()), "prj-1").unwrap();
        let Deployment::Deployed(status) = deployment else {
            panic!("expected a deployed status");
        };
        assert_eq!(status.project_id, "prj-1");
        assert_eq!(status.kind, "deploy");
        assert_eq!(status.executor_id, "alice");
        assert_eq!(status.build_number, 42);
        assert_eq!(status.build_state, "finished");
        assert_eq!(status.execution_time.to_rfc3339(), "2024-05-02T08:30:00+00:00");
        assert_eq!(status.build_time.to_rfc3339(), "2024-05-02T08:25:00+00:00");
    }

    #[test]
    fn test_null_or_missing_data_is_absent() {
        assert_eq!(decode(br#"{"data": null}"#, "prj-1").unwrap(), Deployment::Absent);
        assert_eq!(decode(br#"{}"#, "prj-1").unwrap(), Deployment::Absent);
        assert_eq!(
            decode(br#"{"data": null, "message": "ok"}"#, "other").unwrap(),
            Deployment::Absent
        );
    }

    #[test]
    fn test_non_object_data_is_shape_error() {
        for data in [json!([]), json!("deployed"), json!(1), json!(false)] {
            let err = decode_err(data);
            assert_eq!(err.stage(), Stage::Shape);
            assert_eq!(err.field(), Some("data"));
        }
    }

    #[test]
    fn test_parse_error() {
        let err = decode(b"<html>502</html>", "prj-1").unwrap_err();
        assert_eq!(err.stage(), Stage::Parse);
    }

    #[test]
    fn test_project_id_mismatch() {
        let mut data = valid_data();
        data["project_id"] = json!("prj-2");
        let err = decode_err(data);
        assert_eq!(
            err,
            DecodeError::Consistency {
                field: "project_id",
                expected: "prj-1".to_string(),
                found: "prj-2".to_string(),
            }
        );

        // The project id is checked before the type.
        let mut data = valid_data();
        data["project_id"] = json!("prj-2");
        data["type"] = json!("destroy");
        assert_eq!(decode_err(data).field(), Some("project_id"));
    }

    #[test]
    fn test_unexpected_type_carries_value() {
        let mut data = valid_data();
        data["type"] = json!("destroy");
        let err = decode_err(data);
        assert_eq!(err.stage(), Stage::Consistency);
        assert_eq!(err.field(), Some("type"));
        assert!(err.to_string().contains("destroy"));
    }

    #[test]
    fn test_each_field_is_validated() {
        let cases = [
            ("project_id", json!(17)),
            ("type", json!(null)),
            ("executor_id", json!({})),
            ("execution_time", json!("not-a-time")),
            ("build_number", json!("42")),
            ("build_time", json!(1714638300)),
            ("build_state", json!(true)),
        ];
        for (field, bad) in cases {
            let mut data = valid_data();
            data[field] = bad;
            let err = decode_err(data);
            assert_eq!(err.stage(), Stage::Shape, "field {}", field);
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_first_failure_wins() {
        // Shape errors are reported before any identity check runs.
        let mut data = valid_data();
        data["project_id"] = json!("prj-2");
        data["build_number"] = json!("x");
        data["build_state"] = json!(null);
        let err = decode_err(data);
        assert_eq!(err.field(), Some("build_number"));

        let mut data = valid_data();
        data.as_object_mut().unwrap().remove("executor_id");
        data.as_object_mut().unwrap().remove("build_time");
        assert_eq!(decode_err(data).field(), Some("executor_id"));
    }

    #[test]
    fn test_unfinished_state_is_kept_verbatim() {
        let mut data = valid_data();
        data["build_state"] = json!("queued for build");
        let Deployment::Deployed(status) = decode(&document(data), "prj-1").unwrap() else {
            panic!("expected a deployed status");
        };
        assert_eq!(status.build_state, "queued for build");
    }
}
