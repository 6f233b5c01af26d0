use crate::grid::Tab;
use crate::services::cli_runner::{run_cmdline_with_input, CmdOutput};
use crate::services::store::{StoreError, TabPatch, TabStore};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

/// `TabStore` backed by external commands that speak the JSON envelope:
/// `{"ok": true, "data": {...}}` or
/// `{"ok": false, "type": "error", "data": {"message": "...", "duplicate": true}}`.
#[derive(Debug, Clone)]
pub struct CliTabStore {
    pub list_cmd: String,
    pub create_cmd: String,
    pub update_cmd: String,
    pub delete_cmd: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    data: JsonValue,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorData {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    duplicate: bool,
}

fn parse_envelope(text: &str) -> Option<Envelope> {
    serde_json::from_str::<Envelope>(text.trim()).ok()
}

fn error_from_data(data: JsonValue) -> StoreError {
    let err: ErrorData = serde_json::from_value(data).unwrap_or_default();
    let message = err.message.unwrap_or_else(|| "request failed".to_string());
    if err.duplicate {
        StoreError::DuplicateRows { message }
    } else {
        StoreError::Backend(message)
    }
}

/// Map a finished command to the envelope's `data`, or to a store error.
pub(crate) fn interpret_output(cmdline: &str, out: CmdOutput) -> Result<JsonValue, StoreError> {
    // Error envelopes may arrive on either stream; prefer stdout.
    let env = parse_envelope(&out.stdout).or_else(|| parse_envelope(&out.stderr));
    match env {
        Some(Envelope { ok: true, data }) if out.success => Ok(data),
        Some(Envelope { ok: true, .. }) => Err(StoreError::Backend(format!(
            "Command failed: {cmdline}\n{}",
            out.stderr.trim()
        ))),
        Some(Envelope { ok: false, data }) => Err(error_from_data(data)),
        None if out.success => Err(StoreError::Backend(format!(
            "Command returned no JSON envelope: {cmdline}"
        ))),
        None => Err(StoreError::Backend(format!(
            "Command failed: {cmdline}\n{}",
            out.stderr.trim()
        ))),
    }
}

impl CliTabStore {
    fn call(&self, cmdline: &str, request: JsonValue) -> Result<JsonValue, StoreError> {
        let out = run_cmdline_with_input(cmdline, &request.to_string())
            .map_err(|e| StoreError::backend(format!("{e:#}")))?;
        interpret_output(cmdline, out)
    }
}

impl TabStore for CliTabStore {
    fn list_tabs(&self) -> Result<Vec<Tab>, StoreError> {
        let data = self.call(&self.list_cmd, json!({}))?;
        let tabs = data.get("tabs").cloned().unwrap_or(JsonValue::Array(vec![]));
        serde_json::from_value(tabs).map_err(|e| StoreError::backend(format!("parsing tabs: {e}")))
    }

    fn create_tab(&self, name: &str) -> Result<Tab, StoreError> {
        let data = self.call(&self.create_cmd, json!({ "name": name }))?;
        let tab = data
            .get("tab")
            .cloned()
            .ok_or_else(|| StoreError::backend("create response is missing data.tab"))?;
        serde_json::from_value(tab).map_err(|e| StoreError::backend(format!("parsing tab: {e}")))
    }

    fn update_tab(&self, id: &str, patch: &TabPatch) -> Result<(), StoreError> {
        let mut req = serde_json::to_value(patch)
            .map_err(|e| StoreError::backend(format!("encoding patch: {e}")))?;
        if let Some(obj) = req.as_object_mut() {
            obj.insert("id".into(), JsonValue::String(id.to_string()));
        }
        self.call(&self.update_cmd, req).map(|_| ())
    }

    fn delete_tab(&self, id: &str) -> Result<(), StoreError> {
        self.call(&self.delete_cmd, json!({ "id": id })).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out(success: bool, stdout: &str, stderr: &str) -> CmdOutput {
        CmdOutput {
            success,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    #[test]
    fn success_envelope_yields_data() {
        let v = interpret_output("x", out(true, r#"{"ok":true,"data":{"tabs":[]}}"#, "")).unwrap();
        assert!(v["tabs"].as_array().unwrap().is_empty());
    }

    #[test]
    fn duplicate_flag_is_distinguished() {
        let err = interpret_output(
            "x",
            out(
                false,
                "",
                r#"{"ok":false,"type":"error","data":{"message":"dup","duplicate":true}}"#,
            ),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateRows {
                message: "dup".into()
            }
        );
    }

    #[test]
    fn other_failures_collapse_to_backend() {
        let err = interpret_output(
            "x",
            out(false, r#"{"ok":false,"data":{"message":"nope"}}"#, ""),
        )
        .unwrap_err();
        assert_eq!(err, StoreError::Backend("nope".into()));

        let err = interpret_output("x", out(false, "", "traceback")).unwrap_err();
        assert!(matches!(err, StoreError::Backend(m) if m.contains("traceback")));

        let err = interpret_output("x", out(true, "not json", "")).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[cfg(unix)]
    #[test]
    fn update_sends_patch_with_id() {
        // `cat` echoes the request; wrap it so the reply is a valid envelope.
        let store = CliTabStore {
            list_cmd: String::new(),
            create_cmd: String::new(),
            update_cmd: r#"sh -c 'read req; printf "{\"ok\":true,\"data\":%s}" "$req"'"#.into(),
            delete_cmd: String::new(),
        };
        let data = store
            .call(&store.update_cmd, json!({"id": "t1", "rows": []}))
            .unwrap();
        assert_eq!(data["id"], "t1");
        assert!(store.update_tab("t1", &TabPatch::rows(vec![])).is_ok());
    }
}
