use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandOptions {
    sanitized: Option<bool>,
    labels: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpandOutput {
    output: String,
    replaced: usize,
    diagnostics: Vec<JsDiagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDiagnostic {
    code: String,
    message: String,
    severity: String,
    range: JsRange,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRange {
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: usize,
}

#[wasm_bindgen]
pub fn expand(source: &str) -> Result<JsValue, JsValue> {
    expand_with_options(source, JsValue::UNDEFINED)
}

#[wasm_bindgen]
pub fn expand_with_options(source: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let (sanitized, kinds) = options_from_js(options)?;
    let result = marginalia_core::expand_with_kinds(source, &kinds, sanitized);

    let diagnostics = result
        .diagnostics
        .into_iter()
        .map(|diag| JsDiagnostic {
            code: diag.code.to_string(),
            message: diag.message,
            severity: match diag.severity {
                marginalia_core::DiagnosticSeverity::Error => "error".to_string(),
                marginalia_core::DiagnosticSeverity::Warning => "warning".to_string(),
            },
            range: JsRange {
                start_line: diag.range.start.line,
                start_col: diag.range.start.character,
                end_line: diag.range.end.line,
                end_col: diag.range.end.character,
            },
        })
        .collect();

    let out = ExpandOutput {
        output: result.output,
        replaced: result.replaced,
        diagnostics,
    };
    serde_wasm_bindgen::to_value(&out).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn options_from_js(value: JsValue) -> Result<(bool, Vec<marginalia_core::NoteKind>), JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok((false, marginalia_core::builtin_kinds().to_vec()));
    }
    let parsed: ExpandOptions =
        serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let sanitized = parsed.sanitized.unwrap_or(false);
    let kinds = match parsed.labels {
        None => marginalia_core::builtin_kinds().to_vec(),
        Some(labels) => {
            let mut kinds = Vec::new();
            for label in &labels {
                let kind = marginalia_core::builtin_kinds()
                    .iter()
                    .find(|kind| kind.label == label.as_str())
                    .ok_or_else(|| {
                        JsValue::from_str(&format!("unknown note label: {}", label))
                    })?;
                kinds.push(*kind);
            }
            kinds
        }
    };
    Ok((sanitized, kinds))
}
