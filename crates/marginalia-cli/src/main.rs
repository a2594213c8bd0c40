use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use marginalia_core::{
    Diagnostic, DiagnosticSeverity, ExpandResult, NoteKind, builtin_kinds, expand_with_kinds,
};

fn main() {
    let mut inputs: Vec<String> = Vec::new();
    let mut sanitized = false;
    let mut write = false;
    let mut labels: Vec<String> = Vec::new();
    let mut diagnostics_mode: Option<DiagnosticsMode> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--sanitized" => sanitized = true,
            "--write" => write = true,
            "--label" => match args.next() {
                Some(label) => labels.push(label),
                None => {
                    eprintln!("--label expects a note label");
                    print_usage();
                    process::exit(2);
                }
            },
            "--diagnostics" => {
                let mode = match args.next().as_deref() {
                    Some("json") => DiagnosticsMode::Json,
                    Some("pretty") => DiagnosticsMode::Pretty,
                    _ => {
                        eprintln!("--diagnostics expects: json | pretty");
                        print_usage();
                        process::exit(2);
                    }
                };
                diagnostics_mode = Some(mode);
            }
            _ => inputs.push(arg),
        }
    }

    let kinds = select_kinds(&labels);

    if inputs.len() > 1 && !write {
        eprintln!("multiple inputs require --write");
        print_usage();
        process::exit(2);
    }

    let mode = diagnostics_mode.unwrap_or(DiagnosticsMode::Pretty);
    let mut reports: Vec<(String, Vec<Diagnostic>)> = Vec::new();

    if inputs.is_empty() {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|err| {
                eprintln!("failed to read stdin: {}", err);
                process::exit(1);
            });
        let result = expand_with_kinds(&source, &kinds, sanitized);
        print!("{}", result.output);
        reports.push(("stdin".to_string(), result.diagnostics));
    } else {
        for path in &inputs {
            let source = fs::read_to_string(path).unwrap_or_else(|err| {
                eprintln!("failed to read {}: {}", path, err);
                process::exit(1);
            });
            let result: ExpandResult = expand_with_kinds(&source, &kinds, sanitized);
            if write {
                fs::write(path, &result.output).unwrap_or_else(|err| {
                    eprintln!("failed to write {}: {}", path, err);
                    process::exit(1);
                });
            } else {
                print!("{}", result.output);
            }
            reports.push((path.clone(), result.diagnostics));
        }
    }

    emit_diagnostics(&reports, mode);

    let failed = reports.iter().any(|(_, diagnostics)| {
        diagnostics
            .iter()
            .any(|diag| diag.severity == DiagnosticSeverity::Error)
    });
    if failed {
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "Usage: marginalia-cli [--sanitized] [--write] [--label sn|mn] [--diagnostics json|pretty] [file ...]"
    );
}

fn select_kinds(labels: &[String]) -> Vec<NoteKind> {
    if labels.is_empty() {
        return builtin_kinds().to_vec();
    }
    let mut kinds = Vec::new();
    for label in labels {
        match builtin_kinds().iter().find(|kind| kind.label == *label) {
            Some(kind) => kinds.push(*kind),
            None => {
                eprintln!("unknown note label: {}", label);
                print_usage();
                process::exit(2);
            }
        }
    }
    kinds
}

#[derive(Clone, Copy)]
enum DiagnosticsMode {
    Json,
    Pretty,
}

fn emit_diagnostics(reports: &[(String, Vec<Diagnostic>)], mode: DiagnosticsMode) {
    let total: usize = reports.iter().map(|(_, diagnostics)| diagnostics.len()).sum();
    match mode {
        DiagnosticsMode::Json => {
            if total == 0 {
                eprintln!("[]");
                return;
            }
            eprintln!("{}", diagnostics_to_json(reports));
        }
        DiagnosticsMode::Pretty => {
            for (file, diagnostics) in reports {
                for diagnostic in diagnostics {
                    eprintln!("{}", diagnostic_to_pretty(file, diagnostic));
                }
            }
        }
    }
}

fn diagnostic_to_pretty(file: &str, diagnostic: &Diagnostic) -> String {
    let severity = severity_label(diagnostic.severity);
    let start_line = diagnostic.range.start.line + 1;
    let start_col = diagnostic.range.start.character + 1;
    format!(
        "{}:{}:{} {} {} {}",
        file, start_line, start_col, severity, diagnostic.code, diagnostic.message
    )
}

fn diagnostics_to_json(reports: &[(String, Vec<Diagnostic>)]) -> String {
    let mut entries = Vec::new();
    for (file, diagnostics) in reports {
        for diagnostic in diagnostics {
            entries.push((file.as_str(), diagnostic));
        }
    }

    let mut out = String::new();
    out.push_str("[\n");
    for (idx, (file, diag)) in entries.iter().enumerate() {
        out.push_str("  {\n");
        out.push_str(&format!("    \"file\": \"{}\",\n", escape_json(file)));
        out.push_str(&format!("    \"code\": \"{}\",\n", diag.code));
        out.push_str(&format!(
            "    \"severity\": \"{}\",\n",
            severity_label(diag.severity)
        ));
        out.push_str(&format!(
            "    \"message\": \"{}\",\n",
            escape_json(&diag.message)
        ));
        out.push_str("    \"range\": {\n");
        out.push_str(&format!(
            "      \"start\": {{ \"line\": {}, \"character\": {} }},\n",
            diag.range.start.line, diag.range.start.character
        ));
        out.push_str(&format!(
            "      \"end\": {{ \"line\": {}, \"character\": {} }}\n",
            diag.range.end.line, diag.range.end.character
        ));
        out.push_str("    }\n  }");
        if idx + 1 < entries.len() {
            out.push_str(",\n");
        } else {
            out.push('\n');
        }
    }
    out.push(']');
    out
}

fn severity_label(severity: DiagnosticSeverity) -> &'static str {
    match severity {
        DiagnosticSeverity::Error => "error",
        DiagnosticSeverity::Warning => "warning",
    }
}

fn escape_json(value: &str) -> String {
    let mut out = String::new();
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}
