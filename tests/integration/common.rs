use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use daybook::command::commands::Reply;
use daybook::core::context::AppContext;
use serde_json::Value;
use tempfile::TempDir;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_daybook"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

pub fn workspace() -> TempDir {
    tempfile::Builder::new()
        .prefix("daybook-it-")
        .tempdir()
        .unwrap()
}

/// Runs the binary inside `dir`, where the default `config.json` and `data/`
/// resolve.
pub fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary")
}

pub fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout was not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn build_context(dir: &Path) -> AppContext {
    AppContext::new_with_paths(&dir.join("config.json"), None, Some(&dir.join("logs")))
        .expect("context should build")
}

pub fn dispatch_json(ctx: &mut AppContext, words: &[&str]) -> Value {
    let words: Vec<String> = words.iter().map(|s| s.to_string()).collect();
    match daybook::dispatch(ctx, &words).expect("dispatch should succeed") {
        Reply::Json(v) => v,
        Reply::Usage(text) => panic!("expected JSON, got usage:\n{text}"),
    }
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
