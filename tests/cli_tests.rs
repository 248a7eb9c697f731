use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    model_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let model_path = dir.path().join("models").join("freq_model.csv");
        Self { dir, model_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_cipherforge"))
            .args(args)
            .arg("--model")
            .arg(&self.model_path)
            .output()
            .expect("Failed to execute binary")
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn extract(output: &str, label: &str) -> String {
    let re = Regex::new(&format!(r"{}:\s*(\S+)", regex::escape(label))).unwrap();
    re.captures(output)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| panic!("'{}' not found in output:\n{}", label, output))
}

const DECRYPT: &[&str] = &[
    "decrypt",
    "--corpus",
    "builtin",
    "--sample",
    "pangram",
    "--seed",
    "42",
    "--chains",
    "3",
    "--iterations",
    "800",
    "--threads",
    "2",
];

#[test]
fn test_build_model_writes_csv() {
    let ctx = TestContext::new();
    let out = ctx.run(&["build-model", "--corpus", "builtin", "--top", "5"]);
    assert!(out.status.success(), "{}", combined(&out));

    let csv = fs::read_to_string(&ctx.model_path).unwrap();
    assert!(csv.starts_with("first,second,count"));
    assert!(stdout_of(&out).contains("BIGRAM MODEL"));
}

#[test]
fn test_build_model_requires_corpus() {
    let ctx = TestContext::new();
    let out = ctx.run(&["build-model"]);
    assert!(!out.status.success());
    assert!(!ctx.model_path.exists());
}

#[test]
fn test_missing_model_is_fatal() {
    let ctx = TestContext::new();
    let out = ctx.run(&["decrypt", "--iterations", "10"]);
    assert!(!out.status.success());
    assert!(combined(&out).contains("Frequency Model Unavailable"));
}

#[test]
fn test_decrypt_bootstraps_model_and_reports() {
    let ctx = TestContext::new();
    let history = ctx.path("out/history.csv");
    let json = ctx.path("out/run.json");

    let mut args = DECRYPT.to_vec();
    let history_arg = history.display().to_string();
    let json_arg = json.display().to_string();
    args.extend(["--history-out", history_arg.as_str(), "--json-out", json_arg.as_str()]);

    let out = ctx.run(&args);
    assert!(out.status.success(), "{}", combined(&out));
    assert!(ctx.model_path.exists(), "model was not persisted");

    let stdout = stdout_of(&out);
    let score: f64 = extract(&stdout, "Best Score").parse().unwrap();
    assert!(score.is_finite());
    let key = extract(&stdout, "Best Key");
    assert_eq!(key.len(), 26);
    assert!(Regex::new(r"Key Accuracy: \d+/26").unwrap().is_match(&stdout));

    // 800 iterations at interval 500: iterations 1 and 501 per chain.
    let rows = fs::read_to_string(&history).unwrap();
    let mut lines = rows.lines();
    assert_eq!(lines.next(), Some("chain,iteration,score"));
    assert_eq!(lines.count(), 3 * 2);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["outcome"]["results"].as_array().unwrap().len(), 3);
    assert_eq!(report["seed"], 42);
    assert_eq!(report["formula"], "reference");
}

#[test]
fn test_decrypt_is_reproducible_with_seed() {
    let ctx = TestContext::new();
    let first = ctx.run(DECRYPT);
    let second = ctx.run(DECRYPT);
    assert!(first.status.success() && second.status.success());

    let a = stdout_of(&first);
    let b = stdout_of(&second);
    assert_eq!(extract(&a, "Best Key"), extract(&b, "Best Key"));
    assert_eq!(extract(&a, "Best Score"), extract(&b, "Best Score"));
}

#[test]
fn test_config_file_with_cli_override() {
    let ctx = TestContext::new();
    let cfg = ctx.path("cfg.json");
    fs::write(
        &cfg,
        r#"{ "search": { "chains": 2, "iterations": 300 }, "scoring": { "formula": "observed_reference" } }"#,
    )
    .unwrap();
    let json = ctx.path("run.json");

    let out = ctx.run(&[
        "decrypt",
        "--corpus",
        "builtin",
        "--config",
        cfg.to_str().unwrap(),
        "--chains",
        "4",
        "--seed",
        "1",
        "--json-out",
        json.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", combined(&out));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["options"]["chains"], 4);
    assert_eq!(report["options"]["iterations"], 300);
    assert_eq!(report["formula"], "observed_reference");
}

#[test]
fn test_score_identity_key() {
    let ctx = TestContext::new();
    let out = ctx.run(&[
        "score",
        "--corpus",
        "builtin",
        "--key",
        "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        "--text",
        "the cat sat on the mat",
    ]);
    assert!(out.status.success(), "{}", combined(&out));

    let stdout = stdout_of(&out);
    let score: f64 = extract(&stdout, "Score").parse().unwrap();
    assert!(score > 0.0);
    assert!(stdout.contains("THE CAT SAT ON THE MAT"));
}

#[test]
fn test_score_rejects_bad_key() {
    let ctx = TestContext::new();
    let out = ctx.run(&["score", "--corpus", "builtin", "--key", "ABC", "--text", "hi"]);
    assert!(!out.status.success());
    assert!(combined(&out).contains("Invalid Key"));
}
