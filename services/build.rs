use std::process::Command;

fn main() {
    emit("BUILD_DATE", chrono::Utc::now().to_rfc3339());

    // Container builds have no .git; CI passes the revision in instead
    let commit = git(&["rev-parse", "--short", "HEAD"])
        .or_else(|| std::env::var("SOURCE_COMMIT").ok())
        .unwrap_or_else(|| "unknown".to_string());
    emit("BUILD_COMMIT", commit);

    let branch = git(&["rev-parse", "--abbrev-ref", "HEAD"])
        .or_else(|| std::env::var("SOURCE_BRANCH").ok())
        .unwrap_or_else(|| "unknown".to_string());
    emit("BUILD_BRANCH", branch);

    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-env-changed=SOURCE_COMMIT");
    println!("cargo:rerun-if-env-changed=SOURCE_BRANCH");
}

fn emit(key: &str, value: impl std::fmt::Display) {
    println!("cargo:rustc-env={key}={value}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
