//! Build script: embeds the short git commit for `widgen version --verbose`.

use std::process::Command;

fn main() {
    println!("cargo:rustc-env=WIDGEN_GIT_COMMIT={}", short_commit());
    println!("cargo:rerun-if-changed=../../.git/HEAD");
}

fn short_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| String::from("unknown"))
}
