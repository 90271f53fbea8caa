//! Embeds the string printed by `frame-cycle --version`.
//!
//! On a release tag this is the package version; otherwise the short commit
//! hash is appended (`0.3.0-dev+1a2b3c4`).

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let version = if git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some() {
        pkg
    } else {
        match git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) if !hash.is_empty() => format!("{pkg}-dev+{hash}"),
            _ => format!("{pkg}-dev"),
        }
    };
    println!("cargo:rustc-env=FRAME_CYCLE_VERSION={version}");
}
