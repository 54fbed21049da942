use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    // Packagers building from a tarball can pin the hash explicitly.
    let build_hash = std::env::var("GIGBOARD_BUILD_HASH")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIGBOARD_BUILD_HASH={}", build_hash);
    println!("cargo:rerun-if-env-changed=GIGBOARD_BUILD_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
