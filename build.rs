// Build script to bake the source revision into the binary

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUNCONF_REVISION");

    // An explicit revision from the environment wins
    if std::env::var("RUNCONF_REVISION").is_ok() {
        return;
    }

    let revision = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .filter(|rev| !rev.is_empty());

    match revision {
        Some(rev) => println!("cargo:rustc-env=RUNCONF_REVISION={}", rev),
        None => println!("cargo:warning=Not a git checkout, revision will be \"unknown\""),
    }
}
