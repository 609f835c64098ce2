#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use url::Url;

/// Publication date shared by the seeded posts, shown as "25 mar 2021".
pub const PUBLISHED: &str = "2021-03-25T19:25:28+0000";

/// Convert a directory into a `file://` source.
pub fn file_source_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// Write a post document into a content directory.
pub fn write_post(root: &Path, uid: &str, title: &str, words: usize) {
    let dir = root.join("post");
    fs::create_dir_all(&dir).unwrap();

    let document: Value = json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "first_publication_date": PUBLISHED,
        "data": {
            "title": title,
            "subtitle": format!("About {}", title),
            "author": "Ana",
            "banner": {},
            "content": [{
                "heading": "Intro",
                "body": [{"type": "paragraph", "text": vec!["palavra"; words].join(" ")}]
            }]
        }
    });

    fs::write(
        dir.join(format!("{}.json", uid)),
        serde_json::to_string_pretty(&document).unwrap(),
    )
    .unwrap();
}

/// Run the CLI with an isolated HOME and the given source.
pub fn run_cli_with_env(args: &[&str], home: &Path, source: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lede"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("LEDE_ACCESS_TOKEN");
    cmd.env_remove("RUST_LOG");
    match source {
        Some(source) => cmd.env("LEDE_SOURCE", source),
        None => cmd.env_remove("LEDE_SOURCE"),
    };
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with an isolated HOME and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, source: Option<&str>) -> String {
    let output = run_cli_with_env(args, home, source);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
