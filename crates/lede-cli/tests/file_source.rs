//! CLI integration tests against a local content directory.

mod common;

use tempfile::TempDir;

use common::{file_source_url, run_cli_with_env, run_cli_with_env_success, write_post};

/// A content directory with posts `a` to `e` and an isolated HOME.
fn blog() -> (TempDir, String, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let content = temp_dir.path().join("content");
    for uid in ["a", "b", "c", "d", "e"] {
        write_post(&content, uid, &format!("Post {}", uid.to_uppercase()), 300);
    }
    let home = temp_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    let source = file_source_url(&content);
    (temp_dir, source, home)
}

#[test]
fn test_posts_first_page() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(&["posts"], &home, Some(&source));

    assert!(stdout.contains("Post A"));
    assert!(stdout.contains("Post B"));
    assert!(!stdout.contains("Post C"));
    assert!(stdout.contains("About Post A"));
    assert!(stdout.contains("25 mar 2021"));
    assert!(stdout.contains("/post/a"));
    assert!(stdout.contains("Carregar mais posts"));
}

#[test]
fn test_posts_load_more() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(&["posts", "--more", "1"], &home, Some(&source));

    assert!(stdout.contains("Post D"));
    assert!(!stdout.contains("Post E"));
    assert!(stdout.contains("Carregar mais posts"));
}

#[test]
fn test_posts_all() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(&["posts", "--all"], &home, Some(&source));

    assert!(stdout.contains("Post E"));
    assert!(!stdout.contains("Carregar mais posts"));
}

#[test]
fn test_posts_json_state() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(
        &["posts", "--page-size", "3", "--more", "1", "--json"],
        &home,
        Some(&source),
    );

    let state: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let uids: Vec<&str> = state["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["uid"].as_str().unwrap())
        .collect();
    assert_eq!(uids, ["a", "b", "c", "d", "e"]);
    assert!(state["cursor"].is_null());
}

#[test]
fn test_posts_source_flag_overrides_env() {
    let (tmp, source, home) = blog();
    let empty = tmp.path().join("empty");
    std::fs::create_dir_all(&empty).unwrap();
    let empty_source = file_source_url(&empty);

    let output = run_cli_with_env(
        &["posts", "--source", &empty_source],
        &home,
        Some(&source),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Post A"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No posts found"));
}

#[test]
fn test_post_details() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(&["post", "c"], &home, Some(&source));

    assert!(stdout.contains("Post C"));
    assert!(stdout.contains("25 mar 2021"));
    assert!(stdout.contains("Ana"));
    assert!(stdout.contains("2 min"));
    assert!(stdout.contains("Intro"));
    assert!(stdout.contains("Post anterior"));
    assert!(stdout.contains("/post/b"));
    assert!(stdout.contains("Próximo post"));
    assert!(stdout.contains("/post/d"));
    assert!(!stdout.contains("Modo preview"));
}

#[test]
fn test_post_json_at_the_start() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(&["post", "a", "--json"], &home, Some(&source));

    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(view["post"]["uid"], "a");
    assert_eq!(view["reading_minutes"], 2);
    assert!(view["neighbors"]["previous"].is_null());
    assert_eq!(view["neighbors"]["next"]["uid"], "b");
    assert_eq!(view["preview"], false);
}

#[test]
fn test_post_not_found() {
    let (_tmp, source, home) = blog();

    let output = run_cli_with_env(&["post", "missing"], &home, Some(&source));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing"));
}

#[test]
fn test_paths() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(&["paths", "--page-size", "2"], &home, Some(&source));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        ["/post/a", "/post/b", "/post/c", "/post/d", "/post/e"]
    );
}

#[test]
fn test_preview_lifecycle() {
    let (_tmp, source, home) = blog();

    let stdout = run_cli_with_env_success(&["preview", "status"], &home, Some(&source));
    assert!(stdout.is_empty());

    let stdout =
        run_cli_with_env_success(&["preview", "enter", "YF8kVBEAACQAhQBr"], &home, Some(&source));
    assert!(stdout.contains("Preview mode on"));

    let stdout = run_cli_with_env_success(&["preview", "status"], &home, Some(&source));
    assert!(stdout.contains("YF8kVBEAACQAhQBr"));

    let stdout = run_cli_with_env_success(&["post", "b"], &home, Some(&source));
    assert!(stdout.contains("Modo preview"));
    assert!(stdout.contains("Post B"));

    let stdout = run_cli_with_env_success(&["preview", "exit"], &home, Some(&source));
    assert!(stdout.contains("Preview mode off"));

    let stdout = run_cli_with_env_success(&["post", "b"], &home, Some(&source));
    assert!(!stdout.contains("Modo preview"));
}

#[cfg(unix)]
#[test]
fn test_preview_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_tmp, source, home) = blog();

    run_cli_with_env_success(&["preview", "enter", "YF8kVBEAACQAhQBr"], &home, Some(&source));

    let path = home.join("data").join("lede").join("preview.json");
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_missing_source() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli_with_env(&["posts"], temp_dir.path(), None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("LEDE_SOURCE"));
}

#[test]
fn test_invalid_source() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli_with_env(&["posts"], temp_dir.path(), Some("http://example.com"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid content source"));
}
