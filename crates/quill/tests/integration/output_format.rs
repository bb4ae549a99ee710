use std::process::Command;

use tempfile::TempDir;

use crate::helpers::*;

fn setup(directory: &std::path::Path) -> anyhow::Result<()> {
    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    Ok(())
}

#[test]
fn test_output_json() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    setup(directory)?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("json")
        .run();

    assert_eq!(output.exit_code(), 1);

    let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
    let diagnostic = &value["diagnostics"][0];
    assert_eq!(diagnostic["message"]["name"], "require_returns_check");
    assert_eq!(diagnostic["message"]["body"], NEVER);
    assert_eq!(diagnostic["filename"], "test.quill.json");
    assert_eq!(diagnostic["location"]["row"], 3);
    assert_eq!(diagnostic["location"]["column"], 1);
    assert_eq!(value["errors"], serde_json::json!([]));

    Ok(())
}

#[test]
fn test_output_json_reports_file_errors() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("bad.quill.json"), "{ not json")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("json")
        .run();

    assert_eq!(output.exit_code(), 2);

    let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(value["diagnostics"], serde_json::json!([]));
    assert_eq!(value["errors"][0]["file"], "bad.quill.json");
    let error = value["errors"][0]["error"].as_str().unwrap_or_default();
    assert!(error.contains("Failed to parse bad.quill.json"));

    Ok(())
}

#[test]
fn test_output_github() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    setup(directory)?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--output-format")
            .arg("github")
            .run()
            .normalize_os_executable_name(),
        @r#"
success: false
exit_code: 1
----- stdout -----
::warning title=quill (require_returns_check),file=test.quill.json,line=3,col=1::test.quill.json:3:1 [require_returns_check] JSDoc @returns declaration set with "never" but return expression is present in function.

----- stderr -----

----- args -----
check . --output-format github
"#
    );

    Ok(())
}

#[test]
fn test_statistics() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    setup(directory)?;
    std::fs::write(
        directory.join("other.quill.json"),
        declaration_file("returns", "string", RETURN_NOTHING),
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--statistics")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
    2 require_returns_check

----- stderr -----

----- args -----
check . --statistics
"
    );

    Ok(())
}
