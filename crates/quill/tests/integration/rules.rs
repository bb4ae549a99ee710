use std::process::Command;

use tempfile::TempDir;

use crate::helpers::*;

#[test]
fn test_reports_violation() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .run()
            .normalize_os_executable_name(),
        @r#"
success: false
exit_code: 1
----- stdout -----
test.quill.json [3:1] require_returns_check JSDoc @returns declaration set with "never" but return expression is present in function.

Found 1 error.

----- stderr -----

----- args -----
check .
"#
    );

    Ok(())
}

#[test]
fn test_clean_file_passes() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "number", RETURN_FIVE),
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .run()
            .normalize_os_executable_name(),
        @r"
success: true
exit_code: 0
----- stdout -----
All checks passed!

----- stderr -----

----- args -----
check .
"
    );

    Ok(())
}

#[test]
fn test_no_declaration_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("index.js"), "function f() {}")?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .run()
            .normalize_os_executable_name(),
        @r"
success: true
exit_code: 0
----- stdout -----
Warning: No declaration files found under the given path(s).

----- stderr -----

----- args -----
check .
"
    );

    Ok(())
}

#[test]
fn test_node_modules_excluded_by_default() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::create_dir(directory.join("node_modules"))?;
    std::fs::write(
        directory.join("node_modules/dep.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "number", RETURN_FIVE),
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();
    assert_eq!(output.exit_code(), 0);

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--no-default-exclude")
            .run()
            .normalize_os_executable_name(),
        @r#"
success: false
exit_code: 1
----- stdout -----
node_modules/dep.quill.json [3:1] require_returns_check JSDoc @returns declaration set with "never" but return expression is present in function.

Found 1 error.

----- stderr -----

----- args -----
check . --no-default-exclude
"#
    );

    Ok(())
}

#[test]
fn test_unknown_selected_rule() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--select")
            .arg("foo,require_returns_check,barbaz")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
quill failed
  Cause: Unknown rules in `--select`: foo, barbaz

----- args -----
check . --select foo,require_returns_check,barbaz
"
    );

    Ok(())
}

#[test]
fn test_ignore_rule_and_group() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;

    for ignore in ["require_returns_check", "CORR"] {
        let output = Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--ignore")
            .arg(ignore)
            .run();

        assert_eq!(output.exit_code(), 0, "with --ignore {ignore}");
        assert_eq!(output.stdout, "All checks passed!\n");
    }

    Ok(())
}

#[test]
fn test_mode_changes_generator_default() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "number", GENERATOR),
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .run()
            .normalize_os_executable_name(),
        @r"
success: false
exit_code: 1
----- stdout -----
test.quill.json [3:1] require_returns_check JSDoc @returns declaration present but return expression not available in function.

Found 1 error.

----- stderr -----

----- args -----
check .
"
    );

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .arg("--mode")
            .arg("typescript")
            .run()
            .normalize_os_executable_name(),
        @r"
success: true
exit_code: 0
----- stdout -----
All checks passed!

----- stderr -----

----- args -----
check . --mode typescript
"
    );

    Ok(())
}

#[test]
fn test_invalid_mode() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--mode")
        .arg("flow")
        .run();

    assert_eq!(output.exit_code(), 2);
    assert!(output.stderr.contains("--mode"));

    Ok(())
}

#[test]
fn test_malformed_file_is_an_error() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(directory.join("bad.quill.json"), "{ not json")?;
    std::fs::write(
        directory.join("good.quill.json"),
        declaration_file("returns", "string", RETURN_NOTHING),
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();

    assert_eq!(output.exit_code(), 2);
    assert!(output.stderr.starts_with("Error: Failed to parse bad.quill.json: "));
    // The other file is still checked.
    assert_eq!(
        output.stdout,
        format!("good.quill.json [3:1] require_returns_check {MISSING}\n\nFound 1 error.\n")
    );

    Ok(())
}
