use std::process::Command;

use tempfile::TempDir;

use crate::helpers::*;

#[test]
fn test_toml_ignore() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    std::fs::write(
        directory.join("quill.toml"),
        r#"
[lint]
ignore = ["require_returns_check"]
"#,
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
fn test_cli_select_overrides_toml_select() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    std::fs::write(
        directory.join("quill.toml"),
        r#"
[lint]
select = []
"#,
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--select")
        .arg("CORR")
        .run();

    assert_eq!(output.exit_code(), 1);
    assert!(output.stdout.contains(NEVER));
    Ok(())
}

#[test]
fn test_unknown_rule_in_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    std::fs::write(
        directory.join("quill.toml"),
        r#"
[lint]
select = ["foo"]
"#,
    )?;

    insta::assert_snapshot!(
        &mut Command::new(binary_path())
            .current_dir(directory)
            .arg("check")
            .arg(".")
            .run()
            .normalize_os_executable_name()
            .normalize_temp_paths(),
        @r"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
quill failed
  Cause: Unknown rules in field `select` in 'quill.toml': foo (in [TEMP_DIR])

----- args -----
check .
"
    );

    Ok(())
}

#[test]
fn test_invalid_toml_field() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    std::fs::write(
        directory.join("quill.toml"),
        r#"
[lint]
unknown-field = true
"#,
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();

    assert_eq!(output.exit_code(), 2);
    assert!(output.stderr.contains("Failed to parse"));
    assert!(output.stderr.contains("quill.toml"));
    Ok(())
}

#[test]
fn test_tag_name_preference_and_mode() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("return", "string", RETURN_NOTHING),
    )?;
    std::fs::write(
        directory.join("quill.toml"),
        r#"
[lint.tag-name-preference]
returns = "return"
"#,
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();

    assert_eq!(output.exit_code(), 1);
    assert!(output.stdout.contains(
        "JSDoc @return declaration present but return expression not available in function."
    ));

    // A disabled tag family is not checked.
    std::fs::write(
        directory.join("quill.toml"),
        r#"
[lint.tag-name-preference]
returns = false
"#,
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();
    assert_eq!(output.exit_code(), 0);
    Ok(())
}

#[test]
fn test_rule_options() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::write(
        directory.join("test.quill.json"),
        declaration_file("returns", "number", GENERATOR),
    )?;
    std::fs::write(
        directory.join("quill.toml"),
        r#"
[lint]
mode = "typescript"

[lint.require-returns-check]
exempt-generators = false
"#,
    )?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .run();

    assert_eq!(output.exit_code(), 1);
    assert!(output.stdout.contains(MISSING));
    Ok(())
}

#[test]
fn test_closest_toml_applies_to_each_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();

    std::fs::create_dir(directory.join("legacy"))?;
    std::fs::write(
        directory.join("legacy/old.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    std::fs::write(
        directory.join("legacy/quill.toml"),
        r#"
[lint]
ignore = ["require_returns_check"]
"#,
    )?;
    std::fs::write(
        directory.join("new.quill.json"),
        declaration_file("returns", "never", RETURN_FIVE),
    )?;
    std::fs::write(directory.join("quill.toml"), "[lint]\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg("new.quill.json")
        .arg("legacy/old.quill.json")
        .run();

    assert_eq!(output.exit_code(), 1);
    assert!(output.stdout.contains("new.quill.json [3:1]"));
    assert!(!output.stdout.contains("old.quill.json"));
    Ok(())
}
