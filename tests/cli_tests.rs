//! Integration tests for the basm binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            dir: tempdir().unwrap(),
        };
        fs::create_dir_all(sandbox.path("etc")).unwrap();
        sandbox
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn rc(&self) -> PathBuf {
        self.path("home/.bashrc")
    }

    fn sudoers(&self) -> PathBuf {
        self.path("etc/sudoers")
    }

    fn backups(&self) -> PathBuf {
        self.path("backups")
    }

    /// Use `validator` (e.g. `true` or `false`) in place of visudo
    fn with_validator(&self, validator: &str) {
        fs::write(
            self.path("config.toml"),
            format!(
                "[tools]\nvalidator = \"{}\"\nprivileged_helper = \"false\"\n",
                validator
            ),
        )
        .unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("basm").unwrap();
        cmd.env("BASM_RC_FILE", self.rc())
            .env("BASM_SUDOERS_PATH", self.sudoers())
            .env("BASM_BACKUP_DIR", self.backups())
            .env("BASM_CONFIG", self.path("config.toml"))
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0")
            .env_remove("BASM_LOG");
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_alias_add_list_remove() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["alias", "add", "ll", "ls -la"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added"));
    sb.cmd()
        .args(["export", "add", "EDITOR", "nvim"])
        .assert()
        .success();

    sb.cmd()
        .args(["alias", "list"])
        .assert()
        .success()
        .stdout("alias ll='ls -la'\n");

    sb.cmd().args(["alias", "remove", "ll"]).assert().success();

    assert_eq!(read(&sb.rc()), "export EDITOR=nvim\n");
    sb.cmd().args(["alias", "list"]).assert().success().stdout("");
}

#[test]
fn test_list_filters_by_kind() {
    let sb = Sandbox::new();
    fs::create_dir_all(sb.path("home")).unwrap();
    fs::write(sb.rc(), "alias ll='ls -la'\nexport FOO=bar\n\n").unwrap();

    sb.cmd()
        .args(["alias", "list"])
        .assert()
        .success()
        .stdout("alias ll='ls -la'\n");
    sb.cmd()
        .args(["export", "list"])
        .assert()
        .success()
        .stdout("export FOO=bar\n");
}

#[test]
fn test_list_creates_missing_rc() {
    let sb = Sandbox::new();

    sb.cmd().args(["export", "list"]).assert().success().stdout("");
    assert!(sb.rc().exists());
}

#[test]
fn test_export_value_quoting() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["export", "add", "PATHX", "a b"])
        .assert()
        .success();
    sb.cmd()
        .args(["export", "add", "PATHY", "ab"])
        .assert()
        .success();

    assert_eq!(read(&sb.rc()), "export PATHX=\"a b\"\nexport PATHY=ab\n");
}

#[test]
fn test_remove_absent_key_keeps_content() {
    let sb = Sandbox::new();
    fs::create_dir_all(sb.path("home")).unwrap();
    let original = "# my rc\nalias g=git\n\nexport X=1";
    fs::write(sb.rc(), original).unwrap();

    sb.cmd()
        .args(["export", "remove", "NOPE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));

    assert_eq!(read(&sb.rc()), original);
}

#[test]
fn test_invalid_name_is_rejected_before_writing() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["export", "add", "MY-VAR", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: invalid export name"));

    assert!(!sb.rc().exists());
}

#[test]
fn test_exit_codes_for_usage_errors() {
    let sb = Sandbox::new();

    sb.cmd().arg("frobnicate").assert().code(1);
    sb.cmd().arg("alias").assert().code(1);
    sb.cmd().args(["alias", "add", "ll"]).assert().code(2);
    sb.cmd().args(["alias", "remove", "a", "b"]).assert().code(2);
    sb.cmd().arg("help").assert().success();
}

#[test]
fn test_sudoers_add_list_remove() {
    let sb = Sandbox::new();
    sb.with_validator("true");
    fs::write(sb.sudoers(), "root ALL=(ALL) ALL\n").unwrap();

    sb.cmd()
        .args(["sudoers", "add", "bob ALL=(ALL) NOPASSWD: /usr/bin/apt"])
        .assert()
        .success();
    assert_eq!(
        read(&sb.sudoers()),
        "root ALL=(ALL) ALL\n\nbob ALL=(ALL) NOPASSWD: /usr/bin/apt\n"
    );

    sb.cmd()
        .args(["sudoers", "list"])
        .assert()
        .success()
        .stdout("root ALL=(ALL) ALL\nbob ALL=(ALL) NOPASSWD: /usr/bin/apt\n");

    sb.cmd().args(["sudoers", "remove", "bob"]).assert().success();
    assert_eq!(read(&sb.sudoers()), "root ALL=(ALL) ALL\n\n");
}

#[test]
fn test_sudoers_rejected_change_leaves_file_untouched() {
    let sb = Sandbox::new();
    sb.with_validator("false");
    let original = "root ALL=(ALL) ALL\n";
    fs::write(sb.sudoers(), original).unwrap();

    let output = sb
        .cmd()
        .args(["sudoers", "add", "not a valid line"])
        .assert()
        .code(2)
        .get_output()
        .clone();

    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "{stderr}");
    assert!(lines[0].starts_with("error: sudoers entry not added"), "{stderr}");
    assert!(lines[0].contains("rejected"), "{stderr}");
    assert_eq!(fs::read(sb.sudoers()).unwrap(), original.as_bytes());
}

#[test]
fn test_sudoers_with_latin1_comment() {
    let sb = Sandbox::new();
    sb.with_validator("true");
    fs::write(sb.sudoers(), b"# Jos\xe9 admin\nroot ALL=(ALL) ALL\nbob ALL=ALL\n").unwrap();

    sb.cmd()
        .args(["sudoers", "list"])
        .assert()
        .success()
        .stdout("root ALL=(ALL) ALL\nbob ALL=ALL\n");

    sb.cmd()
        .args(["sudoers", "remove", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 line(s)"));

    assert_eq!(
        fs::read(sb.sudoers()).unwrap(),
        b"# Jos\xe9 admin\nroot ALL=(ALL) ALL\n"
    );
}

#[test]
fn test_missing_sudoers_is_an_error() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["sudoers", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot access"));
}

#[test]
fn test_backup_then_restore_round_trip() {
    let sb = Sandbox::new();
    sb.with_validator("true");
    fs::create_dir_all(sb.path("home")).unwrap();
    fs::write(sb.rc(), "alias ll='ls -la'\n").unwrap();
    fs::write(sb.sudoers(), "root ALL=(ALL) ALL\n").unwrap();

    sb.cmd()
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains(".bashrc.bak."))
        .stdout(predicate::str::contains("sudoers.bak."));

    fs::write(sb.rc(), "alias ll='rm -rf'\n").unwrap();
    fs::write(sb.sudoers(), "changed\n").unwrap();

    sb.cmd().arg("restore").assert().success();

    assert_eq!(read(&sb.rc()), "alias ll='ls -la'\n");
    assert_eq!(read(&sb.sudoers()), "root ALL=(ALL) ALL\n");
}

#[test]
fn test_restore_refuses_invalid_sudoers_backup() {
    let sb = Sandbox::new();
    sb.with_validator("true");
    fs::write(sb.sudoers(), "root ALL=(ALL) ALL\n").unwrap();
    sb.cmd().args(["backup", "--no-rc"]).assert().success();

    fs::write(sb.sudoers(), "current\n").unwrap();
    sb.with_validator("false");

    sb.cmd().args(["restore", "--no-rc"]).assert().code(2);
    assert_eq!(read(&sb.sudoers()), "current\n");
}

#[test]
fn test_restore_without_backups_is_not_fatal() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["restore", "--no-sudoers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no rc backup found"));
}

#[test]
fn test_backup_respects_flags() {
    let sb = Sandbox::new();
    fs::create_dir_all(sb.path("home")).unwrap();
    fs::write(sb.rc(), "export A=1\n").unwrap();

    sb.cmd().args(["backup", "--no-sudoers"]).assert().success();

    let names: Vec<String> = fs::read_dir(sb.backups())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with(".bashrc.bak."));
}

#[cfg(unix)]
#[test]
fn test_apply_sources_rc_in_subshell() {
    let sb = Sandbox::new();
    fs::create_dir_all(sb.path("home")).unwrap();
    fs::write(sb.rc(), "echo sourced-from-rc\n").unwrap();

    sb.cmd()
        .arg("apply")
        .env("SHELL", "/bin/sh")
        .assert()
        .success()
        .stdout(predicate::str::contains("sourced-from-rc"));
}

#[cfg(unix)]
#[test]
fn test_apply_handles_quote_in_rc_path() {
    let sb = Sandbox::new();
    let rc = sb.path("it's here/.bashrc");
    fs::create_dir_all(rc.parent().unwrap()).unwrap();
    fs::write(&rc, "echo quoted-path-ok\n").unwrap();

    sb.cmd()
        .arg("apply")
        .env("SHELL", "/bin/sh")
        .env("BASM_RC_FILE", &rc)
        .assert()
        .success()
        .stdout(predicate::str::contains("quoted-path-ok"))
        .stdout(predicate::str::contains("exited with").not());
}
