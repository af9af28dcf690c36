use assert_cmd::Command;
use predicates::prelude::*;
use specfile::{ConfigError, ConfigStore, ScriptCursor};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const STATIC_IP_CONF: &str = "\
# Where Vivado lives
vivado = /opt/Xilinx/Vivado/bin/vivado
tmp = /tmp

command_line = \"%vivado% -mode batch -source %tmp%/script.tcl\"

config.ini = {
    ip = %static_ip%
    gateway = %gateway_ip%
}

vivado_script =
{
open_hw_manager
connect_hw_server -url %usb_ip%:3121
if {[llength [get_hw_targets]] == 0} {
    puts \"no target\"
} else { current_hw_target }
}

[timing]
delays = 10, 0x20, 3_0
";

fn setup_spec_file(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smartlynq_static_ip.conf");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_core_workflow() {
    let (_td, path) = setup_spec_file(STATIC_IP_CONF);

    // 1. Load the file
    let store = ConfigStore::load(&path).unwrap();

    // 2. Scalars
    assert_eq!(
        store.get::<String>("vivado").unwrap().as_deref(),
        Some("/opt/Xilinx/Vivado/bin/vivado")
    );
    assert_eq!(
        store.get::<String>("command_line").unwrap().as_deref(),
        Some("%vivado% -mode batch -source %tmp%/script.tcl")
    );

    // 3. Script captured with `key = {`
    let config_ini = store.get_script_lines("config.ini").unwrap().unwrap();
    assert_eq!(config_ini, vec!["    ip = %static_ip%", "    gateway = %gateway_ip%"]);

    // 4. Script captured with `{` on its own line; only a bare `}` closes it
    let script = store.get_script_lines("vivado_script").unwrap().unwrap();
    assert_eq!(script.len(), 5);
    assert_eq!(script[0], "open_hw_manager");
    assert_eq!(script[4], "} else { current_hw_target }");

    // 5. Vector in a section
    assert_eq!(
        store.get_vec::<i32>("timing::delays").unwrap().unwrap(),
        vec![10, 32, 30]
    );
}

#[test]
fn test_script_cursor_walk() {
    let (_td, path) = setup_spec_file(STATIC_IP_CONF);
    let store = ConfigStore::load(&path).unwrap();

    let mut cursor: ScriptCursor = store.get_script("vivado_script").unwrap().unwrap();
    cursor.next_line();
    let (count, _) = cursor.next_line().unwrap();
    assert_eq!(count, 3);
    assert_eq!(cursor.next_token(false), "connect_hw_server");
    assert_eq!(cursor.next_token(false), "-url");
    assert_eq!(cursor.next_token(false), "%usb_ip%:3121");
    assert_eq!(cursor.next_token(false), "");

    cursor.rewind();
    assert_eq!(cursor.next_line().unwrap().1, "open_hw_manager");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.conf");

    let mut store = ConfigStore::new();
    assert!(!store.read(&path, false));

    let err = ConfigStore::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FileOpen { .. }));
}

#[test]
fn test_override_file_overlays_base() {
    let (_base_dir, base) = setup_spec_file(STATIC_IP_CONF);
    let (_local_dir, local) = setup_spec_file("tmp = /var/tmp\n[timing]\ndelays = 1\n");

    let mut store = ConfigStore::new();
    assert!(store.read(&base, false));
    assert!(store.read(&local, false));

    assert_eq!(store.get::<String>("tmp").unwrap().as_deref(), Some("/var/tmp"));
    assert_eq!(store.get_vec::<i32>("timing::delays").unwrap().unwrap(), vec![1]);
    assert!(store.exists("vivado"));
}

#[test]
fn test_cli_dump() {
    let (_td, path) = setup_spec_file("b = 2\n[s]\na = x, \"y z\"\n");

    Command::cargo_bin("specfile")
        .unwrap()
        .arg("dump")
        .arg(&path)
        .assert()
        .success()
        .stdout("Key \"::b\"\n   \"2\"\nKey \"s::a\"\n   \"x\"\n   \"y z\"\n");
}

#[test]
fn test_cli_get_with_section_and_type() {
    let (_td, path) = setup_spec_file(STATIC_IP_CONF);

    Command::cargo_bin("specfile")
        .unwrap()
        .args(["get", path.to_str().unwrap(), "delays", "--section", "Timing", "--type", "float"])
        .assert()
        .success()
        .stdout("10\n32\n30\n");
}

#[test]
fn test_cli_get_missing_key() {
    let (_td, path) = setup_spec_file(STATIC_IP_CONF);

    Command::cargo_bin("specfile")
        .unwrap()
        .args(["get", path.to_str().unwrap(), "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config key 'nope' not found"));

    Command::cargo_bin("specfile")
        .unwrap()
        .args(["get", path.to_str().unwrap(), "nope", "--lenient"])
        .assert()
        .success()
        .stdout("Key 'nope' not found\n");
}

#[test]
fn test_cli_script_tokens() {
    let (_td, path) = setup_spec_file(STATIC_IP_CONF);

    Command::cargo_bin("specfile")
        .unwrap()
        .args(["script", path.to_str().unwrap(), "config.ini", "--tokens"])
        .assert()
        .success()
        .stdout("3: [ip] [=] [%static_ip%]\n3: [gateway] [=] [%gateway_ip%]\n");
}

#[test]
fn test_cli_missing_file() {
    Command::cargo_bin("specfile")
        .unwrap()
        .args(["dump", "/no/such/dir/spec.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Can't open"));
}
