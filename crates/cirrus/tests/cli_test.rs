#![allow(deprecated)] // TODO: move from Command::cargo_bin to the cargo_bin_cmd! macro

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn cirrus(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cirrus").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("CIRRUS_CONFIG_PATH")
        .env_remove("AWS_REGION")
        .env_remove("AWS_DEFAULT_REGION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = tempfile::tempdir().unwrap();
    cirrus(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("normalize"))
        .stdout(predicate::str::contains("expand"))
        .stdout(predicate::str::contains("resources"));
}

#[test]
fn test_cli_version() {
    let dir = tempfile::tempdir().unwrap();
    cirrus(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cirrus"));
}

#[test]
fn test_debug_flag_is_global() {
    let dir = tempfile::tempdir().unwrap();
    cirrus(dir.path())
        .args(["version", "--debug"])
        .assert()
        .success();
}

#[test]
fn test_invalid_command() {
    let dir = tempfile::tempdir().unwrap();
    cirrus(dir.path()).arg("launch").assert().failure();
}

#[test]
fn test_validate_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("provider.yaml");
    fs::write(
        &file,
        "region: eu-west-2\naccess_key: AKIDEXAMPLE\nsecret_key: secret\nallowed_account_ids: [\"123456789012\"]\n",
    )
    .unwrap();

    cirrus(dir.path())
        .arg("validate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("eu-west-2"))
        .stdout(predicate::str::contains("Static"))
        .stdout(predicate::str::contains("123456789012"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_validate_discovers_file_in_working_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cirrus.json"), r#"{"region": "us-east-2"}"#).unwrap();

    cirrus(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("cirrus.json"))
        .stdout(predicate::str::contains("us-east-2"));
}

#[test]
fn test_validate_rejects_unknown_region() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("provider.yaml");
    fs::write(&file, "region: mars-north-1\n").unwrap();

    cirrus(dir.path())
        .arg("validate")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid region: mars-north-1"));
}

#[test]
fn test_validate_skip_region_validation() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("provider.yaml");
    fs::write(&file, "region: mars-north-1\nskip_region_validation: true\n").unwrap();

    cirrus(dir.path())
        .arg("validate")
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn test_validate_rejects_unknown_option() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("provider.yaml");
    fs::write(&file, "region: eu-west-2\nregoin: eu-west-1\n").unwrap();

    cirrus(dir.path())
        .arg("validate")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("regoin"));
}

#[test]
fn test_validate_without_any_file() {
    let dir = tempfile::tempdir().unwrap();
    cirrus(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provider configuration file not found"));
}

#[test]
fn test_configure_fails_before_network_on_bad_region() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("provider.yaml");
    fs::write(&file, "region: mars-north-1\naccess_key: AK\nsecret_key: SK\n").unwrap();

    cirrus(dir.path())
        .arg("configure")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid region"));
}

#[test]
fn test_normalize_json_sorts_keys() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("policy.json");
    fs::write(&file, r#"{ "b": 1, "a": { "d": 2, "c": 3 } }"#).unwrap();

    cirrus(dir.path())
        .arg("normalize")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"a":{"c":3,"d":2},"b":1}"#));
}

#[test]
fn test_normalize_yaml_is_returned_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("template.yaml");
    fs::write(&file, "zeta: 1\nalpha: 2\n").unwrap();

    cirrus(dir.path())
        .arg("normalize")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("zeta: 1\nalpha: 2"));
}

#[test]
fn test_normalize_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.json");
    fs::write(&file, "{\"a\": [1, 2").unwrap();

    cirrus(dir.path())
        .arg("normalize")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed document"));
}

#[test]
fn test_expand_listeners() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("listeners.yaml");
    fs::write(
        &file,
        "- instance_port: 8080\n  instance_protocol: http\n  lb_port: 443\n  lb_protocol: https\n  ssl_certificate_id: cert-1\n",
    )
    .unwrap();

    cirrus(dir.path())
        .args(["expand", "listeners"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""LoadBalancerPort": 443"#))
        .stdout(predicate::str::contains(r#""SSLCertificateId": "cert-1""#));
}

#[test]
fn test_expand_listeners_rejects_certificate_on_plain_http() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("listeners.yaml");
    fs::write(
        &file,
        "- instance_port: 80\n  instance_protocol: http\n  lb_port: 80\n  lb_protocol: http\n  ssl_certificate_id: cert-1\n",
    )
    .unwrap();

    cirrus(dir.path())
        .args(["expand", "listeners"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ssl_certificate_id (cert-1)"));
}

#[test]
fn test_expand_ingress() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ingress.yaml");
    fs::write(
        &file,
        "- from_port: 22\n  to_port: 22\n  protocol: tcp\n  cidr_blocks: [\"10.0.0.0/8\"]\n",
    )
    .unwrap();

    cirrus(dir.path())
        .args(["expand", "ingress"])
        .arg(&file)
        .args(["--group-id", "sg-1234", "--vpc-id", "vpc-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""IpProtocol": "tcp""#))
        .stdout(predicate::str::contains("10.0.0.0/8"));
}

#[test]
fn test_expand_ingress_all_protocols_needs_zero_ports() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ingress.json");
    fs::write(
        &file,
        r#"[{"from_port": 0, "to_port": 65535, "protocol": "-1"}]"#,
    )
    .unwrap();

    cirrus(dir.path())
        .args(["expand", "ingress"])
        .arg(&file)
        .args(["--group-id", "sg-1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must both be 0"));
}

#[test]
fn test_expand_ingress_requires_group_id() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ingress.yaml");
    fs::write(&file, "[]\n").unwrap();

    cirrus(dir.path())
        .args(["expand", "ingress"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--group-id"));
}

#[test]
fn test_resources_lists_dhcp_association() {
    let dir = tempfile::tempdir().unwrap();
    cirrus(dir.path())
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("osc_vpc_dhcp_options_association"));
}

#[test]
fn test_validate_takes_region_from_aws_region() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("provider.yaml");
    fs::write(&file, "max_retries: 3\n").unwrap();

    cirrus(dir.path())
        .env("AWS_DEFAULT_REGION", "us-east-1")
        .env("AWS_REGION", "us-west-1")
        .arg("validate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("us-west-1"));
}

#[test]
fn test_validate_missing_region_names_env_vars() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("provider.yaml");
    fs::write(&file, "max_retries: 3\n").unwrap();

    cirrus(dir.path())
        .arg("validate")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("AWS_REGION / AWS_DEFAULT_REGION"));
}
