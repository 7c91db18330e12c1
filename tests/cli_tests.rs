use assert_cmd::Command;

fn onboard() -> Command {
    Command::cargo_bin("onboard").unwrap()
}

#[test]
fn inspect_onion_url() {
    let output = onboard()
        .args(["inspect", "--url", "MyNode.ONION:8080"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("url: https://MyNode.ONION:8080"), "{stdout}");
    assert!(stdout.contains("connector: nativelnd"), "{stdout}");
    assert!(stdout.contains("transport: tor"), "{stdout}");
    assert!(stdout.contains("validation: skipped"), "{stdout}");
    assert!(stdout.contains("companion app"), "{stdout}");
}

#[test]
fn inspect_clearnet_url() {
    let output = onboard()
        .args(["inspect", "--url", "http://10.0.0.2:8080"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("url: http://10.0.0.2:8080"), "{stdout}");
    assert!(stdout.contains("connector: lnd"), "{stdout}");
    assert!(stdout.contains("transport: clearnet"), "{stdout}");
    assert!(stdout.contains("validation: required"), "{stdout}");
    assert!(!stdout.contains("companion app"), "{stdout}");
}

#[test]
fn connect_requires_macaroon_argument() {
    onboard()
        .args(["connect", "--url", "node:8080"])
        .assert()
        .failure();
}

#[test]
fn connect_against_unreachable_service_fails_with_notice() {
    let output = onboard()
        .env("ONBOARD_ACCOUNT_SERVICE_URL", "http://127.0.0.1:9/rpc")
        .env("ONBOARD_CALL_TIMEOUT_MS", "2000")
        .env("ONBOARD_LOG_LEVEL", "off")
        .args(["connect", "--url", "node:8080", "--macaroon", "ab12"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("Connection failed. Are your RaspiBlitz credentials correct?"),
        "{stderr}"
    );
}
