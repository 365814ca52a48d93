use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("comprehend-kit").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn analyze_with_a_missing_file_exits_nonzero() {
    let mut cmd = Command::cargo_bin("comprehend-kit").expect("binary exists");
    cmd.args(["analyze", "--file", "/definitely/not/here.txt"])
        .assert()
        .failure();
}

#[test]
fn batch_with_a_missing_manifest_exits_nonzero() {
    let mut cmd = Command::cargo_bin("comprehend-kit").expect("binary exists");
    cmd.args(["batch", "--manifest", "/definitely/not/here.json"])
        .assert()
        .failure();
}
