use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn stagetime_help_works() {
    Command::cargo_bin("stagetime")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Spark stage timing"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = ["analyze", "stages", "job"];

    for cmd in subcommands {
        Command::cargo_bin("stagetime")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("stagetime")
        .expect("binary")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("stagetime"));
}
