use assert_cmd::Command;
use predicates::prelude::*;

#[test]
#[allow(deprecated)]
fn test_main_binary_help() {
    Command::cargo_bin("unit-converter")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit conversion calculator"));
}

#[test]
#[allow(deprecated)]
fn test_history_binary_help() {
    Command::cargo_bin("unit-converter-history")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--clear"));
}

#[test]
#[allow(deprecated)]
fn test_convert_subcommand_help() {
    Command::cargo_bin("unit-converter")
        .unwrap()
        .arg("convert")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--precision"));
}

#[test]
#[allow(deprecated)]
fn test_convert_length() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["convert", "1", "--from", "Kilometre", "--to", "Metre", "--db"])
        .arg(&db_path)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("1 000\n")
        .stderr("");
}

#[test]
#[allow(deprecated)]
fn test_convert_temperature() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args([
            "convert",
            "100",
            "--category",
            "température",
            "--from",
            "Celsius",
            "--to",
            "Fahrenheit",
            "--db",
        ])
        .arg(&db_path)
        .assert()
        .success()
        .stdout("212\n");
}

#[test]
#[allow(deprecated)]
fn test_convert_swap_and_precision() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args([
            "convert",
            "1",
            "-c",
            "weight",
            "--from",
            "Livre",
            "--to",
            "Kilogramme",
            "--swap",
            "--precision",
            "2",
            "--db",
        ])
        .arg(&db_path)
        .assert()
        .success()
        .stdout("2,2\n");
}

#[test]
#[allow(deprecated)]
fn test_convert_invalid_value() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["convert", "abc", "--db"])
        .arg(&db_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Valeur invalide"));
}

#[test]
#[allow(deprecated)]
fn test_convert_unsupported_unit() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["convert", "1", "--from", "Furlong", "--to", "Metre", "--db"])
        .arg(&db_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Erreur de conversion"));
}

#[test]
#[allow(deprecated)]
fn test_convert_json() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["convert", "2.5", "--to", "Centimetre", "--json", "--db"])
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "converted""#))
        .stdout(predicate::str::contains(r#""display": "0,25""#));
}

#[test]
#[allow(deprecated)]
fn test_history_lists_recorded_conversions() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");

    Command::cargo_bin("unit-converter-history")
        .unwrap()
        .arg("--db")
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aucune conversion dans l'historique"));

    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["convert", "1", "--from", "Kilometre", "--to", "Metre", "--db"])
        .arg(&db_path)
        .assert()
        .success();
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["convert", "7", "--no-history", "--db"])
        .arg(&db_path)
        .assert()
        .success();

    Command::cargo_bin("unit-converter-history")
        .unwrap()
        .arg("--db")
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kilomètre (km)"))
        .stdout(predicate::str::contains("1 000 Mètre (m)"))
        .stdout(predicate::str::contains("7 Millimètre").not());

    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["history", "--clear", "--db"])
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 conversions"));
}

#[test]
#[allow(deprecated)]
fn test_settings_precision_applies_to_convert() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");

    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["settings", "--precision", "2", "--toggle-theme", "--json", "--db"])
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""theme": "dark""#))
        .stdout(predicate::str::contains(r#""precision": 2"#));

    Command::cargo_bin("unit-converter")
        .unwrap()
        .args([
            "convert",
            "1234.56789",
            "-c",
            "poids",
            "--from",
            "Gramme",
            "--to",
            "Gramme",
            "--db",
        ])
        .arg(&db_path)
        .assert()
        .success()
        .stdout("1 234,57\n");
}

#[test]
#[allow(deprecated)]
fn test_units_listing() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("history.db");
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["settings", "--theme", "dark", "--db"])
        .arg(&db_path)
        .assert()
        .success();

    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["units", "--category", "volume", "--db"])
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mètre cube (m³)"))
        .stdout(predicate::str::contains("Kilomètre").not());
}

#[test]
#[allow(deprecated)]
fn test_convert_survives_unusable_database() {
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args([
            "convert",
            "1",
            "--from",
            "Kilometre",
            "--to",
            "Metre",
            "--precision",
            "2",
            "--db",
            "/dev/null/history.db",
        ])
        .assert()
        .success()
        .stdout("1 000\n")
        .stderr(predicate::str::contains("Could not record conversion"));

    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["convert", "1", "--from", "Kilometre", "--to", "Metre"])
        .args(["--db", "/dev/null/history.db"])
        .assert()
        .success()
        .stdout("1 000\n");
}

#[test]
#[allow(deprecated)]
fn test_units_survive_unusable_database() {
    Command::cargo_bin("unit-converter")
        .unwrap()
        .args(["units", "--category", "length", "--db", "/dev/null/history.db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kilomètre (km)"));
}

#[test]
#[allow(deprecated)]
fn test_history_rejects_zero_limit() {
    Command::cargo_bin("unit-converter-history")
        .unwrap()
        .args(["--limit", "0"])
        .assert()
        .failure();
}
