//! Integration test: command dispatch against a temporary ledger.
//!
//! Verifies that:
//! 1. `calculate` renders the report and, with `--json`, the success envelope.
//! 2. `--save` with `--ref` reuses one client across runs.
//! 3. Stored clients can be shown, recalculated and their history listed.
//! 4. Bad input maps to exit code 2, unknown clients to 1.
//! 5. `--help` and `help` print the usage text.

use chrono::NaiveDate;
use destiny_cli::{App, Args, CliError, IntakeError, UsageError};
use destiny_core::CoreConfig;
use destiny_ledger::Ledger;

fn app(dir: &tempfile::TempDir) -> App {
    let config = CoreConfig {
        storage_path: dir.path().to_string_lossy().into_owned(),
        history_limit: 2,
        ..CoreConfig::default()
    };
    let calculator = config.calculator().unwrap();
    let ledger = Ledger::open(&config).unwrap();
    App::new(config, calculator, ledger, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
}

fn run(app: &App, argv: &[&str]) -> Result<String, CliError> {
    app.run(&Args::parse(argv.iter().map(|s| s.to_string())).unwrap())
}

#[test]
fn calculate_text_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let argv = ["calculate", "--name", "ИВАН ИВАНОВ", "--date", "15.03.1990"];
    let text = run(&app, &argv).unwrap();
    assert!(text.contains("КЛИЕНТ: ИВАН ИВАНОВ"));
    assert!(text.contains("[1]"));
    assert!(!text.contains("Сохранено"));

    let json = run(
        &app,
        &["calculate", "--name", "ИВАН ИВАНОВ", "--date", "15/03/1990", "--json"],
    )
    .unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["success"], true);
    assert_eq!(v["data"]["destiny_number"], 1);
    assert_eq!(v["data"]["soul_number"], 11);
    assert_eq!(v["data"]["matrix"]["bottom_left"], 11);
    assert!(v.get("saved").is_none());
}

#[test]
fn save_with_ref_reuses_client() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);
    let argv = [
        "calculate",
        "--name",
        "Анна",
        "--date",
        "01.02.2000",
        "--save",
        "--ref",
        "chat:7",
        "--json",
    ];
    let first: serde_json::Value = serde_json::from_str(&run(&app, &argv).unwrap()).unwrap();
    let second: serde_json::Value = serde_json::from_str(&run(&app, &argv).unwrap()).unwrap();
    let client_id = first["saved"]["client_id"].as_str().unwrap().to_string();
    assert_eq!(second["saved"]["client_id"], client_id.as_str());
    assert_ne!(first["saved"]["calculation_id"], second["saved"]["calculation_id"]);

    let card = run(&app, &["client", "show", &client_id]).unwrap();
    assert!(card.contains("Имя: Анна"));
    assert!(card.contains("Расчетов: 2"));
    assert!(card.contains("Внешний ID: chat:7"));
}

#[test]
fn stored_client_flow() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let added = run(
        &app,
        &[
            "client",
            "add",
            "--name",
            "Олег",
            "--date",
            "02.11.1977",
            "--gender",
            "m",
            "--email",
            "oleg@example.com",
            "--json",
        ],
    )
    .unwrap();
    let v: serde_json::Value = serde_json::from_str(&added).unwrap();
    let id = v["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(v["data"]["gender"], "male");

    let list = run(&app, &["client", "list"]).unwrap();
    assert!(list.contains(&id));
    assert!(list.contains("02.11.1977  Олег"));

    for _ in 0..3 {
        let report = run(&app, &["client", "calculate", &id]).unwrap();
        assert!(report.contains("ПОЛ: Мужской"));
    }

    // history_limit = 2
    let history = run(&app, &["history", &id, "--json"]).unwrap();
    let v: serde_json::Value = serde_json::from_str(&history).unwrap();
    assert_eq!(v["data"].as_array().unwrap().len(), 2);

    let feedback = run(&app, &["feedback", "--rating", "4", "--client", &id]).unwrap();
    assert!(feedback.contains("4/5"));
}

#[test]
fn error_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let err = run(&app, &["calculate", "--name", "Иван", "--date", "15.03.2030"]).unwrap_err();
    assert!(matches!(err, CliError::Intake(IntakeError::FutureDate)));
    assert_eq!(err.exit_code(), 2);

    let err = run(&app, &["calculate", "--date", "15.03.1990"]).unwrap_err();
    assert!(matches!(err, CliError::Usage(UsageError::MissingFlag("name"))));

    let err = run(&app, &["frobnicate"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    let err = run(&app, &["history", "missing"]).unwrap_err();
    assert!(matches!(err, CliError::Ledger(_)));
    assert_eq!(err.exit_code(), 1);

    let err = run(&app, &["feedback", "--rating", "9"]).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn help_flag_and_command_print_usage() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);
    let banner = format!("Destiny Matrix {}\n", destiny_core::version());

    let cases: [&[&str]; 4] = [&["--help"], &["help"], &[], &["calculate", "--help"]];
    for argv in cases {
        let out = run(&app, argv).unwrap();
        assert!(out.starts_with(&banner), "{argv:?}");
        assert!(out.contains("destiny client list"));
    }
}
