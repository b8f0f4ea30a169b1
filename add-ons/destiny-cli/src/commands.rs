//! Command dispatch. Every command returns its stdout text; the binary only
//! prints it and maps errors to exit codes.

use chrono::NaiveDate;
use destiny_core::{CoreConfig, MatrixCalculator};
use destiny_ledger::{Client, Ledger, LedgerError, NewClient};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::args::{Args, UsageError};
use crate::intake::{build_input, IntakeError};
use crate::report::{self, ReportWriter};

pub const USAGE: &str = "\
Usage:
  destiny calculate --name NAME --date DD.MM.YYYY [--gender male|female] [--json] [--save] [--ref REF]
  destiny client add --name NAME --date DD.MM.YYYY [--gender G] [--phone P] [--email E] [--notes T] [--ref REF]
  destiny client list [--skip N] [--limit N]
  destiny client show <id>
  destiny client calculate <id> [--json]
  destiny history <id> [--json]
  destiny feedback --rating 1-5 [--client ID] [--calculation ID] [--comment TEXT]
  destiny help

Configuration: DESTINY_CONFIG (default config/destiny.toml), DESTINY__* overrides.
Logging: RUST_LOG (default info), written to stderr.
";

const DEFAULT_LIST_LIMIT: usize = 100;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code: 2 for bad input, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Intake(_) => 2,
            _ => 1,
        }
    }
}

/// `{"success": true, "data": ...}`
fn envelope<T: Serialize>(data: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&json!({ "success": true, "data": data }))?)
}

pub struct App {
    config: CoreConfig,
    calculator: MatrixCalculator,
    ledger: Ledger,
    today: NaiveDate,
}

impl App {
    pub fn new(
        config: CoreConfig,
        calculator: MatrixCalculator,
        ledger: Ledger,
        today: NaiveDate,
    ) -> Self {
        Self {
            config,
            calculator,
            ledger,
            today,
        }
    }

    fn usage(&self) -> String {
        format!("{} {}\n\n{USAGE}", self.config.app_name, destiny_core::version())
    }

    fn writer(&self) -> ReportWriter {
        ReportWriter::new(self.config.excerpt_chars)
    }

    pub fn run(&self, args: &Args) -> Result<String, CliError> {
        if args.switch("help") {
            return Ok(self.usage());
        }
        match args.positional(0) {
            None | Some("help") => Ok(self.usage()),
            Some("calculate") => self.calculate(args),
            Some("client") => match args.positional(1) {
                Some("add") => self.client_add(args),
                Some("list") => self.client_list(args),
                Some("show") => self.client_show(args.require_positional(2, "id")?),
                Some("calculate") => {
                    self.client_calculate(args.require_positional(2, "id")?, args.switch("json"))
                }
                Some(other) => Err(UsageError::UnknownCommand(format!("client {other}")).into()),
                None => Err(UsageError::MissingArgument("subcommand").into()),
            },
            Some("history") => self.history(args.require_positional(1, "id")?, args.switch("json")),
            Some("feedback") => self.feedback(args),
            Some(other) => Err(UsageError::UnknownCommand(other.to_string()).into()),
        }
    }

    fn calculate(&self, args: &Args) -> Result<String, CliError> {
        let input = build_input(
            args.required("name")?,
            args.required("date")?,
            args.value("gender"),
            self.today,
        )?;
        let result = self.calculator.calculate(&input);

        let saved = if args.switch("save") {
            let new = NewClient::from_input(&input);
            let client = match args.value("ref") {
                Some(external_ref) => self.ledger.find_or_create_client(external_ref, new)?,
                None => self.ledger.create_client(new)?,
            };
            let row = self.ledger.record_calculation(&client.id, &result, None)?;
            Some((client.id, row.id))
        } else {
            None
        };

        if args.switch("json") {
            let mut body = json!({ "success": true, "data": result });
            if let Some((client_id, calculation_id)) = &saved {
                body["saved"] = json!({ "client_id": client_id, "calculation_id": calculation_id });
            }
            return Ok(serde_json::to_string_pretty(&body)?);
        }
        let mut out = self.writer().render(&input, &result, None);
        if let Some((client_id, calculation_id)) = saved {
            out.push_str(&format!(
                "\nСохранено: клиент {client_id}, расчет {calculation_id}\n"
            ));
        }
        Ok(out)
    }

    fn client_add(&self, args: &Args) -> Result<String, CliError> {
        let input = build_input(
            args.required("name")?,
            args.required("date")?,
            args.value("gender"),
            self.today,
        )?;
        let mut new = NewClient::from_input(&input);
        new.phone = args.value("phone").map(str::to_string);
        new.email = args.value("email").map(str::to_string);
        new.notes = args.value("notes").map(str::to_string);
        new.external_ref = args.value("ref").map(str::to_string);

        let client = self.ledger.create_client(new)?;
        if args.switch("json") {
            return envelope(&client);
        }
        Ok(report::render_client(&client, 0))
    }

    fn client_list(&self, args: &Args) -> Result<String, CliError> {
        let skip = args.parsed_or("skip", 0usize)?;
        let limit = args.parsed_or("limit", DEFAULT_LIST_LIMIT)?;
        let clients = self.ledger.list_clients(skip, limit)?;
        if args.switch("json") {
            return envelope(&clients);
        }
        let mut out = String::new();
        for client in &clients {
            out.push_str(&report::render_client_line(client));
            out.push('\n');
        }
        if clients.is_empty() {
            out.push_str("Клиентов нет\n");
        }
        Ok(out)
    }

    fn load_client(&self, id: &str) -> Result<Client, CliError> {
        self.ledger
            .get_client(id)?
            .ok_or_else(|| LedgerError::ClientNotFound(id.to_string()).into())
    }

    fn client_show(&self, id: &str) -> Result<String, CliError> {
        let client = self.load_client(id)?;
        let count = self.ledger.count_calculations(&client.id)?;
        Ok(report::render_client(&client, count))
    }

    fn client_calculate(&self, id: &str, as_json: bool) -> Result<String, CliError> {
        let client = self.load_client(id)?;
        let input = client.input();
        let result = self.calculator.calculate(&input);
        let row = self.ledger.record_calculation(&client.id, &result, None)?;
        tracing::info!(
            client_id = %client.id,
            calculation_id = %row.id,
            "recalculated stored client"
        );
        if as_json {
            return envelope(&row);
        }
        Ok(self.writer().render(&input, &result, None))
    }

    fn history(&self, id: &str, as_json: bool) -> Result<String, CliError> {
        let client = self.load_client(id)?;
        let rows = self
            .ledger
            .recent_calculations(&client.id, self.config.history_limit)?;
        if as_json {
            return envelope(&rows);
        }
        let mut out = format!("{} ({})\n", client.name, client.birth_date.format("%d.%m.%Y"));
        out.push_str(&report::render_history(&rows));
        Ok(out)
    }

    fn feedback(&self, args: &Args) -> Result<String, CliError> {
        args.required("rating")?;
        let rating: u8 = args.parsed_or("rating", 0)?;
        let row = self.ledger.record_feedback(
            args.value("client"),
            args.value("calculation"),
            rating,
            args.value("comment"),
        )?;
        if args.switch("json") {
            return envelope(&row);
        }
        Ok(format!("Спасибо за отзыв! ({}/5)\n", row.rating))
    }
}
