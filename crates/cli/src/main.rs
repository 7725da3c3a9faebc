//! `check` binary for the GitHub pull-request resource.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Wire observability**: `tracing-subscriber` on stderr, text or JSON.
//! 2. **Read the request**: one `{source, version}` JSON document from stdin.
//! 3. **Validate** the source before any network access.
//! 4. **Construct infrastructure**: a [`github::GithubClient`] for the repository.
//! 5. **Run the check** and write the JSON array of versions to stdout.
//!
//! Any failure is printed to stderr and the process exits non-zero without
//! writing anything to stdout.

mod telemetry;

use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use github::GithubClient;
use resource::{check, CheckRequest, CheckResponse};
use tracing::Level;

fn read_request(reader: impl Read) -> Result<CheckRequest> {
    serde_json::from_reader(reader).context("failed to parse check request")
}

fn write_response(mut writer: impl Write, response: &CheckResponse) -> Result<()> {
    serde_json::to_writer(&mut writer, response).context("failed to encode response")?;
    writeln!(writer).context("failed to write response")?;
    writer.flush().context("failed to write response")
}

async fn run() -> Result<()> {
    let request = read_request(std::io::stdin().lock())?;
    let source = request.source.validate()?;

    let client = GithubClient::new(&source).context("failed to create GitHub client")?;
    let versions = check(&source, &request.version, &client).await?;

    write_response(std::io::stdout().lock(), &versions)
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing(telemetry::LogFormat::from_env(), Level::INFO);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
