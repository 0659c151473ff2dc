use std::io::{self, Read};
use std::path::Path;

use notekeep_core::ImportReport;

use crate::commands::common::AppContext;
use crate::error::CliError;

pub async fn run_import(input: &Path, ctx: &AppContext) -> Result<(), CliError> {
    let payload = read_import_payload(input)?;
    let report = import_payload(&payload, ctx).await?;

    let noun = if report.imported == 1 { "note" } else { "notes" };
    println!("Imported {} {noun}", report.imported);
    Ok(())
}

pub async fn import_payload(payload: &str, ctx: &AppContext) -> Result<ImportReport, CliError> {
    ctx.service
        .import_notes(payload)
        .await?
        .ok_or(CliError::MalformedImport)
}

fn read_import_payload(input: &Path) -> Result<String, CliError> {
    if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}
