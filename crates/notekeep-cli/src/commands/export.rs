use std::path::{Path, PathBuf};

use chrono::Utc;
use notekeep_core::export::{self, render_notes_export, suggested_export_file_name};

use crate::cli::ExportFormat;
use crate::commands::common::AppContext;
use crate::error::CliError;

impl From<ExportFormat> for export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

pub async fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    ctx: &AppContext,
) -> Result<(), CliError> {
    let rendered = render_export(format, ctx).await?;

    if let Some(path) = output_path {
        let path = resolve_output_path(path, format);
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// JSON goes through the store's own export so it round-trips through import.
pub async fn render_export(format: ExportFormat, ctx: &AppContext) -> Result<String, CliError> {
    match format {
        ExportFormat::Json => Ok(ctx.service.export_notes().await?),
        ExportFormat::Markdown => {
            let notes = ctx.service.try_list_notes().await?;
            Ok(render_notes_export(&notes, format.into())?)
        }
    }
}

/// Directories get a timestamped file name inside them.
pub fn resolve_output_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(
            format.into(),
            Utc::now().timestamp_millis(),
        ))
    } else {
        path.to_path_buf()
    }
}
