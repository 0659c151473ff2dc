use notekeep_core::Note;

use crate::commands::common::{resolve_note, AppContext};
use crate::error::CliError;

pub async fn run_pin(id: &str, ctx: &AppContext) -> Result<(), CliError> {
    let note = resolve_note(id, &ctx.service).await?;
    let updated = ctx
        .service
        .toggle_pinned(&note.id)
        .await?
        .ok_or_else(|| CliError::NoteNotFound(note.id.to_string()))?;

    let state = if updated.pinned { "pinned" } else { "unpinned" };
    println!("{} {state}", updated.id);
    Ok(())
}

pub async fn run_archive(id: &str, ctx: &AppContext) -> Result<(), CliError> {
    let note = resolve_note(id, &ctx.service).await?;
    let updated = ctx
        .service
        .toggle_archived(&note.id)
        .await?
        .ok_or_else(|| CliError::NoteNotFound(note.id.to_string()))?;

    let state = if updated.archived {
        "archived"
    } else {
        "restored"
    };
    println!("{} {state}", updated.id);
    Ok(())
}

pub async fn run_duplicate(id: &str, ctx: &AppContext) -> Result<(), CliError> {
    let copy = duplicate_note(id, ctx).await?;
    println!("{}", copy.id);
    Ok(())
}

pub async fn duplicate_note(id: &str, ctx: &AppContext) -> Result<Note, CliError> {
    let note = resolve_note(id, &ctx.service).await?;
    ctx.service
        .duplicate_note(&note.id)
        .await?
        .ok_or_else(|| CliError::NoteNotFound(note.id.to_string()))
}
