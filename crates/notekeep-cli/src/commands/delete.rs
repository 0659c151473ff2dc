use crate::commands::common::{resolve_note, AppContext};
use crate::error::CliError;

pub async fn run_delete(id: &str, ctx: &AppContext) -> Result<(), CliError> {
    let note = resolve_note(id, &ctx.service).await?;

    if !ctx.service.delete_note(&note.id).await? {
        return Err(CliError::NoteNotFound(note.id.to_string()));
    }
    println!("{}", note.id);
    Ok(())
}
