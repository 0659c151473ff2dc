use notekeep_core::models::validate_note_text;
use notekeep_core::util::parse_tag_list;
use notekeep_core::{Note, NotePatch};

use crate::cli::EditArgs;
use crate::commands::common::{
    edit_in_editor, normalize_color, normalize_due_date, normalize_title, resolve_note, AppContext,
};
use crate::error::CliError;

pub async fn run_edit(args: &EditArgs, ctx: &AppContext) -> Result<(), CliError> {
    let note = resolve_note(&args.id, &ctx.service).await?;
    let mut patch = build_patch(args)?;

    if patch.is_empty() {
        let Some(edited_content) = edit_in_editor(&note.content)? else {
            return Err(CliError::EmptyEditedContent);
        };

        if edited_content == note.content {
            println!("{}", note.id);
            return Ok(());
        }
        patch = patch.content(edited_content);
    }

    let updated = apply_patch(&note, patch, ctx).await?;
    println!("{}", updated.id);
    Ok(())
}

/// Translate edit flags into a patch; flags left off stay `None`.
pub fn build_patch(args: &EditArgs) -> Result<NotePatch, CliError> {
    let mut patch = NotePatch::default();

    if let Some(title) = args.title.as_deref() {
        patch = patch.title(normalize_title(title)?);
    }
    if let Some(content) = args.content.as_deref() {
        let content = content.trim();
        if content.is_empty() {
            return Err(CliError::EmptyEditedContent);
        }
        patch = patch.content(content);
    }
    if let Some(tags) = args.tags.as_deref() {
        patch = patch.tags(parse_tag_list(tags));
    }
    if let Some(category) = args.category.as_deref() {
        patch = patch.category(Some(category.to_string()));
    }
    if let Some(color) = args.color.as_deref() {
        patch = patch.color(normalize_color(color)?);
    }
    if let Some(due) = args.due.as_deref() {
        patch = patch.due_date(Some(normalize_due_date(due)?));
    } else if args.clear_due {
        patch = patch.due_date(None);
    }

    Ok(patch)
}

pub async fn apply_patch(note: &Note, patch: NotePatch, ctx: &AppContext) -> Result<Note, CliError> {
    validate_note_text(
        patch.title.as_deref().unwrap_or(&note.title),
        patch.content.as_deref().unwrap_or(&note.content),
    )?;

    ctx.service
        .update_note(&note.id, patch)
        .await?
        .ok_or_else(|| CliError::NoteNotFound(note.id.to_string()))
}
