use notekeep_core::models::validate_note_text;
use notekeep_core::util::parse_tag_list;
use notekeep_core::{Note, NoteDraft};

use crate::cli::AddArgs;
use crate::commands::common::{
    normalize_color, normalize_due_date, normalize_title, resolve_note_content, AppContext,
};
use crate::error::CliError;

pub async fn run_add(args: &AddArgs, ctx: &AppContext) -> Result<(), CliError> {
    let content = resolve_note_content(&args.content)?;
    let note = add_note(args, content, ctx).await?;

    println!("{}", note.id);
    Ok(())
}

pub async fn add_note(args: &AddArgs, content: String, ctx: &AppContext) -> Result<Note, CliError> {
    let title = normalize_title(&args.title)?;
    validate_note_text(&title, &content)?;

    let color = match args.color.as_deref() {
        Some(color) => normalize_color(color)?,
        None => ctx.default_color.clone(),
    };

    let mut draft = NoteDraft::new(title, content)
        .with_color(color)
        .pinned(args.pin)
        .archived(args.archive);

    if let Some(tags) = args.tags.as_deref() {
        draft = draft.with_tags(parse_tag_list(tags));
    }
    if let Some(category) = args.category.as_deref() {
        draft = draft.with_category(category);
    }
    if let Some(due) = args.due.as_deref() {
        draft = draft.with_due_date(normalize_due_date(due)?);
    }

    Ok(ctx.service.create_note(draft).await?)
}
