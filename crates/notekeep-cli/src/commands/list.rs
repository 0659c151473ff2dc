use notekeep_core::search::NoteFilter;

use crate::cli::ListArgs;
use crate::commands::common::{
    format_note_lines, list_notes, note_to_list_item, AppContext, NoteListItem,
};
use crate::error::CliError;

pub async fn run_list(args: &ListArgs, ctx: &AppContext) -> Result<(), CliError> {
    let notes = list_notes(&ctx.service, &list_filter(args), args.limit).await?;

    if args.json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        eprintln!("No notes.");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn list_filter(args: &ListArgs) -> NoteFilter {
    NoteFilter {
        text: args.query.clone(),
        category: args.category.clone(),
        tag: args.tag.clone(),
        show_archived: args.archived,
    }
}
