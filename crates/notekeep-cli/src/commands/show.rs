use crate::commands::common::{format_note_details, note_to_list_item, resolve_note, AppContext};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, ctx: &AppContext) -> Result<(), CliError> {
    let note = resolve_note(id, &ctx.service).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&note_to_list_item(&note))?);
    } else {
        println!("{}", format_note_details(&note));
    }
    Ok(())
}
