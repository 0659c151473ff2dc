use notekeep_core::search::{collect_categories, collect_tags};

use crate::commands::common::AppContext;
use crate::error::CliError;

pub async fn run_categories(ctx: &AppContext) -> Result<(), CliError> {
    let notes = ctx.service.try_list_notes().await?;
    for category in collect_categories(&notes) {
        println!("{category}");
    }
    Ok(())
}

pub async fn run_tags(ctx: &AppContext) -> Result<(), CliError> {
    let notes = ctx.service.try_list_notes().await?;
    for tag in collect_tags(&notes) {
        println!("{tag}");
    }
    Ok(())
}
