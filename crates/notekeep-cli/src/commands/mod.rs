pub mod add;
pub mod common;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod facets;
pub mod import;
pub mod list;
pub mod show;
pub mod toggle;
