//! Edit command
//!
//! Replace a comment's content. Only the original author may edit.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{output, parse_comment_id, StoreContext};
use discuss_core::types::UserId;

/// Arguments for the edit command
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Comment ID
    pub id: String,

    /// New content
    pub content: String,

    /// Requesting user (must be the author)
    #[arg(short, long)]
    pub author: String,

    /// Output the updated comment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the edit command
pub fn execute(ctx: &StoreContext, args: EditArgs) -> Result<()> {
    let id = parse_comment_id(&args.id)?;
    let author = UserId::from_string(args.author);

    let comment = ctx.store.update(&id, &args.content, &author)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!("{} Updated comment {}", "✓".green(), args.id.green());
    output::print_comment_line(&comment);

    Ok(())
}
