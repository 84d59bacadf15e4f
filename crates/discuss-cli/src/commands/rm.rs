//! Rm command
//!
//! Delete a comment together with its whole subtree.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{parse_comment_id, StoreContext};
use discuss_core::types::UserId;

/// Arguments for the rm command
#[derive(Debug, Args)]
pub struct RmArgs {
    /// Comment ID
    pub id: String,

    /// Requesting user (must be the author)
    #[arg(short, long)]
    pub author: String,
}

/// Execute the rm command
pub fn execute(ctx: &StoreContext, args: RmArgs) -> Result<()> {
    let id = parse_comment_id(&args.id)?;
    let author = UserId::from_string(args.author);

    let removed = ctx.store.delete(&id, &author)?;
    let replies = removed.len().saturating_sub(1);

    if replies > 0 {
        println!(
            "{} Deleted comment {} and {} replies",
            "✓".green(),
            args.id.green(),
            replies.to_string().yellow()
        );
    } else {
        println!("{} Deleted comment {}", "✓".green(), args.id.green());
    }

    Ok(())
}
