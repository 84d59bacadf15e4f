//! Flag and unflag commands
//!
//! One active flag per user per comment, independent of reactions.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{parse_comment_id, StoreContext};
use discuss_core::types::UserId;

/// Arguments for the flag command
#[derive(Debug, Args)]
pub struct FlagArgs {
    /// Comment ID
    pub id: String,

    /// Flagging user
    #[arg(short, long)]
    pub user: String,

    /// Flag kind
    #[arg(short, long)]
    pub kind: String,

    /// Output the comment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the unflag command
#[derive(Debug, Args)]
pub struct UnflagArgs {
    /// Comment ID
    pub id: String,

    /// Flagging user
    #[arg(short, long)]
    pub user: String,

    /// Output the comment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the flag command
pub fn execute_add(ctx: &StoreContext, args: FlagArgs) -> Result<()> {
    let id = parse_comment_id(&args.id)?;
    let user = UserId::from_string(args.user);

    let comment = ctx.store.add_flag(&id, &user, &args.kind)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!(
        "{} Flagged comment {} as {} ({} now)",
        "⚠".yellow(),
        args.id.green(),
        args.kind.red(),
        comment.flag_count(&args.kind)
    );
    Ok(())
}

/// Execute the unflag command
pub fn execute_remove(ctx: &StoreContext, args: UnflagArgs) -> Result<()> {
    let id = parse_comment_id(&args.id)?;
    let user = UserId::from_string(args.user);

    let comment = ctx.store.remove_flag(&id, &user)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!(
        "{} Flag removed from comment {}",
        "✓".green(),
        args.id.green()
    );
    Ok(())
}
