//! React and unreact commands
//!
//! One active reaction per user per comment; reacting with another kind
//! moves the record.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{parse_comment_id, StoreContext};
use discuss_core::types::UserId;

/// Arguments for the react command
#[derive(Debug, Args)]
pub struct ReactArgs {
    /// Comment ID
    pub id: String,

    /// Reacting user
    #[arg(short, long)]
    pub user: String,

    /// Reaction kind
    #[arg(short, long)]
    pub kind: String,

    /// Output the comment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the unreact command
#[derive(Debug, Args)]
pub struct UnreactArgs {
    /// Comment ID
    pub id: String,

    /// Reacting user
    #[arg(short, long)]
    pub user: String,

    /// Output the comment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the react command
pub fn execute_add(ctx: &StoreContext, args: ReactArgs) -> Result<()> {
    let id = parse_comment_id(&args.id)?;
    let user = UserId::from_string(args.user);

    let comment = ctx.store.add_reaction(&id, &user, &args.kind)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!(
        "{} {} on comment {} ({} now)",
        "✓".green(),
        args.kind.yellow(),
        args.id.green(),
        comment.reaction_count(&args.kind)
    );
    Ok(())
}

/// Execute the unreact command
pub fn execute_remove(ctx: &StoreContext, args: UnreactArgs) -> Result<()> {
    let id = parse_comment_id(&args.id)?;
    let user = UserId::from_string(args.user);

    let comment = ctx.store.remove_reaction(&id, &user)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    println!(
        "{} Reaction removed from comment {} ({} total)",
        "✓".green(),
        args.id.green(),
        comment.total_reactions()
    );
    Ok(())
}
