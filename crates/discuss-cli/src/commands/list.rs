//! List command
//!
//! List root comments of an object, or the children of one comment. Both
//! listings come back in creation order.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use super::{output, parse_comment_id, StoreContext};
use discuss_core::types::ObjectId;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Object whose root comments to list
    #[arg(short, long, conflicts_with = "children_of")]
    pub object: Option<String>,

    /// Comment whose direct children to list
    #[arg(long, value_name = "ID")]
    pub children_of: Option<String>,

    /// Include comments by blocked users
    #[arg(long)]
    pub include_blocked: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Limit number of comments
    #[arg(long, short, default_value = "50")]
    pub limit: usize,
}

/// Execute the list command
pub fn execute(ctx: &StoreContext, args: ListArgs) -> Result<()> {
    let comments = match (&args.object, &args.children_of) {
        (_, Some(parent)) => {
            let id = parse_comment_id(parent)?;
            ctx.store.list_children(&id, args.include_blocked)?
        }
        (Some(object), None) => ctx.store.list_roots(
            &ctx.tenant,
            &ObjectId::from_string(object.clone()),
            args.include_blocked,
        )?,
        (None, None) => bail!("Either --object or --children-of is required"),
    };

    if args.json {
        let limited: Vec<_> = comments.iter().take(args.limit).collect();
        println!("{}", serde_json::to_string_pretty(&limited)?);
        return Ok(());
    }

    if comments.is_empty() {
        println!("No comments found.");
        return Ok(());
    }

    println!("{}", "Comments:".bold().underline());
    println!();
    for comment in comments.iter().take(args.limit) {
        output::print_comment_line(comment);
    }

    if comments.len() > args.limit {
        println!(
            "\n  {} Showing {} of {} comments. Use --limit to show more.",
            "ℹ".blue(),
            args.limit,
            comments.len()
        );
    }

    Ok(())
}
