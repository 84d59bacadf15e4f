//! Show command
//!
//! Print one comment in detail, with its ancestor chain.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{output, parse_comment_id, StoreContext};

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Comment ID
    pub id: String,

    /// Include comments by blocked users
    #[arg(long)]
    pub include_blocked: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the show command
pub fn execute(ctx: &StoreContext, args: ShowArgs) -> Result<()> {
    let id = parse_comment_id(&args.id)?;
    let comment = ctx.store.get(&id, args.include_blocked)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    output::print_comment_details(&comment);

    let ancestors = ctx.store.ancestor_chain(&id)?;
    if !ancestors.is_empty() {
        println!();
        println!("{}", "Thread".bold());
        for (depth, ancestor) in ancestors.iter().enumerate() {
            println!(
                "  {}{} {}",
                "  ".repeat(depth),
                ancestor.id.to_string().dimmed(),
                output_snippet(&ancestor.content)
            );
        }
        println!(
            "  {}{} {}",
            "  ".repeat(ancestors.len()),
            comment.id.to_string().green(),
            output_snippet(&comment.content)
        );
    }

    Ok(())
}

fn output_snippet(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() <= 40 {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(40).collect();
        format!("{}…", cut)
    }
}
