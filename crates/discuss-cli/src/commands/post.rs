//! Post command
//!
//! Create a root comment on an object, or a reply under a parent.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use super::{output, parse_comment_id, StoreContext};
use discuss_core::store::NewComment;
use discuss_core::types::{ObjectId, UserId};

/// Arguments for the post command
#[derive(Debug, Args)]
pub struct PostArgs {
    /// Comment content
    pub content: String,

    /// Author of the comment
    #[arg(short, long)]
    pub author: String,

    /// Object to comment on (root comments)
    #[arg(short, long, conflicts_with = "parent")]
    pub object: Option<String>,

    /// Parent comment to reply to
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Output the created comment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the post command
pub fn execute(ctx: &StoreContext, args: PostArgs) -> Result<()> {
    let author = UserId::from_string(args.author);

    let new = match (&args.object, &args.parent) {
        (_, Some(parent)) => NewComment::reply(parse_comment_id(parent)?, author, args.content),
        (Some(object), None) => NewComment::root(
            ctx.tenant.clone(),
            ObjectId::from_string(object.clone()),
            author,
            args.content,
        ),
        (None, None) => bail!("Either --object or --parent is required"),
    };

    let comment = ctx.store.create(new)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    let kind = if comment.is_root() { "comment" } else { "reply" };
    println!(
        "{} Posted {} {} in {}",
        "✓".green(),
        kind,
        comment.id.to_string().green(),
        comment.scope().to_string().dimmed()
    );
    output::print_comment_line(&comment);

    Ok(())
}
