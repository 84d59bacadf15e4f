//! Shared terminal output helpers

use colored::Colorize;
use discuss_core::store::Comment;

/// Print a comment as a single list line
pub fn print_comment_line(comment: &Comment) {
    let age = chrono::Utc::now()
        .signed_duration_since(comment.created_at)
        .num_hours();
    let age_str = if age < 1 {
        "just now".to_string()
    } else if age < 24 {
        format!("{}h ago", age)
    } else {
        format!("{}d ago", age / 24)
    };

    let mut counters = Vec::new();
    if comment.children_count > 0 {
        counters.push(format!("{} replies", comment.children_count));
    }
    let reactions = comment.total_reactions();
    if reactions > 0 {
        counters.push(format!("{} reactions", reactions));
    }
    let counters = if counters.is_empty() {
        String::new()
    } else {
        format!(" [{}]", counters.join(", "))
    };

    println!(
        "  {} {} {}{} ({})",
        comment.id.to_string().green(),
        comment.author.to_string().cyan(),
        snippet(&comment.content, 60),
        counters.yellow(),
        age_str.dimmed()
    );
}

/// Print a comment in full detail
pub fn print_comment_details(comment: &Comment) {
    println!("{}", "Comment".bold().underline());
    println!();
    println!("  ID: {}", comment.id.to_string().green());
    println!("  Author: {}", comment.author.to_string().cyan());
    println!("  Scope: {}", comment.scope().to_string().dimmed());
    if let Some(parent) = &comment.parent {
        println!("  Parent: {}", parent.to_string().dimmed());
    }
    println!(
        "  Created: {}",
        comment.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Updated: {}",
        comment.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Replies: {}", comment.children_count.to_string().cyan());
    println!(
        "  Thread size: {}",
        comment.descendant_count.to_string().cyan()
    );

    if !comment.reactions.is_empty() {
        let summary: Vec<String> = comment
            .reactions
            .iter()
            .map(|(kind, count)| format!("{} {}", kind, count))
            .collect();
        println!("  Reactions: {}", summary.join(", ").yellow());
    }
    if !comment.flags.is_empty() {
        let summary: Vec<String> = comment
            .flags
            .iter()
            .map(|(kind, count)| format!("{} {}", kind, count))
            .collect();
        println!("  Flags: {}", summary.join(", ").red());
    }

    println!();
    println!("{}", comment.content);
}

/// First line of the content, shortened for list output
fn snippet(content: &str, max: usize) -> String {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() <= max {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max).collect();
        format!("{}…", cut)
    }
}
