//! Welcome banner display for the chat loop.

use console::style;

/// Print the welcome banner when the chat loop starts.
///
/// `bridge` is `None` in demo mode.
pub fn print_welcome_banner(bridge: Option<&str>, conversations: usize, current: Option<&str>) {
    println!();
    println!("  {} {}", style("💬").bold(), style("ChatHub").cyan().bold());
    println!(
        "  {}",
        style("Plusieurs bots, plusieurs conversations, un seul terminal").dim()
    );
    println!();
    let mode = match bridge {
        Some(name) => style(name.to_string()).green(),
        None => style("démo (réponses simulées)".to_string()).yellow(),
    };
    println!("  {}  {}", style("Passerelle :").bold(), mode);
    println!(
        "  {}  {}",
        style("Conversations :").bold(),
        style(conversations).dim()
    );
    if let Some(name) = current {
        println!("  {}  {}", style("Active :").bold(), style(name).cyan());
    }
    println!();
    println!(
        "  {}",
        style("Tapez /help pour les commandes, Ctrl+D pour quitter").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
