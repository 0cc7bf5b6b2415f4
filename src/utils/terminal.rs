//! Terminal output utilities

use console::style;

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}: {}", style("success").green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{}: {}", style("info").blue().bold(), message);
}

/// Print a task header
pub fn print_step(index: usize, total: usize, message: &str) {
    println!("\n{}", "=".repeat(60));
    println!(
        "  {} {}",
        style(format!("[{}/{}]", index, total)).cyan().bold(),
        message
    );
    println!("{}", "=".repeat(60));
}

/// Print a detail line, only when verbose output is on
pub fn print_verbose(verbose: bool, message: &str) {
    if verbose {
        println!("  {}", style(message).dim());
    }
}

/// Turn off styling on both output streams
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}
