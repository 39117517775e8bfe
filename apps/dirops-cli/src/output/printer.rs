//! Consistent, color-aware terminal output.

/// Check if color output is enabled.
fn use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message (green checkmark).
pub fn print_success(message: &str) {
    if use_color() {
        println!("\x1b[32m✓\x1b[0m {message}");
    } else {
        println!("OK: {message}");
    }
}

/// Print a warning message (yellow, to stderr).
pub fn print_warning(message: &str) {
    if use_color() {
        eprintln!("\x1b[33mWarning:\x1b[0m {message}");
    } else {
        eprintln!("Warning: {message}");
    }
}

/// Print a failure diagnostic (red, to stderr) without terminating.
pub fn print_failure(message: &str) {
    if use_color() {
        eprintln!("\x1b[31m✗\x1b[0m {message}");
    } else {
        eprintln!("FAILED: {message}");
    }
}

/// Print an info message (blue).
pub fn print_info(message: &str) {
    if use_color() {
        println!("\x1b[34mℹ\x1b[0m {message}");
    } else {
        println!("Info: {message}");
    }
}

/// Print a header with decorative border.
pub fn print_header(title: &str) {
    let border = "═".repeat(59);
    println!();
    println!("{border}");
    println!("{title:^59}");
    println!("{border}");
    println!();
}

/// Print a key-value pair with consistent formatting.
pub fn print_key_value(key: &str, value: &str) {
    if use_color() {
        println!("  \x1b[1m{key}:\x1b[0m {value}");
    } else {
        println!("  {key}: {value}");
    }
}
