//! Terminal output helpers.

/// Prints a success line.
pub fn print_success(message: &str) {
    println!("✓ {message}");
}

/// Prints an error line to stderr.
pub fn print_error(message: &str) {
    eprintln!("✗ {message}");
}

/// Prints an aligned `key: value` line.
pub fn print_field(key: &str, value: impl std::fmt::Display) {
    println!("  {key:<22} {value}");
}
