// Final message assembly

/// Placed between a user-supplied prefix and the generated message
pub const PREFIX_SEPARATOR: char = '\t';

/// Combine the optional prefix with the generated message.
pub fn assemble(generated: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        generated.to_string()
    } else {
        format!("{}{}{}", prefix, PREFIX_SEPARATOR, generated)
    }
}

/// Join invocation arguments into the prefix
pub fn prefix_from_args(args: &[String]) -> String {
    args.join(" ")
}
