pub mod import;
pub mod product;

/// Result type shared by all commands
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
