use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wikiwarden")]
#[command(version)]
#[command(about = "An MCP server for wiki editing with content governance")]
#[command(long_about = "
wikiwarden is an MCP (Model Context Protocol) server that exposes wiki page
editing tools and flags newly introduced factual claims as proposed pending
human review.

Example usage:
  wikiwarden serve      # Run as MCP server over stdio
  wikiwarden doctor     # Check configuration and wiki connectivity
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server (default when invoked via stdio)
    #[command(long_about = "
Runs wikiwarden as an MCP server over stdio. The server will:

- Expose page_get, page_create, and page_update tools
- Rewrite submitted content so new claims carry the {{Proposed}} marker
- Append a review note to every successful non-exempt edit

Configure the wiki endpoint with WIKIWARDEN_API_URL and optional bot
credentials with WIKIWARDEN_USERNAME / WIKIWARDEN_BOT_PASSWORD.

Example:
  wikiwarden serve
  # Or configure in your MCP client's server settings
")]
    Serve,
    /// Diagnose configuration and connectivity issues
    #[command(long_about = "
Runs diagnostics to help troubleshoot setup issues. The doctor command will
check:

- That the configured API endpoint parses as a URL
- That bot credentials are either absent or complete
- Whether the wiki's action API answers a siteinfo query
")]
    Doctor,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_subcommand_parses() {
        let cli = Cli::try_parse_from(["wikiwarden", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from(["wikiwarden", "--quiet", "doctor"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Doctor)));
    }
}
