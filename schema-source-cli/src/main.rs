// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: CLI tools are expected to print to stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

use schema_source_cli::cli::{self, Reported};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = cli::run().await {
        // Source failures were already rendered by the console reporter.
        if !e.is::<Reported>() {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
