//! # mbx entry point

use mailbox::cmd;
use mailbox::cmd_args::CommandLineArgs;
use mailbox::logging::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CommandLineArgs::parse();

    if let Err(e) = init_tracing(args.verbose()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    cmd::run(&args).await.into()
}
