// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Init, Resolve, Transfer};

command_enum! {
    (Transfer, Transfer),
    (Resolve, Resolve),
    (Init, Init),
}

// store calls are strictly sequential
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let code = run(args).await;
    std::process::exit(code);
}

async fn run(args: Args) -> i32 {
    // dropped on return, flushing buffered log lines before exit
    let _guard = reown::logging::init_logging(args.log_level);

    let ctx = match cli::op::OpContext::new(args.config_path, args.api_url, args.access_token) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to load configuration: {}", e);
            return 1;
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
