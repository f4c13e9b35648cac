//! Fallback command - print the synthetic offline response

use crate::agent::fallback;
use crate::cli::args::FallbackArgs;
use crate::error::HarborResult;
use crate::fetch::Destination;

/// Execute the fallback command
pub async fn execute(args: FallbackArgs) -> HarborResult<()> {
    let response = fallback(Destination::from_label(&args.destination));

    if !args.body_only {
        println!("HTTP {}", response.status());
        for (name, value) in response.headers() {
            println!("{}: {}", name, value);
        }
        println!();
    }
    println!("{}", response.text());

    Ok(())
}
