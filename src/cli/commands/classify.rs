//! Classify command - show how a request would be routed

use crate::agent::Route;
use crate::cli::args::ClassifyArgs;
use crate::config::Config;
use crate::error::HarborResult;
use crate::fetch::{Destination, Request};
use console::style;

/// Execute the classify command
pub async fn execute(args: ClassifyArgs, config: &Config) -> HarborResult<()> {
    let settings = config.agent_settings()?;

    let mut request = Request::parse(&args.url)?.with_method(&args.method);
    if let Some(label) = args.destination.as_deref() {
        request = request.with_destination(Destination::from_label(label));
    }

    let route = settings.classifier.classify(&request);
    let partition = match route {
        Route::Skip => None,
        Route::CacheFirst => Some(settings.versions.static_name()),
        Route::NetworkFirst => Some(settings.versions.dynamic_name()),
    };

    let route_display = match route {
        Route::Skip => style(route.to_string()).dim(),
        Route::CacheFirst => style(route.to_string()).green(),
        Route::NetworkFirst => style(route.to_string()).cyan(),
    };

    println!("{}", route_display);
    println!("  request      {}", request);
    println!("  destination  {}", request.effective_destination());
    println!("  key          {}", request.key());
    if let Some(name) = partition {
        println!("  partition    {}", name);
    }

    Ok(())
}
