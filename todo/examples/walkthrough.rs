//! Command-line walkthrough of the todo app.
//!
//! Runs the app against an in-memory browser history and prints every frame
//! the renderer receives. Pass a starting URL as the first argument, e.g.
//! `cargo run --example walkthrough -- '/?filter=done&page=2'`; the default
//! is `/`.

use std::sync::Arc;
use todo::{Filter, ListView, TodoApp, TodoConfig, TodoEnvironment, UuidIds};
use todosync_core::environment::SystemClock;
use todosync_testing::MemoryLocation;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_view(view: &ListView) {
    let selector: Vec<String> = view
        .options
        .iter()
        .map(|option| {
            if option.selected {
                format!("[{}]", option.filter.label())
            } else {
                format!(" {} ", option.filter.label())
            }
        })
        .collect();
    println!("  {}", selector.join(" "));

    if let Some(message) = &view.empty_message {
        println!("  {message}");
    }
    for todo in &view.items {
        let status = if todo.done { "✓" } else { " " };
        println!("  [{status}] {}  ({})", todo.text, todo.creation_date);
    }
    println!("  {} of {} left", view.remaining, view.total);
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=debug,todosync_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Todo app with URL search params ===\n");

    let start = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let location = MemoryLocation::new(start);

    let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(UuidIds));
    let mut app = TodoApp::new(env, location.clone(), TodoConfig::default());
    app.on_render(|view| {
        println!("\n--- render ---");
        print_view(view);
    });

    let filter = app.activate()?;
    println!("Initial filter: {filter}, URL: {}", location.href());

    println!("\n>>> add \"Buy milk\", add \"Walk dog\"");
    let milk = app.add("Buy milk")?;
    app.add("Walk dog")?;

    println!("\n>>> toggle \"Buy milk\"");
    app.toggle(&milk.id)?;

    println!("\n>>> add \"\" (rejected)");
    if let Err(error) = app.add("") {
        println!("Rejected: {error}");
    }

    for filter in [Filter::Done, Filter::NotDone] {
        println!("\n>>> filter {filter}");
        app.set_filter(filter)?;
        println!("URL: {}", location.href());
    }

    println!("\n>>> follow a link to /?filter=all");
    location.navigate("/?filter=all");
    app.refresh()?;

    println!("\n>>> browser back");
    if location.back() {
        app.refresh()?;
        println!("Filter after back: {}, URL: {}", app.filter(), location.href());
    }

    println!("\n>>> remove \"Buy milk\"");
    app.remove(&milk.id)?;
    if let Err(error) = app.remove(&milk.id) {
        println!("Second remove: {error}");
    }

    println!("\nFinal URL: {}", location.href());
    println!("\n=== Demo Complete ===");
    Ok(())
}
