//! Hierarchical configuration example
//!
//! Demonstrates how loggers inherit switch levels and listeners from their
//! nearest configured ancestor, and fall back to the `Default` source.
//!
//! Run with: cargo run --example hierarchy

use std::sync::Arc;
use twitch_logging::prelude::*;
use twitch_logging::{info, warn};

const CONFIG: &str = r#"{
    "listeners": {
        "console": { "type": "console", "colors": false, "timestamp": { "kind": "rfc3339" } }
    },
    "sources": {
        "TwitchLib.Api": { "switch_level": "Verbose", "listeners": ["console"] },
        "TwitchLib.Client": { "switch_level": "Warning", "listeners": ["console"] },
        "Default": { "switch_level": "Error", "listeners": ["console"] }
    }
}"#;

fn main() -> Result<()> {
    println!("=== Twitch Logging - Hierarchy Example ===\n");

    let config = DiagnosticsConfig::from_json_str(CONFIG)?;
    config.validate()?;
    let cache = Arc::new(SourceCache::new(Arc::new(config)));

    println!("1. Inherited from 'TwitchLib.Api' (Verbose):");
    let helix = TraceLogger::new(&cache, "TwitchLib.Api.Helix")?;
    helix.debug("GET /helix/users");
    info!(helix, "Fetched {} users", 3);

    println!("\n2. Inherited from 'TwitchLib.Client' (Warning):");
    let chat = TraceLogger::new(&cache, "TwitchLib.Client")?.child("Chat")?;
    chat.info("Joined channel (hidden)");
    warn!(chat, "Rate limit at {}%", 90);

    println!("\n3. Nothing configured, falls back to 'Default' (Error):");
    let pubsub = TraceLogger::new(&cache, "TwitchLib.PubSub")?;
    pubsub.warn("Reconnecting (hidden)");
    pubsub.error_with_error(
        "Listen failed",
        Arc::new(std::io::Error::other("connection reset")),
    );

    cache.flush_all();

    println!("\nResolved sources: {:?}", cache.names());
    println!("Cache hit rate: {:.2}", cache.metrics().hit_rate());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
