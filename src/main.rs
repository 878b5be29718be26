// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use emberplus_provider::backends::{ChannelClient, ChannelDispatcher};
use emberplus_provider::config::load_and_validate_config;
use emberplus_provider::glow::{Command, Invocation};
use emberplus_provider::model::{ConnectOperation, TupleItem, Value};
use emberplus_provider::traits::from_fn;
use emberplus_provider::Provider;

const DEFAULT_CONFIG: &str = "configs/demo-provider.yaml";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = load_and_validate_config(&config_path)
        .with_context(|| format!("loading provider tree from {}", config_path))?;

    let (dispatcher, mut notifications) = ChannelDispatcher::new();
    let (client, mut responses) = ChannelClient::new();
    let mut provider = Provider::from_config(&cfg, Arc::new(dispatcher))?;

    // Functions are code, so they are attached after the declarative tree.
    let functions_slot = provider.root().next_free_slot();
    provider
        .root_mut()
        .add_sub_node(functions_slot, "functions")?
        .add_function(
            1,
            "add",
            vec![TupleItem::integer("a"), TupleItem::integer("b")],
            vec![TupleItem::integer("sum")],
            from_fn(|args: Vec<Value>| async move {
                let sum = args
                    .iter()
                    .filter_map(|v| match v {
                        Value::Integer(i) => Some(*i),
                        _ => None,
                    })
                    .sum::<i64>();
                vec![Value::Integer(sum)]
            }),
        )?;

    println!("🌳 Provider tree '{}'", cfg.name.as_deref().unwrap_or("provider"));
    println!("═══════════════════════════════════");
    provider.handle_command(&[], Command::GetDirectory, &client);
    while let Ok(document) = responses.try_recv() {
        println!("{}", document.to_json()?);
    }

    println!("\n🔀 Simulated peer requests");
    println!("═══════════════════════════════════");
    let requests = [
        ("desk/gain = -12", provider.set_parameter(&[2, 2], &Value::Integer(-12), &client)),
        ("desk/gain = 40 (out of range)", provider.set_parameter(&[2, 2], &Value::Integer(40), &client)),
        ("router: Out 1 <- Mic 2", provider.connect(&[3, 2], 0, &[1], ConnectOperation::Connect)),
        ("monitors: Studio <- Cue", provider.connect(&[4, 2], 1, &[3], ConnectOperation::ConnectAbsolute)),
        (
            "mixer: Bus A / Ch 2 gain = -6",
            provider.set_parameter(&[5, 2, 0, 3, 0, 1, 1], &Value::Real(-6.0), &client),
        ),
    ];
    for (label, accepted) in requests {
        println!("{} {}", if accepted { "✅" } else { "❌" }, label);
    }

    let invocation = provider
        .invoke_with_reply(
            &[functions_slot, 1],
            Some(Invocation::new(Some(1), Some(vec![Value::Integer(2), Value::Integer(40)]))),
            Arc::new(client.clone()),
        )
        .context("add function is not registered")?;
    tokio::spawn(invocation).await??;
    println!("\n⚙️  functions/add(2, 40)");
    while let Ok(document) = responses.try_recv() {
        println!("{}", document.to_json()?);
    }

    println!("\n📣 Notifications");
    println!("═══════════════════════════════════");
    while let Ok(notification) = notifications.try_recv() {
        println!("{}", serde_json::to_string(&notification)?);
    }

    Ok(())
}
