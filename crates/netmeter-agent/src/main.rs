//! netmeter agent
//!
//! Reads decoded Neutron notifications as JSON lines on stdin and writes the
//! resulting metering samples as JSON lines on stdout.

mod config;
mod io;

use std::sync::Arc;

use anyhow::{Context, Result};
use prometheus::Encoder;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netmeter_common::VERSION;
use netmeter_engine::{neutron_registry, DispatchMetrics, NotificationDispatcher, NotificationEngine};

use crate::config::AgentConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AgentConfig::load()?;

    // Initialize tracing; stdout carries samples, so logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting netmeter agent v{}", VERSION);

    let registry = neutron_registry().context("failed to register resource catalog")?;
    info!("Registered {} resource descriptors", registry.len());

    let engine = Arc::new(NotificationEngine::new(registry));
    for target in config.notification.targets() {
        info!(exchange = %target.exchange, topic = %target.topic, "Subscription target");
    }
    info!("Event types: {}", engine.event_types().join(", "));

    let prometheus_registry = prometheus::Registry::new();
    let metrics = Arc::new(DispatchMetrics::new()?);
    metrics.register(&prometheus_registry)?;

    let dispatcher = NotificationDispatcher::new(engine, metrics.clone());

    let (envelope_tx, envelope_rx) = mpsc::channel(config.channel_buffer);
    let (sample_tx, sample_rx) = mpsc::channel(config.channel_buffer);

    let reader = tokio::spawn(io::read_envelopes(
        tokio::io::BufReader::new(tokio::io::stdin()),
        envelope_tx,
    ));
    let dispatch = tokio::spawn(dispatcher.run(envelope_rx, sample_tx));
    let writer = tokio::spawn(io::write_samples(tokio::io::stdout(), sample_rx));

    let forwarded = reader.await??;
    dispatch.await?;
    let written = writer.await??;

    info!(
        envelopes = forwarded,
        samples = written,
        failed = metrics.envelopes_failed.get(),
        unrouted = metrics.envelopes_unrouted.get(),
        empty = metrics.envelopes_empty.get(),
        "Input exhausted, shutting down"
    );

    if config.dump_metrics {
        let mut encoded = Vec::new();
        prometheus::TextEncoder::new()
            .encode(&prometheus_registry.gather(), &mut encoded)
            .context("failed to encode metrics")?;
        eprint!("{}", String::from_utf8_lossy(&encoded));
    }

    Ok(())
}
