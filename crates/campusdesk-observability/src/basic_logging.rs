use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Console-only subscriber, used by the CLI and whenever observability is off.
///
/// `RUST_LOG` takes precedence over `LOG_LEVEL` (default `info`). Dependency
/// noise is capped at warn.
pub fn init_basic_console_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let ours = ["campusdesk", "campusdesk_core", "campusdesk_crypto", "campusdesk_cli"]
            .map(|krate| format!("{krate}={level}"))
            .join(",");
        EnvFilter::new(format!("{ours},tower_http=warn,hyper=warn,sqlx=warn"))
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter),
        )
        .try_init()?;
    Ok(())
}
