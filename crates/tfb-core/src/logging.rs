use crate::Result;

/// Initialize logging/tracing for the bot process.
///
/// The parsing pipeline itself never logs; this is for the adapters around
/// it. Without the `tracing` feature this is a no-op, but the public API
/// stays stable.
pub fn init(service_name: &str) -> Result<()> {
    let _ = service_name;

    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{fmt, EnvFilter};

        // Default: info for our crates, warn for everything else.
        // Can be overridden with `RUST_LOG`.
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("info,tfb_core=info,{service_name}=info"))
        });

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(true)
            .init();
    }

    Ok(())
}
