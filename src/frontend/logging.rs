use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset. Covers the library and the `paypal` binary.
pub const DEFAULT_FILTER: &str = "paypal_payments=info,paypal=info";

pub fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber: formatted events on stderr plus span traces for eyre
/// reports.
pub fn install() {
    let fmt_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter())
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};

    use super::*;
    use crate::frontend::cli::{Cli, Commands};

    /// Collects the target and level of every event that passes the filter.
    #[derive(Clone, Default)]
    struct Events(Arc<Mutex<Vec<(String, Level)>>>);

    impl<S: Subscriber> Layer<S> for Events {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            self.0
                .lock()
                .unwrap()
                .push((meta.target().to_owned(), *meta.level()));
        }
    }

    impl Events {
        fn capture(&self, f: impl FnOnce()) {
            let subscriber = tracing_subscriber::registry()
                .with(EnvFilter::new(DEFAULT_FILTER))
                .with(self.clone());
            tracing::subscriber::with_default(subscriber, f);
        }

        fn take(&self) -> Vec<(String, Level)> {
            std::mem::take(&mut self.0.lock().unwrap())
        }
    }

    #[test]
    fn binary_events_pass_default_filter() {
        let events = Events::default();
        events.capture(|| {
            tracing::info!(target: "paypal", "decoded payload");
            tracing::warn!(target: "paypal", "unknown currency");
            tracing::debug!(target: "paypal", "too verbose");
            tracing::info!(target: "hyper", "not ours");
        });

        assert_eq!(
            vec![
                ("paypal".to_owned(), Level::INFO),
                ("paypal".to_owned(), Level::WARN),
            ],
            events.take()
        );
    }

    #[test]
    fn unknown_currency_warns() -> color_eyre::eyre::Result<()> {
        let refund = |currency: &str| -> color_eyre::eyre::Result<_> {
            let cli = Cli::try_parse_from([
                "paypal",
                "refund-body",
                "--total",
                "2.34",
                "--currency",
                currency,
            ])?;
            let Commands::RefundBody(args) = cli.command else {
                panic!("expected refund-body command");
            };
            Ok(args)
        };
        let events = Events::default();

        let args = refund("XYZ")?;
        events.capture(|| assert_eq!("XYZ", args.to_params().amount.currency));
        let warnings = events.take();
        assert_eq!(1, warnings.len());
        assert_eq!(Level::WARN, warnings[0].1);

        let args = refund("USD")?;
        events.capture(|| assert_eq!("USD", args.to_params().amount.currency));
        assert!(events.take().is_empty());
        Ok(())
    }
}
