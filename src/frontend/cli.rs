use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};

use crate::paypal::query::{to_rfc3339, PaymentListParam};

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Prints the payment list URL for the given filters.
    Query(query::Args),
    /// Decodes a payload and prints its canonical encoding.
    Decode(decode::Args),
    /// Prints the request body for refunding a sale.
    RefundBody(refund::Args),
}

pub mod query {
    use super::*;

    #[derive(clap::Args)]
    pub struct Args {
        /// Number of payments per page.
        #[arg(long)]
        pub count: Option<i64>,
        /// Cursor returned as `next_id` by the previous page.
        #[arg(long)]
        pub start_id: Option<String>,
        #[arg(long)]
        pub start_index: Option<i64>,
        /// Only list payments created since this date.
        #[arg(long)]
        pub start_time: Option<DateTime<FixedOffset>>,
        /// Only list payments created until this date.
        #[arg(long)]
        pub end_time: Option<DateTime<FixedOffset>>,
        /// Field to sort by, e.g. `create_time`.
        #[arg(long)]
        pub sort_by: Option<String>,
        /// `asc` or `desc`.
        #[arg(long)]
        pub sort_order: Option<String>,
    }

    impl Args {
        pub fn to_params(&self) -> PaymentListParam {
            PaymentListParam {
                count: self.count,
                start_id: self.start_id.clone(),
                start_index: self.start_index,
                start_time: self.start_time.map(to_rfc3339),
                end_time: self.end_time.map(to_rfc3339),
                sort_by: self.sort_by.clone(),
                sort_order: self.sort_order.clone(),
            }
        }
    }
}

pub mod decode {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
    pub enum Kind {
        Payment,
        PaymentList,
        Sale,
        Refund,
    }

    #[derive(clap::Args)]
    pub struct Args {
        /// Resource type of the payload.
        #[arg(value_enum)]
        pub kind: Kind,
        /// JSON payload path.
        #[arg(value_name = "FILE")]
        pub path: PathBuf,
    }
}

pub mod refund {
    use tracing::warn;

    use crate::paypal::types::RefundSaleParam;

    #[derive(clap::Args)]
    pub struct Args {
        /// Amount to refund, e.g. `2.34`.
        #[arg(long)]
        pub total: String,
        /// ISO 4217 currency code.
        #[arg(long)]
        pub currency: String,
        #[arg(long, default_value = "")]
        pub invoice_number: String,
    }

    impl Args {
        /// The refund body. Unknown currency codes are sent as given, with a warning.
        pub fn to_params(&self) -> RefundSaleParam {
            let params = RefundSaleParam::new(&self.total, &self.currency, &self.invoice_number);
            if iso_currency::Currency::from_code(&params.amount.currency).is_none() {
                warn!("`{}` is not a known ISO 4217 currency code", self.currency);
            }
            params
        }
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use color_eyre::eyre::Result;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn query_args() -> Result<()> {
        let cli = Cli::try_parse_from([
            "paypal",
            "query",
            "--count",
            "5",
            "--start-time",
            "2017-09-01T10:00:00+10:00",
            "--sort-order",
            "desc",
        ])?;
        let Commands::Query(args) = cli.command else {
            panic!("expected query command");
        };

        assert_eq!(
            "?count=5&sort_order=desc&start_time=2017-09-01T00%3A00%3A00Z",
            args.to_params().query_string()
        );
        Ok(())
    }

    #[test]
    fn decode_args() -> Result<()> {
        let cli = Cli::try_parse_from(["paypal", "decode", "payment-list", "list.json"])?;
        let Commands::Decode(args) = cli.command else {
            panic!("expected decode command");
        };

        assert_eq!(decode::Kind::PaymentList, args.kind);
        assert_eq!(PathBuf::from("list.json"), args.path);
        Ok(())
    }

    #[test]
    fn refund_args_require_amount() {
        assert!(Cli::try_parse_from(["paypal", "refund-body", "--total", "1.00"]).is_err());
    }
}
