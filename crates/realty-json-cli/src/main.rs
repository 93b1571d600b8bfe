//! `realty-json` CLI — inspect, reformat and decode Realty Cloud API documents.
//!
//! ## Usage
//!
//! ```sh
//! # Dump the parsed value tree as pretty JSON (stdin → stdout)
//! echo '{"data":[{"Number":"77:01:0001001:1"}]}' | realty-json parse
//!
//! # Re-serialize a document compactly
//! realty-json format -i response.json -o compact.json
//!
//! # Decode a saved search response into records
//! realty-json search -i search.json
//!
//! # Decode an object card
//! realty-json object-info -i object.json
//!
//! # Decode product list / order creation / order status responses
//! realty-json products -i products.json
//! realty-json order-info -i order.json
//! realty-json orders-status -i status.json
//!
//! # Build an order request body
//! realty-json order --item EgrnRightList,77:01:0001001:1 --use-balance
//!
//! # Debug logging (or set RUST_LOG)
//! realty-json --verbose search -i search.json
//! ```

mod records;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use realty_json::response::{decode_data_array, decode_data_object};
use realty_json::{FromObject, Node, ParseOptions, DEFAULT_MAX_DEPTH};
use records::{
    ObjectBaseInfo, ObjectData, OrderInfo, OrderRequest, OrderRequestItem, OrderStatusInfo,
    ProductInfo,
};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "realty-json",
    version,
    about = "Parse, format and decode Realty Cloud API JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log parse and decode diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print its value tree as pretty JSON
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse a document and re-serialize it compactly
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode a search response into object records
    Search {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode an object information response
    ObjectInfo {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode a product list response
    Products {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode an order creation response
    OrderInfo {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode an order status response
    OrdersStatus {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build an order request body
    Order {
        /// Ordered product as PRODUCT,OBJECT_KEY[,COUPON] (repeatable)
        #[arg(long = "item", required = true, value_parser = parse_order_item)]
        items: Vec<OrderRequestItem>,
        /// Pay from the account balance instead of only creating a request
        #[arg(long)]
        use_balance: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ParseOptions {
        max_depth: cli.max_depth,
    };

    match cli.command {
        Commands::Parse { input, output } => {
            let text = read_input(input.as_deref())?;
            let tree = realty_json::parse_with(&text, &options).context("Failed to parse JSON")?;
            let pretty = serde_json::to_string_pretty(&tree)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Format { input, output } => {
            let text = read_input(input.as_deref())?;
            let tree = realty_json::parse_with(&text, &options).context("Failed to parse JSON")?;
            write_output(output.as_deref(), &realty_json::stringify(&Node::from(&tree)))?;
        }
        Commands::Search { input, output } => {
            let records = decode_array::<ObjectBaseInfo>(input.as_deref(), &options)
                .context("Failed to decode search response")?;
            write_records(output.as_deref(), &records)?;
        }
        Commands::ObjectInfo { input, output } => {
            let body = read_input(input.as_deref())?;
            let object = decode_data_object(body.as_bytes(), &options, ObjectData::from_object)
                .context("Failed to decode object info")?;
            write_records(output.as_deref(), &object)?;
        }
        Commands::Products { input, output } => {
            let records = decode_array::<ProductInfo>(input.as_deref(), &options)
                .context("Failed to decode product list")?;
            write_records(output.as_deref(), &records)?;
        }
        Commands::OrderInfo { input, output } => {
            let body = read_input(input.as_deref())?;
            let order = decode_data_object(body.as_bytes(), &options, OrderInfo::from_object)
                .context("Failed to decode order response")?;
            write_records(output.as_deref(), &order)?;
        }
        Commands::OrdersStatus { input, output } => {
            let records = decode_array::<OrderStatusInfo>(input.as_deref(), &options)
                .context("Failed to decode order status list")?;
            write_records(output.as_deref(), &records)?;
        }
        Commands::Order {
            items,
            use_balance,
            output,
        } => {
            let request = OrderRequest {
                items,
                use_account_balance: use_balance,
            };
            write_output(output.as_deref(), &realty_json::stringify(&request.to_node()))?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn decode_array<T: FromObject>(input: Option<&str>, options: &ParseOptions) -> Result<Vec<T>> {
    let body = read_input(input)?;
    Ok(decode_data_array(body.as_bytes(), options, T::from_object)?)
}

/// Parse `PRODUCT,OBJECT_KEY[,COUPON]`.
///
/// Cadastral numbers contain `:`, so fields are separated by commas.
fn parse_order_item(raw: &str) -> std::result::Result<OrderRequestItem, String> {
    let mut parts = raw.split(',').map(str::trim);
    let product_name = parts.next().filter(|p| !p.is_empty());
    let object_key = parts.next().filter(|p| !p.is_empty());
    let coupon_id = parts.next().filter(|p| !p.is_empty()).map(str::to_string);

    match (product_name, object_key, parts.next()) {
        (Some(product_name), Some(object_key), None) => Ok(OrderRequestItem {
            product_name: product_name.to_string(),
            object_key: object_key.to_string(),
            coupon_id,
        }),
        _ => Err(format!(
            "expected PRODUCT,OBJECT_KEY[,COUPON], got '{}'",
            raw
        )),
    }
}

fn write_records<T: Serialize + ?Sized>(path: Option<&str>, records: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(records)?;
    write_output(path, &pretty)
}

fn read_input(path: Option<&str>) -> Result<String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    tracing::debug!(source = path.unwrap_or("stdin"), bytes = text.len(), "read input");
    Ok(text)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
