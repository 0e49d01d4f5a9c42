//! Call command implementation

use crate::cli::{init_logging, load_config_with_overrides, CallArgs};
use crate::client::{RequestClient, RequestOptions};
use crate::config::GitSageConfig;
use anyhow::{anyhow, Context};
use reqwest::Method;

/// Build request options from `call` arguments.
pub fn build_options(args: &CallArgs) -> anyhow::Result<RequestOptions> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .map_err(|_| anyhow!("Invalid HTTP method: {}", args.method))?;
    let mut options = RequestOptions::new().method(method);

    for raw in &args.headers {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid header '{}', expected 'Name: value'", raw))?;
        options = options.header(name.trim(), value.trim());
    }

    if let Some(ref data) = args.data {
        let body = serde_json::from_str(data).context("Request body is not valid JSON")?;
        options = options.json(body);
    }

    Ok(options)
}

/// Run `gitsage-dashboard call` and print the response.
pub async fn run_call(args: CallArgs) -> anyhow::Result<()> {
    let config = load_config_with_overrides(&args.connection)?;
    init_logging(&config)?;

    println!("{}", handle_call(&args, &config).await?);
    Ok(())
}

/// Handle `gitsage-dashboard call`, returning the formatted response.
pub async fn handle_call(args: &CallArgs, config: &GitSageConfig) -> anyhow::Result<String> {
    let options = build_options(args)?;
    let client = RequestClient::new(&config.client)?;

    let value = client.call(&args.endpoint, options).await?;

    let output = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(output)
}
