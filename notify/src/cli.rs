use clap::Parser;

use crate::error::Result;
use crate::payload::{Notification, PullRequestContext};
use crate::send;

/// Sends a pull-request notification to an OpenChat webhook.
#[derive(Debug, Parser)]
#[command(name = "oc-notify", version, about)]
pub struct NotifyArgs {
    /// Webhook endpoint of the OpenChat bot.
    #[arg(long = "url", env = "INPUT_OC_BOT_URL")]
    pub oc_bot_url: String,

    /// Key sent in the X-Auth header.
    #[arg(long = "api-key", env = "INPUT_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

pub fn run_from_env() -> Result<()> {
    let args = NotifyArgs::parse();
    let context = PullRequestContext::from_env()?;
    let notification = Notification::from_context(&context);
    send::post(&args.oc_bot_url, &args.api_key, &notification)
}
