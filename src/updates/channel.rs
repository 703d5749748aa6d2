//! Pre-release channel gating and the one-shot beta channel notice.

use semver::Version;
use serde_json::Value;

use crate::config::ChannelConfig;
use crate::error::Result;
use crate::host::{HostContext, BETA_CHANNEL_SETTING, OPEN_SETTINGS_COMMAND};
use crate::state::{GlobalState, BETA_CHANNEL_MESSAGE_SHOWN_KEY};
use crate::ui::Notification;

use super::version::coerce;

/// First host release with pre-release extension channels.
pub const MIN_PRERELEASE_HOST_VERSION: Version = Version::new(1, 63, 0);

/// Product name shown in notifications.
pub const BRAND_NAME: &str = "Tabnine";

pub const BETA_NOTICE_ID: &str = "vscode-join-beta-channel";
pub const BETA_NOTICE_BUTTON: &str = "Open Settings";

/// Text of the beta channel offer.
pub fn beta_notice_text() -> String {
    format!(
        "Do you wish to help {brand} get better? Enable {brand}'s extension beta channel if so!",
        brand = BRAND_NAME
    )
}

/// Whether the host supports pre-release extension channels.
///
/// An unknown or malformed host version counts as unsupported.
pub fn is_prerelease_channel_supported(channel: &ChannelConfig) -> bool {
    channel
        .host_version
        .as_deref()
        .and_then(coerce)
        .is_some_and(|v| v >= MIN_PRERELEASE_HOST_VERSION)
}

/// Whether this user receives pre-release builds.
pub fn user_consumes_prerelease_updates(channel: &ChannelConfig) -> bool {
    is_prerelease_channel_supported(channel)
        && (channel.alpha_capability || channel.beta_channel_enabled)
}

/// Whether the beta channel offer should be shown now.
pub fn should_show_beta_channel_notice(channel: &ChannelConfig, state: &dyn GlobalState) -> bool {
    let already_shown = state
        .get_bool(BETA_CHANNEL_MESSAGE_SHOWN_KEY)
        .unwrap_or(false);

    is_prerelease_channel_supported(channel)
        && (channel.insiders || channel.alpha_capability)
        && !already_shown
        && !channel.beta_channel_enabled
}

/// Offer to join the beta channel once per installation.
///
/// Accepting opens the settings at the beta channel key. The shown flag is
/// persisted whatever the answer. Returns whether the notice was shown.
pub fn show_beta_channel_notice_if_needed(ctx: &mut HostContext<'_>) -> Result<bool> {
    if !should_show_beta_channel_notice(&ctx.config.channel, &*ctx.state) {
        tracing::debug!("Beta channel notice not needed");
        return Ok(false);
    }

    let notice = Notification::new(BETA_NOTICE_ID, beta_notice_text(), BETA_NOTICE_BUTTON);
    let accepted = ctx.ui.notify(&notice)?;
    tracing::info!(accepted, "Beta channel notice shown");

    if accepted {
        if let Err(e) = ctx.execute(OPEN_SETTINGS_COMMAND, &[BETA_CHANNEL_SETTING.to_string()]) {
            tracing::warn!(error = %e, "Failed to open beta channel settings");
        }
    }

    ctx.state
        .update(BETA_CHANNEL_MESSAGE_SHOWN_KEY, Value::Bool(true))?;
    Ok(true)
}
