//! Pre-release version arbitration.
//!
//! Decides whether a candidate pre-release build should replace the version
//! currently installed. All functions here are pure and total: malformed
//! version strings are treated as absent and never cause a panic.

use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Current version of the updater itself.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Release core the remote index uses to block a bad build.
pub const BLOCKED_VERSION: &str = "9999.9999.9999";

/// Pre-release identifier that marks an alpha build.
pub const ALPHA_TAG: &str = "alpha";

/// First run of up to three dot-separated numbers, not embedded in a longer number.
static COERCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])")
        .expect("COERCE_REGEX must compile")
});

/// Version at the end of an artifact file stem, e.g. `ext-1.2.3-alpha.4`.
static ARTIFACT_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.\d+\.\d+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)$")
        .expect("ARTIFACT_VERSION_REGEX must compile")
});

/// Parse a full semantic version, tolerating a leading `v` or `=` and
/// surrounding whitespace.
pub fn parse_lenient(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('=')
        .unwrap_or(trimmed)
        .trim_start_matches(['v', 'V']);
    Version::parse(trimmed).ok()
}

/// Reduce any string to its `major.minor.patch` release core.
///
/// The first run of one to three dot-separated numbers wins; missing minor or
/// patch parts become zero. Pre-release tags and build metadata are dropped.
pub fn coerce(raw: &str) -> Option<Version> {
    let caps = COERCE_REGEX.captures(raw)?;
    let part = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Check whether a version string carries an `alpha` pre-release identifier.
pub fn is_alpha(raw: &str) -> bool {
    parse_lenient(raw)
        .map(|v| v.pre.as_str().split('.').any(|id| id == ALPHA_TAG))
        .unwrap_or(false)
}

/// Check whether a version string's release core is the blocked sentinel.
pub fn is_blocked(raw: &str) -> bool {
    match (coerce(raw), parse_lenient(BLOCKED_VERSION)) {
        (Some(core), Some(blocked)) => core.cmp_precedence(&blocked) == Ordering::Equal,
        _ => false,
    }
}

/// Decide whether `candidate` should be installed over `current`.
///
/// A candidate is eligible when it is alpha-tagged and either strictly newer
/// than `current`, or shares `current`'s release core exactly (an alpha
/// re-spin of the same release line). Blocked builds and a missing baseline
/// always yield `false`.
pub fn should_install(current: Option<&str>, candidate: &str) -> bool {
    let Some(current) = current.and_then(parse_lenient) else {
        return false;
    };

    if is_blocked(candidate) || !is_alpha(candidate) {
        return false;
    }

    let is_newer = parse_lenient(candidate)
        .map(|c| c.cmp_precedence(&current) == Ordering::Greater)
        .unwrap_or(false);

    let is_same_core = coerce(candidate)
        .map(|core| core.cmp_precedence(&current) == Ordering::Equal)
        .unwrap_or(false);

    is_newer || is_same_core
}

/// Extract the candidate version from an artifact download URL.
///
/// Release downloads carry the version in the tag segment
/// (`.../download/<tag>/<asset>`), which is read first. Otherwise the version
/// is read from the end of the file name once the query string, fragment and
/// `.vsix` extension are removed.
pub fn version_from_artifact_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    if let Some(version) = version_from_tag_segment(path) {
        return Some(version);
    }

    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem = file_name.strip_suffix(".vsix").unwrap_or(file_name);

    let caps = ARTIFACT_VERSION_REGEX.captures(stem)?;
    let version = caps.get(1)?.as_str();

    parse_lenient(version).map(|v| v.to_string())
}

/// Version named by the segment after `/download/`, if that segment is
/// followed by an asset name and parses as a version.
fn version_from_tag_segment(path: &str) -> Option<String> {
    let (_, rest) = path.split_once("/download/")?;
    let (tag, asset) = rest.split_once('/')?;
    if asset.is_empty() {
        return None;
    }
    parse_lenient(tag).map(|v| v.to_string())
}
