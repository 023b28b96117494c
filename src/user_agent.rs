//! User-Agent string sent to the generator service.

/// Default User-Agent for generator requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_generator_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("html-to-pdf/{version}")
}
