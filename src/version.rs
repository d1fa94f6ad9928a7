#![allow(clippy::doc_markdown)] // Generated file contains OPT_LEVEL without backticks

use std::sync::LazyLock;

include!(concat!(env!("OUT_DIR"), "/built.rs"));

/// `<package version>-<short commit>[-dirty]`, or just the package version when built
/// outside a git checkout.
pub static VERSION: LazyLock<String> = LazyLock::new(|| match GIT_COMMIT_HASH_SHORT {
    Some(commit) if GIT_DIRTY == Some(true) => format!("{PKG_VERSION}-{commit}-dirty"),
    Some(commit) => format!("{PKG_VERSION}-{commit}"),
    None => PKG_VERSION.to_string(),
});
