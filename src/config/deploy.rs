//! `[deploy]` section configuration.
//!
//! Where `folio deploy` publishes: a branch on a git remote of the project
//! repository itself.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[deploy]` section in folio.toml - deployment configuration.
///
/// # Example
/// ```toml
/// [deploy]
/// remote = "origin"
/// branch = "gh-pages"
/// message = "publish"
/// force = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Remote the publish branch is fetched from and pushed to.
    #[serde(default = "defaults::deploy::remote")]
    #[educe(Default = defaults::deploy::remote())]
    pub remote: String,

    /// Branch holding the rendered site.
    #[serde(default = "defaults::deploy::branch")]
    #[educe(Default = defaults::deploy::branch())]
    pub branch: String,

    /// Commit message for each deploy.
    #[serde(default = "defaults::deploy::message")]
    #[educe(Default = defaults::deploy::message())]
    pub message: String,

    /// Force push (overwrites remote history).
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub force: bool,
}
