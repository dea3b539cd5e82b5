//! Site deployment module.
//!
//! Publishes the rendered site by committing it to a branch of the project
//! repository and pushing that branch:
//!
//! ```text
//! deploy_site()
//!     │
//!     ├── Site::load()             (nothing touched on failure)
//!     │
//!     └── Git::with_remote_branch(remote, branch)
//!             ├── write documents to the repo root, assets to assets/
//!             ├── git add / git commit --allow-empty / git push
//!             └── original branch restored on every exit path
//! ```

use crate::{
    assets::ASSETS_DIR,
    build::Site,
    config::SiteConfig,
    log,
    utils::{fs::ensure_dir, git::Git},
};
use anyhow::Result;

/// Render the site and publish it to `[deploy].branch` on `[deploy].remote`.
pub fn deploy_site(config: &SiteConfig) -> Result<()> {
    let site = Site::load(config)?;
    let root = config.get_root();
    let deploy = &config.deploy;
    let git = Git::new(root);

    git.with_remote_branch(&deploy.remote, &deploy.branch, || {
        ensure_dir(&root.join(ASSETS_DIR))?;
        site.write_to(root)?;

        git.add(&site.written_paths())?;
        git.commit(&deploy.message)?;
        git.push(&deploy.remote, &deploy.branch, deploy.force)
    })?;

    log!(
        "deploy";
        "published {} page(s) to {}/{}",
        site.files.len(),
        deploy.remote,
        deploy.branch
    );
    Ok(())
}
