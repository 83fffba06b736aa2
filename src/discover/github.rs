// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Public repositories of a GitHub user.
//!
//! ```text
//! GET {api}/users/{user}/repos?page=1
//! GET {api}/users/{user}/repos?page=2
//! ...                                  until [] or a failed page
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::net::PageFetcher;

use super::{Excludes, RepoListing};

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: String,
}

/// Fields of the `/users/{user}/repos` items that end up in the listing.
#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    description: Option<String>,
    owner: ApiOwner,
    git_url: String,
    clone_url: String,
}

impl From<ApiRepo> for RepoListing {
    fn from(repo: ApiRepo) -> Self {
        Self {
            name: repo.name,
            description: repo.description,
            owner: repo.owner.login,
            section: None,
            git: repo.git_url,
            https: repo.clone_url,
        }
    }
}

/// Lists a user's repositories page by page.
pub struct GithubDiscoverer<'a> {
    fetcher: &'a PageFetcher,
    api: String,
    user: String,
    excludes: &'a Excludes,
}

impl<'a> GithubDiscoverer<'a> {
    #[must_use]
    pub fn new(
        fetcher: &'a PageFetcher,
        api: &str,
        user: impl Into<String>,
        excludes: &'a Excludes,
    ) -> Self {
        Self {
            fetcher,
            api: api.trim_end_matches('/').to_string(),
            user: user.into(),
            excludes,
        }
    }

    /// File name used when no output path is given.
    #[must_use]
    pub fn default_output(&self) -> String {
        format!("github_{}_repos.json", self.user)
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}/users/{}/repos?page={page}", self.api, self.user)
    }

    /// Walk the pages until an empty one.
    ///
    /// A page that cannot be fetched or decoded ends the walk; what was
    /// collected so far is returned.
    pub async fn collect(&self) -> Vec<RepoListing> {
        let mut listing = Vec::new();

        for page in 1.. {
            let url = self.page_url(page);
            let repos: Vec<ApiRepo> = match self.fetcher.fetch_json(&url).await {
                Ok(repos) => repos,
                Err(e) => {
                    error!("stopping at page {page}: {e}");
                    break;
                }
            };
            if repos.is_empty() {
                break;
            }

            for repo in repos {
                if self.excludes.matches_url(&repo.clone_url) {
                    info!("Skipping {} as it matches an exclude", repo.clone_url);
                    continue;
                }
                info!("Complete: {}", repo.clone_url);
                listing.push(repo.into());
            }
        }

        listing
    }
}
