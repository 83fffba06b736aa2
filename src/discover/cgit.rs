// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repositories listed on a cgit index page.
//!
//! ```text
//! index page  <table class='list nowrap'>
//!   <tr><td class='reposection'>Yocto Project</td></tr>          section
//!   <tr><td><a href='/poky/'>poky</a></td><td>..</td><td>..</td>  repository
//!        |
//!        v  href joined with the index URL
//! repo page   <a rel='vcs-git' href='git://host/poky'>
//!             <a rel='vcs-git' href='https://host/poky'>
//! ```
//!
//! cgit emits a small, stable subset of HTML, so rows, cells and anchors are
//! picked out with regular expressions rather than a DOM.

use anyhow::Context;
use regex::Regex;
use tracing::{info, warn};
use url::Url;

use crate::error::Result;
use crate::net::PageFetcher;

use super::{Excludes, RepoListing};

/// One repository row of the index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub section: Option<String>,
    /// Repository page, absolute.
    pub url: String,
}

/// Clone URLs advertised on a repository page; empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneUrls {
    pub git: String,
    pub https: String,
}

/// Compiled patterns for cgit pages.
#[derive(Debug, Clone)]
pub struct CgitParser {
    table: Regex,
    row: Regex,
    cell: Regex,
    anchor: Regex,
    href: Regex,
    rel: Regex,
    tag: Regex,
}

impl CgitParser {
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).with_context(|| format!("failed to compile regex {pattern}"))
        };
        Ok(Self {
            table: compile(r#"(?is)<table[^>]*class\s*=\s*['"][^'"]*\blist\b[^'"]*['"][^>]*>(.*?)</table>"#)?,
            row: compile(r"(?is)<tr[^>]*>(.*?)</tr>")?,
            cell: compile(r"(?is)<td[^>]*>(.*?)</td>")?,
            anchor: compile(r"(?is)<a\s([^>]*)>")?,
            href: compile(r#"(?is)\bhref\s*=\s*['"]([^'"]*)['"]"#)?,
            rel: compile(r#"(?is)\brel\s*=\s*['"]([^'"]*)['"]"#)?,
            tag: compile(r"(?s)<[^>]*>")?,
        })
    }

    /// Repository rows of the index at `base`, in page order.
    ///
    /// Single-cell rows set the section of the rows that follow. Rows with
    /// fewer than three cells, or without a link in the first cell, are skipped.
    #[must_use]
    pub fn parse_index(&self, html: &str, base: &Url) -> Vec<IndexEntry> {
        let table = self
            .table
            .captures(html)
            .and_then(|c| c.get(1))
            .map_or(html, |m| m.as_str());

        let mut section = None;
        let mut entries = Vec::new();

        for row in self.row.captures_iter(table) {
            let Some(row) = row.get(1) else { continue };
            let cells: Vec<&str> = self
                .cell
                .captures_iter(row.as_str())
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect();

            match cells.as_slice() {
                [] => {}
                [heading] => {
                    let heading = self.text(heading);
                    section = (!heading.is_empty()).then_some(heading);
                }
                [first, description, owner, ..] => {
                    let Some(href) = self.hrefs(first).pop() else {
                        warn!("no link in repository row '{}'", self.text(first));
                        continue;
                    };
                    let url = match base.join(&href) {
                        Ok(url) => url,
                        Err(e) => {
                            warn!("bad repository link '{href}': {e}");
                            continue;
                        }
                    };
                    entries.push(IndexEntry {
                        name: self.text(first),
                        description: self.text(description),
                        owner: self.text(owner),
                        section: section.clone(),
                        url: url.to_string(),
                    });
                }
                [_, _] => {}
            }
        }

        entries
    }

    /// `vcs-git` links of a repository page. The first `git://` and the first
    /// `https://` link win.
    #[must_use]
    pub fn parse_clone_urls(&self, html: &str) -> CloneUrls {
        let mut urls = CloneUrls::default();

        for anchor in self.anchor.captures_iter(html) {
            let Some(attrs) = anchor.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let is_vcs = self
                .rel
                .captures(attrs)
                .and_then(|c| c.get(1))
                .is_some_and(|rel| rel.as_str().split_whitespace().any(|r| r == "vcs-git"));
            if !is_vcs {
                continue;
            }
            let Some(href) = self.href.captures(attrs).and_then(|c| c.get(1)) else {
                continue;
            };
            let href = decode_entities(href.as_str());

            if href.starts_with("git://") && urls.git.is_empty() {
                urls.git = href;
            } else if href.starts_with("https://") && urls.https.is_empty() {
                urls.https = href;
            }
        }

        urls
    }

    fn hrefs(&self, fragment: &str) -> Vec<String> {
        self.anchor
            .captures_iter(fragment)
            .filter_map(|a| a.get(1))
            .filter_map(|attrs| self.href.captures(attrs.as_str()))
            .filter_map(|c| c.get(1))
            .map(|m| decode_entities(m.as_str()))
            .collect()
    }

    /// Visible text of an HTML fragment, trimmed.
    fn text(&self, fragment: &str) -> String {
        decode_entities(self.tag.replace_all(fragment, "").trim())
    }
}

/// Entities cgit's HTML escaping produces.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Walks a cgit index and each repository page it links to.
pub struct CgitDiscoverer<'a> {
    fetcher: &'a PageFetcher,
    index_url: Url,
    excludes: &'a Excludes,
    parser: CgitParser,
}

impl<'a> CgitDiscoverer<'a> {
    /// # Errors
    ///
    /// Returns an error if `index_url` is not an absolute URL.
    pub fn new(fetcher: &'a PageFetcher, index_url: &str, excludes: &'a Excludes) -> Result<Self> {
        let index_url =
            Url::parse(index_url).with_context(|| format!("invalid index URL {index_url}"))?;
        Ok(Self {
            fetcher,
            index_url,
            excludes,
            parser: CgitParser::new()?,
        })
    }

    /// File name used when no output path is given.
    #[must_use]
    pub const fn default_output(&self) -> &'static str {
        "cgit_repos.json"
    }

    /// Fetch the index, then every repository page.
    ///
    /// Repositories whose page yields no `https://` clone URL are logged as
    /// incomplete and left out, `sync` could not mirror them.
    ///
    /// # Errors
    ///
    /// Returns an error if the index page cannot be fetched.
    pub async fn collect(&self) -> Result<Vec<RepoListing>> {
        let html = self
            .fetcher
            .fetch_text(self.index_url.as_str())
            .await
            .with_context(|| format!("failed to fetch cgit index {}", self.index_url))?;

        let entries = self.parser.parse_index(&html, &self.index_url);
        if entries.is_empty() {
            warn!("No repositories on {}", self.index_url);
        }

        let mut listing = Vec::new();
        for entry in entries {
            if self.excludes.matches_url(&entry.url) {
                info!("Skipping {} as it matches an exclude", entry.url);
                continue;
            }

            let urls = match self.fetcher.fetch_text(&entry.url).await {
                Ok(page) => self.parser.parse_clone_urls(&page),
                Err(e) => {
                    warn!("failed to fetch {}: {e}", entry.url);
                    CloneUrls::default()
                }
            };

            if urls.https.is_empty() {
                warn!("Incomplete: {} has no https clone URL", entry.name);
                continue;
            }

            info!("Complete: {}", urls.https);
            listing.push(RepoListing {
                name: entry.name,
                description: Some(entry.description),
                owner: entry.owner,
                section: entry.section,
                git: urls.git,
                https: urls.https,
            });
        }

        Ok(listing)
    }
}
