// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use tempfile::TempDir;
use url::Url;

use super::cgit::{CgitParser, CloneUrls, IndexEntry};
use super::*;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn listing(name: &str) -> RepoListing {
    RepoListing {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        owner: "owner".to_string(),
        section: None,
        git: format!("git://host/{name}"),
        https: format!("https://host/{name}"),
    }
}

const INDEX: &str = r"<html><body>
<div id='cgit'><table id='header'><tr><td class='main'>Yocto</td></tr></table>
<table summary='repository list' class='list nowrap'>
<tr class='nohover'><th class='left'>Name</th><th class='left'>Description</th><th class='left'>Owner</th><th class='left'>Idle</th></tr>
<tr class='nohover-highlight'><td colspan='4' class='reposection'>Yocto Project</td></tr>
<tr><td class='sublevel-repo'><a title='poky' href='/cgit.cgi/poky/'>poky</a></td><td><a href='/cgit.cgi/poky/'>Poky Build Tool &amp; Metadata</a></td><td><a href='/cgit.cgi/poky/'>Richard Purdie</a></td><td><a href='/cgit.cgi/poky/'><span class='age-hours'>2 hours</span></a></td></tr>
<tr class='nohover-highlight'><td colspan='4' class='reposection'>Layers</td></tr>
<tr><td class='sublevel-repo'><a title='meta-arm' href='/cgit.cgi/meta-arm/'>meta-arm</a></td><td><a href='/cgit.cgi/meta-arm/'>[no description]</a></td><td><a href='/cgit.cgi/meta-arm/'>Jon Mason</a></td><td></td></tr>
<tr><td class='sublevel-repo'>orphan</td><td>no link</td><td>nobody</td><td></td></tr>
</table></div></body></html>";

const REPO_PAGE: &str = r"<table class='list nowrap'>
<tr class='nohover'><td colspan='4'>&nbsp;</td></tr>
<tr class='nohover'><th class='left' colspan='4'>Clone</th></tr>
<tr><td colspan='4'><a rel='vcs-git' href='git://git.yoctoproject.org/poky' title='poky Git repository'>git://git.yoctoproject.org/poky</a></td></tr>
<tr><td colspan='4'><a rel='vcs-git' href='https://git.yoctoproject.org/git/poky' title='poky Git repository'>https://git.yoctoproject.org/git/poky</a></td></tr>
<tr><td colspan='4'><a href='https://example.org/not-a-clone-url'>elsewhere</a></td></tr>
</table>";

// =============================================================================
// Excludes
// =============================================================================

#[test]
fn test_excludes_literal_name_and_stem() {
    let excludes = Excludes::new(["yocto-testresults"]).unwrap();

    assert!(excludes.matches_url("https://git.yoctoproject.org/yocto-testresults"));
    assert!(excludes.matches_url("https://git.yoctoproject.org/yocto-testresults.git"));
    assert!(excludes.matches_url("https://git.yoctoproject.org/cgit.cgi/yocto-testresults/"));
    assert!(!excludes.matches_url("https://git.yoctoproject.org/poky"));
}

#[test]
fn test_excludes_full_basename() {
    let excludes = Excludes::new(["tool.git"]).unwrap();
    assert!(excludes.matches_url("https://github.com/user/tool.git"));
    assert!(!excludes.matches_url("https://github.com/user/tool"));
}

#[test]
fn test_excludes_glob() {
    let excludes = Excludes::new(["meta-*"]).unwrap();

    assert!(excludes.matches_url("https://host/meta-arm"));
    assert!(excludes.matches_url("https://host/meta-intel.git"));
    assert!(!excludes.matches_url("https://host/poky"));
}

#[test]
fn test_excludes_empty_matches_nothing() {
    let excludes = Excludes::new(Vec::<String>::new()).unwrap();
    assert!(excludes.is_empty());
    assert!(!excludes.matches_url("https://host/anything"));
}

#[test]
fn test_excludes_invalid_glob() {
    let err = Excludes::new(["[unclosed"]).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "excludes"),
        "got {err:?}"
    );
}

#[test]
fn test_url_basename() {
    assert_eq!(url_basename("https://host/a/b.git"), "b.git");
    assert_eq!(url_basename("https://host/a/b/"), "b");
    assert_eq!(url_basename("b"), "b");
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_export_writes_pretty_json() {
    let temp = temp_dir();
    let path = temp.path().join("repos.json");
    let mut repo = listing("poky");
    repo.section = Some("Yocto Project".to_string());

    export_listing(&[repo.clone()], &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(content, @r#"
    [
      {
        "name": "poky",
        "description": "poky description",
        "owner": "owner",
        "section": "Yocto Project",
        "git": "git://host/poky",
        "https": "https://host/poky"
      }
    ]
    "#);

    let back: Vec<RepoListing> = serde_json::from_str(&content).unwrap();
    assert_eq!(back, vec![repo]);
}

#[test]
fn test_export_omits_missing_section_and_keeps_utf8() {
    let temp = temp_dir();
    let path = temp.path().join("repos.json");
    let mut repo = listing("tool");
    repo.description = Some("Outil très utile".to_string());

    export_listing(&[repo], &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("section"));
    assert!(content.contains("Outil très utile"));
}

#[test]
fn test_export_null_description() {
    let temp = temp_dir();
    let path = temp.path().join("repos.json");
    let mut repo = listing("tool");
    repo.description = None;

    export_listing(&[repo], &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(r#""description": null"#));
}

#[test]
fn test_export_output_is_a_valid_manifest() {
    let temp = temp_dir();
    let path = temp.path().join("repos.json");
    export_listing(&[listing("a"), listing("b")], &path).unwrap();

    let repos = crate::mirror::load_manifest(&path).unwrap();
    let urls: Vec<&str> = repos.iter().map(|r| r.clone_url.as_str()).collect();
    assert_eq!(urls, vec!["https://host/a", "https://host/b"]);
}

#[test]
fn test_export_refuses_empty_list() {
    let temp = temp_dir();
    let path = temp.path().join("repos.json");
    std::fs::write(&path, "[previous]").unwrap();

    let err = export_listing(&[], &path).unwrap_err();

    assert!(err.to_string().contains("empty repository list"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[previous]");
}

#[test]
fn test_export_replaces_existing_file() {
    let temp = temp_dir();
    let path = temp.path().join("repos.json");
    std::fs::write(&path, "old").unwrap();

    export_listing(&[listing("new")], &path).unwrap();

    assert!(std::fs::read_to_string(&path).unwrap().contains("\"new\""));
    let leftovers = std::fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

// =============================================================================
// cgit parsing
// =============================================================================

#[test]
fn test_parse_index_sections_and_links() {
    let parser = CgitParser::new().unwrap();
    let base = Url::parse("https://git.yoctoproject.org/cgit.cgi/").unwrap();

    let entries = parser.parse_index(INDEX, &base);

    assert_eq!(
        entries,
        vec![
            IndexEntry {
                name: "poky".to_string(),
                description: "Poky Build Tool & Metadata".to_string(),
                owner: "Richard Purdie".to_string(),
                section: Some("Yocto Project".to_string()),
                url: "https://git.yoctoproject.org/cgit.cgi/poky/".to_string(),
            },
            IndexEntry {
                name: "meta-arm".to_string(),
                description: "[no description]".to_string(),
                owner: "Jon Mason".to_string(),
                section: Some("Layers".to_string()),
                url: "https://git.yoctoproject.org/cgit.cgi/meta-arm/".to_string(),
            },
        ]
    );
}

#[test]
fn test_parse_index_without_sections() {
    let parser = CgitParser::new().unwrap();
    let base = Url::parse("https://cgit.example.org/").unwrap();
    let html = "<table class='list'><tr><td><a href='tool/'>tool</a></td><td>Tool</td><td>me</td></tr></table>";

    let entries = parser.parse_index(html, &base);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].section, None);
    assert_eq!(entries[0].url, "https://cgit.example.org/tool/");
}

#[test]
fn test_parse_index_empty_page() {
    let parser = CgitParser::new().unwrap();
    let base = Url::parse("https://cgit.example.org/").unwrap();
    assert!(parser.parse_index("<html></html>", &base).is_empty());
}

#[test]
fn test_parse_clone_urls() {
    let parser = CgitParser::new().unwrap();
    assert_eq!(
        parser.parse_clone_urls(REPO_PAGE),
        CloneUrls {
            git: "git://git.yoctoproject.org/poky".to_string(),
            https: "https://git.yoctoproject.org/git/poky".to_string(),
        }
    );
}

#[test]
fn test_parse_clone_urls_git_only() {
    let parser = CgitParser::new().unwrap();
    let html = "<a rel='vcs-git' href='git://host/only' title='x'>git://host/only</a>";
    let urls = parser.parse_clone_urls(html);
    assert_eq!(urls.git, "git://host/only");
    assert!(urls.https.is_empty());
}

#[test]
fn test_parse_clone_urls_attribute_order() {
    let parser = CgitParser::new().unwrap();
    let html = r#"<a href="https://host/x" rel="vcs-git">https://host/x</a>"#;
    assert_eq!(parser.parse_clone_urls(html).https, "https://host/x");
}
