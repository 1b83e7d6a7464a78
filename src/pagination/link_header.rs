//! Link header pagination (RFC 5988)
//!
//! Format: `</kv?after=x>; rel="next", </kv?before=y>; rel="prev"`

use super::types::{NextPage, PaginationState};
use crate::http::KvResponse;

/// Name of the response header carrying page links
pub const LINK_HEADER: &str = "link";

/// One `<url>; rel="..."` entry of a link header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    /// Relation types; a single `rel` may list several separated by spaces
    pub rels: Vec<String>,
}

impl Link {
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parse every entry of a link header
///
/// URLs are delimited by angle brackets, so commas inside a URL (such as a
/// label filter `label=a,b`) do not split entries.
pub fn parse_links(header: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            break;
        };
        let url = after[..end].trim();
        let tail = &after[end + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());

        let mut rels = Vec::new();
        for param in tail[..params_end].split(';') {
            let param = param.trim().trim_end_matches(',').trim();
            if let Some((name, value)) = param.split_once('=') {
                if name.trim().eq_ignore_ascii_case("rel") {
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    rels.extend(value.split_whitespace().map(str::to_string));
                }
            }
        }

        if !url.is_empty() {
            links.push(Link {
                url: url.to_string(),
                rels,
            });
        }
        rest = &tail[params_end..];
    }

    links
}

/// Parse a link header and extract the URL for the given rel
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    parse_links(header)
        .into_iter()
        .find(|link| link.has_rel(target_rel))
        .map(|link| link.url)
}

/// Follows the link header relation named `rel` from page to page
#[derive(Debug, Clone)]
pub struct LinkHeaderPaginator {
    /// Rel value to follow (default: "next")
    pub rel: String,
}

impl Default for LinkHeaderPaginator {
    fn default() -> Self {
        Self {
            rel: "next".to_string(),
        }
    }
}

impl LinkHeaderPaginator {
    /// Create a new link header paginator
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }

    /// Process a response and determine if there's a next page
    pub fn process_response(
        &self,
        response: &KvResponse,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page(records_count);

        if let Some(link_header) = response.header(LINK_HEADER) {
            if let Some(next_url) = parse_link_header(link_header, &self.rel) {
                return NextPage::with_url(next_url);
            }
        }

        state.mark_done();
        NextPage::Done
    }
}
