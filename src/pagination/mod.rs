//! Pagination module
//!
//! Follows RFC 5988 `link` headers from page to page.
//!
//! # Overview
//!
//! A listing response may carry `link: </kv?after=x>; rel="next"`. The
//! `LinkHeaderPaginator` turns each response into a `NextPage` decision and
//! tracks progress in a `PaginationState`.

mod link_header;
mod types;

pub use link_header::{parse_link_header, parse_links, Link, LinkHeaderPaginator, LINK_HEADER};
pub use types::{NextPage, PaginationState};
