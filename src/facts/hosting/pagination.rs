//! `Link` header parsing.
//!
//! GitHub advertises pagination through an RFC 8288 `Link` header:
//!
//! ```text
//! <https://api.github.com/repos/o/r/issues?page=2>; rel="next", <https://api.github.com/repos/o/r/issues?page=5>; rel="last"
//! ```
//!
//! The page count of a resource is the `page` query parameter of the `rel="last"` target.
//! GitHub omits the `last` relation on the final page and omits the header entirely when a
//! resource fits in a single page, so both cases mean one page.

use crate::Result;
use ohno::{IntoAppError, bail};
use reqwest::header::HeaderValue;
use url::Url;

/// Page count advertised by a `Link` header, or 1 when there is none
pub fn page_count(link: Option<&HeaderValue>) -> Result<u32> {
    let Some(link) = link else {
        return Ok(1);
    };

    let link = link.to_str().into_app_err("Link header is not valid ASCII")?;
    Ok(last_page(link)?.unwrap_or(1))
}

/// Page number of the `rel="last"` entry, if the header has one
pub fn last_page(link: &str) -> Result<Option<u32>> {
    for (target, params) in entries(link)? {
        if !has_relation(params, "last") {
            continue;
        }

        let url = Url::parse(target).into_app_err_with(|| format!("malformed URL in Link header: '{target}'"))?;
        let Some((_, page)) = url.query_pairs().find(|(name, _)| name == "page") else {
            bail!("Link header 'last' target has no page parameter: '{target}'");
        };

        let page = page
            .parse::<u32>()
            .into_app_err_with(|| format!("non-numeric page '{page}' in Link header"))?;
        if page == 0 {
            bail!("Link header 'last' target points at page 0: '{target}'");
        }

        return Ok(Some(page));
    }

    Ok(None)
}

/// Split a `Link` header into `(target, parameters)` pairs
fn entries(link: &str) -> Result<Vec<(&str, &str)>> {
    let mut result = Vec::new();
    let mut rest = link.trim();

    while !rest.is_empty() {
        let Some(after_open) = rest.strip_prefix('<') else {
            bail!("malformed Link header, expected '<' at: '{rest}'");
        };

        // the target is delimited first so that commas inside URLs are not mistaken for separators
        let Some((target, tail)) = after_open.split_once('>') else {
            bail!("malformed Link header, unterminated target in: '{link}'");
        };

        let (params, remainder) = tail.split_once(',').unwrap_or((tail, ""));
        result.push((target.trim(), params));
        rest = remainder.trim_start();
    }

    Ok(result)
}

/// Whether an entry's parameters include `rel` with the given relation type
fn has_relation(params: &str, relation: &str) -> bool {
    params
        .split(';')
        .filter_map(|param| param.trim().strip_prefix("rel="))
        .any(|value| value.trim_matches('"').split_whitespace().any(|r| r.eq_ignore_ascii_case(relation)))
}
