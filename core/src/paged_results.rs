// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use reqwest::blocking::Response;
use reqwest::header::HeaderMap;
use reqwest::header::LINK;

/// Find the `rel="next"` target among a response's `Link` headers.
///
/// Okta sends one `Link` header per relation, but a single comma separated
/// header is valid too, so both are handled.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(link_values)
        .find_map(|(target, params)| {
            is_next(params).then(|| target.to_string())
        })
}

/// Split one `Link` header value into `(target, params)` pairs.
///
/// Targets are delimited by `<` and `>` and may contain commas; params run
/// up to the next comma outside a quoted string.
fn link_values(value: &str) -> Vec<(&str, &str)> {
    let mut links = vec![];
    let mut rest = value;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            break;
        };

        let target = &after[..end];
        let tail = &after[end + 1..];
        let params_end = top_level_comma(tail).unwrap_or(tail.len());

        links.push((target, &tail[..params_end]));
        rest = &tail[params_end..];
    }

    links
}

fn top_level_comma(params: &str) -> Option<usize> {
    let mut quoted = false;

    for (i, c) in params.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => return Some(i),
            _ => {}
        }
    }

    None
}

fn is_next(params: &str) -> bool {
    params.split(';').any(|param| {
        let Some((name, value)) = param.split_once('=') else {
            return false;
        };

        name.trim().eq_ignore_ascii_case("rel")
            && value
                .trim()
                .trim_matches('"')
                .split_whitespace()
                .any(|rel| rel.eq_ignore_ascii_case("next"))
    })
}

/// One page of a list endpoint, plus the link to the page after it.
///
/// Traversal is forward only: `next_page` replaces the current page with the
/// following one. Going back means issuing the original query again.
#[derive(Debug)]
pub struct PagedResults<T> {
    api: ApiClient,
    results: Vec<T>,
    next_url: Option<String>,
}

impl<T> PagedResults<T>
where
    T: DeserializeOwned,
{
    /// Read the continuation link and the page out of `response`.
    pub fn from_response(
        api: ApiClient,
        response: Response,
    ) -> Result<Self, Error> {
        let next_url = next_link(response.headers());
        let url = response.url().to_string();

        let body = response.text().map_err(|source| Error::Transport {
            method: Method::GET,
            url,
            source,
        })?;

        let results = utils::deserialize_many(&body)?;

        Ok(Self { api, results, next_url })
    }

    /// The items on the current page, in the order the server sent them.
    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    pub fn is_last_page(&self) -> bool {
        self.next_url.is_none()
    }

    /// Fetch the next page and make it the current one. Nothing is retried;
    /// on error the current page is left as it was.
    pub fn next_page(&mut self) -> Result<(), Error> {
        let Some(url) = self.next_url.as_deref() else {
            return Err(Error::NoNextPage);
        };

        let response =
            self.api.execute(self.api.request_url(Method::GET, url))?;

        *self = Self::from_response(self.api.clone(), response)?;

        Ok(())
    }

    /// Walk this page and every page after it.
    pub fn into_pages(self) -> Pages<T> {
        Pages { current: Some(self), started: false }
    }
}

/// Iterator over the pages of a `PagedResults`, yielding each page's items.
/// Stops after the last page or after the first error.
pub struct Pages<T> {
    current: Option<PagedResults<T>>,
    started: bool,
}

impl<T> Iterator for Pages<T>
where
    T: DeserializeOwned,
{
    type Item = Result<Vec<T>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.current.as_mut()?;

        if self.started {
            if page.is_last_page() {
                self.current = None;
                return None;
            }

            if let Err(e) = page.next_page() {
                self.current = None;
                return Some(Err(e));
            }
        }

        self.started = true;
        Some(Ok(std::mem::take(&mut page.results)))
    }
}

#[cfg(test)]
mod test {
    use reqwest::header::HeaderValue;

    use super::*;

    fn link_headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(LINK, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_next_link_separate_headers() {
        let headers = link_headers(&[
            r#"<https://example.okta.com/api/v1/users?limit=2>; rel="self""#,
            r#"<https://example.okta.com/api/v1/users?after=00u2&limit=2>; rel="next""#,
        ]);

        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://example.okta.com/api/v1/users?after=00u2&limit=2")
        );
    }

    #[test]
    fn test_next_link_single_header() {
        let headers = link_headers(&[concat!(
            r#"<https://example.okta.com/api/v1/users?limit=2>; rel="self", "#,
            r#"<https://example.okta.com/api/v1/users?after=00u2&limit=2>; rel=next"#,
        )]);

        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://example.okta.com/api/v1/users?after=00u2&limit=2")
        );
    }

    #[test]
    fn test_next_link_with_commas_in_target() {
        let headers = link_headers(&[concat!(
            r#"<https://example.okta.com/api/v1/users?fields=id,status>; rel="self", "#,
            r#"<https://example.okta.com/api/v1/users?after=00u2&fields=id,status>; title="a, b"; rel="next""#,
        )]);

        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://example.okta.com/api/v1/users?after=00u2&fields=id,status")
        );

        let headers = link_headers(&[
            r#"<https://example.okta.com/api/v1/users?after=00u2&fields=id,status>; rel="next""#,
        ]);

        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://example.okta.com/api/v1/users?after=00u2&fields=id,status")
        );
    }

    #[test]
    fn test_no_next_link() {
        assert_eq!(next_link(&HeaderMap::new()), None);

        let headers = link_headers(&[
            r#"<https://example.okta.com/api/v1/users?limit=2>; rel="self""#,
        ]);
        assert_eq!(next_link(&headers), None);

        // Malformed targets are ignored rather than guessed at
        let headers =
            link_headers(&[r#"https://example.okta.com/api/v1/users; rel="next""#]);
        assert_eq!(next_link(&headers), None);
    }

    #[test]
    fn test_next_link_case_and_multiple_rels() {
        let headers = link_headers(&[
            r#"<https://example.okta.com/page2>; REL="prefetch Next""#,
        ]);

        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://example.okta.com/page2")
        );
    }
}
