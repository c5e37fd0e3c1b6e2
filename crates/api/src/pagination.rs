//! Page envelope and absolute page links for the learner list.

use serde::Serialize;
use url::form_urlencoded;

use crate::error::{ApiError, ApiResult};

/// Page envelope: totals and absolute previous/next links around one page
/// of results.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub num_pages: u64,
    pub results: Vec<T>,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Assemble the envelope for one 1-based page. A page past the end of
    /// the collection is a 404, not an empty page; an empty collection
    /// still has one page.
    pub fn new(
        count: u64,
        page: u32,
        page_size: u32,
        links: &PageLinks,
        results: Vec<T>,
    ) -> ApiResult<Self> {
        let page_size = u64::from(page_size);
        let num_pages = (count.div_ceil(page_size)).max(1);

        if u64::from(page) > num_pages {
            return Err(ApiError::InvalidPage);
        }

        Ok(Self {
            count,
            next: (u64::from(page) < num_pages).then(|| links.page_url(page + 1)),
            previous: (page > 1).then(|| links.page_url(page - 1)),
            num_pages,
            results,
        })
    }
}

/// Builds the absolute URLs in `next`/`previous`. Parameters render in the
/// order they were added, then `page`, then `page_size`; `page=1` is
/// omitted so the first page's link carries no page parameter, and
/// `page_size` appears only when the client sent one explicitly.
#[derive(Debug)]
pub struct PageLinks {
    base: String,
    params: Vec<(String, String)>,
    page_size: Option<u32>,
}

impl PageLinks {
    /// `base` is the request's absolute URL up to the path,
    /// e.g. `http://testserver/api/v0/learners/`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            params: Vec::new(),
            page_size: None,
        }
    }

    /// Append one query parameter to every generated link.
    pub fn param(&mut self, name: &str, value: impl Into<String>) {
        self.params.push((name.to_string(), value.into()));
    }

    /// Echo the client's explicit page size in every link.
    pub fn page_size(&mut self, page_size: u32) {
        self.page_size = Some(page_size);
    }

    fn page_url(&self, page: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.params {
            query.append_pair(name, value);
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
        if let Some(page_size) = self.page_size {
            query.append_pair("page_size", &page_size.to_string());
        }

        let query = query.finish();
        if query.is_empty() {
            self.base.clone()
        } else {
            format!("{}?{}", self.base, query)
        }
    }
}
