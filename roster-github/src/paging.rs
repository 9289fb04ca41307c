//! Transparent pagination.

/// Page size requested from list endpoints (GitHub's maximum).
pub const PER_PAGE: usize = 100;

/// Fetch pages starting at 1 until a page shorter than `per_page` arrives.
///
/// Any error aborts the whole listing; callers never see a partial result.
pub fn drain_pages<T, E, F>(per_page: usize, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Result<Vec<T>, E>,
{
    let mut all = Vec::new();
    let mut page = 1;
    loop {
        let items = fetch(page)?;
        let len = items.len();
        all.extend(items);
        if len < per_page {
            return Ok(all);
        }
        page += 1;
    }
}
