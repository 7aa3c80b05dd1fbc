/// Page cursor shared by the paged library screens.
///
/// Pages are 1-based. The page count is `total / page_size` with integer
/// division, so a trailing partial page cannot be reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
  page: u32,
  total_pages: u32,
  page_size: u32,
}

impl Pagination {
  pub fn new(page_size: u32) -> Self {
    Pagination {
      page: 1,
      total_pages: 0,
      page_size,
    }
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn total_pages(&self) -> u32 {
    self.total_pages
  }

  pub fn limit(&self) -> u32 {
    self.page_size
  }

  pub fn offset(&self) -> u32 {
    (self.page - 1) * self.page_size
  }

  pub fn update_total(&mut self, total: u32) {
    self.total_pages = total / self.page_size;
  }

  pub fn next(&mut self) {
    if self.page < self.total_pages {
      self.page += 1;
    }
  }

  pub fn previous(&mut self) {
    if self.page > 1 {
      self.page -= 1;
    }
  }

  pub fn reset(&mut self) {
    self.page = 1;
  }

  pub fn prompt(&self, title: &str) -> String {
    format!("{} {}/{}", title, self.page, self.total_pages)
  }
}
