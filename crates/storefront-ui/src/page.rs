//! Page detection.

/// The storefront's pages, identified by the last path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Index,
    About,
    Contact,
    Shop,
    Cart,
    /// Anything else. Gets the hero effects if the page has slides.
    Other,
}

impl Page {
    /// Identify a page from a URL path such as `/store/cart.html`.
    pub fn from_path(path: &str) -> Self {
        let segment = path.rsplit('/').next().unwrap_or_default();
        match segment {
            "" | "index" | "index.html" => Page::Index,
            "about.html" => Page::About,
            "contact.html" => Page::Contact,
            "shop.html" => Page::Shop,
            "cart.html" => Page::Cart,
            _ => Page::Other,
        }
    }

    /// Name used in log context.
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::About => "about",
            Page::Contact => "contact",
            Page::Shop => "shop",
            Page::Cart => "cart",
            Page::Other => "other",
        }
    }

    /// Whether the page renders the full cart.
    pub fn has_cart_view(&self) -> bool {
        matches!(self, Page::Cart)
    }

    /// Whether the page runs the hero rotation. `has_slides` says whether
    /// any slide elements were found.
    pub fn runs_hero(&self, has_slides: bool) -> bool {
        match self {
            Page::Index => true,
            Page::Other => has_slides,
            _ => false,
        }
    }
}
