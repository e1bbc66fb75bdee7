//! Catalog view: the product gallery and the page body it lives in.
//!
//! The gallery has no state of its own. Each product card posts its id to
//! `/cart/add`; everything else here is display data.

use askama::Template;
use askama_web::WebTemplate;
use mystik_canopy_core::{Catalog, Page, Product};

/// Product display data for templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub sizes: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            sizes: product.sizes_label(),
        }
    }
}

/// Gallery cards for every product, in catalog order.
#[must_use]
pub fn product_views(catalog: &Catalog) -> Vec<ProductView> {
    catalog.products().iter().map(ProductView::from).collect()
}

/// Main content fragment template (for HTMX page switches).
#[derive(Template, WebTemplate)]
#[template(path = "partials/main.html")]
pub struct MainTemplate {
    pub is_about: bool,
    pub products: Vec<ProductView>,
}

impl MainTemplate {
    /// Body for `page`. The product list is only built for the gallery.
    #[must_use]
    pub fn for_page(page: Page, catalog: &Catalog) -> Self {
        let is_about = page == Page::About;
        Self {
            is_about,
            products: if is_about {
                Vec::new()
            } else {
                product_views(catalog)
            },
        }
    }
}
