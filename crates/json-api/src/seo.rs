//! Structured-data (JSON-LD) and Open Graph payload builders.
//!
//! Emitted inside page view models so the consuming frontend can inline
//! them verbatim.

use serde_json::{Value, json};

use crate::{config::site::SiteConfig, views::PromoView};

/// `Organization` schema for the site itself.
pub(crate) fn organization(site: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.site_name,
        "url": site.site_url,
        "logo": site.absolute("/logo.png"),
    })
}

/// `ItemList` schema over a list of promocode cards.
pub(crate) fn promo_item_list(site: &SiteConfig, promos: &[PromoView]) -> Value {
    let elements: Vec<Value> = promos
        .iter()
        .enumerate()
        .map(|(index, promo)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": promo.title,
                "url": site.absolute(&format!("/promo/{}", promo.id)),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "numberOfItems": elements.len(),
        "itemListElement": elements,
    })
}

/// `BreadcrumbList` schema from `(label, path)` pairs, root first.
pub(crate) fn breadcrumbs(site: &SiteConfig, trail: &[(&str, &str)]) -> Value {
    let elements: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(index, (label, path))| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": label,
                "item": site.absolute(path),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// Open Graph fields for a page.
pub(crate) fn open_graph(site: &SiteConfig, title: &str, description: &str, path: &str) -> Value {
    json!({
        "og:site_name": site.site_name,
        "og:title": title,
        "og:description": description,
        "og:url": site.absolute(path),
        "og:type": "website",
    })
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::test_site;

    use super::*;

    #[test]
    fn breadcrumbs_are_positioned_from_one() {
        let site = test_site();

        let crumbs = breadcrumbs(&site, &[("Home", "/"), ("Stores", "/stores")]);

        let elements = crumbs
            .get("itemListElement")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements.first().and_then(|e| e.get("position")),
            Some(&json!(1))
        );
        assert_eq!(
            elements.last().and_then(|e| e.get("item")),
            Some(&json!("https://boltpromo.test/stores"))
        );
    }

    #[test]
    fn organization_carries_site_identity() {
        let site = test_site();

        let org = organization(&site);

        assert_eq!(org.get("name"), Some(&json!("BoltPromo")));
        assert_eq!(org.get("url"), Some(&json!("https://boltpromo.test")));
    }
}
