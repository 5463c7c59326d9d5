//! Contributor (`contrib-group`) construction.
//!
//! Each author becomes a `contrib` element. Affiliations are resolved
//! through the article's [`AffiliationTable`] while authors are walked, so
//! the table is complete once the group is built and can then emit the
//! `aff` elements.

use crate::affiliations::AffiliationTable;
use crate::records::{non_empty, strip_tags, Author};
use crate::tree::Element;

/// Builds the `contrib-group`, populating `affiliations` along the way.
///
/// Returns `None` when there are no authors.
pub fn build_contrib_group(
    authors: &[Author],
    locale: Option<&str>,
    affiliations: &mut AffiliationTable,
) -> Option<Element> {
    if authors.is_empty() {
        return None;
    }

    let mut group = Element::new("contrib-group");
    for author in authors {
        group.push(build_contrib(author, locale, affiliations));
    }
    Some(group)
}

/// Builds a single `contrib` element.
///
/// Child order: name, uri, contrib-id, email, xref, role, bio, address.
pub fn build_contrib(
    author: &Author,
    locale: Option<&str>,
    affiliations: &mut AffiliationTable,
) -> Element {
    let tokens = resolve_affiliation_tokens(author, locale, affiliations);

    let mut contrib = Element::new("contrib").attr("contrib-type", "author");
    contrib.push_opt(build_name(author, locale));
    contrib.push_text_opt("uri", author.url.as_deref());

    if let Some(orcid) = non_empty(author.orcid.as_deref()) {
        contrib.push(
            Element::with_text("contrib-id", orcid)
                .attr("contrib-id-type", "orcid")
                .attr(
                    "authenticated",
                    if author.orcid_verified { "true" } else { "false" },
                ),
        );
    }

    contrib.push_text_opt("email", author.email.as_deref());

    for token in tokens {
        contrib.push(Element::new("xref").attr("ref-type", "aff").attr("rid", token));
    }

    contrib.push(Element::with_text("role", "Author"));

    if let Some(bio) = author
        .biography
        .get_opt(locale)
        .and_then(strip_tags)
    {
        contrib.push(Element::new("bio").child(Element::with_text("p", bio)));
    }

    if let Some(country) = non_empty(author.country.as_deref()) {
        contrib.push(Element::new("address").child(Element::with_text("country", country)));
    }

    contrib
}

/// Resolves the author's affiliations to tokens, in declaration order.
///
/// Affiliations without a name in `locale` are skipped. An author naming
/// the same institution twice references it once.
fn resolve_affiliation_tokens(
    author: &Author,
    locale: Option<&str>,
    affiliations: &mut AffiliationTable,
) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for affiliation in &author.affiliations {
        let Some(name) = affiliation.name.get_opt(locale) else {
            continue;
        };
        let token = affiliations.resolve(name, affiliation.ror());
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Builds the `name` element.
///
/// A given name without a family name is written with
/// `name-style="given-only"`; with neither, no element is built.
fn build_name(author: &Author, locale: Option<&str>) -> Option<Element> {
    let surname = author.family_name.get_opt(locale);
    let given = author.given_name.get_opt(locale);

    match (surname, given) {
        (Some(surname), given) => {
            let mut name = Element::new("name").child(Element::with_text("surname", surname));
            name.push_text_opt("given-names", given);
            Some(name)
        }
        (None, Some(given)) => Some(
            Element::new("name")
                .attr("name-style", "given-only")
                .child(Element::with_text("given-names", given)),
        ),
        (None, None) => None,
    }
}
