//! Translate a raw doc JSON object into a [`Doc`].
//!
//! Four independent passes over the same JSON: delivery-category flags, the
//! PNX field projection, delivery links, and holdings. The PNX section
//! backing each named field follows the most field-complete mapping the
//! upstream API documents (control/display/addata/facets/sort/search).

use serde_json::Value;

use crate::response::{Doc, Holding, Link};

const LINK_TYPE_PREFIX: &str = "http://purl.org/pnx/linkType/";

/// Translate one entry of the response's `docs` array.
pub fn translate_doc(json: &Value) -> Doc {
    let mut doc = Doc::new(json.clone());
    determine_types(&mut doc);
    process_pnx(&mut doc);
    process_links(&mut doc);
    process_holdings(&mut doc);
    doc
}

/// Set the electronic/digital/physical flags from `delivery.deliveryCategory`.
/// The flags are independent; a doc may carry any combination.
fn determine_types(doc: &mut Doc) {
    let categories: Vec<&str> = doc
        .raw
        .pointer("/delivery/deliveryCategory")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    doc.is_electronic = categories.contains(&"Alma-E");
    doc.is_digital = categories.contains(&"Alma-D");
    doc.is_physical = categories.contains(&"Alma-P");
}

fn process_pnx(doc: &mut Doc) {
    let json = &doc.raw;

    doc.id = first(json, "control", "recordid");
    doc.title = first(json, "display", "title");
    doc.date = first(json, "display", "creationdate");
    doc.publisher = first(json, "addata", "pub");
    doc.abstract_text = first(json, "addata", "abstract");
    doc.record_type = first(json, "display", "type");
    doc.display_subject = first(json, "display", "subject");
    doc.format = first(json, "display", "format");
    doc.creator = first(json, "display", "creator");
    doc.frbr_group_id = first(json, "facets", "frbrgroupid");

    doc.isbn = list(json, "search", "isbn");
    doc.issn = list(json, "search", "issn");
    doc.oclcid = list(json, "addata", "oclcid");
    doc.description = list(json, "display", "description");
    doc.subjects = list(json, "facets", "topic");
    doc.genres = list(json, "facets", "genre");
    doc.languages = list(json, "facets", "language");
    doc.contributors = list(json, "display", "contributor");
    doc.creator_facet = list(json, "facets", "creatorcontrib");
    doc.collection_facet = list(json, "facets", "collection");
    doc.resourcetype_facet = list(json, "facets", "rsrctype");
    doc.is_part_of = list(json, "display", "ispartof");
    doc.journal_title = list(json, "addata", "jtitle");

    doc.sort_creator = first(json, "sort", "author");
    doc.sort_date = first(json, "sort", "creationdate");
    doc.sort_title = first(json, "sort", "title");

    // Open access is signalled by the key's presence, not its value.
    doc.is_open_access = has(json, "addata", "oa");
}

/// Group `delivery.link` entries by short type key, skipping entries with an
/// empty URL, and surface the well-known groups as dedicated fields.
fn process_links(doc: &mut Doc) {
    let entries = doc
        .raw
        .pointer("/delivery/link")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    for entry in &entries {
        let url = string_field(entry, "linkURL");
        if url.is_empty() {
            continue;
        }
        let link_type = string_field(entry, "linkType");
        let key = link_type
            .strip_prefix(LINK_TYPE_PREFIX)
            .unwrap_or(&link_type)
            .to_string();
        let label = string_field(entry, "displayLabel");
        let link = Link::new(label, url, key.clone());
        match doc.link_groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, links)) => links.push(link),
            None => doc.link_groups.push((key, vec![link])),
        }
    }

    doc.link_to_resource = doc.links_for("linktorsrc").to_vec();
    doc.openurl = doc.links_for("openurl").to_vec();
    doc.openurl_fulltext = doc.links_for("openurlfulltext").to_vec();
    doc.thumbnail = doc.links_for("thumbnail").to_vec();
}

/// Map `delivery.holding` entries to [`Holding`] records, field for field.
/// A doc without a holding list (e.g. a Primo Central record) keeps an empty
/// holdings list.
fn process_holdings(doc: &mut Doc) {
    let Some(entries) = doc
        .raw
        .pointer("/delivery/holding")
        .and_then(Value::as_array)
        .cloned()
    else {
        return;
    };
    doc.holdings = entries
        .iter()
        .map(|entry| Holding {
            ils_id: string_field(entry, "ilsApiId"),
            library_code: string_field(entry, "libraryCode"),
            location_code: string_field(entry, "subLocationCode"),
            location_display: string_field(entry, "subLocation"),
            call_number: string_field(entry, "callNumber"),
            availability_status: string_field(entry, "availabilityStatus"),
        })
        .collect();
}

/// First element of a PNX list field, or `None` when the field is absent or
/// empty.
fn first(json: &Value, section: &str, field: &str) -> Option<String> {
    match json.get("pnx")?.get(section)?.get(field)? {
        Value::Array(items) => items.first().map(crate::pnx::value_to_string),
        _ => None,
    }
}

/// Full PNX list field, or empty when absent.
fn list(json: &Value, section: &str, field: &str) -> Vec<String> {
    json.get("pnx")
        .and_then(|p| p.get(section))
        .and_then(|s| s.get(field))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(crate::pnx::value_to_string).collect())
        .unwrap_or_default()
}

fn has(json: &Value, section: &str, field: &str) -> bool {
    json.get("pnx")
        .and_then(|p| p.get(section))
        .and_then(|s| s.get(field))
        .is_some()
}

fn string_field(entry: &Value, field: &str) -> String {
    entry
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
