use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Raw volumes listing as returned by the API. `items` is absent
/// entirely when a query has no results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub small_thumbnail: Option<String>,
}

/// Canonical lookup record distilled from the API's heterogeneous
/// volume shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookLookup {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub published_date: Option<String>,
    /// ISBN-13 when present, otherwise ISBN-10.
    pub isbn: Option<String>,
    pub thumbnail: Option<String>,
    pub info_link: Option<String>,
}

/// Upgrade an insecure URL to https. Image and info links from the API
/// still come back with http scheme for older volumes.
fn to_https(url: String) -> String {
    url.replacen("http://", "https://", 1)
}

fn find_identifier(identifiers: &[IndustryIdentifier], kind: &str) -> Option<String> {
    identifiers
        .iter()
        .find(|x| x.kind == kind)
        .map(|x| x.identifier.clone())
}

impl From<Volume> for BookLookup {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;

        let isbn13 = find_identifier(&info.industry_identifiers, "ISBN_13");
        let isbn10 = find_identifier(&info.industry_identifiers, "ISBN_10");

        let thumbnail = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail))
            .map(to_https);

        Self {
            id: volume.id,
            title: info
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            author: info.authors.into_iter().next().filter(|a| !a.is_empty()),
            published_date: info.published_date.filter(|d| !d.is_empty()),
            isbn: isbn13.or(isbn10),
            thumbnail,
            info_link: info.info_link.or(volume.self_link).map(to_https),
        }
    }
}
