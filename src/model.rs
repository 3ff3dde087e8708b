//! Intermediate model populated from a CEDAR JSON-LD document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionInfo {
    pub curator_name: Option<String>,
    pub curator_email: Option<String>,
    pub curation_comment: String,
    pub template_source: String,
    pub submit_location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Never empty: falls back to the program name.
    pub accession: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub code: String,
    pub accession: String,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub sponsor: Vocab,
    pub sponsor_type: Vocab,
    pub url: Option<String>,
}

impl Project {
    pub fn normalize_identifiers(&mut self) {
        self.code = self.code.trim().to_string();
        self.id = self.id.trim().to_string();
        if self.accession.trim().is_empty() {
            self.accession = self.code.clone();
        } else {
            self.accession = self.accession.trim().to_string();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Never empty: a v4 UUID is generated when the source has none.
    pub id: String,
    pub resource_type: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub domain: Vocab,
    pub access_type: Vec<String>,
    // Left as the raw CEDAR strings.
    pub created_datetime: Option<String>,
    pub updated_datetime: Option<String>,
    pub verification_datetime: Option<String>,
    /// Positionally paired with `publication_links`; blank slots are `None`.
    pub publications: Vec<Option<String>>,
    pub publication_links: Vec<Option<String>>,
    pub keywords: Vec<String>,
    pub payment_required: Option<bool>,
    pub reference: Option<String>,
    pub reference_link: Option<String>,
    pub use_agreement: Option<String>,
    pub use_agreement_link: Option<String>,
    pub is_static: Option<bool>,
}

/// A controlled-vocabulary field together with its free-text "other" companion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocab {
    pub selected: Vec<String>,
    pub other: Vec<String>,
}

impl Vocab {
    pub fn new(selected: Vec<String>, other: Vec<String>) -> Self {
        Self { selected, other }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.other.is_empty()
    }

    /// All terms, controlled first.
    pub fn terms(&self) -> impl Iterator<Item = &String> {
        self.selected.iter().chain(self.other.iter())
    }
}

/// Fields of the shared `DATA RESOURCE` stanza.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResource {
    pub comments: Option<String>,
    pub intended_use: Option<String>,
    pub source_name: Vec<String>,
    pub includes_citizen_collected: Option<bool>,
    pub update_frequency: Vocab,
    pub has_api: Option<bool>,
    pub has_visualization_tool: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Temporal {
    pub time_extent_start_yyyy: Option<String>,
    pub time_extent_end_yyyy: Option<String>,
    pub time_available_comment: Option<String>,
    pub temporal_resolution: Vocab,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spatial {
    pub spatial_resolution: Vocab,
    pub spatial_coverage: Vocab,
    pub spatial_bounding_box: Vec<String>,
    pub geometry_type: Vec<String>,
    pub geometry_source: Vocab,
    pub model_methods: Vocab,
}

/// `data_location[i]` and `data_link[i]` describe the same download; blank
/// slots are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataDownload {
    pub data_location: Vec<Option<String>>,
    pub data_link: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeospatialDataResource {
    pub data_resource: DataResource,
    pub measures: Vocab,
    pub measurement_method: Vocab,
    pub temporal: Temporal,
    pub spatial: Spatial,
    pub exposure_media: Vec<String>,
    pub geographic_feature: Vocab,
    pub data_formats: Vec<String>,
    pub download: DataDownload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationDataResource {
    pub data_resource: DataResource,
    pub exposure_media: Vec<String>,
    pub measures: Vocab,
    pub temporal: Temporal,
    pub spatial: Spatial,
    pub population_studied: Vocab,
    pub biospecimens: Option<bool>,
    pub biospecimens_type: Vec<String>,
    pub linkable_encounters: Option<bool>,
    pub individual_level: Option<bool>,
    pub data_formats: Vec<String>,
    pub download: DataDownload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoTool {
    pub tool_type: Vocab,
    pub operating_system: Vocab,
    pub languages: Vocab,
    pub license_type: Vocab,
    pub suggested_audience: Vec<String>,
    pub is_open: Option<bool>,
    pub intended_use: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyDataset {
    pub data_resource: DataResource,
    pub measurement_method: Vocab,
    pub temporal: Temporal,
    pub spatial: Spatial,
    pub exposure_media: Vec<String>,
    pub geographic_feature: Vocab,
    pub data_formats: Vec<String>,
    pub download: DataDownload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Geoexposure,
    Population,
    Tool,
    KeyDataset,
}

impl ResourceKind {
    /// Detection priority: the first marker present in a document wins.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Geoexposure,
        ResourceKind::Population,
        ResourceKind::Tool,
        ResourceKind::KeyDataset,
    ];

    /// Top-level stanza that marks a document as this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            ResourceKind::Geoexposure => "GEOEXPOSURE DATA",
            // Misspelled upstream; the CEDAR template uses this exact key.
            ResourceKind::Population => "POPULATION DATA RESORCE",
            ResourceKind::Tool => "TOOL RESOURCE",
            ResourceKind::KeyDataset => "KEY DATASETS DATA",
        }
    }

    pub fn section_name(&self) -> &'static str {
        match self {
            ResourceKind::Geoexposure => "geospatial_data_resource",
            ResourceKind::Population => "population_data_resource",
            ResourceKind::Tool => "geospatial_tool_resource",
            ResourceKind::KeyDataset => "key_dataset",
        }
    }

    pub fn detect(document: &Value) -> Option<ResourceKind> {
        let body = document.as_object()?;
        Self::ALL
            .into_iter()
            .find(|kind| body.contains_key(kind.marker()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceDetail {
    Geoexposure(GeospatialDataResource),
    Population(PopulationDataResource),
    Tool(GeoTool),
    KeyDataset(KeyDataset),
}

impl ResourceDetail {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceDetail::Geoexposure(_) => ResourceKind::Geoexposure,
            ResourceDetail::Population(_) => ResourceKind::Population,
            ResourceDetail::Tool(_) => ResourceKind::Tool,
            ResourceDetail::KeyDataset(_) => ResourceKind::KeyDataset,
        }
    }
}

/// Sections extracted from one document. A section is `None` when its phase
/// failed or was never attempted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CedarModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ResourceDetail>,
}

impl CedarModel {
    /// Names of the populated sections, in extraction order.
    pub fn sections(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.submission.is_some() {
            names.push("submission");
        }
        if self.program.is_some() {
            names.push("program");
        }
        if self.project.is_some() {
            names.push("project");
        }
        if self.resource.is_some() {
            names.push("resource");
        }
        if let Some(detail) = &self.detail {
            names.push(detail.kind().section_name());
        }
        names
    }
}
