//! Target publishing schema documents.

use serde::{Deserialize, Serialize};

/// One vocabulary term; `other` marks free text rather than a controlled term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueOther {
    pub value: String,
    pub other: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub citation: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDownloadLink {
    pub location: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl LinkedText {
    pub fn from_parts(text: Option<String>, link: Option<String>) -> Option<Self> {
        if text.is_none() && link.is_none() {
            None
        } else {
            Some(Self { text, link })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelDocument {
    pub schema_version: String,
    pub submission: AccelSubmission,
    pub technical_metadata: AccelTechnicalMetadata,
    pub data: AccelData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelSubmission {
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
    pub submitter_comment: String,
    pub template_source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelTechnicalMetadata {
    pub original_source: String,
    pub original_source_identifier: String,
    pub original_source_link: String,
    /// Ingest run the document was produced by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_identifier: Option<String>,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelData {
    pub program: AccelProgram,
    pub project: AccelProject,
    pub resource: AccelResource,
    pub data_resource: AccelDataResource,
    pub data_usage: AccelDataUsage,
    pub geospatial: AccelGeospatial,
    pub temporal: AccelTemporal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<AccelPopulation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelProgram {
    pub code: String,
    pub name: String,
    pub preferred_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelProject {
    pub code: String,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub project_sponsor: Vec<ValueOther>,
    pub project_sponsor_type: Vec<ValueOther>,
    pub project_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelResource {
    pub code: String,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub resource_type: Option<String>,
    pub resource_url: Option<String>,
    pub description: Option<String>,
    pub domain: Vec<ValueOther>,
    pub access_type: Vec<String>,
    pub keywords: Vec<String>,
    pub publications: Vec<Publication>,
    pub payment_required: Option<bool>,
    pub is_static: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_reference: Option<LinkedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_use_agreement: Option<LinkedText>,
    pub created_datetime: Option<String>,
    pub updated_datetime: Option<String>,
    pub verification_datetime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelDataResource {
    pub source_name: Vec<String>,
    pub update_frequency: Vec<ValueOther>,
    pub includes_citizen_collected: Option<bool>,
    pub has_api: Option<bool>,
    pub has_visualization_tool: Option<bool>,
    pub exposure_media: Vec<String>,
    pub measures: Vec<ValueOther>,
    pub measures_parent: Vec<String>,
    pub measures_subcategory_major: Vec<String>,
    pub measures_subcategory_minor: Vec<String>,
    pub measurement_method: Vec<ValueOther>,
    pub data_formats: Vec<String>,
    pub data_download: Vec<DataDownloadLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelDataUsage {
    pub intended_use: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelGeospatial {
    pub spatial_resolution: Vec<ValueOther>,
    pub spatial_coverage: Vec<ValueOther>,
    pub spatial_bounding_box: Vec<String>,
    pub geometry_type: Vec<String>,
    pub geometry_source: Vec<ValueOther>,
    pub model_methods: Vec<ValueOther>,
    pub geographic_feature: Vec<ValueOther>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelTemporal {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub temporal_resolution: Vec<ValueOther>,
    pub time_available_comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelPopulation {
    pub population_studied: Vec<ValueOther>,
    pub biospecimens: Option<bool>,
    pub biospecimens_type: Vec<String>,
    pub linkable_encounters: Option<bool>,
    pub individual_level: Option<bool>,
}
