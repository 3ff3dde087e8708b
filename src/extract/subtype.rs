use serde_json::Value;

use super::jsonld::Stanza;
use crate::error::ExtractError;
use crate::model::{
    DataDownload, DataResource, GeoTool, GeospatialDataResource, KeyDataset,
    PopulationDataResource, ResourceDetail, ResourceKind, Spatial, Temporal, Vocab,
};

pub const DATA_RESOURCE: &str = "DATA RESOURCE";
const DATA_DOWNLOAD: &str = "Data Download";

pub fn extract_detail(document: &Value, kind: ResourceKind) -> Result<ResourceDetail, ExtractError> {
    Ok(match kind {
        ResourceKind::Geoexposure => ResourceDetail::Geoexposure(extract_geoexposure(document)?),
        ResourceKind::Population => ResourceDetail::Population(extract_population(document)?),
        ResourceKind::Tool => ResourceDetail::Tool(extract_tool(document)?),
        ResourceKind::KeyDataset => ResourceDetail::KeyDataset(extract_key_dataset(document)?),
    })
}

fn data_resource(document: &Value) -> Result<DataResource, ExtractError> {
    let stanza = Stanza::required(document, DATA_RESOURCE)?;

    // update_frequency_other is a single free-text literal, not a list
    let update_frequency = Vocab::new(
        stanza.literals("update_frequency")?,
        stanza.literal("update_frequency_other")?.into_iter().collect(),
    );

    Ok(DataResource {
        comments: stanza.literal("Comments")?,
        intended_use: stanza.literal("intended_use")?,
        source_name: stanza.literals("source_name")?,
        includes_citizen_collected: stanza.boolean("includes_citizen_collected")?,
        update_frequency,
        has_api: stanza.boolean("has_api")?,
        has_visualization_tool: stanza.boolean("has_visualization_tool")?,
    })
}

fn temporal(stanza: &Stanza<'_>) -> Result<Temporal, ExtractError> {
    Ok(Temporal {
        time_extent_start_yyyy: stanza.year("time_extent_start")?,
        time_extent_end_yyyy: stanza.year("time_extent_end")?,
        time_available_comment: stanza.literal("time_available_comment")?,
        temporal_resolution: stanza.vocab("temporal_resolution", "temporal_resolution_other")?,
    })
}

fn spatial(stanza: &Stanza<'_>) -> Result<Spatial, ExtractError> {
    Ok(Spatial {
        spatial_resolution: stanza.vocab("spatial_resolution", "spatial_resolution_other")?,
        spatial_coverage: stanza.vocab("spatial_coverage", "spatial_coverage_other")?,
        spatial_bounding_box: stanza.literals("spatial_bounding_box")?,
        geometry_type: stanza.literals("geometry_type")?,
        geometry_source: stanza.vocab("geometry_source", "geometry_source_other")?,
        model_methods: stanza.vocab("model_methods", "model_methods_other")?,
    })
}

fn download(stanza: &Stanza<'_>) -> Result<DataDownload, ExtractError> {
    match stanza.child(DATA_DOWNLOAD)? {
        Some(dl) => Ok(DataDownload {
            data_location: dl.positional_literals("data_location")?,
            data_link: dl.positional_references("data_link")?,
        }),
        None => Ok(DataDownload::default()),
    }
}

pub fn extract_geoexposure(document: &Value) -> Result<GeospatialDataResource, ExtractError> {
    let data_resource = data_resource(document)?;
    let geo = Stanza::required(document, ResourceKind::Geoexposure.marker())?;

    Ok(GeospatialDataResource {
        data_resource,
        measures: geo.vocab("measures", "measures_other")?,
        measurement_method: geo.vocab("measurement_method", "measurement_method_other")?,
        temporal: temporal(&geo)?,
        spatial: spatial(&geo)?,
        exposure_media: geo.literals("exposure_media")?,
        geographic_feature: geo.vocab("geographic_feature", "geographic_feature_other")?,
        data_formats: geo.literals("data_formats")?,
        download: download(&geo)?,
    })
}

pub fn extract_population(document: &Value) -> Result<PopulationDataResource, ExtractError> {
    let data_resource = data_resource(document)?;
    let pop = Stanza::required(document, ResourceKind::Population.marker())?;

    Ok(PopulationDataResource {
        data_resource,
        exposure_media: pop.literals("exposure_media")?,
        // "measures_others" is the template's spelling for this stanza
        measures: pop.vocab("measures", "measures_others")?,
        temporal: temporal(&pop)?,
        spatial: spatial(&pop)?,
        population_studied: pop.vocab("population_studied", "population_studied_other")?,
        biospecimens: pop.boolean("biospecimens")?,
        biospecimens_type: pop.literals("biospecimens_type")?,
        linkable_encounters: pop.boolean("linkable_encounters")?,
        individual_level: pop.boolean("individual_level")?,
        data_formats: pop.literals("data_formats")?,
        download: download(&pop)?,
    })
}

pub fn extract_tool(document: &Value) -> Result<GeoTool, ExtractError> {
    let tool = Stanza::required(document, ResourceKind::Tool.marker())?;

    Ok(GeoTool {
        tool_type: tool.vocab("tool_type", "tool_type_other")?,
        operating_system: tool.vocab("operating_system", "operating_system_other")?,
        languages: tool.vocab("languages", "languages_other")?,
        license_type: tool.vocab("license_type", "license_type_other")?,
        suggested_audience: tool.literals("suggested_audience")?,
        is_open: tool.boolean("is_open")?,
        intended_use: tool.literal("intended_use")?,
    })
}

pub fn extract_key_dataset(document: &Value) -> Result<KeyDataset, ExtractError> {
    let data_resource = data_resource(document)?;
    let key = Stanza::required(document, ResourceKind::KeyDataset.marker())?;

    Ok(KeyDataset {
        data_resource,
        measurement_method: key.vocab("measurement_method", "measurement_method_other")?,
        temporal: temporal(&key)?,
        spatial: spatial(&key)?,
        exposure_media: key.literals("exposure_media")?,
        geographic_feature: key.vocab("geographic_feature", "geographic_feature_other")?,
        data_formats: key.literals("data_formats")?,
        download: download(&key)?,
    })
}
