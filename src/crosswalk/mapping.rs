use serde::{Deserialize, Serialize};
use tracing::warn;

use super::target::{
    AccelDataResource, AccelDataUsage, AccelGeospatial, AccelPopulation, AccelTemporal,
    DataDownloadLink, ValueOther,
};
use crate::model::{
    DataDownload, DataResource, GeospatialDataResource, KeyDataset, PopulationDataResource,
    Spatial, Temporal, Vocab,
};
use crate::rollup::MeasuresRollup;

/// A field group dropped from the output because its paired lists disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswalkWarning {
    pub field: String,
    pub message: String,
}

/// Controlled terms first (`other = false`), then free-text terms.
pub fn merge_other(vocab: &Vocab) -> Vec<ValueOther> {
    let controlled = vocab.selected.iter().map(|value| ValueOther {
        value: value.clone(),
        other: false,
    });
    let other = vocab.other.iter().map(|value| ValueOther {
        value: value.clone(),
        other: true,
    });
    controlled.chain(other).collect()
}

fn drop_group(field: &str, message: String, warnings: &mut Vec<CrosswalkWarning>) {
    warn!("{}", message);
    warnings.push(CrosswalkWarning {
        field: field.to_string(),
        message,
    });
}

/// Zips two positional lists slot by slot. Slots blank on both sides are
/// skipped. When the lengths differ, or a slot is blank on one side only, the
/// whole group is dropped and a warning recorded.
pub fn pair_positional(
    field: &str,
    left: &[Option<String>],
    right: &[Option<String>],
    warnings: &mut Vec<CrosswalkWarning>,
) -> Vec<(String, String)> {
    if left.len() != right.len() {
        let message = format!(
            "{} has {} entries but its links have {}, dropping all of them",
            field,
            left.len(),
            right.len()
        );
        drop_group(field, message, warnings);
        return Vec::new();
    }

    let mut pairs = Vec::with_capacity(left.len());
    for (index, slot) in left.iter().zip(right.iter()).enumerate() {
        match slot {
            (Some(value), Some(link)) => pairs.push((value.clone(), link.clone())),
            (None, None) => {}
            _ => {
                let message = format!(
                    "{} entry {} is blank on one side only, dropping all of them",
                    field, index
                );
                drop_group(field, message, warnings);
                return Vec::new();
            }
        }
    }
    pairs
}

/// Subtype-specific blocks of the target document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtypeBlocks {
    pub geospatial: AccelGeospatial,
    pub temporal: AccelTemporal,
    pub data_resource: AccelDataResource,
    pub data_usage: AccelDataUsage,
    pub population: Option<AccelPopulation>,
}

fn data_download(download: &DataDownload, warnings: &mut Vec<CrosswalkWarning>) -> Vec<DataDownloadLink> {
    pair_positional("data_location", &download.data_location, &download.data_link, warnings)
        .into_iter()
        .map(|(location, link)| DataDownloadLink { location, link })
        .collect()
}

fn data_resource_block(data_resource: &DataResource) -> AccelDataResource {
    AccelDataResource {
        source_name: data_resource.source_name.clone(),
        update_frequency: merge_other(&data_resource.update_frequency),
        includes_citizen_collected: data_resource.includes_citizen_collected,
        has_api: data_resource.has_api,
        has_visualization_tool: data_resource.has_visualization_tool,
        ..AccelDataResource::default()
    }
}

fn data_usage_block(data_resource: &DataResource) -> AccelDataUsage {
    AccelDataUsage {
        intended_use: data_resource.intended_use.clone(),
        comments: data_resource.comments.clone(),
    }
}

fn apply_measures(block: &mut AccelDataResource, measures: &Vocab, rollup: &MeasuresRollup) {
    let terms: Vec<&String> = measures.terms().collect();
    let arrays = rollup.process(&terms);

    block.measures = merge_other(measures);
    block.measures_parent = arrays.measures_parents;
    block.measures_subcategory_major = arrays.measures_subcategories_major;
    block.measures_subcategory_minor = arrays.measures_subcategories_minor;
}

fn temporal_block(temporal: &Temporal) -> AccelTemporal {
    AccelTemporal {
        start_date: temporal.time_extent_start_yyyy.clone(),
        end_date: temporal.time_extent_end_yyyy.clone(),
        temporal_resolution: merge_other(&temporal.temporal_resolution),
        time_available_comment: temporal.time_available_comment.clone(),
    }
}

fn geospatial_block(spatial: &Spatial, geographic_feature: &Vocab) -> AccelGeospatial {
    AccelGeospatial {
        spatial_resolution: merge_other(&spatial.spatial_resolution),
        spatial_coverage: merge_other(&spatial.spatial_coverage),
        spatial_bounding_box: spatial.spatial_bounding_box.clone(),
        geometry_type: spatial.geometry_type.clone(),
        geometry_source: merge_other(&spatial.geometry_source),
        model_methods: merge_other(&spatial.model_methods),
        geographic_feature: merge_other(geographic_feature),
    }
}

pub fn from_key_dataset(
    key_dataset: &KeyDataset,
    warnings: &mut Vec<CrosswalkWarning>,
) -> SubtypeBlocks {
    let mut data_resource = data_resource_block(&key_dataset.data_resource);
    data_resource.exposure_media = key_dataset.exposure_media.clone();
    data_resource.measurement_method = merge_other(&key_dataset.measurement_method);
    data_resource.data_formats = key_dataset.data_formats.clone();
    data_resource.data_download = data_download(&key_dataset.download, warnings);

    SubtypeBlocks {
        geospatial: geospatial_block(&key_dataset.spatial, &key_dataset.geographic_feature),
        temporal: temporal_block(&key_dataset.temporal),
        data_resource,
        data_usage: data_usage_block(&key_dataset.data_resource),
        population: None,
    }
}

pub fn from_geospatial(
    geo: &GeospatialDataResource,
    rollup: &MeasuresRollup,
    warnings: &mut Vec<CrosswalkWarning>,
) -> SubtypeBlocks {
    let mut data_resource = data_resource_block(&geo.data_resource);
    apply_measures(&mut data_resource, &geo.measures, rollup);
    data_resource.exposure_media = geo.exposure_media.clone();
    data_resource.measurement_method = merge_other(&geo.measurement_method);
    data_resource.data_formats = geo.data_formats.clone();
    data_resource.data_download = data_download(&geo.download, warnings);

    SubtypeBlocks {
        geospatial: geospatial_block(&geo.spatial, &geo.geographic_feature),
        temporal: temporal_block(&geo.temporal),
        data_resource,
        data_usage: data_usage_block(&geo.data_resource),
        population: None,
    }
}

pub fn from_population(
    pop: &PopulationDataResource,
    rollup: &MeasuresRollup,
    warnings: &mut Vec<CrosswalkWarning>,
) -> SubtypeBlocks {
    let mut data_resource = data_resource_block(&pop.data_resource);
    apply_measures(&mut data_resource, &pop.measures, rollup);
    data_resource.exposure_media = pop.exposure_media.clone();
    data_resource.data_formats = pop.data_formats.clone();
    data_resource.data_download = data_download(&pop.download, warnings);

    let population = AccelPopulation {
        population_studied: merge_other(&pop.population_studied),
        biospecimens: pop.biospecimens,
        biospecimens_type: pop.biospecimens_type.clone(),
        linkable_encounters: pop.linkable_encounters,
        individual_level: pop.individual_level,
    };

    SubtypeBlocks {
        geospatial: geospatial_block(&pop.spatial, &Vocab::default()),
        temporal: temporal_block(&pop.temporal),
        data_resource,
        data_usage: data_usage_block(&pop.data_resource),
        population: Some(population),
    }
}
