#![allow(dead_code)]

use serde_json::{json, Value};

pub fn submitter() -> Value {
    json!({
        "submitter_name": {"@value": "Jane Curator"},
        "submitter_email": {"@value": "jane@example.org"},
        "comment": {"@value": "Reviewed."}
    })
}

pub fn program() -> Value {
    json!({
        "@id": "PRG-1",
        "Program_name": {"@value": "Climate and Health"}
    })
}

pub fn project() -> Value {
    json!({
        "ProjecCode": {"@value": "PRJ-7"},
        "project_name": {"@value": "Heat Exposure Project"},
        "project_short_name": {"@value": "HEP"},
        "project_sponsor": [{"@value": "NIEHS"}, {"@value": null}],
        "project_sponsor_other": [{"@value": "City Council"}],
        "project_sponsor_type": [{"@value": "Government"}],
        "project_sponsor_type_other": [{"@value": ""}],
        "project_url": {"@id": "https://example.org/hep"}
    })
}

pub fn resource() -> Value {
    json!({
        "resource_GUID": {"@value": "R-100"},
        "resource_type": {"@value": "data_resource"},
        "resource_name": {"@value": "Daily Temperature"},
        "resource_short_name": {"@value": "DT"},
        "resource_url": {"@id": "https://example.org/dt"},
        "resource_description": {"@value": "Gridded daily temperature."},
        "domain": [{"@value": "Climate"}],
        "domain_other": [{"@value": "Urban heat"}],
        "access_type": {"@value": "Open"},
        "date_verified": {"@value": "2024-01-02"},
        "Publication": {
            "publication_citation": [{"@value": "Doe et al. 2020"}],
            "publication_link": [{"@id": "https://doi.org/10.1/x"}]
        },
        "keywords": [{"@value": "temperature"}, {"@value": ""}, {"@value": "heat"}],
        "payment_required": {"@value": "No"},
        "Resource Reference_150": {
            "resource_reference": {"@value": "See the user guide"},
            "resource_reference_link": {"@id": "https://example.org/guide"}
        },
        "Resource Use Agreement_150": {
            "resource_use_agreement": {"@value": null},
            "resource_use_agreement_link": {}
        },
        "is_static": {"@value": "Yes"}
    })
}

pub fn data_resource() -> Value {
    json!({
        "Comments": {"@value": "Updated nightly."},
        "intended_use": {"@value": "Exposure assessment"},
        "source_name": [{"@value": "NOAA"}],
        "includes_citizen_collected": {"@value": "No"},
        "update_frequency": [{"@value": "Daily"}],
        "update_frequency_other": {"@value": "On request"},
        "has_api": {"@value": "Yes"},
        "has_visualization_tool": {"@value": "No"}
    })
}

pub fn geoexposure() -> Value {
    json!({
        "measures": [{"@value": "Air temperature"}],
        "measures_other": [{"@value": "Wet bulb globe"}],
        "measurement_method": [{"@value": "Satellite"}],
        "measurement_method_other": [],
        "time_extent_start": {"@value": "approximately 2015-2018"},
        "time_extent_end": {"@value": "unknown"},
        "time_available_comment": {"@value": "Gaps in 2016"},
        "temporal_resolution": [{"@value": "Daily"}],
        "temporal_resolution_other": [],
        "spatial_resolution": [{"@value": "1 km"}],
        "spatial_resolution_other": [],
        "spatial_coverage": [{"@value": "National"}],
        "spatial_coverage_other": [],
        "spatial_bounding_box": [{"@value": "-125,24,-66,49"}],
        "geometry_source": [{"@value": "Census"}],
        "geometry_source_other": [],
        "model_methods": [{"@value": "Kriging"}],
        "geometry_type": [{"@value": "Raster"}],
        "exposure_media": [{"@value": "Air"}],
        "geographic_feature": [{"@value": "Urban"}],
        "geographic_feature_other": [],
        "data_formats": [{"@value": "NetCDF"}],
        "Data Download": {
            "data_location": [{"@value": "Portal"}],
            "data_link": [{"@id": "https://example.org/download"}]
        }
    })
}

pub fn population() -> Value {
    json!({
        "exposure_media": [{"@value": "Water"}],
        "measures": [{"@value": "Asthma"}],
        "measures_others": [{"@value": "Wheeze"}],
        "time_extent_start": {"@value": "2001"},
        "time_extent_end": {"@value": "2010-12-31"},
        "time_available_comment": {"@value": null},
        "temporal_resolution": {"@value": "Annual"},
        "temporal_resolution_other": [],
        "spatial_resolution": {"@value": "County"},
        "spatial_resolution_other": [],
        "spatial_coverage": [{"@value": "State"}],
        "spatial_coverage_other": [],
        "geometry_type": [],
        "geometry_source": [],
        "geometry_source_other": [],
        "model_methods": [],
        "model_methods_other": [{"@value": "Survey weighting"}],
        "population_studied": [{"@value": "Children"}],
        "population_studied_other": [{"@value": "Farmworkers"}],
        "biospecimens_type": [],
        "data_formats": [{"@value": "CSV"}],
        "biospecimens": {"@value": "No"},
        "linkable_encounters": {"@value": "Yes"},
        "individual_level": {"@value": "no"},
        "Data Download": {
            "data_location": [{"@value": "Portal"}, {"@value": "FTP"}],
            "data_link": [{"@id": "https://example.org/portal"}]
        }
    })
}

pub fn key_dataset() -> Value {
    json!({
        "measurement_method": [{"@value": "Monitor"}],
        "measurement_method_other": [{"@value": "Low-cost sensor"}],
        "time_extent_start": {"@value": "1999"},
        "time_extent_end": {"@value": "2023"},
        "temporal_resolution": [{"@value": "Hourly"}],
        "spatial_resolution": [{"@value": "Point"}],
        "spatial_coverage": [{"@value": "National"}],
        "spatial_bounding_box": [],
        "geometry_type": [{"@value": "Point"}],
        "geometry_source": [],
        "model_methods": [],
        "exposure_media": [{"@value": "Air"}],
        "geographic_feature": [],
        "geographic_feature_other": [{"@value": "Ports"}],
        "data_formats": [{"@value": "CSV"}],
        "Data Download": {
            "data_location": [],
            "data_link": []
        }
    })
}

pub fn tool() -> Value {
    json!({
        "tool_type": [{"@value": "Library"}],
        "tool_type_other": [],
        "operating_system": [{"@value": "Linux"}, {"@value": "macOS"}],
        "operating_system_other": [],
        "languages": [{"@value": "R"}],
        "languages_other": [{"@value": "Julia"}],
        "license_type": [{"@value": "MIT"}],
        "license_type_other": [],
        "suggested_audience": [{"@value": "Researchers"}],
        "is_open": {"@value": "Yes"},
        "intended_use": {"@value": "Exposure modelling"}
    })
}

fn base() -> Value {
    json!({
        "@id": "https://repo.metadatacenter.org/template-instances/abc",
        "pav:createdOn": "2024-01-01T10:00:00-08:00",
        "pav:lastUpdatedOn": "2024-02-01T10:00:00-08:00",
        "SUBMITTER": submitter(),
        "PROGRAM": program(),
        "PROJECT": project(),
        "RESOURCE": resource()
    })
}

fn with(mut document: Value, stanzas: &[(&str, Value)]) -> Value {
    let body = document.as_object_mut().unwrap();
    for (key, value) in stanzas {
        body.insert(key.to_string(), value.clone());
    }
    document
}

pub fn geoexposure_document() -> Value {
    with(
        base(),
        &[("DATA RESOURCE", data_resource()), ("GEOEXPOSURE DATA", geoexposure())],
    )
}

pub fn population_document() -> Value {
    with(
        base(),
        &[("DATA RESOURCE", data_resource()), ("POPULATION DATA RESORCE", population())],
    )
}

pub fn key_dataset_document() -> Value {
    with(
        base(),
        &[("DATA RESOURCE", data_resource()), ("KEY DATASETS DATA", key_dataset())],
    )
}

pub fn tool_document() -> Value {
    with(base(), &[("TOOL RESOURCE", tool())])
}
