mod common;

use cedar_accel::extract::{self, parse_document};
use cedar_accel::model::{ResourceDetail, ResourceKind};
use cedar_accel::Phase;
use serde_json::json;
use uuid::Uuid;

const CEDAR_ID: &str = "https://repo.metadatacenter.org/template-instances/abc";

#[test]
fn test_parse_geoexposure_document_populates_all_sections() {
    let document = common::geoexposure_document();

    let result = parse_document(&document, CEDAR_ID);

    assert!(result.success, "errors: {:?}", result.errors);
    assert!(result.errors.is_empty());
    assert_eq!(
        result.model.sections(),
        vec!["submission", "program", "project", "resource", "geospatial_data_resource"]
    );
    assert_eq!(result.model.kind, Some(ResourceKind::Geoexposure));

    let geo = match result.model.detail.as_ref().unwrap() {
        ResourceDetail::Geoexposure(geo) => geo,
        other => panic!("unexpected detail {:?}", other),
    };
    assert_eq!(geo.measures.selected, vec!["Air temperature"]);
    assert_eq!(geo.measures.other, vec!["Wet bulb globe"]);
    assert_eq!(geo.temporal.time_extent_start_yyyy.as_deref(), Some("2015"));
    assert_eq!(geo.temporal.time_extent_end_yyyy, None);
    assert_eq!(geo.spatial.spatial_resolution.selected, vec!["1 km"]);
    assert_eq!(geo.download.data_location, vec![Some("Portal".to_string())]);
    assert_eq!(
        geo.download.data_link,
        vec![Some("https://example.org/download".to_string())]
    );
    assert_eq!(geo.data_resource.has_api, Some(true));
    assert_eq!(geo.data_resource.update_frequency.other, vec!["On request"]);
}

#[test]
fn test_submission_comment_carries_provenance() {
    let document = common::geoexposure_document();

    let submission = extract::extract_submission(&document, CEDAR_ID).unwrap();

    assert_eq!(submission.curator_name.as_deref(), Some("Jane Curator"));
    assert_eq!(
        submission.curation_comment,
        format!("Reviewed. From CEDAR resource at: {}", CEDAR_ID)
    );
    assert_eq!(submission.template_source, CEDAR_ID);
    assert_eq!(submission.submit_location, CEDAR_ID);
}

#[test]
fn test_program_accession_falls_back_to_name() {
    let document = json!({
        "PROGRAM": {"@id": "", "Program_name": {"@value": "Climate and Health"}}
    });

    let program = extract::extract_program(&document).unwrap();

    assert_eq!(program.accession, "Climate and Health");
    assert_eq!(program.name, "Climate and Health");
}

#[test]
fn test_project_code_fills_identifiers_and_sponsor_lists() {
    let document = common::geoexposure_document();

    let project = extract::extract_project(&document).unwrap();

    assert_eq!(project.id, "PRJ-7");
    assert_eq!(project.code, "PRJ-7");
    assert_eq!(project.accession, "PRJ-7");
    assert_eq!(project.sponsor.selected, vec!["NIEHS"]);
    assert_eq!(project.sponsor.other, vec!["City Council"]);
    assert!(project.sponsor_type.other.is_empty());
    assert_eq!(project.url.as_deref(), Some("https://example.org/hep"));
}

#[test]
fn test_resource_identifier_is_preserved() {
    let document = common::geoexposure_document();

    let resource = extract::extract_resource(&document).unwrap();

    assert_eq!(resource.id, "R-100");
    assert_eq!(resource.access_type, vec!["Open"]);
    assert_eq!(resource.keywords, vec!["temperature", "heat"]);
    assert_eq!(resource.payment_required, Some(false));
    assert_eq!(resource.is_static, Some(true));
    assert_eq!(resource.use_agreement, None);
    assert_eq!(resource.use_agreement_link, None);
    assert_eq!(resource.reference_link.as_deref(), Some("https://example.org/guide"));
    assert_eq!(resource.created_datetime.as_deref(), Some("2024-01-01T10:00:00-08:00"));
}

#[test]
fn test_resource_identifier_generated_when_null() {
    let mut document = common::geoexposure_document();
    document["RESOURCE"]["resource_GUID"] = json!({"@value": null});

    let resource = extract::extract_resource(&document).unwrap();

    assert!(!resource.id.is_empty());
    assert!(Uuid::parse_str(&resource.id).is_ok());
}

#[test]
fn test_missing_program_stops_parse() {
    let mut document = common::geoexposure_document();
    document.as_object_mut().unwrap().remove("PROGRAM");
    // never reached once the program phase fails
    document["RESOURCE"]["is_static"] = json!({"@value": "sometimes"});

    let result = parse_document(&document, CEDAR_ID);

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].phase, Phase::Program);
    assert!(result.errors[0].phase.is_fatal());
    assert_eq!(result.errors[0].kind, "missing_stanza");
    assert_eq!(result.model.sections(), vec!["submission"]);
    assert!(result.message.is_some());
    assert!(result.traceback.is_some());
}

#[test]
fn test_missing_project_code_is_fatal() {
    let mut document = common::geoexposure_document();
    document["PROJECT"]["ProjecCode"] = json!({"@value": ""});

    let result = parse_document(&document, CEDAR_ID);

    assert!(!result.success);
    assert_eq!(result.errors[0].phase, Phase::Project);
    assert_eq!(result.errors[0].kind, "missing_field");
    assert_eq!(result.model.sections(), vec!["submission", "program"]);
}

#[test]
fn test_resource_failure_still_extracts_detail() {
    let mut document = common::geoexposure_document();
    document["RESOURCE"]["is_static"] = json!({"@value": "sometimes"});

    let result = parse_document(&document, CEDAR_ID);

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].phase, Phase::Resource);
    assert!(!result.errors[0].phase.is_fatal());
    assert_eq!(result.errors[0].kind, "invalid_boolean");
    assert!(result.model.resource.is_none());
    assert!(matches!(result.model.detail, Some(ResourceDetail::Geoexposure(_))));
}

#[test]
fn test_unknown_data_type_fails_parse() {
    let mut document = common::geoexposure_document();
    document.as_object_mut().unwrap().remove("GEOEXPOSURE DATA");

    let result = parse_document(&document, CEDAR_ID);

    assert!(!result.success);
    assert_eq!(result.errors[0].kind, "unknown_data_type");
    assert!(result.errors[0].message.contains("unknown data type"));
    assert!(result.model.kind.is_none());
    assert_eq!(
        result.model.sections(),
        vec!["submission", "program", "project", "resource"]
    );
}

#[test]
fn test_missing_data_resource_records_detail_failure() {
    let mut document = common::geoexposure_document();
    document["DATA RESOURCE"] = json!({});

    let result = parse_document(&document, CEDAR_ID);

    assert!(!result.success);
    assert_eq!(result.errors[0].phase, Phase::Detail);
    assert!(result.errors[0].message.contains("DATA RESOURCE"));
    assert_eq!(result.model.kind, Some(ResourceKind::Geoexposure));
    assert!(result.model.detail.is_none());
}

#[test]
fn test_detection_priority_prefers_geoexposure() {
    let mut document = common::key_dataset_document();
    document["GEOEXPOSURE DATA"] = common::geoexposure();

    assert_eq!(ResourceKind::detect(&document), Some(ResourceKind::Geoexposure));
}

#[test]
fn test_parse_population_accepts_single_resolution_objects() {
    let document = common::population_document();

    let result = parse_document(&document, CEDAR_ID);

    assert!(result.success, "errors: {:?}", result.errors);
    let pop = match result.model.detail.unwrap() {
        ResourceDetail::Population(pop) => pop,
        other => panic!("unexpected detail {:?}", other),
    };
    assert_eq!(pop.temporal.temporal_resolution.selected, vec!["Annual"]);
    assert_eq!(pop.spatial.spatial_resolution.selected, vec!["County"]);
    assert_eq!(pop.measures.other, vec!["Wheeze"]);
    assert_eq!(pop.temporal.time_extent_end_yyyy.as_deref(), Some("2010"));
    assert_eq!(pop.individual_level, Some(false));
    assert_eq!(pop.linkable_encounters, Some(true));
    assert_eq!(pop.spatial.model_methods.other, vec!["Survey weighting"]);
}

#[test]
fn test_parse_tool_document() {
    let document = common::tool_document();

    let result = parse_document(&document, CEDAR_ID);

    assert!(result.success, "errors: {:?}", result.errors);
    assert!(result.model.sections().contains(&"geospatial_tool_resource"));
    let tool = match result.model.detail.unwrap() {
        ResourceDetail::Tool(tool) => tool,
        other => panic!("unexpected detail {:?}", other),
    };
    assert_eq!(tool.operating_system.selected, vec!["Linux", "macOS"]);
    assert_eq!(tool.languages.other, vec!["Julia"]);
    assert_eq!(tool.is_open, Some(true));
}

#[test]
fn test_parse_key_dataset_document() {
    let document = common::key_dataset_document();

    let result = parse_document(&document, CEDAR_ID);

    assert!(result.success, "errors: {:?}", result.errors);
    let key = match result.model.detail.unwrap() {
        ResourceDetail::KeyDataset(key) => key,
        other => panic!("unexpected detail {:?}", other),
    };
    assert_eq!(key.measurement_method.other, vec!["Low-cost sensor"]);
    assert_eq!(key.geographic_feature.other, vec!["Ports"]);
    assert_eq!(key.temporal.time_extent_start_yyyy.as_deref(), Some("1999"));
    assert!(key.download.data_location.is_empty());
}

#[test]
fn test_process_result_serializes_model_sections() {
    let document = common::geoexposure_document();

    let result = parse_document(&document, CEDAR_ID);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["model"]["program"]["accession"], json!("PRG-1"));
    assert_eq!(value["model"]["detail"]["kind"], json!("geoexposure"));
}

#[test]
fn test_parse_paired_lists_keep_blank_slots() {
    let mut document = common::geoexposure_document();
    document["RESOURCE"]["Publication"]["publication_citation"] =
        json!([{"@value": "Doe 2020"}, {"@value": ""}]);
    document["RESOURCE"]["Publication"]["publication_link"] =
        json!([{"@id": ""}, {"@id": "https://doi.org/smith"}]);
    document["GEOEXPOSURE DATA"]["Data Download"] = json!({
        "data_location": [{"@value": null}, {"@value": "FTP"}],
        "data_link": [{}, {"@id": "ftp://example.org"}]
    });

    let result = parse_document(&document, CEDAR_ID);

    assert!(result.success, "errors: {:?}", result.errors);
    let resource = result.model.resource.as_ref().unwrap();
    assert_eq!(resource.publications, vec![Some("Doe 2020".to_string()), None]);
    assert_eq!(
        resource.publication_links,
        vec![None, Some("https://doi.org/smith".to_string())]
    );
    let geo = match result.model.detail.as_ref().unwrap() {
        ResourceDetail::Geoexposure(geo) => geo,
        other => panic!("unexpected detail {:?}", other),
    };
    assert_eq!(geo.download.data_location, vec![None, Some("FTP".to_string())]);
    assert_eq!(
        geo.download.data_link,
        vec![None, Some("ftp://example.org".to_string())]
    );
}
