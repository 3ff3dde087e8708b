use serde_json::Value;
use uuid::Uuid;

use super::jsonld::{Stanza, REFERENCE_KEY};
use crate::error::ExtractError;
use crate::model::{Program, Project, Resource, SubmissionInfo};

pub const SUBMITTER: &str = "SUBMITTER";
pub const PROGRAM: &str = "PROGRAM";
pub const PROJECT: &str = "PROJECT";
pub const RESOURCE: &str = "RESOURCE";

const CREATED_ON: &str = "pav:createdOn";
const LAST_UPDATED_ON: &str = "pav:lastUpdatedOn";

/// The document's own `@id`, its location in CEDAR.
pub fn document_id(document: &Value) -> Option<String> {
    document
        .get(REFERENCE_KEY)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn root_string(document: &Value, key: &str) -> Option<String> {
    document
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

pub fn extract_submission(document: &Value, cedar_id: &str) -> Result<SubmissionInfo, ExtractError> {
    let submitter = Stanza::required(document, SUBMITTER)?;
    let template_source = document_id(document).unwrap_or_else(|| cedar_id.to_string());

    let provenance = format!("From CEDAR resource at: {}", template_source);
    let curation_comment = match submitter.literal("comment")? {
        Some(comment) => format!("{} {}", comment.trim_end(), provenance),
        None => provenance,
    };

    Ok(SubmissionInfo {
        curator_name: submitter.literal("submitter_name")?,
        curator_email: submitter.literal("submitter_email")?,
        curation_comment,
        template_source,
        submit_location: cedar_id.to_string(),
    })
}

pub fn extract_program(document: &Value) -> Result<Program, ExtractError> {
    let program = Stanza::required(document, PROGRAM)?;
    let name = program.require_literal("Program_name")?;

    let accession = program
        .body()
        .get(REFERENCE_KEY)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| name.clone());

    Ok(Program { accession, name })
}

pub fn extract_project(document: &Value) -> Result<Project, ExtractError> {
    let project = Stanza::required(document, PROJECT)?;
    // "ProjecCode" is the template's spelling.
    let code = project.require_literal("ProjecCode")?;

    let mut extracted = Project {
        id: code.clone(),
        accession: code.clone(),
        code,
        name: project.literal("project_name")?,
        short_name: project.literal("project_short_name")?,
        sponsor: project.vocab("project_sponsor", "project_sponsor_other")?,
        sponsor_type: project.vocab("project_sponsor_type", "project_sponsor_type_other")?,
        url: project.reference("project_url")?,
    };
    extracted.normalize_identifiers();

    Ok(extracted)
}

pub fn extract_resource(document: &Value) -> Result<Resource, ExtractError> {
    let resource = Stanza::required(document, RESOURCE)?;

    let id = resource
        .literal("resource_GUID")?
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let (publications, publication_links) = match resource.child("Publication")? {
        Some(publication) => (
            publication.positional_literals("publication_citation")?,
            publication.positional_references("publication_link")?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    let (reference, reference_link) = match resource.child("Resource Reference_150")? {
        Some(r) => (r.literal("resource_reference")?, r.reference("resource_reference_link")?),
        None => (None, None),
    };

    let (use_agreement, use_agreement_link) = match resource.child("Resource Use Agreement_150")? {
        Some(u) => (
            u.literal("resource_use_agreement")?,
            u.reference("resource_use_agreement_link")?,
        ),
        None => (None, None),
    };

    Ok(Resource {
        id,
        resource_type: resource.literal("resource_type")?,
        name: resource.literal("resource_name")?,
        short_name: resource.literal("resource_short_name")?,
        url: resource.reference("resource_url")?,
        description: resource.literal("resource_description")?,
        domain: resource.vocab("domain", "domain_other")?,
        access_type: resource.literals("access_type")?,
        created_datetime: root_string(document, CREATED_ON),
        updated_datetime: root_string(document, LAST_UPDATED_ON),
        verification_datetime: resource.literal("date_verified")?,
        publications,
        publication_links,
        keywords: resource.literals("keywords")?,
        payment_required: resource.boolean("payment_required")?,
        reference,
        reference_link,
        use_agreement,
        use_agreement_link,
        is_static: resource.boolean("is_static")?,
    })
}
