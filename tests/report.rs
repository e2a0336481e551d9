//! Export Report Integration Tests

use chrono::{TimeZone, Utc};
use quotecheck::core::ProjectError;
use quotecheck::report::{self, Confidence, ExportReport, EXPORT_VERSION};
use quotecheck::{CandidateSource, Project, SourceKind, Verifier};

fn checked_project() -> Project {
    let mut project = Project::new(Some("Launch story".to_string())).with_transcript(
        "We achieved 85% satisfaction rates in our initial testing phase.",
    );
    project.sources.push(CandidateSource::new(
        "source-1",
        "Company blog",
        "The rollout was company-wide within a quarter of launch.",
        SourceKind::Url,
    ));
    project.draft_text = "\"We achieved 85% satisfaction rates,\" said the team.\n\n\
        The blog says the rollout \"was company\"-wide within weeks.\n\n\
        Critics said \"nobody ever said these words\"."
        .to_string();
    project.quote_matches =
        Verifier::default().verify(&project.draft_text, &project.transcript, &project.sources);
    project
}

#[test]
fn test_export_metadata_and_workflow() {
    let project = checked_project();
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    let export = ExportReport::build(&project, at).unwrap();

    assert_eq!(export.metadata.export_date, at);
    assert_eq!(export.metadata.version, EXPORT_VERSION);
    assert_eq!(export.metadata.paragraphs_count, 3);
    assert_eq!(export.metadata.sources_count, 1);
    assert_eq!(
        export.metadata.word_count,
        project.draft_text.split_whitespace().count()
    );

    assert!(export.workflow.draft_generated);
    assert!(export.workflow.quotes_checked);
    assert!(export.workflow.sources_attached);
    assert!(!export.workflow.key_points_extracted);
}

#[test]
fn test_quote_mapping_confidence() {
    let export = ExportReport::build_now(&checked_project()).unwrap();
    let mapping = &export.provenance.quote_mapping;

    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping[0].quote_id, 1);
    assert_eq!(mapping[0].source_id, "transcript");
    assert_eq!(mapping[0].confidence, Confidence::High);

    assert_eq!(mapping[1].source_id, "source-1");
    assert_eq!(mapping[1].confidence, Confidence::Approximate);

    assert!(!mapping[2].verified);
    assert_eq!(mapping[2].confidence, Confidence::None);
}

#[test]
fn test_paragraph_provenance_links_sources_by_keyword() {
    let export = ExportReport::build_now(&checked_project()).unwrap();
    let paragraphs = &export.provenance.paragraphs;

    assert_eq!(paragraphs[0].paragraph_number, 1);
    assert!(paragraphs[0].content.ends_with("..."));
    assert!(paragraphs[0].sources.is_empty());

    // "rollout" appears in the blog post
    assert_eq!(paragraphs[1].sources.len(), 1);
    assert_eq!(paragraphs[1].sources[0].id, "source-1");
    assert!(paragraphs[1].sources[0].content_sha256.is_none());
}

#[test]
fn test_export_json_shape() {
    let export = ExportReport::build_now(&checked_project()).unwrap();
    let json = serde_json::to_value(&export).unwrap();

    assert!(json["metadata"]["exportDate"].is_string());
    assert_eq!(json["project"]["sources"][0]["type"], "url");
    assert!(json["project"]["sources"][0]["contentSha256"]
        .as_str()
        .unwrap()
        .starts_with("sha256:"));
    assert_eq!(json["provenance"]["quoteMapping"][1]["confidence"], "approximate");
    assert_eq!(json["project"]["direction"]["tone"], "neutral");
}

#[test]
fn test_blank_draft_cannot_be_exported() {
    let project = Project::new(None);

    assert_eq!(
        ExportReport::build_now(&project).unwrap_err(),
        ProjectError::EmptyDraft
    );
    assert_eq!(report::markdown(&project).unwrap_err(), ProjectError::EmptyDraft);
}

#[test]
fn test_markdown_export_is_the_draft() {
    let project = checked_project();
    assert_eq!(report::markdown(&project).unwrap(), project.draft_text);
}
