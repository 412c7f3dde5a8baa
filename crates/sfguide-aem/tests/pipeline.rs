//! End-to-end tests: markdown through both stages, with the record passed
//! between them as JSON the way the CLI persists it.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use sfguide_aem::{PayloadBuilder, prepare_payloads};
use sfguide_content::{DocumentParser, ParsedRecord, parse_markdown};
use sfguide_core::{Error, FixedClock, LinkTemplate, Taxonomy};

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 2, 14, 9, 15, 0).unwrap())
}

fn via_json(record: &ParsedRecord) -> ParsedRecord {
    let json = serde_json::to_string_pretty(record).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_minimal_document_end_to_end() {
    let doc = "---\nid: demo\ntitle: Demo\ncategories: [Data Science]\n---\n![x](a.png)";
    let record = parse_markdown(doc, "abc123", "demo", "https://cdn/x").unwrap();

    assert_eq!(
        record.categories,
        "snowflake-site:taxonomy/guide-category/data-science"
    );
    assert_eq!(record.images_replaced_count, 1);
    assert_eq!(record.markdown, "![x](https://cdn/x/demo/assets/a.png)");

    let out = prepare_payloads(&via_json(&record), "/content/dam/sfguides/demo", &clock()).unwrap();

    assert_eq!(
        out.tags,
        vec!["snowflake-site:taxonomy/guide-category/data-science"]
    );
    assert!(out.content_fragment_payload.contains("./jcr:title=Demo"));
    assert!(!out.content_fragment_payload.contains("%2Fjcr%3Atitle"));
    assert!(out.content_fragment_payload.contains(
        "./data/master/quickstartArticleTags=snowflake-site:taxonomy/guide-category/data-science"
    ));
    assert!(out.content_fragment_payload.contains(
        "./data/master/quickstartArticleBody=%21%5Bx%5D%28https://cdn/x/demo/assets/a.png%29"
    ));
    assert!(
        out.content_fragment_payload
            .ends_with("&./jcr:lastModified=2025-02-14T00:00:00.000Z")
    );
    assert!(
        out.page_payload
            .contains("./jcr:content/quickStartFragmentPath=/content/dam/sfguides/demo")
    );
    assert!(
        out.page_payload
            .ends_with("&./jcr:content/customPublicationDate=2025-02-14T00:00:00.000Z")
    );
    assert_eq!(out.content_fragment_path, "/content/dam/sfguides/demo");
}

#[test]
fn test_absent_title_body_summary_are_omitted() {
    let record = ParsedRecord {
        id: "demo".to_string(),
        ..Default::default()
    };
    let out = prepare_payloads(&record, "", &clock()).unwrap();

    assert!(!out.content_fragment_payload.contains("jcr:title="));
    assert!(!out.content_fragment_payload.contains("quickstartArticleTitle"));
    assert!(!out.content_fragment_payload.contains("quickstartArticleBody"));
    assert!(!out.content_fragment_payload.contains("quickstartArticleSummary"));
    assert!(!out.page_payload.contains("quickStartFragmentPath"));
}

#[test]
fn test_realistic_quickstart() {
    let doc = "\u{feff}---
id: getting-started-with-cortex
title: Getting Started with Cortex
summary: Build an LLM app & ship it
language: EN
categories: 'Data Science, snowflake-site:taxonomy/product/ai, data science'
authors:
  - Ada Lovelace
  - Grace Hopper
author: Ada Lovelace
tags: [Getting Started, Cortex]
duration: 45
legacy_urls: https://old.example.com/a, https://old.example.com/b
---
## Overview

![architecture](./assets/architecture.png)

![logo](https://cdn.example.com/logo.png)

![step](step1.png)
";
    let record = DocumentParser::default()
        .parse(doc, "0123abcd", "getting-started-with-cortex")
        .unwrap();

    assert_eq!(record.language, "en");
    assert_eq!(record.authors, "Ada Lovelace, Grace Hopper");
    assert_eq!(record.tags, "Getting Started, Cortex");
    assert_eq!(record.duration, "45 minutes");
    assert_eq!(record.legacy_urls.len(), 2);
    assert_eq!(record.images_replaced_count, 2);
    assert!(record.markdown.contains("![logo](https://cdn.example.com/logo.png)"));

    let out = prepare_payloads(&via_json(&record), "/content/dam/cortex", &clock()).unwrap();

    // Duplicate categories collapse after normalization.
    assert_eq!(
        out.tags,
        vec![
            "snowflake-site:taxonomy/guide-category/data-science",
            "snowflake-site:taxonomy/product/ai",
        ]
    );
    // Both author entries are sent, combined authors first.
    assert!(out.content_fragment_payload.contains(
        "./data/master/quickstartArticleAuthor=Ada+Lovelace%2C+Grace+Hopper\
         &./data/master/quickstartArticleAuthor=Ada+Lovelace"
    ));
    assert!(
        out.content_fragment_payload
            .contains("./data/master/quickstartArticleSummary=Build+an+LLM+app+%26+ship+it")
    );
}

#[test]
fn test_invalid_category_rejected_in_stage_two() {
    let doc = "---\nid: demo\ncategories: snowflake-site:taxonomy/ai.ml\n---\nBody";
    let record = parse_markdown(doc, "s", "demo", "B").unwrap();

    let err = prepare_payloads(&record, "/p", &clock()).unwrap_err();
    assert!(err.is_user_input());
    assert!(err.to_string().contains("snowflake-site:taxonomy/ai.ml"));
    match err {
        Error::InvalidTags { tags, .. } => assert_eq!(tags.len(), 1),
        other => panic!("expected InvalidTags, got {other:?}"),
    }
}

#[test]
fn test_custom_conventions_across_stages() {
    let taxonomy = Taxonomy::new("acme:tags", "topics");
    let fork = LinkTemplate::new("https://git.example.com/{id}");

    let record = DocumentParser::new("https://img")
        .with_conventions(taxonomy.clone(), fork.clone())
        .parse("---\nid: intro\ncategories: [Basics]\n---\n", "s", "intro")
        .unwrap();
    let out = PayloadBuilder::new(&taxonomy, fork)
        .unwrap()
        .prepare(&record, "", &clock())
        .unwrap();

    assert_eq!(out.tags, vec!["acme:tags/topics/basics"]);
    assert!(
        out.content_fragment_payload
            .contains("quickstartArticleForkRepoLink=https://git.example.com/intro")
    );
}

#[test]
fn test_record_with_null_and_numeric_fields_still_prepares() {
    let json = r#"{
        "id": "demo",
        "title": "Demo",
        "summary": null,
        "level": 3,
        "duration": 1.5,
        "author": null,
        "categories": "snowflake-site:taxonomy/guide-category/ai",
        "markdown": "Body"
    }"#;
    let record: ParsedRecord = serde_json::from_str(json).unwrap();
    let out = prepare_payloads(&record, "/content/dam/demo", &clock()).unwrap();

    assert_eq!(out.tags, vec!["snowflake-site:taxonomy/guide-category/ai"]);
    assert!(out.content_fragment_payload.contains("./jcr:title=Demo"));
    assert!(!out.content_fragment_payload.contains("quickstartArticleSummary"));
    assert!(!out.content_fragment_payload.contains("quickstartArticleAuthor"));
    assert!(out.content_fragment_payload.contains("quickstartArticleBody=Body"));
}
