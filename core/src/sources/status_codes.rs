//! HTTP status codes scraped from MDN
//!
//! The MDN status page lists every code as `<dt><a><code>404 Not Found</code></a></dt>`.
//! Each entry becomes a [`StatusCodeRecord`] whose name is a valid Rust identifier.

use crate::error::{GenError, GenResult};
use crate::freshness::{CacheProbe, Freshness};
use crate::log::TaskLog;
use crate::render::Bindings;
use crate::task::{Generator, TaskContext, TaskStatus};
use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

pub const TASK_NAME: &str = "status_code";
pub const DESTINATION: &str = "src/h2tp/status_code.rs";
pub const TEMPLATE: &str = "status_code.rs.hbs";

const ENTRY_SELECTOR: &str = "dt a code";
const STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=599;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCodeRecord {
    pub name: String,
    pub num: u16,
    pub msg: String,
}

/// Template view of a record. `msg_literal` is the reason phrase as a quoted Rust
/// string literal.
#[derive(Debug, Serialize)]
struct StatusCodeEntry<'a> {
    name: &'a str,
    num: u16,
    msg: &'a str,
    msg_literal: String,
}

impl<'a> From<&'a StatusCodeRecord> for StatusCodeEntry<'a> {
    fn from(record: &'a StatusCodeRecord) -> Self {
        Self {
            name: &record.name,
            num: record.num,
            msg: &record.msg,
            msg_literal: format!("{:?}", record.msg),
        }
    }
}

fn non_word() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"[\s\W]+").expect("static regex"))
}

/// Identifier for a reason phrase: whitespace and punctuation removed.
pub fn normalize_name(msg: &str) -> String {
    let name = non_word().replace_all(msg, "").into_owned();
    // "I'm a teapot" collapses to an awkward token; keep the conventional spelling.
    if name == "Imateapot" {
        "ImATeapot".to_string()
    } else {
        name
    }
}

/// Turn one `"<code> <reason>"` entry into a record, or `None` if it does not look
/// like a status code.
pub fn parse_entry(content: &str) -> Option<StatusCodeRecord> {
    let (prefix, msg) = content.split_once(' ')?;
    let num: u16 = prefix.trim().parse().ok()?;
    if !STATUS_RANGE.contains(&num) {
        return None;
    }

    // Capitalised reason phrases only; this drops prose that happens to start with a
    // number.
    let first = msg.chars().next()?;
    if first.is_lowercase() {
        return None;
    }

    let name = normalize_name(msg);
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Some(StatusCodeRecord {
        name,
        num,
        msg: msg.to_string(),
    })
}

/// Text of the first child node of `element`.
fn first_child_text(element: ElementRef<'_>) -> Option<String> {
    let child = element.children().next()?;
    match child.value() {
        Node::Text(text) => Some(text.to_string()),
        Node::Element(_) => ElementRef::wrap(child).map(|el| el.text().collect()),
        _ => None,
    }
}

/// Extract every status code entry in document order. Duplicates are kept.
pub fn extract_records(html: &str) -> GenResult<Vec<StatusCodeRecord>> {
    let selector = Selector::parse(ENTRY_SELECTOR)
        .map_err(|e| anyhow::anyhow!("Invalid selector {}: {}", ENTRY_SELECTOR, e))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .filter_map(first_child_text)
        .filter_map(|content| parse_entry(&content))
        .collect())
}

/// Keep the first record for each code and for each identifier, so the generated enum
/// has neither duplicate discriminants nor duplicate variants. Returns the kept and the
/// dropped records.
pub fn dedupe_records(
    records: Vec<StatusCodeRecord>,
) -> (Vec<StatusCodeRecord>, Vec<StatusCodeRecord>) {
    let mut seen_codes = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    let mut dropped = Vec::new();

    for record in records {
        if seen_codes.contains(&record.num) || seen_names.contains(&record.name) {
            dropped.push(record);
            continue;
        }
        seen_codes.insert(record.num);
        seen_names.insert(record.name.clone());
        kept.push(record);
    }

    (kept, dropped)
}

pub fn bindings(records: &[StatusCodeRecord]) -> GenResult<Bindings> {
    let items: Vec<StatusCodeEntry<'_>> = records.iter().map(StatusCodeEntry::from).collect();
    Bindings::new().value("items", &items)
}

pub struct StatusCodeGenerator;

#[async_trait]
impl Generator for StatusCodeGenerator {
    fn name(&self) -> &'static str {
        TASK_NAME
    }

    async fn run(&self, ctx: &TaskContext, log: &TaskLog) -> GenResult<TaskStatus> {
        let config = &ctx.config;
        let destination = config.destination(DESTINATION);

        if !config.force {
            let probe = CacheProbe::new(&destination, config.freshness);
            if let Freshness::Fresh { age } = probe.probe().await {
                log.info(format!(
                    "{} is {}s old, skipping fetch",
                    destination.display(),
                    age.as_secs()
                ));
                log.done();
                return Ok(TaskStatus::Fresh { path: destination });
            }
        }

        let html = ctx.fetcher.fetch(&config.status_code_url).await?;
        let records = extract_records(&html)?;

        if records.is_empty() {
            log.warn("empty items");
            return Err(GenError::EmptyExtraction {
                url: config.status_code_url.clone(),
            });
        }

        let (records, dropped) = dedupe_records(records);
        for record in &dropped {
            log.warn(format!(
                "dropping duplicate status {} ({})",
                record.num, record.name
            ));
        }

        ctx.renderer
            .render(&destination, TEMPLATE, &bindings(&records)?)
            .await?;

        log.info(format!("{} status codes", records.len()));
        log.done();
        Ok(TaskStatus::Generated { path: destination })
    }
}
