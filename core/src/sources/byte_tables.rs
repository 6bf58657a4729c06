//! Byte classification tables
//!
//! Three 256-entry tables used by the URI coding routines: bytes `encodeURI` leaves
//! alone, bytes `encodeURIComponent` leaves alone, and hex digit values. They are a
//! pure function of ASCII, so this generator never touches the network.

use crate::error::GenResult;
use crate::log::TaskLog;
use crate::render::Bindings;
use crate::task::{Generator, TaskContext, TaskStatus};
use async_trait::async_trait;
use std::fmt::Display;

pub const TASK_NAME: &str = "uri_coding_excepts";
pub const DESTINATION: &str = "src/h2tp/utils/uricoding_excepts.rs";
pub const TEMPLATE: &str = "uri_encoding_excepts.rs.hbs";

/// Value stored in the hex table for bytes that are not hex digits.
pub const NOT_HEX: u8 = 16;

// https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/encodeURI
const URI_RESERVED: &str = "; , / ? : @ & = + $ - _ . ! ~ * ' ( ) #";
// https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/encodeURIComponent
const URI_COMPONENT_RESERVED: &str = "- _ . ! ~ * ' ( )";

const ROW_WIDTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteClassTables {
    pub uri: [bool; 256],
    pub uri_comp: [bool; 256],
    pub hex: [u8; 256],
}

impl ByteClassTables {
    pub fn compute() -> Self {
        let mut uri = [false; 256];
        let mut uri_comp = [false; 256];
        let mut hex = [NOT_HEX; 256];

        for b in 0u8..=127 {
            if b.is_ascii_alphanumeric() {
                uri[b as usize] = true;
                uri_comp[b as usize] = true;
            }
        }

        // The sets are space separated; the separator itself must stay escaped.
        for c in URI_RESERVED.bytes().filter(|c| *c != b' ') {
            uri[c as usize] = true;
        }
        for c in URI_COMPONENT_RESERVED.bytes().filter(|c| *c != b' ') {
            uri_comp[c as usize] = true;
        }

        for b in b'0'..=b'9' {
            hex[b as usize] = b - b'0';
        }
        for b in b'a'..=b'f' {
            hex[b as usize] = b - b'a' + 10;
        }
        for b in b'A'..=b'F' {
            hex[b as usize] = b - b'A' + 10;
        }

        Self { uri, uri_comp, hex }
    }

    pub fn bindings(&self) -> Bindings {
        Bindings::new()
            .text("uri", table_literal(&self.uri))
            .text("uri_comp", table_literal(&self.uri_comp))
            .text("hex", table_literal(&self.hex))
    }
}

/// Render a table as a Rust array literal, sixteen entries per row.
pub fn table_literal<T: Display>(values: &[T]) -> String {
    let mut out = String::from("[\n");
    for row in values.chunks(ROW_WIDTH) {
        let cells = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str("    ");
        out.push_str(&cells);
        out.push_str(",\n");
    }
    out.push(']');
    out
}

pub struct ByteTablesGenerator;

#[async_trait]
impl Generator for ByteTablesGenerator {
    fn name(&self) -> &'static str {
        TASK_NAME
    }

    // Output never changes, so there is no freshness check: regenerating is cheap and
    // byte-identical.
    async fn run(&self, ctx: &TaskContext, log: &TaskLog) -> GenResult<TaskStatus> {
        let tables = ByteClassTables::compute();
        let destination = ctx.config.destination(DESTINATION);

        ctx.renderer
            .render(&destination, TEMPLATE, &tables.bindings())
            .await?;

        log.done();
        Ok(TaskStatus::Generated { path: destination })
    }
}
