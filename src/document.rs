//! Plane documents: the typed plane tree, its JSON form, and the model that
//! owns loaded planes.

/// Column-addressed attribute access
pub mod columns;
/// Conversion between plane trees and their JSON documents
pub mod convert;
/// JSON keys
pub mod keys;
/// Loaded planes and change events
pub mod model;
/// Plane, maneuver, crew and gun nodes
pub mod types;
mod validate;

use std::io::{Read, Write};

use bon::Builder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{ErrorKind, IResult, failure_from_kind};

pub use columns::{AttrValue, Column};
pub use convert::{CrewDocument, GunDocument, ManeuverDocument, PlaneDocument};
pub use model::{ManeuverIndex, ModelEvent, PlaneModel};
pub use types::{Crew, Gun, Maneuver, ManeuverFlags, NodeKind, NodeRef, Plane, PlaneChild};

/// How forgiving plane import is.
///
/// Lenient (the default) accepts any JSON and fills gaps with defaults,
/// logging what it had to paper over. Strict requires well-typed fields and
/// rejects documents that fail [`PlaneDocument::validate`].
#[derive(Builder, Debug, Clone, Default)]
pub struct ImportOptions {
    #[builder(default)]
    strict: bool,
}

impl ImportOptions {
    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// Converts parsed JSON into a plane.
pub fn plane_from_value(
    value: &Value,
    options: &ImportOptions,
    catalog: &Catalog,
) -> IResult<Plane> {
    let document = PlaneDocument::from_value(value, options)?;

    let issues = document.validate(catalog);
    if !issues.is_empty() {
        if options.strict() {
            return Err(failure_from_kind(ErrorKind::Validation(issues)));
        }
        for issue in &issues {
            warn!("{issue}");
        }
    }

    Ok(Plane::from_document(&document))
}

pub fn read_plane<R: Read>(reader: R, options: &ImportOptions, catalog: &Catalog) -> IResult<Plane> {
    let value: Value = serde_json::from_reader(reader)?;
    plane_from_value(&value, options, catalog)
}

pub fn plane_from_str(json: &str, options: &ImportOptions, catalog: &Catalog) -> IResult<Plane> {
    let value: Value = serde_json::from_str(json)?;
    plane_from_value(&value, options, catalog)
}

pub fn write_plane<W: Write>(pretty_print: bool, plane: &Plane, writer: &mut W) -> IResult<()> {
    let document = plane.to_document();
    debug!(
        "writing plane {:?} with {} scheduled maneuvers",
        document.name,
        document.maneuvers.len()
    );

    if pretty_print {
        serde_json::to_writer_pretty(writer, &document)?;
    } else {
        serde_json::to_writer(writer, &document)?;
    }

    Ok(())
}

pub fn plane_to_string(pretty_print: bool, plane: &Plane) -> IResult<String> {
    let mut out = Vec::new();
    write_plane(pretty_print, plane, &mut out)?;
    Ok(String::from_utf8(out)?)
}
