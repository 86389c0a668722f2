//! Parsing and kind-name resolution for turret placements typed on the command line.

use std::str::FromStr;

use aimon_defence_world::Catalog;
use anyhow::{anyhow, Context, Error, Result};
use glam::Vec2;

/// Turret placement written as `x,y,kind`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlacementArg {
    pub(crate) position: Vec2,
    pub(crate) kind: String,
}

impl FromStr for PlacementArg {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let mut parts = value.splitn(3, ',');
        let (Some(x), Some(y), Some(kind)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(anyhow!("expected `x,y,kind`, got `{value}`"));
        };

        let x = x
            .trim()
            .parse::<f32>()
            .with_context(|| format!("invalid x coordinate `{x}`"))?;
        let y = y
            .trim()
            .parse::<f32>()
            .with_context(|| format!("invalid y coordinate `{y}`"))?;
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(anyhow!("missing turret kind in `{value}`"));
        }

        Ok(Self {
            position: Vec2::new(x, y),
            kind: kind.to_owned(),
        })
    }
}

/// Placement deferred until a specific frame, written as `frame:x,y,kind`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScheduledPlacement {
    pub(crate) frame: u64,
    pub(crate) placement: PlacementArg,
}

impl FromStr for ScheduledPlacement {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let (frame, placement) = value
            .split_once(':')
            .ok_or_else(|| anyhow!("expected `frame:x,y,kind`, got `{value}`"))?;
        let frame = frame
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid frame index `{frame}`"))?;

        Ok(Self {
            frame,
            placement: placement.parse()?,
        })
    }
}

/// Maps a typed kind name onto a catalog name.
///
/// A single character selects the first kind whose name starts with it; longer
/// input matches a kind name ignoring case. Input matching nothing is returned
/// unchanged so the simulation reports it as unknown.
pub(crate) fn resolve_kind(catalog: &Catalog, typed: &str) -> String {
    let typed = typed.trim();
    let lowered = typed.to_lowercase();
    let mut chars = lowered.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(first), None) => Some(first),
        _ => None,
    };

    catalog
        .iter()
        .map(|kind| kind.name())
        .find(|name| match single {
            Some(first) => name.to_lowercase().starts_with(first),
            None => name.to_lowercase() == lowered,
        })
        .unwrap_or(typed)
        .to_owned()
}
